use super::*;

fn scope(value: i64) -> ScopeId {
    ScopeId::try_new(value).unwrap()
}

fn id(value: i64) -> NodeId {
    NodeId::try_new(value).unwrap()
}

fn coords(left: i64, right: i64, level: i64) -> Coordinates {
    Coordinates {
        left,
        right,
        level,
        scope: scope(1),
    }
}

fn checked(node: i64, parent: Option<i64>, left: i64, right: i64, level: i64) -> CheckedNode {
    CheckedNode {
        id: id(node),
        parent_id: parent.map(id),
        coords: coords(left, right, level),
    }
}

#[test]
fn ids_reject_non_positive_values() {
    assert_eq!(NodeId::try_new(0).unwrap_err(), NodeIdError::NotPositive);
    assert_eq!(NodeId::try_new(-3).unwrap_err(), NodeIdError::NotPositive);
    assert_eq!(ScopeId::try_new(0).unwrap_err(), ScopeIdError::NotPositive);
    assert_eq!(id(7).get(), 7);
    assert_eq!(ScopeId::FIRST.next(), scope(2));
}

#[test]
fn size_and_descendant_count_follow_interval_width() {
    let leaf = coords(4, 5, 3);
    assert_eq!(leaf.size(), 2);
    assert_eq!(leaf.descendant_count(), 0);
    assert!(leaf.is_leaf());
    assert!(!leaf.is_root());

    let root = coords(1, 10, 1);
    assert_eq!(root.size(), 10);
    assert_eq!(root.descendant_count(), 4);
    assert!(root.has_children());
    assert!(root.is_root());
}

#[test]
fn descendant_test_compares_scopes() {
    let parent = coords(1, 10, 1);
    let inside = coords(2, 3, 2);
    assert!(inside.is_descendant_of(&parent));
    assert!(!parent.is_descendant_of(&inside));
    assert!(!parent.is_descendant_of(&parent));

    let other_scope = Coordinates {
        scope: scope(2),
        ..inside
    };
    assert!(!other_scope.is_descendant_of(&parent));
}

#[test]
fn partial_overlap_is_detected_only_within_a_scope() {
    let a = coords(1, 4, 1);
    let b = coords(3, 6, 1);
    assert!(a.partially_overlaps(&b));
    assert!(!a.partially_overlaps(&coords(2, 3, 2)));
    assert!(!a.partially_overlaps(&coords(5, 6, 1)));
    let b_elsewhere = Coordinates {
        scope: scope(9),
        ..b
    };
    assert!(!a.partially_overlaps(&b_elsewhere));
}

#[test]
fn insert_coordinates_match_placement_table() {
    let target = coords(2, 7, 2);
    let first = Placement::FirstChild.insert_coordinates(&target);
    assert_eq!((first.left, first.right, first.level), (3, 4, 3));
    let last = Placement::LastChild.insert_coordinates(&target);
    assert_eq!((last.left, last.right, last.level), (7, 8, 3));
    let prev = Placement::PrevSibling.insert_coordinates(&target);
    assert_eq!((prev.left, prev.right, prev.level), (2, 3, 2));
    let next = Placement::NextSibling.insert_coordinates(&target);
    assert_eq!((next.left, next.right, next.level), (8, 9, 2));
}

#[test]
fn move_destination_and_level_delta() {
    let target = coords(4, 9, 2);
    let moving = coords(10, 13, 3);
    assert_eq!(Placement::FirstChild.move_destination(&target), 5);
    assert_eq!(Placement::LastChild.move_destination(&target), 9);
    assert_eq!(Placement::PrevSibling.move_destination(&target), 4);
    assert_eq!(Placement::NextSibling.move_destination(&target), 10);

    assert_eq!(Placement::FirstChild.level_delta(&moving, &target), 0);
    assert_eq!(Placement::NextSibling.level_delta(&moving, &target), -1);
    assert!(Placement::LastChild.allows_root_target());
    assert!(!Placement::PrevSibling.allows_root_target());
}

#[test]
fn plan_layout_orders_children_by_stored_left() {
    // root(1) -> [b(3) stored first, a(2)], a -> [c(4)]
    let entries = [
        LayoutEntry {
            id: id(1),
            parent_id: None,
            left: 1,
        },
        LayoutEntry {
            id: id(2),
            parent_id: Some(id(1)),
            left: 40,
        },
        LayoutEntry {
            id: id(3),
            parent_id: Some(id(1)),
            left: 7,
        },
        LayoutEntry {
            id: id(4),
            parent_id: Some(id(2)),
            left: 0,
        },
    ];
    let plan = plan_layout(&entries, id(1), 1, 1);
    let got: Vec<(i64, i64, i64, i64)> = plan
        .assignments
        .iter()
        .map(|p| (p.id.get(), p.left, p.right, p.level))
        .collect();
    assert_eq!(
        got,
        vec![(1, 1, 8, 1), (3, 2, 3, 2), (2, 4, 7, 2), (4, 5, 6, 3)]
    );
    assert_eq!(plan.next_left, 9);
}

#[test]
fn plan_layout_ties_break_on_id_and_skips_unreachable_rows() {
    let entries = [
        LayoutEntry {
            id: id(5),
            parent_id: None,
            left: 1,
        },
        LayoutEntry {
            id: id(9),
            parent_id: Some(id(5)),
            left: 2,
        },
        LayoutEntry {
            id: id(6),
            parent_id: Some(id(5)),
            left: 2,
        },
        LayoutEntry {
            id: id(8),
            parent_id: Some(id(77)),
            left: 3,
        },
    ];
    let plan = plan_layout(&entries, id(5), 10, 2);
    let order: Vec<i64> = plan.assignments.iter().map(|p| p.id.get()).collect();
    assert_eq!(order, vec![5, 6, 9]);
    assert_eq!(plan.assignments[0].left, 10);
    assert_eq!(plan.assignments[0].right, 15);
    assert_eq!(plan.assignments[1].level, 3);
    assert_eq!(plan.next_left, 16);
}

#[test]
fn check_scope_accepts_canonical_tree() {
    let nodes = [
        checked(1, None, 1, 8, 1),
        checked(2, Some(1), 2, 5, 2),
        checked(3, Some(2), 3, 4, 3),
        checked(4, Some(1), 6, 7, 2),
    ];
    assert!(check_scope(&nodes).is_empty());
    assert!(check_scope(&[]).is_empty());
}

#[test]
fn check_scope_reports_overlap_gap_and_parent_errors() {
    let nodes = [
        checked(1, None, 1, 10, 1),
        checked(2, Some(1), 2, 5, 2),
        checked(3, Some(1), 4, 7, 2),
    ];
    let violations = check_scope(&nodes);
    assert!(violations.contains(&InvariantViolation::PartialOverlap {
        first: id(2),
        second: id(3),
    }));
    assert!(violations.contains(&InvariantViolation::CoordinateGap { missing: 3 }));

    let wrong_parent = [
        checked(1, None, 1, 6, 1),
        checked(2, Some(1), 2, 5, 2),
        checked(3, Some(1), 3, 4, 3),
    ];
    assert_eq!(
        check_scope(&wrong_parent),
        vec![InvariantViolation::ParentMismatch {
            id: id(3),
            expected: Some(id(2)),
            stored: Some(id(1)),
        }]
    );
}

#[test]
fn check_scope_reports_root_problems() {
    let no_root = [checked(1, None, 2, 3, 1)];
    let violations = check_scope(&no_root);
    assert!(violations.contains(&InvariantViolation::MissingRoot));

    let two_roots = [checked(1, None, 1, 2, 1), checked(2, None, 1, 4, 1)];
    assert!(check_scope(&two_roots).contains(&InvariantViolation::MultipleRoots {
        ids: vec![id(1), id(2)],
    }));

    let bad_root = [checked(1, Some(4), 1, 2, 2)];
    assert!(check_scope(&bad_root).contains(&InvariantViolation::RootShape { id: id(1) }));
}
