#![forbid(unsafe_code)]

use mptt_storage::{
    AncestorQuery, DescendantQuery, NewNode, Node, SortDirection, SqliteTreeStore,
};
use serde_json::json;

struct Fixture {
    store: SqliteTreeStore,
    root: Node,
    a: Node,
    a1: Node,
    a2: Node,
    b: Node,
}

/// root
/// ├── a
/// │   ├── a1
/// │   └── a2
/// └── b
fn fixture() -> Fixture {
    let mut store = SqliteTreeStore::open_in_memory().expect("open store");
    let root = store
        .make_root(NewNode::named("root"), None)
        .expect("make root");
    let a = store
        .insert_as_last_child(NewNode::named("a"), &root)
        .expect("insert a");
    let b = store
        .insert_as_last_child(NewNode::named("b"), &root)
        .expect("insert b");
    let a1 = store
        .insert_as_last_child(NewNode::named("a1").with_data(json!({"rank": 1})), &a)
        .expect("insert a1");
    let a2 = store
        .insert_as_last_child(NewNode::named("a2"), &a)
        .expect("insert a2");

    let fresh = |node: &Node| store.resolve(node).expect("resolve");
    let (root, a, a1, a2, b) = (fresh(&root), fresh(&a), fresh(&a1), fresh(&a2), fresh(&b));
    Fixture {
        store,
        root,
        a,
        a1,
        a2,
        b,
    }
}

fn names(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|node| node.name.as_str()).collect()
}

#[test]
fn fixture_has_canonical_coordinates() {
    let f = fixture();
    assert_eq!((f.root.left, f.root.right), (1, 10));
    assert_eq!((f.a.left, f.a.right), (2, 7));
    assert_eq!((f.a1.left, f.a1.right), (3, 4));
    assert_eq!((f.a2.left, f.a2.right), (5, 6));
    assert_eq!((f.b.left, f.b.right), (8, 9));
    assert_eq!(f.root.descendant_count(), 4);
    assert!(f.a1.is_descendant_of(&f.root));
    assert!(f.a1.is_child_of(&f.a));
    assert!(f.a.is_parent_of(&f.a2));
    assert!(f.a.is_sibling_of(&f.b));
    assert!(!f.a.is_descendant_of(&f.b));
    assert!(f.b.is_leaf() && f.a.has_children());
}

#[test]
fn ancestors_honour_every_flag() {
    let f = fixture();
    let store = &f.store;

    let all = store
        .ancestors(&f.a2, AncestorQuery::default())
        .expect("ancestors");
    assert_eq!(names(&all), vec!["root", "a"]);

    let without_root = store
        .ancestors(
            &f.a2,
            AncestorQuery {
                include_root: false,
                ..AncestorQuery::default()
            },
        )
        .expect("ancestors");
    assert_eq!(names(&without_root), vec!["a"]);

    let with_self_desc = store
        .ancestors(
            &f.a2,
            AncestorQuery {
                include_self: true,
                direction: SortDirection::Desc,
                ..AncestorQuery::default()
            },
        )
        .expect("ancestors");
    assert_eq!(names(&with_self_desc), vec!["a2", "a", "root"]);

    let direct = store
        .ancestors(
            &f.a2,
            AncestorQuery {
                direct_only: true,
                ..AncestorQuery::default()
            },
        )
        .expect("ancestors");
    assert_eq!(names(&direct), vec!["a"]);

    assert!(
        store
            .ancestors(&f.root, AncestorQuery::default())
            .expect("ancestors")
            .is_empty()
    );
    assert_eq!(store.parent(&f.a1).expect("parent").map(|n| n.id), Some(f.a.id));
    assert!(store.parent(&f.root).expect("parent").is_none());
}

#[test]
fn descendants_honour_every_flag() {
    let f = fixture();
    let store = &f.store;

    let all = store
        .descendants(&f.root, DescendantQuery::default())
        .expect("descendants");
    assert_eq!(names(&all), vec!["a", "a1", "a2", "b"]);
    assert_eq!(all.len() as i64, f.root.descendant_count());

    let reversed = store
        .descendants(
            &f.root,
            DescendantQuery {
                include_self: true,
                direction: SortDirection::Desc,
                ..DescendantQuery::default()
            },
        )
        .expect("descendants");
    assert_eq!(names(&reversed), vec!["b", "a2", "a1", "a", "root"]);

    let direct_with_self = store
        .descendants(
            &f.root,
            DescendantQuery {
                include_self: true,
                direct_children_only: true,
                ..DescendantQuery::default()
            },
        )
        .expect("descendants");
    assert_eq!(names(&direct_with_self), vec!["root", "a", "b"]);

    let limited = store
        .descendants(
            &f.root,
            DescendantQuery {
                limit: Some(2),
                ..DescendantQuery::default()
            },
        )
        .expect("descendants");
    assert_eq!(names(&limited), vec!["a", "a1"]);

    let leaves = store
        .leaves(&f.root, false, SortDirection::Asc)
        .expect("leaves");
    assert_eq!(names(&leaves), vec!["b"]);
    let leaf_children = store
        .leaves(&f.a, false, SortDirection::Desc)
        .expect("leaves");
    assert_eq!(names(&leaf_children), vec!["a2", "a1"]);
    let deep_leaves = store
        .descendants(
            &f.root,
            DescendantQuery {
                leaves_only: true,
                ..DescendantQuery::default()
            },
        )
        .expect("descendants");
    assert_eq!(names(&deep_leaves), vec!["a1", "a2", "b"]);
    let leaf_self = store
        .leaves(&f.b, true, SortDirection::Asc)
        .expect("leaves");
    assert_eq!(names(&leaf_self), vec!["b"]);
}

#[test]
fn children_and_edges() {
    let f = fixture();
    let store = &f.store;

    let children = store
        .children(&f.root, false, SortDirection::Asc, None)
        .expect("children");
    assert_eq!(names(&children), vec!["a", "b"]);
    assert_eq!(
        store.first_child(&f.a).expect("first child").map(|n| n.name),
        Some("a1".to_string())
    );
    assert_eq!(
        store.last_child(&f.a).expect("last child").map(|n| n.name),
        Some("a2".to_string())
    );
    assert!(store.first_child(&f.b).expect("first child").is_none());
}

#[test]
fn siblings_of_roots_and_children() {
    let f = fixture();
    let store = &f.store;

    let others = store
        .siblings(&f.a1, false, SortDirection::Asc)
        .expect("siblings");
    assert_eq!(names(&others), vec!["a2"]);
    let with_self = store
        .siblings(&f.a2, true, SortDirection::Desc)
        .expect("siblings");
    assert_eq!(names(&with_self), vec!["a2", "a1"]);

    assert!(
        store
            .siblings(&f.root, false, SortDirection::Asc)
            .expect("siblings")
            .is_empty()
    );
    let root_only = store
        .siblings(&f.root, true, SortDirection::Asc)
        .expect("siblings");
    assert_eq!(names(&root_only), vec!["root"]);

    assert_eq!(
        store.prev_sibling(&f.b).expect("prev").map(|n| n.id),
        Some(f.a.id)
    );
    assert_eq!(
        store.next_sibling(&f.a).expect("next").map(|n| n.id),
        Some(f.b.id)
    );
    assert!(store.next_sibling(&f.b).expect("next").is_none());
    assert!(store.prev_sibling(&f.a1).expect("prev").is_none());
}

#[test]
fn forest_views_cover_every_scope() {
    let mut f = fixture();
    let other = f
        .store
        .make_root(NewNode::named("other"), None)
        .expect("second root");
    let store = &f.store;

    let roots = store.roots().expect("roots");
    assert_eq!(names(&roots), vec!["root", "other"]);
    assert_eq!(
        store.root(other.scope).expect("root").map(|n| n.id),
        Some(other.id)
    );

    let forest = store.full_tree(None).expect("full tree");
    assert_eq!(names(&forest), vec!["root", "a", "a1", "a2", "b", "other"]);
    assert_eq!(store.count_nodes(None).expect("count"), 6);
    assert_eq!(store.count_nodes(Some(other.scope)).expect("count"), 1);

    let labels: Vec<String> = store
        .select_list(f.root.scope, Some("-"))
        .expect("select list")
        .into_iter()
        .map(|(_, label)| label)
        .collect();
    assert_eq!(labels, vec!["-root", "--a", "---a1", "---a2", "--b"]);
    let plain = store.select_list(f.root.scope, None).expect("select list");
    assert_eq!(plain[1], (f.a.id, "a".to_string()));
}

#[test]
fn nested_tree_serializes_to_json() {
    let f = fixture();
    let nested = f
        .store
        .nested_tree(f.root.scope)
        .expect("nested")
        .expect("scope has a root");
    let value = serde_json::to_value(&nested).expect("serialize");

    assert_eq!(value["name"], "root");
    assert_eq!(value["children"][0]["name"], "a");
    assert_eq!(value["children"][0]["children"][0]["data"]["rank"], 1);
    assert_eq!(value["children"][1]["name"], "b");
    assert_eq!(value["children"][1]["children"], json!([]));
}
