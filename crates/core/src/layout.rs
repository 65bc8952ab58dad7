#![forbid(unsafe_code)]

use crate::coords::Coordinates;
use crate::ids::NodeId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

/// Adjacency input for the canonical layout planner. `left` is the stored
/// (possibly corrupted) coordinate, used only to order siblings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutEntry {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub left: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedCoordinates {
    pub id: NodeId,
    pub left: i64,
    pub right: i64,
    pub level: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Pre-order: the subtree root first.
    pub assignments: Vec<PlannedCoordinates>,
    /// First coordinate after the subtree root's right edge.
    pub next_left: i64,
}

/// Numbers the subtree rooted at `root` from `parent_id` links alone.
///
/// Children are visited by their stored `left`, ties broken by id, so the
/// existing sibling order survives a rebuild. Entries not reachable from
/// `root` are left out of the plan.
pub fn plan_layout(
    entries: &[LayoutEntry],
    root: NodeId,
    start_left: i64,
    root_level: i64,
) -> LayoutPlan {
    let mut children: HashMap<NodeId, Vec<&LayoutEntry>> = HashMap::new();
    for entry in entries {
        if let Some(parent_id) = entry.parent_id
            && parent_id != entry.id
        {
            children.entry(parent_id).or_default().push(entry);
        }
    }
    for list in children.values_mut() {
        list.sort_by_key(|entry| (entry.left, entry.id));
    }

    enum Frame {
        Enter(NodeId, i64),
        Exit(usize),
    }

    let mut assignments: Vec<PlannedCoordinates> = Vec::new();
    let mut visited = HashSet::new();
    let mut counter = start_left;
    let mut stack = vec![Frame::Enter(root, root_level)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id, level) => {
                if !visited.insert(id) {
                    continue;
                }
                let index = assignments.len();
                assignments.push(PlannedCoordinates {
                    id,
                    left: counter,
                    right: counter,
                    level,
                });
                counter += 1;
                stack.push(Frame::Exit(index));
                if let Some(list) = children.get(&id) {
                    for child in list.iter().rev() {
                        stack.push(Frame::Enter(child.id, level + 1));
                    }
                }
            }
            Frame::Exit(index) => {
                assignments[index].right = counter;
                counter += 1;
            }
        }
    }

    LayoutPlan {
        assignments,
        next_left: counter,
    }
}

/// One persisted row as seen by [`check_scope`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckedNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub coords: Coordinates,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    MixedScopes,
    InvertedInterval {
        id: NodeId,
    },
    OddSize {
        id: NodeId,
        size: i64,
    },
    PartialOverlap {
        first: NodeId,
        second: NodeId,
    },
    MissingRoot,
    MultipleRoots {
        ids: Vec<NodeId>,
    },
    RootShape {
        id: NodeId,
    },
    DuplicateCoordinate {
        value: i64,
    },
    CoordinateGap {
        missing: i64,
    },
    ParentMismatch {
        id: NodeId,
        expected: Option<NodeId>,
        stored: Option<NodeId>,
    },
    LevelMismatch {
        id: NodeId,
        expected: i64,
        stored: i64,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MixedScopes => write!(f, "rows from more than one scope"),
            Self::InvertedInterval { id } => write!(f, "node {id}: left >= right"),
            Self::OddSize { id, size } => write!(f, "node {id}: odd interval size {size}"),
            Self::PartialOverlap { first, second } => {
                write!(f, "nodes {first} and {second} partially overlap")
            }
            Self::MissingRoot => write!(f, "no node with left = 1"),
            Self::MultipleRoots { ids } => write!(f, "{} nodes with left = 1", ids.len()),
            Self::RootShape { id } => {
                write!(f, "root {id}: must have level 1 and no parent")
            }
            Self::DuplicateCoordinate { value } => write!(f, "coordinate {value} used twice"),
            Self::CoordinateGap { missing } => write!(f, "coordinate {missing} unused"),
            Self::ParentMismatch {
                id,
                expected,
                stored,
            } => write!(
                f,
                "node {id}: parent_id={} but enclosing node is {}",
                display_parent(*stored),
                display_parent(*expected)
            ),
            Self::LevelMismatch {
                id,
                expected,
                stored,
            } => write!(f, "node {id}: level={stored}, depth is {expected}"),
        }
    }
}

fn display_parent(value: Option<NodeId>) -> String {
    match value {
        Some(id) => id.to_string(),
        None => "null".to_string(),
    }
}

/// Checks every structural invariant of one scope. An empty scope is valid.
pub fn check_scope(nodes: &[CheckedNode]) -> Vec<InvariantViolation> {
    let mut out = Vec::new();
    let Some(first) = nodes.first() else {
        return out;
    };
    if nodes.iter().any(|node| node.coords.scope != first.coords.scope) {
        out.push(InvariantViolation::MixedScopes);
        return out;
    }

    let mut sorted: Vec<&CheckedNode> = nodes.iter().collect();
    sorted.sort_by_key(|node| (node.coords.left, node.id));

    for node in &sorted {
        if node.coords.left >= node.coords.right {
            out.push(InvariantViolation::InvertedInterval { id: node.id });
        } else if node.coords.size() % 2 != 0 {
            out.push(InvariantViolation::OddSize {
                id: node.id,
                size: node.coords.size(),
            });
        }
    }

    let roots: Vec<NodeId> = sorted
        .iter()
        .filter(|node| node.coords.is_root())
        .map(|node| node.id)
        .collect();
    match roots.len() {
        0 => out.push(InvariantViolation::MissingRoot),
        1 => {}
        _ => out.push(InvariantViolation::MultipleRoots { ids: roots }),
    }
    for node in &sorted {
        if node.coords.is_root() && (node.parent_id.is_some() || node.coords.level != 1) {
            out.push(InvariantViolation::RootShape { id: node.id });
        }
    }

    check_contiguous(&sorted, &mut out);
    check_nesting(&sorted, &mut out);
    out
}

fn check_contiguous(sorted: &[&CheckedNode], out: &mut Vec<InvariantViolation>) {
    let mut seen: BTreeMap<i64, usize> = BTreeMap::new();
    for node in sorted {
        *seen.entry(node.coords.left).or_default() += 1;
        *seen.entry(node.coords.right).or_default() += 1;
    }
    for (value, count) in &seen {
        if *count > 1 {
            out.push(InvariantViolation::DuplicateCoordinate { value: *value });
        }
    }
    let expected_max = i64::try_from(sorted.len()).unwrap_or(i64::MAX / 2) * 2;
    let used: BTreeSet<i64> = seen.keys().copied().collect();
    for missing in (1..=expected_max).filter(|value| !used.contains(value)) {
        out.push(InvariantViolation::CoordinateGap { missing });
    }
}

fn check_nesting(sorted: &[&CheckedNode], out: &mut Vec<InvariantViolation>) {
    let mut open: Vec<&CheckedNode> = Vec::new();
    for node in sorted {
        if node.coords.left >= node.coords.right {
            continue;
        }
        while open
            .last()
            .is_some_and(|top| top.coords.right < node.coords.left)
        {
            open.pop();
        }
        if let Some(top) = open.last()
            && top.coords.partially_overlaps(&node.coords)
        {
            out.push(InvariantViolation::PartialOverlap {
                first: top.id,
                second: node.id,
            });
            continue;
        }

        if !node.coords.is_root() {
            let expected_parent = open.last().map(|top| top.id);
            if expected_parent != node.parent_id {
                out.push(InvariantViolation::ParentMismatch {
                    id: node.id,
                    expected: expected_parent,
                    stored: node.parent_id,
                });
            }
            let depth = i64::try_from(open.len()).unwrap_or(i64::MAX - 1) + 1;
            if depth != node.coords.level {
                out.push(InvariantViolation::LevelMismatch {
                    id: node.id,
                    expected: depth,
                    stored: node.coords.level,
                });
            }
        }
        open.push(node);
    }
}
