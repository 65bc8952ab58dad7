#![forbid(unsafe_code)]

use mptt_core::{Coordinates, NodeId, ScopeId, SortDirection};
use serde::Serialize;
use serde_json::Value;

/// A persisted tree row. Handles are snapshots: mutation entry points always
/// re-read the row by id before touching coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub left: i64,
    pub right: i64,
    pub level: i64,
    pub scope: ScopeId,
    pub name: String,
    pub data: Value,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl Node {
    pub fn coords(&self) -> Coordinates {
        Coordinates {
            left: self.left,
            right: self.right,
            level: self.level,
            scope: self.scope,
        }
    }

    pub fn size(&self) -> i64 {
        self.coords().size()
    }

    pub fn descendant_count(&self) -> i64 {
        self.coords().descendant_count()
    }

    pub fn is_root(&self) -> bool {
        self.coords().is_root()
    }

    pub fn is_leaf(&self) -> bool {
        self.coords().is_leaf()
    }

    pub fn has_children(&self) -> bool {
        self.coords().has_children()
    }

    pub fn is_descendant_of(&self, other: &Node) -> bool {
        self.coords().is_descendant_of(&other.coords())
    }

    pub fn is_child_of(&self, other: &Node) -> bool {
        self.parent_id == Some(other.id)
    }

    pub fn is_parent_of(&self, other: &Node) -> bool {
        other.parent_id == Some(self.id)
    }

    pub fn is_sibling_of(&self, other: &Node) -> bool {
        self.id != other.id && self.parent_id == other.parent_id && self.scope == other.scope
    }
}

impl From<&Node> for NodeId {
    fn from(value: &Node) -> Self {
        value.id
    }
}

/// Payload of a node that does not exist yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewNode {
    /// Explicit primary key; `None` lets the store assign one.
    pub id: Option<NodeId>,
    pub name: String,
    pub data: Value,
}

impl NewNode {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            data: Value::Object(Default::default()),
        }
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeUpdate {
    pub name: Option<String>,
    pub data: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AncestorQuery {
    pub include_root: bool,
    pub include_self: bool,
    pub direction: SortDirection,
    pub direct_only: bool,
}

impl Default for AncestorQuery {
    fn default() -> Self {
        Self {
            include_root: true,
            include_self: false,
            direction: SortDirection::Asc,
            direct_only: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DescendantQuery {
    pub include_self: bool,
    pub direction: SortDirection,
    pub direct_children_only: bool,
    pub leaves_only: bool,
    pub limit: Option<usize>,
}

/// Serializable nested rendering of one scope.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NestedNode {
    pub id: i64,
    pub name: String,
    pub level: i64,
    pub left: i64,
    pub right: i64,
    pub data: Value,
    pub children: Vec<NestedNode>,
}
