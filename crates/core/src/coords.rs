#![forbid(unsafe_code)]

use crate::ids::ScopeId;

/// Nested-set position of one node: the `[left, right]` interval, its depth
/// and the scope the interval lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coordinates {
    pub left: i64,
    pub right: i64,
    pub level: i64,
    pub scope: ScopeId,
}

impl Coordinates {
    pub fn root(scope: ScopeId) -> Self {
        Self {
            left: 1,
            right: 2,
            level: 1,
            scope,
        }
    }

    pub fn leaf(left: i64, level: i64, scope: ScopeId) -> Self {
        Self {
            left,
            right: left + 1,
            level,
            scope,
        }
    }

    /// Width of the interval; always even for a well-formed node.
    pub fn size(&self) -> i64 {
        self.right - self.left + 1
    }

    pub fn descendant_count(&self) -> i64 {
        (self.size() - 2) / 2
    }

    pub fn has_children(&self) -> bool {
        self.size() > 2
    }

    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    pub fn is_root(&self) -> bool {
        self.left == 1
    }

    /// Strict containment inside the same scope.
    pub fn contains(&self, other: &Coordinates) -> bool {
        other.left > self.left && other.right < self.right && other.scope == self.scope
    }

    pub fn is_descendant_of(&self, other: &Coordinates) -> bool {
        other.contains(self)
    }

    /// Two intervals of one scope that share coordinates without nesting.
    pub fn partially_overlaps(&self, other: &Coordinates) -> bool {
        if self.scope != other.scope {
            return false;
        }
        let disjoint = self.right < other.left || other.right < self.left;
        let nested = (self.left <= other.left && other.right <= self.right)
            || (other.left <= self.left && self.right <= other.right);
        !disjoint && !nested
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}
