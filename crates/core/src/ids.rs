#![forbid(unsafe_code)]

use std::fmt;

/// Primary key of a persisted tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(i64);

impl NodeId {
    pub fn get(self) -> i64 {
        self.0
    }

    pub fn try_new(value: i64) -> Result<Self, NodeIdError> {
        if value <= 0 {
            return Err(NodeIdError::NotPositive);
        }
        Ok(Self(value))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeIdError {
    NotPositive,
}

impl NodeIdError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotPositive => "node id must be a positive integer",
        }
    }
}

/// Partition identifier: every scope holds exactly one independent tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(i64);

impl ScopeId {
    pub const FIRST: ScopeId = ScopeId(1);

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn try_new(value: i64) -> Result<Self, ScopeIdError> {
        if value <= 0 {
            return Err(ScopeIdError::NotPositive);
        }
        Ok(Self(value))
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeIdError {
    NotPositive,
}

impl ScopeIdError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotPositive => "scope must be a positive integer",
        }
    }
}
