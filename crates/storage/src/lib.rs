#![forbid(unsafe_code)]

mod store;

pub use mptt_core::{
    Coordinates, InvariantViolation, NodeId, Placement, ScopeId, SortDirection,
};
pub use store::*;
