#![forbid(unsafe_code)]

pub mod coords;
pub mod ids;
pub mod layout;
pub mod placement;

pub use coords::{Coordinates, SortDirection};
pub use ids::{NodeId, NodeIdError, ScopeId, ScopeIdError};
pub use layout::{
    CheckedNode, InvariantViolation, LayoutEntry, LayoutPlan, PlannedCoordinates, check_scope,
    plan_layout,
};
pub use placement::{AnchorEdge, Placement};

#[cfg(test)]
mod tests;
