#![forbid(unsafe_code)]

use mptt_core::{Coordinates, NodeId};
use serde_json::Value;

/// Row about to be written, handed to a [`NodeValidator`].
#[derive(Clone, Copy, Debug)]
pub struct NodeCandidate<'a> {
    pub id: Option<NodeId>,
    pub parent_id: Option<NodeId>,
    pub coords: Coordinates,
    pub name: &'a str,
    pub data: &'a Value,
}

/// Caller-supplied write validation. Rejections surface as
/// `StoreError::ValidationFailed` and leave the tree untouched.
pub trait NodeValidator {
    fn validate(&self, candidate: &NodeCandidate<'_>) -> Result<(), String>;
}

impl<F> NodeValidator for F
where
    F: Fn(&NodeCandidate<'_>) -> Result<(), String>,
{
    fn validate(&self, candidate: &NodeCandidate<'_>) -> Result<(), String> {
        self(candidate)
    }
}

pub(in crate::store) fn check_candidate(
    validator: Option<&dyn NodeValidator>,
    candidate: &NodeCandidate<'_>,
) -> Result<(), String> {
    if candidate.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    if !candidate.data.is_object() {
        return Err("data must be a JSON object".to_string());
    }
    match validator {
        Some(validator) => validator.validate(candidate),
        None => Ok(()),
    }
}
