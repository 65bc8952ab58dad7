#![forbid(unsafe_code)]

use super::{SqliteTreeStore, StoreError};
use mptt_core::{CheckedNode, InvariantViolation, ScopeId, check_scope};

impl SqliteTreeStore {
    /// Audits one scope against the nested-set invariants. An empty result
    /// means the scope is consistent.
    pub fn verify_scope(&self, scope: ScopeId) -> Result<Vec<InvariantViolation>, StoreError> {
        let rows: Vec<CheckedNode> = self
            .full_tree(Some(scope))?
            .iter()
            .map(|node| CheckedNode {
                id: node.id,
                parent_id: node.parent_id,
                coords: node.coords(),
            })
            .collect();
        let violations = check_scope(&rows);
        if let Some(first) = violations.first() {
            tracing::warn!(
                scope = %scope,
                count = violations.len(),
                first = %first,
                "scope failed verification"
            );
        }
        Ok(violations)
    }
}
