#![forbid(unsafe_code)]

use super::support::{next_scope_tx, scope_available_tx};
use super::{SqliteTreeStore, StoreError};
use mptt_core::ScopeId;

impl SqliteTreeStore {
    /// Scope a new root would get right now: one past the largest in use.
    pub fn next_scope(&self) -> Result<ScopeId, StoreError> {
        next_scope_tx(&self.conn, &self.config)
    }

    pub fn scope_available(&self, scope: ScopeId) -> Result<bool, StoreError> {
        scope_available_tx(&self.conn, &self.config, scope)
    }
}
