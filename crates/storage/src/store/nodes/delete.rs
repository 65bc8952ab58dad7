#![forbid(unsafe_code)]

use super::super::support::{delete_space_tx, delete_subtree_rows_tx, resolve_node_tx};
use super::super::{SqliteTreeStore, StoreError, begin_immediate};
use mptt_core::NodeId;

impl SqliteTreeStore {
    /// Removes `node` and its whole subtree, closing the gap. Returns the
    /// number of rows deleted.
    pub fn delete(&mut self, node: impl Into<NodeId>) -> Result<usize, StoreError> {
        let id = node.into();
        let tx = begin_immediate(&mut self.conn)?;
        let current = resolve_node_tx(&tx, &self.config, id)?;
        let coords = current.coords();

        let deleted = delete_subtree_rows_tx(&tx, &self.config, &coords)?;
        delete_space_tx(&tx, &self.config, coords.scope, coords.left, coords.size())?;

        tx.commit()?;
        tracing::debug!(node = %id, scope = %coords.scope, deleted, "subtree deleted");
        Ok(deleted)
    }
}
