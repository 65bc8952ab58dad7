#![forbid(unsafe_code)]

use super::super::support::{load_node_tx, resolve_node_tx};
use super::super::{Node, SqliteTreeStore, StoreError};
use mptt_core::NodeId;

impl SqliteTreeStore {
    pub fn get(&self, id: NodeId) -> Result<Option<Node>, StoreError> {
        load_node_tx(&self.conn, &self.config, id)
    }

    /// Fresh read of `node`; `NotFound` when the row is gone.
    pub fn resolve(&self, node: impl Into<NodeId>) -> Result<Node, StoreError> {
        resolve_node_tx(&self.conn, &self.config, node.into())
    }
}
