#![forbid(unsafe_code)]

use super::super::support::{resolve_node_tx, update_node_attrs_tx};
use super::super::{Node, NodeUpdate, SqliteTreeStore, StoreError, begin_immediate, now_ms};
use mptt_core::NodeId;

impl SqliteTreeStore {
    /// Edits the name and payload of a node. Coordinates are never touched.
    pub fn update_node(
        &mut self,
        node: impl Into<NodeId>,
        update: NodeUpdate,
    ) -> Result<Node, StoreError> {
        if update.name.is_none() && update.data.is_none() {
            return Err(StoreError::InvalidInput("no fields to update"));
        }
        let id = node.into();
        let now_ms = now_ms();
        let tx = begin_immediate(&mut self.conn)?;

        let mut current = resolve_node_tx(&tx, &self.config, id)?;
        if let Some(name) = update.name {
            current.name = name;
        }
        if let Some(data) = update.data {
            current.data = data;
        }
        update_node_attrs_tx(
            &tx,
            &self.config,
            self.validator.as_deref(),
            &current,
            now_ms,
        )?;

        let updated = resolve_node_tx(&tx, &self.config, id)?;
        tx.commit()?;
        tracing::debug!(node = %id, "node updated");
        Ok(updated)
    }
}
