#![forbid(unsafe_code)]

use super::super::support::{
    LEAF_WIDTH, create_space_tx, delete_space_tx, insert_node_row_tx, node_exists_tx,
    resolve_node_tx,
};
use super::super::{NewNode, Node, SqliteTreeStore, StoreError, begin_immediate, now_ms};
use mptt_core::{NodeId, Placement};

impl SqliteTreeStore {
    /// Inserts a new leaf relative to `target`.
    pub fn insert(
        &mut self,
        node: NewNode,
        target: impl Into<NodeId>,
        placement: Placement,
    ) -> Result<Node, StoreError> {
        let target_id = target.into();
        let now_ms = now_ms();
        let tx = begin_immediate(&mut self.conn)?;

        if let Some(id) = node.id
            && node_exists_tx(&tx, &self.config, id)?
        {
            return Err(StoreError::InvalidOperation("node is already persisted"));
        }

        let target = resolve_node_tx(&tx, &self.config, target_id)?;
        if !placement.allows_root_target() && target.is_root() {
            return Err(StoreError::InvalidOperation("a root node has no siblings"));
        }

        let coords = placement.insert_coordinates(&target.coords());
        let parent_id = if placement.is_child_slot() {
            Some(target.id)
        } else {
            target.parent_id
        };

        create_space_tx(&tx, &self.config, coords.scope, coords.left, LEAF_WIDTH)?;
        let inserted = insert_node_row_tx(
            &tx,
            &self.config,
            self.validator.as_deref(),
            &node,
            parent_id,
            coords,
            now_ms,
        );
        let id = match inserted {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(
                    scope = %coords.scope,
                    left = coords.left,
                    error = %err,
                    "insert rejected, closing gap"
                );
                delete_space_tx(&tx, &self.config, coords.scope, coords.left, LEAF_WIDTH)?;
                return Err(err);
            }
        };

        let created = resolve_node_tx(&tx, &self.config, id)?;
        tx.commit()?;
        tracing::debug!(
            node = %created.id,
            target = %target.id,
            placement = placement.as_str(),
            scope = %created.scope,
            left = created.left,
            "node inserted"
        );
        Ok(created)
    }

    pub fn insert_as_first_child(
        &mut self,
        node: NewNode,
        target: impl Into<NodeId>,
    ) -> Result<Node, StoreError> {
        self.insert(node, target, Placement::FirstChild)
    }

    pub fn insert_as_last_child(
        &mut self,
        node: NewNode,
        target: impl Into<NodeId>,
    ) -> Result<Node, StoreError> {
        self.insert(node, target, Placement::LastChild)
    }

    pub fn insert_as_prev_sibling(
        &mut self,
        node: NewNode,
        target: impl Into<NodeId>,
    ) -> Result<Node, StoreError> {
        self.insert(node, target, Placement::PrevSibling)
    }

    pub fn insert_as_next_sibling(
        &mut self,
        node: NewNode,
        target: impl Into<NodeId>,
    ) -> Result<Node, StoreError> {
        self.insert(node, target, Placement::NextSibling)
    }
}
