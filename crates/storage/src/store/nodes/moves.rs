#![forbid(unsafe_code)]

use super::super::support::{
    create_space_tx, delete_space_tx, resolve_node_tx, shift_subtree_tx, update_node_attrs_tx,
};
use super::super::{Node, SqliteTreeStore, StoreError, begin_immediate, now_ms};
use mptt_core::{NodeId, Placement};

impl SqliteTreeStore {
    /// Relocates the subtree of `node` relative to `target`, possibly into
    /// another scope. The moved subtree keeps its shape and sibling order.
    pub fn move_node(
        &mut self,
        node: impl Into<NodeId>,
        target: impl Into<NodeId>,
        placement: Placement,
    ) -> Result<Node, StoreError> {
        let node_id = node.into();
        let target_id = target.into();
        let now_ms = now_ms();
        let tx = begin_immediate(&mut self.conn)?;

        let moving = resolve_node_tx(&tx, &self.config, node_id)?;
        let target = resolve_node_tx(&tx, &self.config, target_id)?;
        if moving.id == target.id {
            return Err(StoreError::InvalidOperation(
                "cannot move a node relative to itself",
            ));
        }
        if target.is_descendant_of(&moving) {
            return Err(StoreError::InvalidOperation(
                "cannot move a node into its own subtree",
            ));
        }
        if !placement.allows_root_target() && target.is_root() {
            return Err(StoreError::InvalidOperation("a root node has no siblings"));
        }

        let parent_id = if placement.is_child_slot() {
            Some(target.id)
        } else {
            target.parent_id
        };
        let destination = placement.move_destination(&target.coords());
        let level_delta = placement.level_delta(&moving.coords(), &target.coords());
        let width = moving.size();
        let source_scope = moving.scope;

        create_space_tx(&tx, &self.config, target.scope, destination, width)?;

        // The gap may have pushed the subtree to the right.
        let shifted = resolve_node_tx(&tx, &self.config, moving.id)?;
        let offset = destination - shifted.left;
        shift_subtree_tx(
            &tx,
            &self.config,
            &shifted.coords(),
            offset,
            level_delta,
            target.scope,
        )?;
        delete_space_tx(&tx, &self.config, source_scope, shifted.left, width)?;

        if shifted.parent_id != parent_id {
            let mut reparented = resolve_node_tx(&tx, &self.config, moving.id)?;
            reparented.parent_id = parent_id;
            update_node_attrs_tx(
                &tx,
                &self.config,
                self.validator.as_deref(),
                &reparented,
                now_ms,
            )?;
        }

        let moved = resolve_node_tx(&tx, &self.config, moving.id)?;
        tx.commit()?;
        tracing::debug!(
            node = %moved.id,
            target = %target.id,
            placement = placement.as_str(),
            from_scope = %source_scope,
            to_scope = %moved.scope,
            size = width,
            "subtree moved"
        );
        Ok(moved)
    }

    pub fn move_to_first_child(
        &mut self,
        node: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<Node, StoreError> {
        self.move_node(node, target, Placement::FirstChild)
    }

    pub fn move_to_last_child(
        &mut self,
        node: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<Node, StoreError> {
        self.move_node(node, target, Placement::LastChild)
    }

    pub fn move_to_prev_sibling(
        &mut self,
        node: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<Node, StoreError> {
        self.move_node(node, target, Placement::PrevSibling)
    }

    pub fn move_to_next_sibling(
        &mut self,
        node: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<Node, StoreError> {
        self.move_node(node, target, Placement::NextSibling)
    }
}
