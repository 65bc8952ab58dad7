#![forbid(unsafe_code)]

use super::super::support::{
    claim_scope_tx, delete_space_tx, insert_node_row_tx, node_exists_tx, resolve_node_tx,
    scope_available_tx, set_parent_tx, shift_subtree_tx,
};
use super::super::{NewNode, Node, SqliteTreeStore, StoreError, begin_immediate, now_ms};
use mptt_core::{Coordinates, NodeId, ScopeId};

impl SqliteTreeStore {
    /// Creates the root of a new tree, in `scope` when given (it must be
    /// unused) or in the next free scope.
    pub fn make_root(&mut self, node: NewNode, scope: Option<ScopeId>) -> Result<Node, StoreError> {
        let now_ms = now_ms();
        let tx = begin_immediate(&mut self.conn)?;

        if let Some(id) = node.id
            && node_exists_tx(&tx, &self.config, id)?
        {
            return Err(StoreError::InvalidOperation("node is already persisted"));
        }

        let scope = claim_scope_tx(&tx, &self.config, scope)?;
        let id = insert_node_row_tx(
            &tx,
            &self.config,
            self.validator.as_deref(),
            &node,
            None,
            Coordinates::root(scope),
            now_ms,
        )?;
        let root = resolve_node_tx(&tx, &self.config, id)?;

        tx.commit()?;
        tracing::debug!(node = %root.id, scope = %root.scope, "root created");
        Ok(root)
    }

    /// Detaches an existing subtree into its own scope with `node` as root.
    ///
    /// A node that already is a root stays put unless a different scope is
    /// requested, in which case its whole tree is relabelled.
    pub fn promote_to_root(
        &mut self,
        node: impl Into<NodeId>,
        scope: Option<ScopeId>,
    ) -> Result<Node, StoreError> {
        let id = node.into();
        let now_ms = now_ms();
        let tx = begin_immediate(&mut self.conn)?;
        let current = resolve_node_tx(&tx, &self.config, id)?;
        let from = current.coords();

        if current.is_root() {
            let Some(requested) = scope.filter(|requested| *requested != current.scope) else {
                return Ok(current);
            };
            if !scope_available_tx(&tx, &self.config, requested)? {
                return Err(StoreError::ScopeUnavailable(requested));
            }
            shift_subtree_tx(&tx, &self.config, &from, 0, 0, requested)?;
        } else {
            let new_scope = claim_scope_tx(&tx, &self.config, scope)?;
            shift_subtree_tx(&tx, &self.config, &from, 1 - from.left, 1 - from.level, new_scope)?;
            delete_space_tx(&tx, &self.config, from.scope, from.left, from.size())?;
            set_parent_tx(&tx, &self.config, id, None, now_ms)?;
        }

        let promoted = resolve_node_tx(&tx, &self.config, id)?;
        tx.commit()?;
        tracing::debug!(
            node = %id,
            from_scope = %from.scope,
            to_scope = %promoted.scope,
            size = from.size(),
            "subtree promoted to root"
        );
        Ok(promoted)
    }
}
