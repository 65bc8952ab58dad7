#![forbid(unsafe_code)]

use super::super::support::{Cmp, Column, NodeQuery};
use super::super::{Node, SqliteTreeStore, StoreError};
use mptt_core::SortDirection;

impl SqliteTreeStore {
    /// Children of the parent of `node`. A root has no siblings; with
    /// `include_self` it is returned alone.
    pub fn siblings(
        &self,
        node: &Node,
        include_self: bool,
        direction: SortDirection,
    ) -> Result<Vec<Node>, StoreError> {
        let Some(parent) = self.parent(node)? else {
            return Ok(if include_self {
                vec![node.clone()]
            } else {
                Vec::new()
            });
        };

        let mut select = NodeQuery::new(&self.config)
            .filter(Column::Left, Cmp::Gt, parent.left)
            .filter(Column::Right, Cmp::Lt, parent.right)
            .filter(Column::Scope, Cmp::Eq, node.scope.get())
            .filter(Column::Level, Cmp::Eq, node.level)
            .order_by(Column::Left, direction);
        if !include_self {
            select = select.filter(Column::Id, Cmp::Ne, node.id.get());
        }
        select.fetch(&self.conn)
    }

    pub fn prev_sibling(&self, node: &Node) -> Result<Option<Node>, StoreError> {
        if node.is_root() {
            return Ok(None);
        }
        NodeQuery::new(&self.config)
            .filter(Column::Right, Cmp::Eq, node.left - 1)
            .filter(Column::Scope, Cmp::Eq, node.scope.get())
            .fetch_first(&self.conn)
    }

    pub fn next_sibling(&self, node: &Node) -> Result<Option<Node>, StoreError> {
        if node.is_root() {
            return Ok(None);
        }
        NodeQuery::new(&self.config)
            .filter(Column::Left, Cmp::Eq, node.right + 1)
            .filter(Column::Scope, Cmp::Eq, node.scope.get())
            .fetch_first(&self.conn)
    }
}
