#![forbid(unsafe_code)]

use super::super::support::{Cmp, Column, NodeQuery};
use super::super::{AncestorQuery, Node, SqliteTreeStore, StoreError};
use mptt_core::SortDirection;

impl SqliteTreeStore {
    /// Nodes whose interval encloses `node`, nearest last under `Asc`.
    pub fn ancestors(&self, node: &Node, query: AncestorQuery) -> Result<Vec<Node>, StoreError> {
        let mut select = NodeQuery::new(&self.config)
            .filter(Column::Left, Cmp::upper(query.include_self), node.left)
            .filter(Column::Right, Cmp::lower(query.include_self), node.right)
            .filter(Column::Scope, Cmp::Eq, node.scope.get())
            .order_by(Column::Left, query.direction);
        if !query.include_root {
            select = select.filter(Column::Left, Cmp::Ne, 1);
        }
        if query.direct_only {
            select = select
                .filter(Column::Level, Cmp::Eq, node.level - 1)
                .limit(1);
        }
        select.fetch(&self.conn)
    }

    pub fn parent(&self, node: &Node) -> Result<Option<Node>, StoreError> {
        if node.is_root() {
            return Ok(None);
        }
        let query = AncestorQuery {
            direct_only: true,
            direction: SortDirection::Desc,
            ..AncestorQuery::default()
        };
        Ok(self.ancestors(node, query)?.into_iter().next())
    }
}
