#![forbid(unsafe_code)]

use super::super::support::{Cmp, Column, NodeQuery};
use super::super::{DescendantQuery, Node, SqliteTreeStore, StoreError};
use mptt_core::SortDirection;

impl SqliteTreeStore {
    pub fn descendants(
        &self,
        node: &Node,
        query: DescendantQuery,
    ) -> Result<Vec<Node>, StoreError> {
        let mut select = NodeQuery::new(&self.config)
            .filter(Column::Left, Cmp::lower(query.include_self), node.left)
            .filter(Column::Right, Cmp::upper(query.include_self), node.right)
            .filter(Column::Scope, Cmp::Eq, node.scope.get())
            .order_by(Column::Left, query.direction);
        if query.direct_children_only {
            select = if query.include_self {
                select.level_in(&[node.level, node.level + 1])
            } else {
                select.filter(Column::Level, Cmp::Eq, node.level + 1)
            };
        }
        if query.leaves_only {
            select = select.leaves_only();
        }
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }
        select.fetch(&self.conn)
    }

    pub fn children(
        &self,
        node: &Node,
        include_self: bool,
        direction: SortDirection,
        limit: Option<usize>,
    ) -> Result<Vec<Node>, StoreError> {
        let query = DescendantQuery {
            include_self,
            direction,
            direct_children_only: true,
            leaves_only: false,
            limit,
        };
        self.descendants(node, query)
    }

    pub fn first_child(&self, node: &Node) -> Result<Option<Node>, StoreError> {
        Ok(self
            .children(node, false, SortDirection::Asc, Some(1))?
            .into_iter()
            .next())
    }

    pub fn last_child(&self, node: &Node) -> Result<Option<Node>, StoreError> {
        Ok(self
            .children(node, false, SortDirection::Desc, Some(1))?
            .into_iter()
            .next())
    }

    /// Direct children of `node` that are leaves. Deeper leaves come from
    /// `descendants` with `leaves_only`.
    pub fn leaves(
        &self,
        node: &Node,
        include_self: bool,
        direction: SortDirection,
    ) -> Result<Vec<Node>, StoreError> {
        let query = DescendantQuery {
            include_self,
            direction,
            direct_children_only: true,
            leaves_only: true,
            limit: None,
        };
        self.descendants(node, query)
    }
}
