#![forbid(unsafe_code)]

use super::super::support::{Cmp, Column, NodeQuery};
use super::super::{NestedNode, Node, SqliteTreeStore, StoreError};
use mptt_core::{NodeId, ScopeId, SortDirection};

impl SqliteTreeStore {
    /// Root of every tree, ordered by scope.
    pub fn roots(&self) -> Result<Vec<Node>, StoreError> {
        NodeQuery::new(&self.config)
            .filter(Column::Left, Cmp::Eq, 1)
            .order_by(Column::Scope, SortDirection::Asc)
            .fetch(&self.conn)
    }

    pub fn root(&self, scope: ScopeId) -> Result<Option<Node>, StoreError> {
        NodeQuery::new(&self.config)
            .filter(Column::Left, Cmp::Eq, 1)
            .filter(Column::Scope, Cmp::Eq, scope.get())
            .fetch_first(&self.conn)
    }

    /// Every row of one scope, or of the whole forest, in pre-order.
    pub fn full_tree(&self, scope: Option<ScopeId>) -> Result<Vec<Node>, StoreError> {
        let mut select = NodeQuery::new(&self.config);
        if let Some(scope) = scope {
            select = select.filter(Column::Scope, Cmp::Eq, scope.get());
        }
        select
            .order_by(Column::Scope, SortDirection::Asc)
            .order_by(Column::Left, SortDirection::Asc)
            .fetch(&self.conn)
    }

    pub fn count_nodes(&self, scope: Option<ScopeId>) -> Result<i64, StoreError> {
        let mut select = NodeQuery::new(&self.config);
        if let Some(scope) = scope {
            select = select.filter(Column::Scope, Cmp::Eq, scope.get());
        }
        select.count(&self.conn)
    }

    /// `(id, label)` pairs for a picker; the label is the name prefixed by
    /// `indent` repeated once per level.
    pub fn select_list(
        &self,
        scope: ScopeId,
        indent: Option<&str>,
    ) -> Result<Vec<(NodeId, String)>, StoreError> {
        Ok(self
            .full_tree(Some(scope))?
            .into_iter()
            .map(|node| {
                let label = match indent {
                    Some(indent) => {
                        let depth = usize::try_from(node.level).unwrap_or(0);
                        format!("{}{}", indent.repeat(depth), node.name)
                    }
                    None => node.name,
                };
                (node.id, label)
            })
            .collect())
    }

    /// One scope as a nested value, ready for `serde_json`.
    pub fn nested_tree(&self, scope: ScopeId) -> Result<Option<NestedNode>, StoreError> {
        Ok(nest(self.full_tree(Some(scope))?))
    }
}

/// Folds pre-ordered rows into their tree. Rows outside the first root's
/// interval are dropped.
fn nest(nodes: Vec<Node>) -> Option<NestedNode> {
    let mut open: Vec<(i64, NestedNode)> = Vec::new();
    let mut root = None;

    for node in nodes {
        while open.last().is_some_and(|(right, _)| *right < node.left) {
            close(&mut open, &mut root);
        }
        let right = node.right;
        open.push((
            right,
            NestedNode {
                id: node.id.get(),
                name: node.name,
                level: node.level,
                left: node.left,
                right: node.right,
                data: node.data,
                children: Vec::new(),
            },
        ));
    }
    while !open.is_empty() {
        close(&mut open, &mut root);
    }
    root
}

fn close(open: &mut Vec<(i64, NestedNode)>, root: &mut Option<NestedNode>) {
    let Some((_, finished)) = open.pop() else {
        return;
    };
    match open.last_mut() {
        Some((_, parent)) => parent.children.push(finished),
        None => {
            if root.is_none() {
                *root = Some(finished);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: i64, left: i64, right: i64, level: i64) -> Node {
        Node {
            id: NodeId::try_new(id).expect("id"),
            parent_id: None,
            left,
            right,
            level,
            scope: ScopeId::FIRST,
            name: format!("n{id}"),
            data: json!({}),
            created_at_ms: 0,
            updated_at_ms: 0,
        }
    }

    #[test]
    fn nest_builds_children_in_order() {
        let tree = nest(vec![
            row(1, 1, 8, 1),
            row(2, 2, 5, 2),
            row(3, 3, 4, 3),
            row(4, 6, 7, 2),
        ])
        .expect("root");

        assert_eq!(tree.id, 1);
        let ids: Vec<i64> = tree.children.iter().map(|child| child.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(tree.children[0].children[0].id, 3);
        assert!(tree.children[1].children.is_empty());
    }

    #[test]
    fn nest_of_nothing_is_none() {
        assert!(nest(Vec::new()).is_none());
    }
}
