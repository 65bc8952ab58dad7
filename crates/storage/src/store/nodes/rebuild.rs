#![forbid(unsafe_code)]

use super::super::support::{resolve_node_tx, set_coordinates_tx};
use super::super::{Node, SqliteTreeStore, StoreError, TreeConfig, begin_immediate};
use mptt_core::{LayoutEntry, NodeId, ScopeId, plan_layout};
use rusqlite::{Connection, OptionalExtension, Transaction, params};

impl SqliteTreeStore {
    /// Recomputes left, right and level of the subtree under `node` from
    /// parent links alone, numbering from `left`. Returns the next free
    /// coordinate after the subtree.
    pub fn rebuild_tree(&mut self, node: impl Into<NodeId>, left: i64) -> Result<i64, StoreError> {
        if left < 1 {
            return Err(StoreError::InvalidInput("left must be >= 1"));
        }
        let id = node.into();
        let tx = begin_immediate(&mut self.conn)?;
        let root = resolve_node_tx(&tx, &self.config, id)?;
        let next_left = apply_layout_tx(&tx, &self.config, &root, left, root.level)?;
        tx.commit()?;
        Ok(next_left)
    }

    /// Rebuilds a whole scope from its parentless row.
    pub fn rebuild_scope(&mut self, scope: ScopeId) -> Result<i64, StoreError> {
        let tx = begin_immediate(&mut self.conn)?;
        let root_id: Option<i64> = tx
            .query_row(
                &format!(
                    "SELECT id FROM {table} WHERE {scope_col}=?1 AND {parent} IS NULL \
                     ORDER BY {lft}, id LIMIT 1",
                    table = self.config.table,
                    scope_col = self.config.scope_column,
                    parent = self.config.parent_column,
                    lft = self.config.left_column,
                ),
                params![scope.get()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(root_id) = root_id else {
            return Err(StoreError::NotFound);
        };
        let root_id =
            NodeId::try_new(root_id).map_err(|_| StoreError::InvalidInput("invalid node row"))?;
        let root = resolve_node_tx(&tx, &self.config, root_id)?;
        let next_left = apply_layout_tx(&tx, &self.config, &root, 1, 1)?;
        tx.commit()?;
        Ok(next_left)
    }
}

fn apply_layout_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    root: &Node,
    left: i64,
    level: i64,
) -> Result<i64, StoreError> {
    let entries = layout_entries(tx, config, root.scope)?;
    let plan = plan_layout(&entries, root.id, left, level);
    for planned in &plan.assignments {
        set_coordinates_tx(tx, config, planned.id, planned.left, planned.right, planned.level)?;
    }
    tracing::debug!(
        node = %root.id,
        scope = %root.scope,
        rows = plan.assignments.len(),
        next_left = plan.next_left,
        "tree rebuilt"
    );
    Ok(plan.next_left)
}

fn layout_entries(
    conn: &Connection,
    config: &TreeConfig,
    scope: ScopeId,
) -> Result<Vec<LayoutEntry>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, {}, {} FROM {} WHERE {}=?1",
        config.parent_column, config.left_column, config.table, config.scope_column
    ))?;
    let rows = stmt.query_map(params![scope.get()], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<i64>>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (id, parent_id, left) = row?;
        let invalid = |_| StoreError::InvalidInput("invalid node row");
        out.push(LayoutEntry {
            id: NodeId::try_new(id).map_err(invalid)?,
            parent_id: parent_id.map(NodeId::try_new).transpose().map_err(invalid)?,
            left,
        });
    }
    Ok(out)
}
