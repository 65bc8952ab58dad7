#![forbid(unsafe_code)]

use super::super::{StoreError, TreeConfig, map_write_error};
use mptt_core::{Coordinates, NodeId, ScopeId};
use rusqlite::{Transaction, params};

/// Shifts every row of the subtree at `from` by `offset`, re-levels it and
/// relabels it into `target_scope` in one statement.
pub(in crate::store) fn shift_subtree_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    from: &Coordinates,
    offset: i64,
    level_delta: i64,
    target_scope: ScopeId,
) -> Result<usize, StoreError> {
    let TreeConfig {
        table,
        left_column: lft,
        right_column: rgt,
        level_column: lvl,
        scope_column: scope,
        ..
    } = config;

    let moved = tx.execute(
        &format!(
            "UPDATE {table} \
             SET {lft} = {lft} + ?1, {rgt} = {rgt} + ?1, {lvl} = {lvl} + ?2, {scope} = ?3 \
             WHERE {lft} >= ?4 AND {rgt} <= ?5 AND {scope} = ?6"
        ),
        params![
            offset,
            level_delta,
            target_scope.get(),
            from.left,
            from.right,
            from.scope.get()
        ],
    )?;
    Ok(moved)
}

pub(in crate::store) fn delete_subtree_rows_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    root: &Coordinates,
) -> Result<usize, StoreError> {
    let TreeConfig {
        table,
        left_column: lft,
        right_column: rgt,
        scope_column: scope,
        ..
    } = config;

    let deleted = tx.execute(
        &format!("DELETE FROM {table} WHERE {lft} >= ?1 AND {rgt} <= ?2 AND {scope} = ?3"),
        params![root.left, root.right, root.scope.get()],
    )?;
    Ok(deleted)
}

pub(in crate::store) fn set_parent_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    id: NodeId,
    parent_id: Option<NodeId>,
    now_ms: i64,
) -> Result<(), StoreError> {
    tx.execute(
        &format!(
            "UPDATE {} SET {}=?2, updated_at_ms=?3 WHERE id=?1",
            config.table, config.parent_column
        ),
        params![id.get(), parent_id.map(NodeId::get), now_ms],
    )
    .map_err(map_write_error)?;
    Ok(())
}

/// Writes recomputed coordinates for one row.
pub(in crate::store) fn set_coordinates_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    id: NodeId,
    left: i64,
    right: i64,
    level: i64,
) -> Result<(), StoreError> {
    tx.execute(
        &format!(
            "UPDATE {} SET {}=?2, {}=?3, {}=?4 WHERE id=?1",
            config.table, config.left_column, config.right_column, config.level_column
        ),
        params![id.get(), left, right, level],
    )?;
    Ok(())
}
