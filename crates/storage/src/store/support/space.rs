#![forbid(unsafe_code)]

use super::super::{StoreError, TreeConfig};
use mptt_core::ScopeId;
use rusqlite::{Transaction, params};

/// Width of the gap a single new leaf needs.
pub(in crate::store) const LEAF_WIDTH: i64 = 2;

/// Opens a `size`-wide gap at `start` inside `scope`.
///
/// Right edges move first so every row keeps `left < right` between the two
/// statements.
pub(in crate::store) fn create_space_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    scope: ScopeId,
    start: i64,
    size: i64,
) -> Result<(), StoreError> {
    ensure_space_width(size)?;
    let TreeConfig {
        table,
        left_column: lft,
        right_column: rgt,
        scope_column: scope_col,
        ..
    } = config;

    tx.execute(
        &format!("UPDATE {table} SET {rgt} = {rgt} + ?1 WHERE {rgt} >= ?2 AND {scope_col} = ?3"),
        params![size, start, scope.get()],
    )?;
    tx.execute(
        &format!("UPDATE {table} SET {lft} = {lft} + ?1 WHERE {lft} >= ?2 AND {scope_col} = ?3"),
        params![size, start, scope.get()],
    )?;
    tracing::trace!(scope = scope.get(), start, size, "space created");
    Ok(())
}

/// Closes a `size`-wide gap at `start`; the exact inverse of
/// [`create_space_tx`]. The gap must already be empty.
pub(in crate::store) fn delete_space_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    scope: ScopeId,
    start: i64,
    size: i64,
) -> Result<(), StoreError> {
    ensure_space_width(size)?;
    let TreeConfig {
        table,
        left_column: lft,
        right_column: rgt,
        scope_column: scope_col,
        ..
    } = config;

    tx.execute(
        &format!("UPDATE {table} SET {lft} = {lft} - ?1 WHERE {lft} >= ?2 AND {scope_col} = ?3"),
        params![size, start, scope.get()],
    )?;
    tx.execute(
        &format!("UPDATE {table} SET {rgt} = {rgt} - ?1 WHERE {rgt} >= ?2 AND {scope_col} = ?3"),
        params![size, start, scope.get()],
    )?;
    tracing::trace!(scope = scope.get(), start, size, "space deleted");
    Ok(())
}

fn ensure_space_width(size: i64) -> Result<(), StoreError> {
    if size <= 0 || size % 2 != 0 {
        return Err(StoreError::InvalidInput(
            "space size must be a positive even number",
        ));
    }
    Ok(())
}
