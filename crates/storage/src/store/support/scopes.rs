#![forbid(unsafe_code)]

use super::super::{StoreError, TreeConfig};
use mptt_core::ScopeId;
use rusqlite::{Connection, params};

pub(in crate::store) fn next_scope_tx(
    conn: &Connection,
    config: &TreeConfig,
) -> Result<ScopeId, StoreError> {
    let max: i64 = conn.query_row(
        &format!(
            "SELECT IFNULL(MAX({}), 0) FROM {}",
            config.scope_column, config.table
        ),
        [],
        |row| row.get(0),
    )?;
    if max > 0 {
        ScopeId::try_new(max.saturating_add(1))
            .map_err(|_| StoreError::InvalidInput("scope overflow"))
    } else {
        Ok(ScopeId::FIRST)
    }
}

pub(in crate::store) fn scope_available_tx(
    conn: &Connection,
    config: &TreeConfig,
    scope: ScopeId,
) -> Result<bool, StoreError> {
    let count: i64 = conn.query_row(
        &format!(
            "SELECT COUNT(1) FROM {} WHERE {}=?1",
            config.table, config.scope_column
        ),
        params![scope.get()],
        |row| row.get(0),
    )?;
    Ok(count == 0)
}

/// Picks the scope for a new tree: the requested one when it is free, or the
/// next unused value when none is requested.
pub(in crate::store) fn claim_scope_tx(
    conn: &Connection,
    config: &TreeConfig,
    requested: Option<ScopeId>,
) -> Result<ScopeId, StoreError> {
    match requested {
        Some(scope) if scope_available_tx(conn, config, scope)? => Ok(scope),
        Some(scope) => Err(StoreError::ScopeUnavailable(scope)),
        None => next_scope_tx(conn, config),
    }
}
