#![forbid(unsafe_code)]

use super::super::validate::{NodeCandidate, NodeValidator, check_candidate};
use super::super::{Node, NewNode, StoreError, TreeConfig, map_write_error};
use mptt_core::{Coordinates, NodeId, ScopeId};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};

/// Raw column values in `TreeConfig::node_columns` order.
pub(in crate::store) struct NodeRow {
    id: i64,
    left: i64,
    right: i64,
    level: i64,
    scope: i64,
    parent_id: Option<i64>,
    name: String,
    data_json: String,
    created_at_ms: i64,
    updated_at_ms: i64,
}

impl NodeRow {
    pub(in crate::store) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            left: row.get(1)?,
            right: row.get(2)?,
            level: row.get(3)?,
            scope: row.get(4)?,
            parent_id: row.get(5)?,
            name: row.get(6)?,
            data_json: row.get(7)?,
            created_at_ms: row.get(8)?,
            updated_at_ms: row.get(9)?,
        })
    }

    pub(in crate::store) fn into_node(self) -> Result<Node, StoreError> {
        let id = NodeId::try_new(self.id).map_err(|_| StoreError::InvalidInput("invalid node row"))?;
        let scope =
            ScopeId::try_new(self.scope).map_err(|_| StoreError::InvalidInput("invalid node row"))?;
        let parent_id = self
            .parent_id
            .map(NodeId::try_new)
            .transpose()
            .map_err(|_| StoreError::InvalidInput("invalid node row"))?;
        Ok(Node {
            id,
            parent_id,
            left: self.left,
            right: self.right,
            level: self.level,
            scope,
            name: self.name,
            data: serde_json::from_str(&self.data_json)?,
            created_at_ms: self.created_at_ms,
            updated_at_ms: self.updated_at_ms,
        })
    }
}

pub(in crate::store) fn load_node_tx(
    conn: &Connection,
    config: &TreeConfig,
    id: NodeId,
) -> Result<Option<Node>, StoreError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {} FROM {} WHERE id=?1",
                config.node_columns(),
                config.table
            ),
            params![id.get()],
            NodeRow::from_row,
        )
        .optional()?;
    row.map(NodeRow::into_node).transpose()
}

/// Fresh read of a node that must exist.
pub(in crate::store) fn resolve_node_tx(
    conn: &Connection,
    config: &TreeConfig,
    id: NodeId,
) -> Result<Node, StoreError> {
    load_node_tx(conn, config, id)?.ok_or(StoreError::NotFound)
}

pub(in crate::store) fn node_exists_tx(
    conn: &Connection,
    config: &TreeConfig,
    id: NodeId,
) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE id=?1", config.table),
            params![id.get()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}

/// Validates and writes a brand-new row at `coords`. The caller owns any gap
/// opened for it.
pub(in crate::store) fn insert_node_row_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    validator: Option<&dyn NodeValidator>,
    node: &NewNode,
    parent_id: Option<NodeId>,
    coords: Coordinates,
    now_ms: i64,
) -> Result<NodeId, StoreError> {
    let candidate = NodeCandidate {
        id: node.id,
        parent_id,
        coords,
        name: &node.name,
        data: &node.data,
    };
    check_candidate(validator, &candidate).map_err(StoreError::ValidationFailed)?;

    let data_json = serde_json::to_string(&node.data)?;
    let sql = format!(
        "INSERT INTO {}(id, {}, {}, {}, {}, {}, name, data_json, created_at_ms, updated_at_ms) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        config.table,
        config.left_column,
        config.right_column,
        config.level_column,
        config.scope_column,
        config.parent_column
    );
    tx.execute(
        &sql,
        params![
            node.id.map(NodeId::get),
            coords.left,
            coords.right,
            coords.level,
            coords.scope.get(),
            parent_id.map(NodeId::get),
            node.name,
            data_json,
            now_ms,
        ],
    )
    .map_err(map_write_error)?;

    let id = match node.id {
        Some(id) => id,
        None => NodeId::try_new(tx.last_insert_rowid())
            .map_err(|_| StoreError::InvalidInput("invalid node row"))?,
    };
    Ok(id)
}

/// Writes the attribute columns of an existing row after validation.
pub(in crate::store) fn update_node_attrs_tx(
    tx: &Transaction<'_>,
    config: &TreeConfig,
    validator: Option<&dyn NodeValidator>,
    node: &Node,
    now_ms: i64,
) -> Result<(), StoreError> {
    let candidate = NodeCandidate {
        id: Some(node.id),
        parent_id: node.parent_id,
        coords: node.coords(),
        name: &node.name,
        data: &node.data,
    };
    check_candidate(validator, &candidate).map_err(StoreError::ValidationFailed)?;

    let data_json = serde_json::to_string(&node.data)?;
    let updated = tx
        .execute(
            &format!(
                "UPDATE {} SET {}=?2, name=?3, data_json=?4, updated_at_ms=?5 WHERE id=?1",
                config.table, config.parent_column
            ),
            params![
                node.id.get(),
                node.parent_id.map(NodeId::get),
                node.name,
                data_json,
                now_ms
            ],
        )
        .map_err(map_write_error)?;
    if updated == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
