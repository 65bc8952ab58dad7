#![forbid(unsafe_code)]

use super::super::{Node, StoreError, TreeConfig, to_sqlite_i64};
use super::rows::NodeRow;
use mptt_core::SortDirection;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, params_from_iter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::store) enum Column {
    Id,
    Left,
    Right,
    Level,
    Scope,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::store) enum Cmp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Cmp {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Strict or inclusive variant of a bound.
    pub(in crate::store) fn lower(inclusive: bool) -> Self {
        if inclusive { Self::Ge } else { Self::Gt }
    }

    pub(in crate::store) fn upper(inclusive: bool) -> Self {
        if inclusive { Self::Le } else { Self::Lt }
    }
}

/// Single-statement range query over the tree table. Built, run and dropped
/// per call.
pub(in crate::store) struct NodeQuery<'a> {
    config: &'a TreeConfig,
    clauses: Vec<String>,
    params: Vec<SqlValue>,
    order: Vec<(Column, SortDirection)>,
    limit: Option<usize>,
}

impl<'a> NodeQuery<'a> {
    pub(in crate::store) fn new(config: &'a TreeConfig) -> Self {
        Self {
            config,
            clauses: Vec::new(),
            params: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    fn column(&self, column: Column) -> &'a str {
        match column {
            Column::Id => "id",
            Column::Left => &self.config.left_column,
            Column::Right => &self.config.right_column,
            Column::Level => &self.config.level_column,
            Column::Scope => &self.config.scope_column,
        }
    }

    pub(in crate::store) fn filter(mut self, column: Column, cmp: Cmp, value: i64) -> Self {
        let column = self.column(column);
        self.clauses.push(format!("{column} {} ?", cmp.as_sql()));
        self.params.push(SqlValue::Integer(value));
        self
    }

    pub(in crate::store) fn level_in(mut self, levels: &[i64]) -> Self {
        if levels.is_empty() {
            self.clauses.push("0".to_string());
            return self;
        }
        let column = self.column(Column::Level);
        let placeholders = vec!["?"; levels.len()].join(", ");
        self.clauses.push(format!("{column} IN ({placeholders})"));
        self.params
            .extend(levels.iter().map(|level| SqlValue::Integer(*level)));
        self
    }

    pub(in crate::store) fn leaves_only(mut self) -> Self {
        let right = self.column(Column::Right);
        let left = self.column(Column::Left);
        self.clauses.push(format!("{right} = {left} + 1"));
        self
    }

    pub(in crate::store) fn order_by(mut self, column: Column, direction: SortDirection) -> Self {
        self.order.push((column, direction));
        self
    }

    pub(in crate::store) fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn render(&self, select: &str) -> Result<(String, Vec<SqlValue>), StoreError> {
        let mut sql = format!("SELECT {select} FROM {}", self.config.table);
        if !self.clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.clauses.join(" AND "));
        }
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(column, direction)| format!("{} {}", self.column(*column), direction.as_sql()))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }
        let mut params = self.params.clone();
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            params.push(SqlValue::Integer(to_sqlite_i64(limit)?));
        }
        Ok((sql, params))
    }

    pub(in crate::store) fn fetch(self, conn: &Connection) -> Result<Vec<Node>, StoreError> {
        let (sql, params) = self.render(&self.config.node_columns())?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), NodeRow::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_node()?);
        }
        Ok(out)
    }

    pub(in crate::store) fn fetch_first(self, conn: &Connection) -> Result<Option<Node>, StoreError> {
        Ok(self.limit(1).fetch(conn)?.into_iter().next())
    }

    pub(in crate::store) fn count(self, conn: &Connection) -> Result<i64, StoreError> {
        let (sql, params) = self.render("COUNT(1)")?;
        Ok(conn.query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))?)
    }
}
