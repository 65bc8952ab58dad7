#![forbid(unsafe_code)]

mod config;
mod error;
mod locate;
mod nodes;
mod scopes;
mod support;
mod types;
mod validate;
mod verify;

pub use config::{ConfigError, TreeConfig};
pub use error::StoreError;
pub use types::*;
pub use validate::{NodeCandidate, NodeValidator};

use rusqlite::{Connection, ErrorCode, OptionalExtension, Transaction, TransactionBehavior, params};
use std::path::{Path, PathBuf};

const SCHEMA_VERSION: i64 = 1;
const META_TABLE: &str = "mptt_meta";

/// Nested-set forest stored in one SQLite table.
///
/// Every structural mutation runs in its own `IMMEDIATE` transaction, so the
/// database write lock is held from the first fresh read to the last range
/// update.
pub struct SqliteTreeStore {
    conn: Connection,
    storage_dir: Option<PathBuf>,
    config: TreeConfig,
    validator: Option<Box<dyn NodeValidator>>,
}

impl std::fmt::Debug for SqliteTreeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTreeStore")
            .field("storage_dir", &self.storage_dir)
            .field("table", &self.config.table)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

impl SqliteTreeStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_config(storage_dir, TreeConfig::default())
    }

    pub fn open_with_config(
        storage_dir: impl AsRef<Path>,
        config: TreeConfig,
    ) -> Result<Self, StoreError> {
        config
            .validate()
            .map_err(|err| StoreError::InvalidInput(err.message()))?;
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(&config.db_file_name);
        let conn = Connection::open(db_path)?;
        Self::init(conn, Some(storage_dir), config)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open_in_memory_with_config(TreeConfig::default())
    }

    pub fn open_in_memory_with_config(config: TreeConfig) -> Result<Self, StoreError> {
        config
            .validate()
            .map_err(|err| StoreError::InvalidInput(err.message()))?;
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None, config)
    }

    fn init(
        conn: Connection,
        storage_dir: Option<PathBuf>,
        config: TreeConfig,
    ) -> Result<Self, StoreError> {
        conn.busy_timeout(config.busy_timeout)?;
        if storage_dir.is_some() {
            conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        }

        preflight_gate(&conn, &config)?;
        install_schema(&conn, &config)?;
        tracing::debug!(table = %config.table, "tree store opened");

        Ok(Self {
            conn,
            storage_dir,
            config,
            validator: None,
        })
    }

    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn set_validator(&mut self, validator: impl NodeValidator + 'static) {
        self.validator = Some(Box::new(validator));
    }

    pub fn clear_validator(&mut self) {
        self.validator = None;
    }
}

/// Starts a transaction that takes the write lock up front.
fn begin_immediate(conn: &mut Connection) -> Result<Transaction<'_>, StoreError> {
    Ok(conn.transaction_with_behavior(TransactionBehavior::Immediate)?)
}

fn preflight_gate(conn: &Connection, config: &TreeConfig) -> Result<(), StoreError> {
    let meta_exists = table_exists(conn, META_TABLE)?;
    let table_present = table_exists(conn, &config.table)?;

    if meta_exists {
        let version = conn
            .query_row(
                &format!("SELECT value FROM {META_TABLE} WHERE key=?1"),
                params![schema_version_key(config)],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        match version {
            Some(value) if value.parse::<i64>().ok() == Some(SCHEMA_VERSION) => {}
            Some(_) => {
                return Err(StoreError::InvalidInput(
                    "RESET_REQUIRED: schema version mismatch",
                ));
            }
            None if table_present => {
                return Err(StoreError::InvalidInput(
                    "RESET_REQUIRED: tree table exists without a schema version",
                ));
            }
            None => {}
        }
    } else if table_present {
        return Err(StoreError::InvalidInput(
            "RESET_REQUIRED: tree table exists without a schema version",
        ));
    }

    if table_present {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", config.table))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        let required = [
            "id",
            config.left_column.as_str(),
            config.right_column.as_str(),
            config.level_column.as_str(),
            config.scope_column.as_str(),
            config.parent_column.as_str(),
            "name",
            "data_json",
            "created_at_ms",
            "updated_at_ms",
        ];
        if required
            .iter()
            .any(|name| !columns.iter().any(|column| column.eq_ignore_ascii_case(name)))
        {
            return Err(StoreError::InvalidInput(
                "RESET_REQUIRED: tree table is missing required columns",
            ));
        }
    }

    Ok(())
}

fn install_schema(conn: &Connection, config: &TreeConfig) -> Result<(), StoreError> {
    let TreeConfig {
        table,
        left_column: lft,
        right_column: rgt,
        level_column: lvl,
        scope_column: scope,
        parent_column: parent,
        ..
    } = config;

    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {META_TABLE} (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          {lft} INTEGER NOT NULL,
          {rgt} INTEGER NOT NULL,
          {lvl} INTEGER NOT NULL,
          {scope} INTEGER NOT NULL,
          {parent} INTEGER,
          name TEXT NOT NULL,
          data_json TEXT NOT NULL DEFAULT '{{}}',
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          CHECK(length(trim(name)) > 0),
          CHECK({lft} < {rgt}),
          CHECK({lvl} >= 1),
          CHECK({scope} >= 1),
          CHECK(json_valid(data_json))
        );

        CREATE INDEX IF NOT EXISTS idx_{table}_scope_left ON {table}({scope}, {lft});
        CREATE INDEX IF NOT EXISTS idx_{table}_scope_right ON {table}({scope}, {rgt});
        CREATE INDEX IF NOT EXISTS idx_{table}_parent ON {table}({parent});
        "#
    ))?;

    conn.execute(
        &format!(
            "INSERT INTO {META_TABLE}(key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value=excluded.value"
        ),
        params![schema_version_key(config), SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

fn schema_version_key(config: &TreeConfig) -> String {
    format!("schema_version:{}", config.table)
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1",
            params![name],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}

/// Classifies a failed row write: constraint failures are the store's
/// validation layer rejecting the row.
fn map_write_error(err: rusqlite::Error) -> StoreError {
    if is_constraint_violation(&err) {
        let message = match &err {
            rusqlite::Error::SqliteFailure(_, Some(message)) => message.clone(),
            _ => "constraint failed".to_string(),
        };
        return StoreError::ValidationFailed(message);
    }
    StoreError::Sql(err)
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("CHECK constraint failed")
                        || value.contains("NOT NULL constraint failed")
                })
        }
        _ => false,
    }
}

fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration,
        Err(_) => return 0,
    };

    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}
