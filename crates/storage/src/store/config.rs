#![forbid(unsafe_code)]

use std::time::Duration;

/// Table and column layout of the nested-set table.
///
/// Names are interpolated into SQL, so [`TreeConfig::validate`] only admits
/// plain identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    pub db_file_name: String,
    pub table: String,
    pub left_column: String,
    pub right_column: String,
    pub level_column: String,
    pub scope_column: String,
    pub parent_column: String,
    pub busy_timeout: Duration,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            db_file_name: "mptt.db".to_string(),
            table: "tree_nodes".to_string(),
            left_column: "lft".to_string(),
            right_column: "rgt".to_string(),
            level_column: "lvl".to_string(),
            scope_column: "scope".to_string(),
            parent_column: "parent_id".to_string(),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Columns every tree table carries besides the configurable ones.
const FIXED_COLUMNS: &[&str] = &["id", "name", "data_json", "created_at_ms", "updated_at_ms"];

impl TreeConfig {
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_identifier("table", &self.table)?;
        let columns = [
            ("left_column", &self.left_column),
            ("right_column", &self.right_column),
            ("level_column", &self.level_column),
            ("scope_column", &self.scope_column),
            ("parent_column", &self.parent_column),
        ];
        for (field, value) in columns {
            validate_identifier(field, value)?;
            if FIXED_COLUMNS.contains(&value.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::ReservedColumn { field });
            }
        }
        for (index, (_, left)) in columns.iter().enumerate() {
            if columns[index + 1..]
                .iter()
                .any(|(_, right)| left.eq_ignore_ascii_case(right))
            {
                return Err(ConfigError::DuplicateColumn);
            }
        }
        if self.db_file_name.trim().is_empty()
            || self.db_file_name.contains('/')
            || self.db_file_name.contains('\\')
        {
            return Err(ConfigError::InvalidFileName);
        }
        Ok(())
    }

    pub(in crate::store) fn node_columns(&self) -> String {
        format!(
            "id, {}, {}, {}, {}, {}, name, data_json, created_at_ms, updated_at_ms",
            self.left_column,
            self.right_column,
            self.level_column,
            self.scope_column,
            self.parent_column
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Empty { field: &'static str },
    TooLong { field: &'static str },
    InvalidChar { field: &'static str, ch: char },
    ReservedColumn { field: &'static str },
    ReservedName { field: &'static str },
    DuplicateColumn,
    InvalidFileName,
}

impl ConfigError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "identifier must not be empty",
            Self::TooLong { .. } => "identifier is too long",
            Self::InvalidChar { .. } => "identifier must be [A-Za-z_][A-Za-z0-9_]*",
            Self::ReservedColumn { .. } => "column name collides with a fixed column",
            Self::ReservedName { .. } => "names starting with sqlite_ are reserved",
            Self::DuplicateColumn => "column names must be distinct",
            Self::InvalidFileName => "db_file_name must be a bare file name",
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field }
            | Self::TooLong { field }
            | Self::ReservedColumn { field }
            | Self::ReservedName { field } => {
                write!(f, "{field}: {}", self.message())
            }
            Self::InvalidChar { field, ch } => {
                write!(f, "{field}: {} (found {ch:?})", self.message())
            }
            Self::DuplicateColumn | Self::InvalidFileName => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for ConfigError {}

fn validate_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty { field });
    }
    if value.len() > 64 {
        return Err(ConfigError::TooLong { field });
    }
    for (index, ch) in value.chars().enumerate() {
        let ok = if index == 0 {
            ch.is_ascii_alphabetic() || ch == '_'
        } else {
            ch.is_ascii_alphanumeric() || ch == '_'
        };
        if !ok {
            return Err(ConfigError::InvalidChar { field, ch });
        }
    }
    if value.to_ascii_lowercase().starts_with("sqlite_") {
        return Err(ConfigError::ReservedName { field });
    }
    Ok(())
}
