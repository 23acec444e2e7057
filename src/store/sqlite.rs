//! SQLite store implementation.
//!
//! Provides the `SqliteStore` struct that implements the `TabularStore`
//! trait using sqlx. The store is session-scoped: the `ephemeral`
//! constructor keeps the database file in a temporary directory that is
//! removed when the store is dropped.

use crate::error::{Result, Talk2DataError};
use crate::store::{ColumnInfo, QueryResult, Row, TabularStore, Value};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo, ValueRef};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tracing::debug;

/// Query timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 30;

/// SQLite-backed tabular store.
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
    /// Keeps the session directory alive for ephemeral stores.
    _temp_dir: Option<TempDir>,
}

impl SqliteStore {
    /// Creates a session-scoped store backed by a file in a temporary
    /// directory. The directory (and the database) is removed on drop.
    pub async fn ephemeral() -> Result<Self> {
        let temp_dir = TempDir::new()
            .map_err(|e| Talk2DataError::internal(format!("Failed to create temp dir: {e}")))?;
        let db_path = temp_dir.path().join("session.db");

        debug!("Creating ephemeral store at {}", db_path.display());
        let pool = connect_file(&db_path).await?;

        Ok(Self {
            pool,
            _temp_dir: Some(temp_dir),
        })
    }

    /// Opens (or creates) a store at an explicit location.
    pub async fn open(path: &Path) -> Result<Self> {
        let pool = connect_file(path).await?;
        Ok(Self {
            pool,
            _temp_dir: None,
        })
    }

    /// Creates an in-memory store. Intended for tests.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);

        // A single connection, or each pooled connection would see its own
        // empty memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                Talk2DataError::internal(format!("Failed to open in-memory store: {e}"))
            })?;

        Ok(Self {
            pool,
            _temp_dir: None,
        })
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Connects a single-connection pool to a database file, creating it if
/// missing.
async fn connect_file(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| {
            Talk2DataError::internal(format!(
                "Failed to open store at {}: {e}",
                path.display()
            ))
        })
}

#[async_trait]
impl TabularStore for SqliteStore {
    async fn columns(&self, table: &str) -> Result<Vec<String>> {
        let pragma = format!("PRAGMA table_info({})", quote_ident(table));
        let rows = sqlx::query(&pragma)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                Talk2DataError::execution(format!("Failed to introspect {table}: {e}"))
            })?;

        if rows.is_empty() {
            return Err(Talk2DataError::not_found(table));
        }

        // PRAGMA table_info returns rows in declared column order.
        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("name").map_err(|e| {
                    Talk2DataError::execution(format!("Failed to read column name: {e}"))
                })
            })
            .collect()
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let result = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            sqlx::query(sql).fetch_all(&self.pool),
        )
        .await
        .map_err(|_| {
            Talk2DataError::execution(format!(
                "Query timed out after {QUERY_TIMEOUT_SECS} seconds"
            ))
        })?
        .map_err(|e| Talk2DataError::execution(e.to_string()))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = result
            .first()
            .map(|first_row| {
                first_row
                    .columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Row> = result.iter().map(convert_row).collect();
        let row_count = rows.len();

        debug!(
            "Executed query in {:?}, {} row(s)",
            execution_time, row_count
        );

        Ok(QueryResult {
            columns,
            rows,
            execution_time,
            row_count,
        })
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Quotes an identifier for safe interpolation into SQL.
pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
///
/// SQLite is dynamically typed, so the statement-level type name may not
/// match the stored value (expression columns in particular). The runtime
/// value type is authoritative; unknown names fall back to trying each
/// storage class in turn.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let type_name = match row.try_get_raw(index) {
        Ok(raw) => raw.type_info().name().to_uppercase(),
        Err(_) => return Value::Null,
    };

    match type_name.as_str() {
        "NULL" => Value::Null,

        "INTEGER" | "INT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(|b| Value::Int(b as i64))
            .unwrap_or(Value::Null),

        "TEXT" | "VARCHAR" => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::Text)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Blob)
            .unwrap_or(Value::Null),

        _ => {
            if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(index) {
                Value::Int(v)
            } else if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(index) {
                Value::Float(v)
            } else if let Ok(Some(v)) = row.try_get::<Option<String>, _>(index) {
                Value::Text(v)
            } else if let Ok(Some(v)) = row.try_get::<Option<Vec<u8>>, _>(index) {
                Value::Blob(v)
            } else {
                Value::Null
            }
        }
    }
}
