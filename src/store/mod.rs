//! Tabular store abstraction for talk2data.
//!
//! Provides a trait-based interface for the relational store so the
//! extraction and formatting logic can be tested without touching a real
//! database.

mod sqlite;
mod types;

pub use sqlite::SqliteStore;
pub use types::{ColumnInfo, QueryResult, Row, Value};

pub(crate) use sqlite::quote_ident;

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the "tabular query" capability.
///
/// All operations are async and return Results with Talk2DataError.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Returns the column names of a table, in declared order.
    ///
    /// Fails with `NotFound` if the table does not exist.
    async fn columns(&self, table: &str) -> Result<Vec<String>>;

    /// Executes a SQL query and returns the results.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Closes the store.
    async fn close(&self) -> Result<()>;
}
