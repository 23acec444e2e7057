//! Question-to-answer orchestration.
//!
//! Wires the pipeline together: schema hint -> prompt -> chat completion ->
//! SQL extraction -> execution -> formatting. Every failure is terminal for
//! the current question; there is no retry or query repair.

use tracing::debug;

use crate::error::{Result, Talk2DataError};
use crate::format::format_rows;
use crate::llm::{extract_sql, prompt, ChatClient};
use crate::store::{QueryResult, TabularStore};

/// Table name datasets are ingested under for a session.
pub const DEFAULT_TABLE: &str = "data";

/// Orchestrates one natural-language question against the store.
///
/// Borrows its collaborators so the same store and client serve a whole
/// session; the schema hint is fetched once and cached for the table's
/// lifetime.
pub struct QueryOrchestrator<'a> {
    llm: &'a dyn ChatClient,
    store: &'a dyn TabularStore,
    table: String,
    schema_hint: Option<Vec<String>>,
}

impl<'a> QueryOrchestrator<'a> {
    /// Creates an orchestrator over the default session table.
    pub fn new(llm: &'a dyn ChatClient, store: &'a dyn TabularStore) -> Self {
        Self {
            llm,
            store,
            table: DEFAULT_TABLE.to_string(),
            schema_hint: None,
        }
    }

    /// Overrides the table the questions are asked about.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self.schema_hint = None;
        self
    }

    /// Answers one question: generates SQL, executes it, formats the rows.
    pub async fn ask(&mut self, question: &str) -> Result<Answer> {
        if question.trim().is_empty() {
            return Err(Talk2DataError::internal("question must not be empty"));
        }

        let columns = match &self.schema_hint {
            Some(columns) => columns.clone(),
            None => {
                let columns = self.store.columns(&self.table).await?;
                self.schema_hint = Some(columns.clone());
                columns
            }
        };

        let messages = prompt::build_messages(&self.table, &columns, question);
        let response = self.llm.complete(&messages).await?;

        let sql = extract_sql(&response).ok_or_else(|| {
            Talk2DataError::extraction("Could not extract a valid SQL query.")
        })?;

        debug!("Extracted SQL: {}", sql);

        let result = self.store.execute_query(&sql).await?;
        let message = format_rows(&result.rows);

        Ok(Answer {
            sql,
            result,
            message,
        })
    }
}

/// Outcome of answering one question.
#[derive(Debug)]
pub struct Answer {
    /// The SQL statement extracted from the model response.
    pub sql: String,
    /// The raw result set from the store.
    pub result: QueryResult,
    /// The formatted display message.
    pub message: String,
}
