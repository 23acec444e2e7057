//! talk2data - ask natural-language questions about a CSV dataset.
//!
//! Ingests a tabular file into an ephemeral SQLite store, translates each
//! question into SQL through a chat-completions API, executes the query,
//! and renders the result as a human-readable message.

pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod llm;
pub mod logging;
pub mod query;
pub mod store;
