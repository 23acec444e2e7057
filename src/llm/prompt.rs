//! Prompt construction for SQL generation requests.
//!
//! Builds the fixed system instruction plus a schema hint so the model
//! knows which columns exist.

use crate::llm::types::Message;

/// System prompt template for the SQLite query generator.
const SYSTEM_PROMPT_TEMPLATE: &str = "You are an expert in generating valid SQLite queries. \
The user will ask natural language questions about a table named '{table}' which can contain any dataset structure. \
Only respond with a syntactically correct SQLite query. \
If comparing strings (like city or gender), use LOWER() for case-insensitive comparison. \
Do not include explanations or extra text - only return the SQL query. \
{schema_hint}";

/// Builds the schema-hint sentence from a table's column names.
pub fn build_schema_hint(table: &str, columns: &[String]) -> String {
    format!(
        "The table '{}' has the following columns: {}.",
        table,
        columns.join(", ")
    )
}

/// Builds the system prompt with the schema hint injected.
pub fn build_system_prompt(table: &str, columns: &[String]) -> String {
    SYSTEM_PROMPT_TEMPLATE
        .replace("{table}", table)
        .replace("{schema_hint}", &build_schema_hint(table, columns))
}

/// Builds the complete message list for one question.
pub fn build_messages(table: &str, columns: &[String], question: &str) -> Vec<Message> {
    vec![
        Message::system(build_system_prompt(table, columns)),
        Message::user(format!(
            "Convert this question into an SQLite query: {question}"
        )),
    ]
}
