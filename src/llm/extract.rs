//! SQL extraction from model output.
//!
//! The model is told to return only a query, but responses may carry prose,
//! markdown fences, or several statements. Extraction isolates the first
//! `SELECT ... ;` span.

use regex::Regex;
use std::sync::OnceLock;

static SELECT_RE: OnceLock<Regex> = OnceLock::new();

/// Extracts the first SQL `SELECT` statement from free-form response text.
///
/// Matches the first case-insensitive span starting with `SELECT` and ending
/// at the next `;`, with `.` matching newlines, and returns it trimmed. The
/// keyword's case is preserved as written. A `SELECT` with no terminating
/// `;` does not match; callers must treat `None` as a hard failure for the
/// question.
pub fn extract_sql(response: &str) -> Option<String> {
    let re = SELECT_RE
        .get_or_init(|| Regex::new(r"(?is)SELECT .*?;").expect("SELECT pattern is valid"));

    re.find(response).map(|m| m.as_str().trim().to_string())
}
