//! Result formatting for talk2data.
//!
//! Turns a result set into a human-readable message: a scalar sentence for
//! one-row-one-column results, a bulleted listing otherwise.

use crate::store::{Row, Value};

/// Message returned for an empty result set.
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

/// Marker prefixed to scalar results.
const SCALAR_MARKER: &str = "💡";

/// Marker prefixed to each row of a listing.
const ROW_MARKER: &str = "•";

/// Formats a result set as a display message.
///
/// Rules, applied in order:
/// 1. Empty -> [`NO_RESULTS_MESSAGE`].
/// 2. Exactly one row with one column -> scalar message; floats are rounded
///    to 2 decimal places.
/// 3. Otherwise one bulleted line per row, values joined by `" | "`, rows
///    separated by a blank line. No rounding outside the scalar case.
pub fn format_rows(rows: &[Row]) -> String {
    if rows.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    if rows.len() == 1 && rows[0].len() == 1 {
        let value = match &rows[0][0] {
            Value::Float(f) => Value::Float(round2(*f)),
            other => other.clone(),
        };
        return format!("{SCALAR_MARKER} The result is: {value}");
    }

    rows.iter()
        .map(|row| {
            let cells = row
                .iter()
                .map(Value::to_display_string)
                .collect::<Vec<_>>()
                .join(" | ");
            format!("{ROW_MARKER} {cells}")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rounds to 2 decimal places.
fn round2(f: f64) -> f64 {
    (f * 100.0).round() / 100.0
}
