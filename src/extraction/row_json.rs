//! Row payloads serialized by the dashboard process.
//!
//! Python's `json.dumps` writes empty pandas cells as the bare tokens `NaN`,
//! `Infinity` or `-Infinity`, which are not JSON. Outside string literals
//! they are read as `null`, so the cell stays absent instead of sinking the
//! whole row.

use serde_json::Value;

use crate::logging::structured::LogContext;

/// Longest first, so `-Infinity` is not read as `-` + `Infinity`.
const NON_FINITE_TOKENS: &[&str] = &["-Infinity", "Infinity", "NaN"];

/// Replace non-finite number tokens outside string literals with `null`.
pub fn null_non_finite(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = raw;

    while let Some(c) = rest.chars().next() {
        if !in_string {
            if let Some(token) = NON_FINITE_TOKENS.iter().find(|t| rest.starts_with(*t)) {
                out.push_str("null");
                rest = &rest[token.len()..];
                continue;
            }
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Parse one serialized row.
///
/// A row that still fails to parse is kept as its raw text; extraction turns
/// it into a record whose fields are malformed.
pub fn parse_row(raw: &str, index: usize, ctx: &LogContext) -> Value {
    if let Ok(value) = serde_json::from_str(raw) {
        return value;
    }

    match serde_json::from_str(&null_non_finite(raw)) {
        Ok(value) => {
            log::debug!("{} ROW_NON_FINITE_NULLED row_index={}", ctx, index);
            value
        }
        Err(e) => {
            log::warn!("{} ROW_PARSE_FAILED row_index={} error={}", ctx, index, e);
            Value::String(raw.to_string())
        }
    }
}

pub fn parse_rows<S: AsRef<str>>(rows: &[S], ctx: &LogContext) -> Vec<Value> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| parse_row(row.as_ref(), index, ctx))
        .collect()
}
