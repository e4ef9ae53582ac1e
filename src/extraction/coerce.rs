//! Lenient cell coercion.
//!
//! Spreadsheet exports are inconsistent: periods arrive as `6`, `6.0` or
//! `"6 mois"`, dates as ISO or French day-first strings. Anything that
//! cannot be read is kept as `Field::Malformed` with its raw text.

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::extraction::json_path::value_to_string;
use crate::model::Field;

/// Date-only formats, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Date-time formats whose time part is dropped.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

lazy_static! {
    /// Integer month count, optional `.0` tail and optional unit.
    static ref MONTHS_PATTERN: Regex =
        Regex::new(r"(?i)^\s*(\d+)(?:[.,]0+)?\s*(?:mois|months?)?\s*$").unwrap();
}

/// Coerce a cell into a calendar date.
pub fn coerce_date(value: Option<&Value>) -> Field<NaiveDate> {
    let Some(text) = value.and_then(value_to_string) else {
        return Field::Absent;
    };

    match parse_date(&text) {
        Some(date) => Field::Present(date),
        None => Field::Malformed(text),
    }
}

/// Parse a date string in any accepted format.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            // Datetimes may carry fractional seconds ("...T00:00:00.000").
            let head = text.split('.').next().unwrap_or(text);
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(head, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Coerce a cell into a strictly positive month count.
pub fn coerce_months(value: Option<&Value>) -> Field<u32> {
    let Some(value) = value else {
        return Field::Absent;
    };
    let Some(text) = value_to_string(value) else {
        return Field::Absent;
    };

    let months = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64))
            .and_then(|m| u32::try_from(m).ok()),
        Value::String(s) => MONTHS_PATTERN
            .captures(s)
            .and_then(|caps| caps[1].parse::<u32>().ok()),
        _ => None,
    };

    match months {
        Some(m) if m > 0 => Field::Present(m),
        _ => Field::Malformed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_coerce_date_formats() {
        assert_eq!(coerce_date(Some(&json!("2024-01-31"))), Field::Present(ymd(2024, 1, 31)));
        assert_eq!(coerce_date(Some(&json!("31/01/2024"))), Field::Present(ymd(2024, 1, 31)));
        assert_eq!(
            coerce_date(Some(&json!("2024-01-31 00:00:00"))),
            Field::Present(ymd(2024, 1, 31))
        );
        assert_eq!(
            coerce_date(Some(&json!("2024-01-31T08:30:00.000"))),
            Field::Present(ymd(2024, 1, 31))
        );
    }

    #[test]
    fn test_coerce_date_absent_and_blank() {
        assert_eq!(coerce_date(None), Field::Absent);
        assert_eq!(coerce_date(Some(&json!(null))), Field::Absent);
        assert_eq!(coerce_date(Some(&json!("  "))), Field::Absent);
    }

    #[test]
    fn test_coerce_date_malformed() {
        assert_eq!(
            coerce_date(Some(&json!("bientôt"))),
            Field::Malformed("bientôt".to_string())
        );
        assert_eq!(
            coerce_date(Some(&json!("2024-02-30"))),
            Field::Malformed("2024-02-30".to_string())
        );
    }

    #[test]
    fn test_coerce_months_numbers() {
        assert_eq!(coerce_months(Some(&json!(6))), Field::Present(6));
        assert_eq!(coerce_months(Some(&json!(12.0))), Field::Present(12));
        assert_eq!(coerce_months(Some(&json!(0))), Field::Malformed("0".to_string()));
        assert_eq!(coerce_months(Some(&json!(-3))), Field::Malformed("-3".to_string()));
        assert_eq!(coerce_months(Some(&json!(1.5))), Field::Malformed("1.5".to_string()));
    }

    #[test]
    fn test_coerce_months_strings() {
        assert_eq!(coerce_months(Some(&json!("6"))), Field::Present(6));
        assert_eq!(coerce_months(Some(&json!("6.0"))), Field::Present(6));
        assert_eq!(coerce_months(Some(&json!("12 mois"))), Field::Present(12));
        assert_eq!(coerce_months(Some(&json!("abc"))), Field::Malformed("abc".to_string()));
        assert_eq!(coerce_months(Some(&json!("6.5"))), Field::Malformed("6.5".to_string()));
    }

    #[test]
    fn test_coerce_months_absent() {
        assert_eq!(coerce_months(None), Field::Absent);
        assert_eq!(coerce_months(Some(&json!(null))), Field::Absent);
        assert_eq!(coerce_months(Some(&json!(""))), Field::Absent);
    }

    #[test]
    fn test_boolean_cells_are_malformed() {
        assert_eq!(coerce_months(Some(&json!(true))), Field::Malformed("true".to_string()));
        assert_eq!(coerce_date(Some(&json!(false))), Field::Malformed("false".to_string()));

        let state = crate::classification::classify_tool(
            crate::model::StatusFlag::Normal,
            &Field::Present(ymd(2024, 1, 1)),
            &coerce_months(Some(&json!(true))),
            ymd(2024, 6, 1),
        );
        assert_eq!(state, crate::classification::AlertState::FormatError);
    }

    #[test]
    fn test_coerce_months_overflow() {
        assert!(matches!(
            coerce_months(Some(&json!("99999999999"))),
            Field::Malformed(_)
        ));
    }
}
