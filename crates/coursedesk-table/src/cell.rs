//! Reading and comparing row cells.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// One table row: column key to JSON value.
pub type Row = Map<String, Value>;

/// Whether a cell is absent, `null` or an empty string.
pub fn is_blank(cell: Option<&Value>) -> bool {
    match cell {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Display text of a scalar cell; `None` for blanks and containers.
pub fn cell_text(cell: Option<&Value>) -> Option<String> {
    match cell? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric value of a cell; numeric strings count.
pub fn cell_number(cell: Option<&Value>) -> Option<f64> {
    match cell? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Truthiness of a cell as stored by typical backends.
pub fn cell_bool(cell: Option<&Value>) -> Option<bool> {
    match cell? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Calendar date of a cell holding `YYYY-MM-DD` or a date-time.
pub fn cell_date(cell: Option<&Value>) -> Option<NaiveDate> {
    let Value::String(s) = cell? else {
        return None;
    };
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Orders two cells ascending; blanks compare equal to each other.
///
/// Numbers compare numerically, everything else by display text.
/// Callers handle blanks themselves so they can keep them last.
pub fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(x)), Some(Value::Number(y))) = (a, b) {
        if let (Some(x), Some(y)) = (x.as_f64(), y.as_f64()) {
            return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
        }
    }
    match (cell_text(a), cell_text(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_blank_cells() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&Value::Null)));
        assert!(is_blank(Some(&json!(""))));
        assert!(!is_blank(Some(&json!(0))));
    }

    #[test]
    fn test_cell_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 14);
        assert_eq!(cell_date(Some(&json!("2026-03-14"))), expected);
        assert_eq!(cell_date(Some(&json!("2026-03-14T09:30:00Z"))), expected);
        assert_eq!(cell_date(Some(&json!("2026-03-14T09:30:00"))), expected);
        assert_eq!(cell_date(Some(&json!("March"))), None);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(
            compare_cells(Some(&json!(9)), Some(&json!(10))),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(Some(&json!("9")), Some(&json!("10"))),
            Ordering::Greater
        );
    }
}
