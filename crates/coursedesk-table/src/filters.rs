//! Row filters for data tables.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;

use crate::cell::{cell_bool, cell_date, cell_number, cell_text, is_blank, Row};

/// A filter that can be applied to table rows.
pub trait Filter: Send + Sync {
    /// Returns the filter's field name.
    fn field(&self) -> &str;

    /// Returns the display label for this filter.
    fn label(&self) -> &str;

    /// Returns the available filter options as (value, label) pairs.
    fn choices(&self) -> Vec<(String, String)>;

    /// Tests a row against the selected filter value.
    ///
    /// Returns None if the value is not valid for this filter.
    fn matches(&self, row: &Row, value: &str) -> Option<bool>;
}

/// A filter for boolean fields.
pub struct BooleanFilter {
    field: String,
    label: String,
    true_label: String,
    false_label: String,
}

impl BooleanFilter {
    /// Creates a new boolean filter.
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            true_label: "Yes".to_string(),
            false_label: "No".to_string(),
        }
    }

    /// Sets custom labels for true/false values.
    #[must_use]
    pub fn labels(mut self, true_label: impl Into<String>, false_label: impl Into<String>) -> Self {
        self.true_label = true_label.into();
        self.false_label = false_label.into();
        self
    }
}

impl Filter for BooleanFilter {
    fn field(&self) -> &str {
        &self.field
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn choices(&self) -> Vec<(String, String)> {
        vec![
            ("1".to_string(), self.true_label.clone()),
            ("0".to_string(), self.false_label.clone()),
        ]
    }

    fn matches(&self, row: &Row, value: &str) -> Option<bool> {
        let wanted = match value {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => return None,
        };
        Some(cell_bool(row.get(&self.field)) == Some(wanted))
    }
}

/// A filter with predefined choices.
pub struct ChoicesFilter {
    field: String,
    label: String,
    choices: Vec<(String, String)>,
}

impl ChoicesFilter {
    /// Creates a new choices filter.
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            choices: Vec::new(),
        }
    }

    /// Adds a choice to the filter.
    #[must_use]
    pub fn choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices.push((value.into(), label.into()));
        self
    }
}

impl Filter for ChoicesFilter {
    fn field(&self) -> &str {
        &self.field
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn choices(&self) -> Vec<(String, String)> {
        self.choices.clone()
    }

    fn matches(&self, row: &Row, value: &str) -> Option<bool> {
        if !self.choices.iter().any(|(v, _)| v == value) {
            return None;
        }
        Some(cell_text(row.get(&self.field)).as_deref() == Some(value))
    }
}

/// A filter for relative date ranges, anchored on a fixed `today`.
pub struct DateRangeFilter {
    field: String,
    label: String,
    today: NaiveDate,
}

impl DateRangeFilter {
    /// Creates a new date range filter.
    pub fn new(field: impl Into<String>, label: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            today,
        }
    }
}

impl Filter for DateRangeFilter {
    fn field(&self) -> &str {
        &self.field
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn choices(&self) -> Vec<(String, String)> {
        vec![
            ("today".to_string(), "Today".to_string()),
            ("past_7_days".to_string(), "Past 7 days".to_string()),
            ("this_month".to_string(), "This month".to_string()),
            ("this_year".to_string(), "This year".to_string()),
        ]
    }

    fn matches(&self, row: &Row, value: &str) -> Option<bool> {
        let date = cell_date(row.get(&self.field));
        let today = self.today;
        let hit = match value {
            "today" => date.is_some_and(|d| d == today),
            "past_7_days" => date.is_some_and(|d| d >= today - Duration::days(7)),
            "this_month" => {
                date.is_some_and(|d| d.year() == today.year() && d.month() == today.month())
            }
            "this_year" => date.is_some_and(|d| d.year() == today.year()),
            _ => return None,
        };
        Some(hit)
    }
}

/// A named numeric bucket of a [`RangeFilter`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RangeBucket {
    /// Query value selecting this bucket.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Inclusive lower bound.
    #[serde(default)]
    pub min: Option<i64>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub max: Option<i64>,
}

/// A filter for numeric ranges.
pub struct RangeFilter {
    field: String,
    label: String,
    ranges: Vec<RangeBucket>,
}

impl RangeFilter {
    /// Creates a new range filter.
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            ranges: Vec::new(),
        }
    }

    /// Adds a range option.
    #[must_use]
    pub fn range(
        mut self,
        value: impl Into<String>,
        label: impl Into<String>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Self {
        self.ranges.push(RangeBucket {
            value: value.into(),
            label: label.into(),
            min,
            max,
        });
        self
    }
}

impl Filter for RangeFilter {
    fn field(&self) -> &str {
        &self.field
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn choices(&self) -> Vec<(String, String)> {
        self.ranges
            .iter()
            .map(|r| (r.value.clone(), r.label.clone()))
            .collect()
    }

    fn matches(&self, row: &Row, value: &str) -> Option<bool> {
        let bucket = self.ranges.iter().find(|r| r.value == value)?;
        let Some(n) = cell_number(row.get(&self.field)) else {
            return Some(false);
        };
        let above = bucket.min.map_or(true, |min| n >= min as f64);
        let below = bucket.max.map_or(true, |max| n <= max as f64);
        Some(above && below)
    }
}

/// A filter for null/not null checks.
pub struct NullFilter {
    field: String,
    label: String,
}

impl NullFilter {
    /// Creates a new null filter.
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

impl Filter for NullFilter {
    fn field(&self) -> &str {
        &self.field
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn choices(&self) -> Vec<(String, String)> {
        vec![
            ("null".to_string(), "Empty".to_string()),
            ("notnull".to_string(), "Not empty".to_string()),
        ]
    }

    fn matches(&self, row: &Row, value: &str) -> Option<bool> {
        let blank = is_blank(row.get(&self.field));
        match value {
            "null" => Some(blank),
            "notnull" => Some(!blank),
            _ => None,
        }
    }
}
