//! Table configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filters::{
    BooleanFilter, ChoicesFilter, DateRangeFilter, Filter, NullFilter, RangeBucket, RangeFilter,
};

fn default_true() -> bool {
    true
}

fn default_per_page() -> usize {
    25
}

/// A displayed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Row key read by this column.
    pub key: String,
    /// Header label.
    pub label: String,
    /// Whether the column can be ordered by.
    #[serde(default = "default_true")]
    pub sortable: bool,
}

impl Column {
    /// Creates a sortable column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
        }
    }

    /// Disables ordering by this column.
    #[must_use]
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Where pagination happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Pagination {
    /// All rows are loaded; pages are cut locally.
    #[default]
    Client,
    /// Rows are one page of a server result of `total_count` rows.
    #[serde(rename_all = "camelCase")]
    Server { total_count: usize },
}

/// Configuration for how a table is displayed and queried.
pub struct TableConfig {
    /// Columns to display.
    pub columns: Vec<Column>,
    /// Row keys searched by the free-text query.
    pub search_fields: Vec<String>,
    /// Available filters.
    pub filters: Vec<Box<dyn Filter>>,
    /// Default ordering (prefix with - for descending).
    pub ordering: Vec<String>,
    /// Number of rows per page.
    pub per_page: usize,
    /// Pagination mode.
    pub pagination: Pagination,
}

impl std::fmt::Debug for TableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableConfig")
            .field("columns", &self.columns)
            .field("search_fields", &self.search_fields)
            .field(
                "filters",
                &self.filters.iter().map(|f| f.field()).collect::<Vec<_>>(),
            )
            .field("ordering", &self.ordering)
            .field("per_page", &self.per_page)
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            search_fields: Vec::new(),
            filters: Vec::new(),
            ordering: Vec::new(),
            per_page: default_per_page(),
            pagination: Pagination::Client,
        }
    }
}

impl TableConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// `today` anchors relative date filters.
    pub fn from_json(json: &str, today: NaiveDate) -> Result<Self> {
        let definition: TableDefinition = serde_json::from_str(json)?;
        Ok(definition.into_config(today))
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the columns for searching.
    #[must_use]
    pub fn search_fields(mut self, cols: &[&str]) -> Self {
        self.search_fields = cols.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Adds a filter.
    #[must_use]
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Sets the default ordering.
    #[must_use]
    pub fn ordering(mut self, cols: &[&str]) -> Self {
        self.ordering = cols.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the number of rows per page.
    #[must_use]
    pub fn per_page(mut self, n: usize) -> Self {
        self.per_page = n.max(1);
        self
    }

    /// Sets the pagination mode.
    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Returns the column with the given key.
    pub fn column_by_key(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns the filter on the given field.
    pub fn filter_for(&self, field: &str) -> Option<&dyn Filter> {
        self.filters
            .iter()
            .find(|f| f.field() == field)
            .map(|f| &**f)
    }
}

/// Serialized form of a filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FilterSpec {
    Boolean {
        field: String,
        label: String,
    },
    Choices {
        field: String,
        label: String,
        choices: Vec<(String, String)>,
    },
    Range {
        field: String,
        label: String,
        ranges: Vec<RangeBucket>,
    },
    Null {
        field: String,
        label: String,
    },
    DateRange {
        field: String,
        label: String,
    },
}

impl FilterSpec {
    /// Builds the filter.
    pub fn build(self, today: NaiveDate) -> Box<dyn Filter> {
        match self {
            Self::Boolean { field, label } => Box::new(BooleanFilter::new(field, label)),
            Self::Choices {
                field,
                label,
                choices,
            } => Box::new(
                choices
                    .into_iter()
                    .fold(ChoicesFilter::new(field, label), |f, (v, l)| f.choice(v, l)),
            ),
            Self::Range {
                field,
                label,
                ranges,
            } => Box::new(ranges.into_iter().fold(RangeFilter::new(field, label), |f, r| {
                f.range(r.value, r.label, r.min, r.max)
            })),
            Self::Null { field, label } => Box::new(NullFilter::new(field, label)),
            Self::DateRange { field, label } => Box::new(DateRangeFilter::new(field, label, today)),
        }
    }
}

/// Serialized form of a [`TableConfig`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    #[serde(default)]
    pub ordering: Vec<String>,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default)]
    pub pagination: Pagination,
}

impl TableDefinition {
    /// Builds the runtime configuration.
    pub fn into_config(self, today: NaiveDate) -> TableConfig {
        TableConfig {
            columns: self.columns,
            search_fields: self.search_fields,
            filters: self
                .filters
                .into_iter()
                .map(|spec| spec.build(today))
                .collect(),
            ordering: self.ordering,
            per_page: self.per_page.max(1),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_builder() {
        let config = TableConfig::new()
            .column(Column::new("title", "Title"))
            .column(Column::new("notes", "Notes").unsortable())
            .search_fields(&["title"])
            .filter(NullFilter::new("room", "Room"))
            .ordering(&["-title"])
            .per_page(0);

        assert_eq!(config.per_page, 1);
        assert!(config.column_by_key("title").is_some_and(|c| c.sortable));
        assert!(config.column_by_key("notes").is_some_and(|c| !c.sortable));
        assert!(config.filter_for("room").is_some());
    }

    #[test]
    fn test_from_json() {
        let config = TableConfig::from_json(
            r#"{
                "columns": [
                    {"key": "title", "label": "Title"},
                    {"key": "capacity", "label": "Capacity"}
                ],
                "searchFields": ["title"],
                "filters": [
                    {"type": "choices", "field": "status", "label": "Status",
                     "choices": [["active", "Active"], ["completed", "Completed"]]},
                    {"type": "range", "field": "capacity", "label": "Capacity",
                     "ranges": [{"value": "small", "label": "Small", "max": 20}]},
                    {"type": "date-range", "field": "starts_on", "label": "Starts"}
                ],
                "perPage": 10,
                "pagination": {"mode": "server", "totalCount": 120}
            }"#,
            today(),
        )
        .unwrap();

        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.filters.len(), 3);
        assert_eq!(config.per_page, 10);
        assert_eq!(config.pagination, Pagination::Server { total_count: 120 });
        assert_eq!(
            config.filter_for("status").map(|f| f.choices().len()),
            Some(2)
        );
    }
}
