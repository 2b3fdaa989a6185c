//! Applying a query to table rows.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, warn};

use crate::cell::{cell_text, compare_cells, is_blank, Row};
use crate::config::{Pagination, TableConfig};
use crate::error::{Result, TableError};
use crate::query::TableQuery;

/// One page of table output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    /// Rows on this page.
    pub rows: Vec<Row>,
    /// Current page number (1-indexed).
    pub page: usize,
    /// Rows per page.
    pub per_page: usize,
    /// Total number of matching rows across all pages.
    pub total_count: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
}

impl TablePage {
    /// 1-indexed position of the first row on this page, 0 when empty.
    pub fn start_index(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// 1-indexed position of the last row on this page.
    pub fn end_index(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.start_index() + self.rows.len() - 1
        }
    }
}

/// A resolved sort key.
struct SortKey<'a> {
    column: &'a str,
    descending: bool,
}

/// Resolves ordering keys against the sortable columns.
fn sort_keys<'a>(config: &TableConfig, ordering: &'a [String]) -> Result<Vec<SortKey<'a>>> {
    ordering
        .iter()
        .map(|key| {
            let (column, descending) = match key.strip_prefix('-') {
                Some(stripped) => (stripped, true),
                None => (key.as_str(), false),
            };
            match config.column_by_key(column) {
                Some(c) if c.sortable => Ok(SortKey { column, descending }),
                _ => Err(TableError::UnknownColumn(column.to_string())),
            }
        })
        .collect()
}

/// Case-insensitive substring search over the configured fields.
fn matches_search(row: &Row, search_fields: &[String], needle: &str) -> bool {
    search_fields.iter().any(|field| {
        cell_text(row.get(field)).is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

fn compare_rows(a: &Row, b: &Row, keys: &[SortKey<'_>]) -> Ordering {
    for key in keys {
        let (x, y) = (a.get(key.column), b.get(key.column));
        // Blanks sort last in both directions.
        let ordering = match (is_blank(x), is_blank(y)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = compare_cells(x, y);
                if key.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Runs search, filters, ordering and pagination over `rows`.
///
/// With [`Pagination::Server`] the rows are already one page of the
/// server's result: search, filters and ordering narrow that page only,
/// and the page count comes from the server total.
pub fn apply(config: &TableConfig, query: &TableQuery, rows: Vec<Row>) -> Result<TablePage> {
    let ordering = if query.ordering.is_empty() {
        &config.ordering
    } else {
        &query.ordering
    };
    let keys = sort_keys(config, ordering)?;
    let per_page = query.per_page.unwrap_or(config.per_page).max(1);

    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut active = Vec::new();
    for (field, value) in &query.filters {
        match config.filter_for(field) {
            Some(filter) => active.push((filter, value.as_str())),
            None => debug!(field = %field, "Ignoring filter on unknown field"),
        }
    }

    let received = rows.len();
    let mut matched: Vec<Row> = rows
        .into_iter()
        .filter(|row| match needle.as_deref() {
            Some(n) if !config.search_fields.is_empty() => {
                matches_search(row, &config.search_fields, n)
            }
            _ => true,
        })
        .filter(|row| {
            active.iter().all(|(filter, value)| match filter.matches(row, value) {
                Some(hit) => hit,
                None => {
                    warn!(field = filter.field(), value = %value, "Ignoring invalid filter value");
                    true
                }
            })
        })
        .collect();

    if !keys.is_empty() {
        matched.sort_by(|a, b| compare_rows(a, b, &keys));
    }

    let page = match config.pagination {
        Pagination::Client => {
            let total_count = matched.len();
            let total_pages = total_count.div_ceil(per_page).max(1);
            let page = query.page.clamp(1, total_pages);
            let rows = matched
                .into_iter()
                .skip((page - 1) * per_page)
                .take(per_page)
                .collect();
            TablePage {
                rows,
                page,
                per_page,
                total_count,
                total_pages,
            }
        }
        Pagination::Server { total_count } => TablePage {
            rows: matched,
            page: query.page.max(1),
            per_page,
            total_count,
            total_pages: total_count.div_ceil(per_page).max(1),
        },
    };

    debug!(
        received,
        matched = page.total_count,
        page = page.page,
        total_pages = page.total_pages,
        "Applied table query"
    );

    Ok(page)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::Column;
    use crate::filters::{ChoicesFilter, NullFilter};

    fn rows() -> Vec<Row> {
        let data = json!([
            {"title": "Intro to Rust", "status": "active", "capacity": 30, "room": "A1"},
            {"title": "Advanced Rust", "status": "completed", "capacity": 12, "room": null},
            {"title": "Databases", "status": "active", "capacity": 25, "room": "B2"},
            {"title": "Networking", "status": "active", "capacity": null, "room": "C3"}
        ]);
        serde_json::from_value(data).unwrap()
    }

    fn config() -> TableConfig {
        TableConfig::new()
            .column(Column::new("title", "Title"))
            .column(Column::new("capacity", "Capacity"))
            .column(Column::new("room", "Room").unsortable())
            .search_fields(&["title"])
            .filter(
                ChoicesFilter::new("status", "Status")
                    .choice("active", "Active")
                    .choice("completed", "Completed"),
            )
            .filter(NullFilter::new("room", "Room"))
            .per_page(2)
    }

    fn titles(page: &TablePage) -> Vec<&str> {
        page.rows
            .iter()
            .filter_map(|r| r.get("title").and_then(|v| v.as_str()))
            .collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = TableQuery::parse("q=RUST").unwrap();
        let page = apply(&config(), &query, rows()).unwrap();
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let query = TableQuery::parse("status=active&room=notnull").unwrap();
        let page = apply(&config().per_page(10), &query, rows()).unwrap();
        assert_eq!(titles(&page), vec!["Intro to Rust", "Databases", "Networking"]);

        let query = TableQuery::parse("status=completed&room=notnull").unwrap();
        let page = apply(&config(), &query, rows()).unwrap();
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_invalid_filter_value_ignored() {
        let query = TableQuery::parse("status=archived").unwrap();
        let page = apply(&config(), &query, rows()).unwrap();
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn test_sort_descending_with_nulls_last() {
        let query = TableQuery::parse("o=-capacity&per_page=10").unwrap();
        let page = apply(&config(), &query, rows()).unwrap();
        assert_eq!(
            titles(&page),
            vec!["Intro to Rust", "Databases", "Advanced Rust", "Networking"]
        );

        let query = TableQuery::parse("o=capacity&per_page=10").unwrap();
        let page = apply(&config(), &query, rows()).unwrap();
        assert_eq!(titles(&page).last(), Some(&"Networking"));
    }

    #[test]
    fn test_unsortable_column_rejected() {
        let query = TableQuery::parse("o=room").unwrap();
        let err = apply(&config(), &query, rows()).unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn(c) if c == "room"));
    }

    #[test]
    fn test_client_pagination() {
        let query = TableQuery::parse("o=title&page=2").unwrap();
        let page = apply(&config(), &query, rows()).unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(titles(&page), vec!["Intro to Rust", "Networking"]);
        assert_eq!(page.start_index(), 3);
        assert_eq!(page.end_index(), 4);

        let query = TableQuery::parse("page=9").unwrap();
        assert_eq!(apply(&config(), &query, rows()).unwrap().page, 2);
    }

    #[test]
    fn test_server_pagination_uses_total() {
        let config = config().pagination(Pagination::Server { total_count: 41 });
        let query = TableQuery::parse("page=3").unwrap();
        let page = apply(&config, &query, rows()).unwrap();

        assert_eq!(page.rows.len(), 4);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_count, 41);
        assert_eq!(page.total_pages, 21);
    }
}
