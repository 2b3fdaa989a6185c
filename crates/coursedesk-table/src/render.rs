//! Bootstrap 5 table rendering.

use crate::cell::cell_text;
use crate::config::TableConfig;
use crate::query::TableQuery;
use crate::table::TablePage;

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Renders the table, its sort links and pagination.
///
/// Links keep the current search and filters.
pub fn render_table(config: &TableConfig, query: &TableQuery, page: &TablePage) -> String {
    let table = render_rows(config, query, page);
    let pagination = render_pagination(query, page);

    format!(
        r#"<div class="card">
    <div class="card-body p-0">
        {table}
    </div>
    <div class="card-footer bg-white">
        {pagination}
    </div>
</div>"#
    )
}

fn render_header(config: &TableConfig, query: &TableQuery) -> String {
    config
        .columns
        .iter()
        .map(|col| {
            if !col.sortable {
                return format!("<th>{}</th>", html_escape(&col.label));
            }
            let ascending = query.ordering.first().map(String::as_str) == Some(col.key.as_str());
            let (next, icon) = if ascending {
                (format!("-{}", col.key), r#" <i class="bi bi-sort-up"></i>"#)
            } else if query.ordering.first() == Some(&format!("-{}", col.key)) {
                (col.key.clone(), r#" <i class="bi bi-sort-down"></i>"#)
            } else {
                (col.key.clone(), "")
            };
            format!(
                r#"<th><a href="{}" class="text-decoration-none">{}</a>{icon}</th>"#,
                html_escape(&query.with_ordering(next).to_query_string()),
                html_escape(&col.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_rows(config: &TableConfig, query: &TableQuery, page: &TablePage) -> String {
    if page.rows.is_empty() {
        return r#"<div class="text-center text-muted py-5">No items found.</div>"#.to_string();
    }

    let rows: Vec<String> = page
        .rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = config
                .columns
                .iter()
                .map(|col| {
                    let text = cell_text(row.get(&col.key)).unwrap_or_default();
                    format!("<td>{}</td>", html_escape(&text))
                })
                .collect();
            format!("<tr>{}</tr>", cells.join(""))
        })
        .collect();

    format!(
        r#"<div class="table-responsive">
            <table class="table table-striped table-hover mb-0">
                <thead class="table-light">
                    <tr>
                        {headers}
                    </tr>
                </thead>
                <tbody>
                    {rows}
                </tbody>
            </table>
        </div>"#,
        headers = render_header(config, query),
        rows = rows.join("\n")
    )
}

fn page_link(query: &TableQuery, page: usize, text: &str) -> String {
    let href = query.with_page(page).to_query_string();
    let href = if href.is_empty() { "?".to_string() } else { href };
    format!(
        r#"<li class="page-item"><a class="page-link" href="{}">{text}</a></li>"#,
        html_escape(&href)
    )
}

fn render_pagination(query: &TableQuery, page: &TablePage) -> String {
    if page.total_pages <= 1 {
        return format!(
            r#"<div class="d-flex justify-content-between align-items-center">
                <span class="text-muted">Showing {} items</span>
            </div>"#,
            page.total_count
        );
    }

    let current = page.page;
    let mut items = Vec::new();

    if current > 1 {
        items.push(page_link(query, current - 1, "&laquo;"));
    } else {
        items.push(
            r#"<li class="page-item disabled"><span class="page-link">&laquo;</span></li>"#
                .to_string(),
        );
    }

    for p in 1..=page.total_pages {
        let distance = p.abs_diff(current);
        if p == current {
            items.push(format!(
                r#"<li class="page-item active"><span class="page-link">{p}</span></li>"#
            ));
        } else if distance <= 2 || p == 1 || p == page.total_pages {
            items.push(page_link(query, p, &p.to_string()));
        } else if distance == 3 {
            items.push(
                r#"<li class="page-item disabled"><span class="page-link">...</span></li>"#
                    .to_string(),
            );
        }
    }

    if current < page.total_pages {
        items.push(page_link(query, current + 1, "&raquo;"));
    } else {
        items.push(
            r#"<li class="page-item disabled"><span class="page-link">&raquo;</span></li>"#
                .to_string(),
        );
    }

    format!(
        r#"<div class="d-flex justify-content-between align-items-center">
            <span class="text-muted">Page {current} of {pages}, {total} items</span>
            <nav>
                <ul class="pagination pagination-sm mb-0">
                    {items}
                </ul>
            </nav>
        </div>"#,
        pages = page.total_pages,
        total = page.total_count,
        items = items.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::Column;
    use crate::table::apply;

    fn config() -> TableConfig {
        TableConfig::new()
            .column(Column::new("title", "Title"))
            .column(Column::new("notes", "Notes").unsortable())
            .per_page(1)
    }

    fn rows() -> Vec<crate::cell::Row> {
        serde_json::from_value(json!([
            {"title": "<b>Rust</b>", "notes": "x"},
            {"title": "Go", "notes": null}
        ]))
        .unwrap()
    }

    #[test]
    fn test_render_escapes_cells() {
        let query = TableQuery::new();
        let page = apply(&config(), &query, rows()).unwrap();
        let html = render_table(&config(), &query, &page);

        assert!(html.contains("&lt;b&gt;Rust&lt;/b&gt;"));
        assert!(!html.contains("<b>Rust</b>"));
    }

    #[test]
    fn test_sort_links() {
        let query = TableQuery::parse("o=title&status=active").unwrap();
        let page = apply(&config(), &query, rows()).unwrap();
        let html = render_table(&config(), &query, &page);

        assert!(html.contains(r#"href="?o=-title&amp;status=active""#));
        assert!(html.contains("bi-sort-up"));
        assert!(html.contains("<th>Notes</th>"));
    }

    #[test]
    fn test_pagination_keeps_filters() {
        let query = TableQuery::parse("q=r").unwrap();
        let config = config().search_fields(&["title"]);
        let page = apply(&config, &TableQuery::new(), rows()).unwrap();
        let html = render_table(&config, &query, &page);

        assert!(html.contains("Page 1 of 2, 2 items"));
        assert!(html.contains(r#"href="?page=2&amp;q=r""#));
    }

    #[test]
    fn test_empty_page() {
        let page = apply(&config(), &TableQuery::new(), Vec::new()).unwrap();
        let html = render_table(&config(), &TableQuery::new(), &page);
        assert!(html.contains("No items found."));
        assert!(html.contains("Showing 0 items"));
    }
}
