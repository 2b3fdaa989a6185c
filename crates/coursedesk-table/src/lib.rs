//! # coursedesk-table
//!
//! Data tables for the course administration dashboard: free-text search,
//! filters, multi-key ordering and pagination over JSON rows.
//!
//! ## Quick Start
//!
//! ```rust
//! use coursedesk_table::{apply, ChoicesFilter, Column, Row, TableConfig, TableQuery};
//!
//! let config = TableConfig::new()
//!     .column(Column::new("title", "Title"))
//!     .column(Column::new("capacity", "Capacity"))
//!     .search_fields(&["title"])
//!     .filter(
//!         ChoicesFilter::new("status", "Status")
//!             .choice("active", "Active")
//!             .choice("completed", "Completed"),
//!     )
//!     .per_page(10);
//!
//! let rows: Vec<Row> = serde_json::from_str(r#"[
//!     {"title": "Intro to Rust", "status": "active", "capacity": 30},
//!     {"title": "Databases", "status": "completed", "capacity": 20}
//! ]"#).unwrap();
//!
//! let query = TableQuery::parse("q=rust&status=active&o=-capacity").unwrap();
//! let page = apply(&config, &query, rows).unwrap();
//! assert_eq!(page.total_count, 1);
//! ```

mod cell;
mod config;
mod error;
pub mod filters;
mod query;
mod render;
mod table;

pub use cell::Row;
pub use config::{Column, FilterSpec, Pagination, TableConfig, TableDefinition};
pub use error::{Result, TableError};
pub use filters::{
    BooleanFilter, ChoicesFilter, DateRangeFilter, Filter, NullFilter, RangeBucket, RangeFilter,
};
pub use query::TableQuery;
pub use render::render_table;
pub use table::{apply, TablePage};
