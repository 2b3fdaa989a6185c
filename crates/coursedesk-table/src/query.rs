//! Table query parameters.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::{Result, TableError};

/// Parameters for one table request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableQuery {
    /// Current page number (1-indexed).
    pub page: usize,
    /// Rows per page, overriding the table default.
    pub per_page: Option<usize>,
    /// Search query.
    pub search: Option<String>,
    /// Active filters (field -> value).
    pub filters: BTreeMap<String, String>,
    /// Sort keys (prefix with - for descending).
    pub ordering: Vec<String>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: None,
            search: None,
            filters: BTreeMap::new(),
            ordering: Vec::new(),
        }
    }
}

fn parse_count(param: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| TableError::InvalidQuery {
        param: param.to_string(),
        value: value.to_string(),
    })
}

impl TableQuery {
    /// Creates a query for the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses query parameters.
    ///
    /// `page`, `per_page`, `q` and `o` (comma-separated sort keys) are
    /// reserved; all other parameters are treated as filters. Empty
    /// values are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let mut query = Self::default();

        for (key, value) in params {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "page" => query.page = parse_count(key, value)?.max(1),
                "per_page" => query.per_page = Some(parse_count(key, value)?.max(1)),
                "q" => query.search = Some(value.clone()),
                "o" => {
                    query.ordering = value
                        .split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {
                    query.filters.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(query)
    }

    /// Parses a URL query string such as `page=2&q=rust&status=active`.
    ///
    /// A leading `?` is accepted.
    pub fn parse(query_string: &str) -> Result<Self> {
        let params: HashMap<String, String> = query_string
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (urldecode(k), urldecode(v))
            })
            .collect();
        Self::from_params(&params)
    }

    /// Returns a copy pointing at another page.
    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Returns a copy ordered by a single key.
    #[must_use]
    pub fn with_ordering(&self, key: impl Into<String>) -> Self {
        Self {
            page: 1,
            ordering: vec![key.into()],
            ..self.clone()
        }
    }

    /// Builds a query string from parameters.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();

        if self.page > 1 {
            parts.push(format!("page={}", self.page));
        }
        if let Some(per_page) = self.per_page {
            parts.push(format!("per_page={per_page}"));
        }
        if let Some(ref q) = self.search {
            parts.push(format!("q={}", urlencode(q)));
        }
        if !self.ordering.is_empty() {
            parts.push(format!("o={}", urlencode(&self.ordering.join(","))));
        }
        for (k, v) in &self.filters {
            parts.push(format!("{}={}", urlencode(k), urlencode(v)));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

fn urlencode(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

fn urldecode(s: &str) -> String {
    let bytes = urlencoding::decode_binary(s.replace('+', " ").as_bytes()).into_owned();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params() {
        let mut params = HashMap::new();
        params.insert("page".to_string(), "2".to_string());
        params.insert("q".to_string(), "john".to_string());
        params.insert("o".to_string(), "-starts_on,title".to_string());
        params.insert("status".to_string(), "active".to_string());

        let query = TableQuery::from_params(&params).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.search, Some("john".to_string()));
        assert_eq!(query.ordering, vec!["-starts_on", "title"]);
        assert_eq!(query.filters.get("status"), Some(&"active".to_string()));
    }

    #[test]
    fn test_malformed_page() {
        let err = TableQuery::parse("page=two").unwrap_err();
        assert!(matches!(err, TableError::InvalidQuery { param, .. } if param == "page"));
    }

    #[test]
    fn test_page_zero_clamps() {
        assert_eq!(TableQuery::parse("page=0").unwrap().page, 1);
    }

    #[test]
    fn test_round_trip_through_query_string() {
        let query = TableQuery::parse("?q=intro+to+rust&o=-title&level=a%26b&page=3").unwrap();
        assert_eq!(query.search.as_deref(), Some("intro to rust"));
        assert_eq!(query.filters.get("level").map(String::as_str), Some("a&b"));

        assert_eq!(
            query.to_query_string(),
            "?page=3&q=intro+to+rust&o=-title&level=a%26b"
        );
    }

    #[test]
    fn test_empty_query_string() {
        assert_eq!(TableQuery::new().to_query_string(), "");
        assert_eq!(TableQuery::parse("").unwrap(), TableQuery::new());
    }
}
