//! Error types for forms.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::value::ValueType;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// Two fields share a name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// A dependency watches a field that does not exist.
    #[error("field {field} depends on unknown field {target}")]
    UnknownDependency { field: String, target: String },

    /// A dependency compares a field with a value of another type.
    #[error("field {field} compares {target} ({expected}) with a {found} value")]
    DependencyTypeMismatch {
        field: String,
        target: String,
        expected: ValueType,
        found: ValueType,
    },

    /// No field has this name.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The form is waiting for its submit handler.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// A validation pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Form schema or value parsing error.
    #[error("failed to parse form data: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Failure reported by a submit handler.
///
/// The engine does not interpret the message; it is forwarded to the
/// error channel as is.
#[derive(Debug, Clone, Error)]
#[error("submission failed: {message}")]
pub struct SubmitError {
    /// Handler-supplied description.
    pub message: String,
}

impl SubmitError {
    /// Creates a submit error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validation errors by field, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    errors: HashMap<String, String>,
}

impl FormErrors {
    /// Creates a new empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error of a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Clears the error of a field.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.remove(field)
    }

    /// Returns the error of a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over (field, message) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keeps only the errors of fields accepted by `keep`.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self {
            errors: self
                .errors
                .iter()
                .filter(|(field, _)| keep(field))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self.errors.iter().collect();
        entries.sort();
        for (field, message) in entries {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_message_per_field() {
        let mut errors = FormErrors::new();
        errors.insert("name", "Name is required");
        errors.insert("name", "Name format is invalid");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Name format is invalid"));
    }

    #[test]
    fn test_display_is_sorted() {
        let mut errors = FormErrors::new();
        errors.insert("b", "second");
        errors.insert("a", "first");

        assert_eq!(errors.to_string(), "a: first\nb: second\n");
    }

    #[test]
    fn test_filtered() {
        let mut errors = FormErrors::new();
        errors.insert("a", "x");
        errors.insert("b", "y");

        let only_a = errors.filtered(|field| field == "a");
        assert!(only_a.contains("a"));
        assert!(!only_a.contains("b"));
    }
}
