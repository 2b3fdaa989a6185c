//! Field values and the form value map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A reference to a file picked in a file input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// File name as reported by the client.
    pub name: String,
    /// Size in bytes, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// MIME type, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileRef {
    /// Creates a file reference with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            content_type: None,
        }
    }
}

/// The shape of value a field stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Number,
    Bool,
    List,
    File,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::List => "list",
            Self::File => "file",
        };
        f.write_str(name)
    }
}

/// The current value of a single field.
///
/// Equality is strict: `Text("1")` and `Number(1.0)` are different values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// No value.
    #[default]
    Null,
    /// A boolean (single checkbox).
    Bool(bool),
    /// A number (numeric and range inputs).
    Number(f64),
    /// A string (text-like inputs, single selects, radios).
    Text(String),
    /// A list of option values (multi-select, checkbox groups).
    List(Vec<String>),
    /// A picked file.
    File(FileRef),
}

impl FormValue {
    /// Returns whether the value counts as empty for `required` checks.
    ///
    /// Zero and `false` are not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::File(_) => false,
        }
    }

    /// Length used by length rules: characters for text, items for lists.
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Coerces the value to a number.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Coerces the value to the string a pattern is matched against.
    pub fn coerce_to_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(","),
            Self::File(file) => file.name.clone(),
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the shape of this value, or `None` for `Null`.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueType::Bool),
            Self::Number(_) => Some(ValueType::Number),
            Self::Text(_) => Some(ValueType::Text),
            Self::List(_) => Some(ValueType::List),
            Self::File(_) => Some(ValueType::File),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for FormValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<FileRef> for FormValue {
    fn from(value: FileRef) -> Self {
        Self::File(value)
    }
}

/// Current values of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: HashMap<String, FormValue>,
}

impl FormValues {
    /// Creates an empty value map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for a field.
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.values.get(name)
    }

    /// Stores a value for a field, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder variant of [`FormValues::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns whether a value is present for a field (even an empty one).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Removes the value of a field.
    pub fn remove(&mut self, name: &str) -> Option<FormValue> {
        self.values.remove(name)
    }

    /// Iterates over all (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, FormValue>> for FormValues {
    fn from(values: HashMap<String, FormValue>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, FormValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, FormValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(FormValue::Null.is_empty());
        assert!(FormValue::from("").is_empty());
        assert!(FormValue::List(Vec::new()).is_empty());
        assert!(!FormValue::from(0).is_empty());
        assert!(!FormValue::from(false).is_empty());
        assert!(!FormValue::from(" ").is_empty());
    }

    #[test]
    fn test_strict_equality() {
        assert_ne!(FormValue::from("1"), FormValue::from(1));
        assert_eq!(FormValue::from("x"), FormValue::from("x"));
        assert_ne!(FormValue::from("x "), FormValue::from("x"));
    }

    #[test]
    fn test_length() {
        assert_eq!(FormValue::from("héllo").length(), Some(5));
        assert_eq!(FormValue::from(vec!["a", "b"]).length(), Some(2));
        assert_eq!(FormValue::from(12).length(), None);
        assert_eq!(FormValue::from("😀😀").length(), Some(2));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(FormValue::from(" 15 ").to_number(), Some(15.0));
        assert_eq!(FormValue::from("abc").to_number(), None);
        assert_eq!(FormValue::from("   ").to_number(), None);
        assert_eq!(FormValue::from(25).coerce_to_string(), "25");
        assert_eq!(FormValue::from(vec!["a", "b"]).coerce_to_string(), "a,b");
    }

    #[test]
    fn test_json_shapes() {
        let values: FormValues = serde_json::from_str(
            r#"{"name": "Ada", "age": 36, "active": true, "tags": ["a"], "note": null}"#,
        )
        .unwrap();
        assert_eq!(values.get("name"), Some(&FormValue::from("Ada")));
        assert_eq!(values.get("age"), Some(&FormValue::Number(36.0)));
        assert_eq!(values.get("active"), Some(&FormValue::Bool(true)));
        assert_eq!(values.get("tags"), Some(&FormValue::from(vec!["a"])));
        assert_eq!(values.get("note"), Some(&FormValue::Null));
    }
}
