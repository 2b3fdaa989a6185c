//! Form widgets for rendering HTML inputs.

mod bootstrap;

pub use bootstrap::{
    BootstrapCheckbox, BootstrapCheckboxGroup, BootstrapColorInput, BootstrapFileInput,
    BootstrapRange, BootstrapRadioSelect, BootstrapSelect, BootstrapTextInput, BootstrapTextarea,
};

use std::collections::BTreeMap;

use crate::value::FormValue;

/// Attributes that can be applied to a widget.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    /// HTML attributes, rendered in key order.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// The `id` attribute, falling back to `id_<name>`.
    pub fn id_for(&self, name: &str) -> String {
        self.get("id")
            .cloned()
            .unwrap_or_else(|| format!("id_{name}"))
    }

    /// `base` followed by any extra `class` attribute.
    pub fn class_with(&self, base: &str) -> String {
        match self.get("class") {
            Some(extra) => format!("{base} {extra}"),
            None => base.to_string(),
        }
    }

    /// Renders every attribute except `id` and `class`, each with a
    /// leading space.
    pub fn extra_html(&self) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| k.as_str() != "class" && k.as_str() != "id")
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// A hidden input widget.
#[derive(Debug, Clone, Default)]
pub struct HiddenInput;

impl Widget for HiddenInput {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let value_attr = scalar_value_attr(value);
        format!(
            r#"<input type="hidden" name="{}"{value_attr}{}>"#,
            html_escape(name),
            attrs.extra_html()
        )
    }

    fn input_type(&self) -> &str {
        "hidden"
    }
}

/// Renders ` value="..."` for scalar values, nothing for `Null`.
pub(crate) fn scalar_value_attr(value: &FormValue) -> String {
    match value {
        FormValue::Null => String::new(),
        other => format!(r#" value="{}""#, html_escape(&other.coerce_to_string())),
    }
}

/// Returns whether `option` is among the selected values.
pub(crate) fn is_selected(value: &FormValue, option: &str) -> bool {
    match value {
        FormValue::List(items) => items.iter().any(|item| item == option),
        FormValue::Text(text) => text == option,
        _ => false,
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_input() {
        let widget = HiddenInput;
        let html = widget.render("csrf_token", &FormValue::from("abc123"), &WidgetAttrs::new());
        assert!(html.contains(r#"type="hidden""#));
        assert!(html.contains(r#"name="csrf_token""#));
        assert!(html.contains(r#"value="abc123""#));
    }

    #[test]
    fn test_hidden_input_without_value() {
        let html = HiddenInput.render("ref", &FormValue::Null, &WidgetAttrs::new());
        assert!(!html.contains("value="));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_widget_attrs() {
        let attrs = WidgetAttrs::new()
            .with("class", "is-invalid")
            .with("id", "my-input")
            .with("readonly", "readonly");
        assert_eq!(attrs.id_for("x"), "my-input");
        assert_eq!(attrs.class_with("form-control"), "form-control is-invalid");
        assert_eq!(attrs.extra_html(), r#" readonly="readonly""#);
    }

    #[test]
    fn test_is_selected() {
        assert!(is_selected(&FormValue::from(vec!["a", "b"]), "b"));
        assert!(is_selected(&FormValue::from("a"), "a"));
        assert!(!is_selected(&FormValue::Null, "a"));
    }
}
