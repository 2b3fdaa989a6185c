//! Field visibility.
//!
//! Visibility is recomputed from the current values on every call. A field
//! depending on another hidden field is still evaluated against that
//! field's stored value; chains work because every field is evaluated
//! against the same snapshot, and cycles are not detected.

use crate::field::FieldDefinition;
use crate::value::FormValues;

/// Returns whether `field` is visible for the given values.
///
/// A missing watched value never equals the dependency value.
pub fn is_visible(field: &FieldDefinition, values: &FormValues) -> bool {
    let Some(dependency) = &field.dependency else {
        return true;
    };

    let matches = values
        .get(&dependency.field)
        .is_some_and(|current| *current == dependency.value);

    if dependency.show {
        matches
    } else {
        !matches
    }
}

/// Iterates over the visible fields, in declaration order.
pub fn visible_fields<'a>(
    fields: &'a [FieldDefinition],
    values: &'a FormValues,
) -> impl Iterator<Item = &'a FieldDefinition> + 'a {
    fields.iter().filter(move |field| is_visible(field, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::text_field;
    use crate::value::FormValue;

    #[test]
    fn test_no_dependency_is_visible() {
        assert!(is_visible(&text_field("a", "A"), &FormValues::new()));
    }

    #[test]
    fn test_show_on_exact_match() {
        let b = text_field("b", "B").shown_when("a", "x");

        assert!(is_visible(&b, &FormValues::new().with("a", "x")));
        assert!(!is_visible(&b, &FormValues::new().with("a", "x ")));
        assert!(!is_visible(&b, &FormValues::new()));
    }

    #[test]
    fn test_hide_on_match() {
        let b = text_field("b", "B").hidden_when("a", "x");

        assert!(!is_visible(&b, &FormValues::new().with("a", "x")));
        assert!(is_visible(&b, &FormValues::new().with("a", "y")));
        assert!(is_visible(&b, &FormValues::new()));
    }

    #[test]
    fn test_type_sensitive_comparison() {
        let b = text_field("b", "B").shown_when("a", 1);
        assert!(!is_visible(&b, &FormValues::new().with("a", "1")));
        assert!(is_visible(&b, &FormValues::new().with("a", FormValue::Number(1.0))));
    }

    #[test]
    fn test_chain_reevaluates() {
        let fields = vec![
            text_field("a", "A"),
            text_field("b", "B").shown_when("a", "on"),
            text_field("c", "C").shown_when("b", "on"),
        ];
        let mut values = FormValues::new().with("a", "on").with("b", "on");

        let names: Vec<_> = visible_fields(&fields, &values).map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        values.set("b", "off");
        let names: Vec<_> = visible_fields(&fields, &values).map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
