//! Field definitions.

use serde::{Deserialize, Serialize};

use crate::validation::{CustomValidator, Pattern, ValidationRules};
use crate::value::{FormValue, FormValues, ValueType};

/// One entry of a select, radio or checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether the option can be picked.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl SelectOption {
    /// Creates an enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Marks the option as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Builds an option list from (value, label) pairs.
pub fn options(choices: Vec<(&str, &str)>) -> Vec<SelectOption> {
    choices
        .into_iter()
        .map(|(v, l)| SelectOption::new(v, l))
        .collect()
}

fn default_rows() -> usize {
    4
}

fn default_range_max() -> f64 {
    100.0
}

/// The input category of a field.
///
/// Each variant carries only the attributes that make sense for it, so a
/// select without options cannot be expressed by accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Textarea {
        #[serde(default = "default_rows")]
        rows: usize,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Select {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
    Radio {
        options: Vec<SelectOption>,
        #[serde(default)]
        inline: bool,
    },
    /// A single boolean checkbox.
    Checkbox,
    CheckboxGroup {
        options: Vec<SelectOption>,
    },
    Date,
    DateTime,
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accept: Option<String>,
        #[serde(default)]
        multiple: bool,
    },
    Url,
    Phone,
    /// A bounded slider.
    Range {
        #[serde(default)]
        min: f64,
        #[serde(default = "default_range_max")]
        max: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Color {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        swatches: Vec<String>,
    },
    /// Passed through without being shown.
    Hidden,
}

impl FieldKind {
    /// The shape of value this kind stores and emits.
    ///
    /// Multi-valued kinds store lists; everything else stores a scalar.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::MultiSelect { .. } | Self::CheckboxGroup { .. } => ValueType::List,
            Self::Checkbox => ValueType::Bool,
            Self::Number { .. } | Self::Range { .. } => ValueType::Number,
            Self::File { .. } => ValueType::File,
            Self::Text
            | Self::Email
            | Self::Password
            | Self::Textarea { .. }
            | Self::Select { .. }
            | Self::Radio { .. }
            | Self::Date
            | Self::DateTime
            | Self::Url
            | Self::Phone
            | Self::Color { .. }
            | Self::Hidden => ValueType::Text,
        }
    }

    /// Whether `min`/`max` rules apply to this kind.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number { .. } | Self::Range { .. })
    }

    /// The options of option-carrying kinds, empty for the rest.
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Select { options }
            | Self::MultiSelect { options }
            | Self::Radio { options, .. }
            | Self::CheckboxGroup { options } => options,
            _ => &[],
        }
    }
}

fn default_show() -> bool {
    true
}

/// Makes a field's visibility depend on another field's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name of the field being watched.
    pub field: String,
    /// Value compared for strict equality.
    pub value: FormValue,
    /// Visible on a match when true, on a mismatch when false.
    #[serde(default = "default_show")]
    pub show: bool,
}

/// Definition of a form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Key of the field in the value map.
    pub name: String,
    /// Human-readable caption, also used in error messages.
    pub label: String,
    /// Input category.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Seed value used when the caller supplied none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FormValue>,
    /// Validation rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    /// Visibility condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<Dependency>,
    /// Render the input disabled.
    #[serde(default)]
    pub disabled: bool,
    /// Render the input read-only.
    #[serde(default)]
    pub readonly: bool,
    /// Placeholder text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Help text shown under the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl FieldDefinition {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default_value: None,
            validation: None,
            dependency: None,
            disabled: false,
            readonly: false,
            placeholder: None,
            help_text: None,
        }
    }

    fn rules_mut(&mut self) -> &mut ValidationRules {
        self.validation.get_or_insert_with(ValidationRules::default)
    }

    /// Returns whether the field carries a `required` rule.
    pub fn is_required(&self) -> bool {
        self.validation.as_ref().is_some_and(|rules| rules.required)
    }

    /// The field's options, empty for kinds without options.
    pub fn options(&self) -> &[SelectOption] {
        self.kind.options()
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.rules_mut().required = true;
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(mut self, n: usize) -> Self {
        self.rules_mut().min_length = Some(n);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, n: usize) -> Self {
        self.rules_mut().max_length = Some(n);
        self
    }

    /// Sets the numeric lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.rules_mut().min = Some(min);
        self
    }

    /// Sets the numeric upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.rules_mut().max = Some(max);
        self
    }

    /// Sets the pattern the value must match.
    #[must_use]
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.rules_mut().pattern = Some(pattern);
        self
    }

    /// Sets a custom check, run after all built-in rules.
    #[must_use]
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&FormValue, &FormValues) -> Option<String> + Send + Sync + 'static,
    {
        self.rules_mut().custom = Some(CustomValidator::new(check));
        self
    }

    /// Replaces all validation rules.
    #[must_use]
    pub fn validation(mut self, rules: ValidationRules) -> Self {
        self.validation = Some(rules);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FormValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Shows the field only while `field` equals `value`.
    #[must_use]
    pub fn shown_when(mut self, field: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.dependency = Some(Dependency {
            field: field.into(),
            value: value.into(),
            show: true,
        });
        self
    }

    /// Hides the field while `field` equals `value`.
    #[must_use]
    pub fn hidden_when(mut self, field: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.dependency = Some(Dependency {
            field: field.into(),
            value: value.into(),
            show: false,
        });
        self
    }

    /// Disables the field.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Makes the field read-only.
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }
}

/// Creates a single-line text field.
pub fn text_field(name: &str, label: &str) -> FieldDefinition {
    FieldDefinition::new(name, label, FieldKind::Text)
}

/// Creates a textarea field.
pub fn textarea_field(name: &str, label: &str, rows: usize) -> FieldDefinition {
    FieldDefinition::new(name, label, FieldKind::Textarea { rows })
}

/// Creates an email field with a basic address pattern.
pub fn email_field(name: &str, label: &str) -> FieldDefinition {
    FieldDefinition::new(name, label, FieldKind::Email).pattern(Pattern::email())
}

/// Creates a password field.
pub fn password_field(name: &str, label: &str, min_length: Option<usize>) -> FieldDefinition {
    let field = FieldDefinition::new(name, label, FieldKind::Password).required();
    match min_length {
        Some(n) => field.min_length(n),
        None => field,
    }
}

/// Creates a numeric field.
pub fn number_field(name: &str, label: &str) -> FieldDefinition {
    FieldDefinition::new(name, label, FieldKind::Number { step: None })
}

/// Creates a single-select field.
pub fn choice_field(name: &str, label: &str, choices: Vec<(&str, &str)>) -> FieldDefinition {
    FieldDefinition::new(
        name,
        label,
        FieldKind::Select {
            options: options(choices),
        },
    )
}

/// Creates a multi-select field.
pub fn multiple_choice_field(
    name: &str,
    label: &str,
    choices: Vec<(&str, &str)>,
) -> FieldDefinition {
    FieldDefinition::new(
        name,
        label,
        FieldKind::MultiSelect {
            options: options(choices),
        },
    )
}

/// Creates a single boolean checkbox.
pub fn boolean_field(name: &str, label: &str) -> FieldDefinition {
    FieldDefinition::new(name, label, FieldKind::Checkbox)
}

/// Creates a date field.
pub fn date_field(name: &str, label: &str) -> FieldDefinition {
    FieldDefinition::new(name, label, FieldKind::Date)
}

/// Creates a hidden passthrough field.
pub fn hidden_field(name: &str, initial: Option<&str>) -> FieldDefinition {
    let field = FieldDefinition::new(name, "", FieldKind::Hidden);
    match initial {
        Some(value) => field.default_value(value),
        None => field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builder() {
        let field = text_field("username", "Username")
            .required()
            .max_length(150)
            .help_text("Choose a unique username")
            .placeholder("Enter username");

        assert_eq!(field.name, "username");
        assert!(field.is_required());
        let rules = field.validation.as_ref().unwrap();
        assert_eq!(rules.max_length, Some(150));
        assert_eq!(
            field.help_text,
            Some("Choose a unique username".to_string())
        );
    }

    #[test]
    fn test_value_types() {
        assert_eq!(
            multiple_choice_field("tags", "Tags", vec![("a", "A")]).kind.value_type(),
            ValueType::List
        );
        assert_eq!(boolean_field("active", "Active").kind.value_type(), ValueType::Bool);
        assert_eq!(number_field("age", "Age").kind.value_type(), ValueType::Number);
        assert_eq!(
            choice_field("status", "Status", vec![("a", "A")]).kind.value_type(),
            ValueType::Text
        );
    }

    #[test]
    fn test_options_only_on_option_kinds() {
        let field = choice_field("status", "Status", vec![("draft", "Draft"), ("live", "Live")]);
        assert_eq!(field.options().len(), 2);
        assert!(text_field("name", "Name").options().is_empty());
    }

    #[test]
    fn test_password_field() {
        let field = password_field("password", "Password", Some(8));
        assert!(field.is_required());
        assert_eq!(field.validation.unwrap().min_length, Some(8));
    }

    #[test]
    fn test_hidden_field() {
        let field = hidden_field("csrf_token", Some("abc123"));
        assert_eq!(field.default_value, Some(FormValue::from("abc123")));
    }

    #[test]
    fn test_deserialize_tagged_kind() {
        let field: FieldDefinition = serde_json::from_str(
            r#"{
                "name": "country",
                "label": "Country",
                "kind": "select",
                "options": [{"value": "US", "label": "United States"}],
                "validation": {"required": true}
            }"#,
        )
        .unwrap();

        assert_eq!(field.options()[0].value, "US");
        assert!(field.is_required());

        let field: FieldDefinition = serde_json::from_str(
            r#"{
                "name": "completionDate",
                "label": "Completion date",
                "kind": "date",
                "dependency": {"field": "status", "value": "completed"}
            }"#,
        )
        .unwrap();
        let dependency = field.dependency.unwrap();
        assert!(dependency.show);
        assert_eq!(dependency.value, FormValue::from("completed"));
    }
}
