//! Field validation.
//!
//! Rules declared on a field compile into a [`ValidationPipeline`]: an
//! ordered list of independent [`Rule`] stages run in a fixed order,
//! required, length, numeric range, pattern, custom. The first stage that
//! rejects the value decides the error; later stages are not consulted.
//! An empty optional value is accepted by the first stage without running
//! the rest.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::field::FieldDefinition;
use crate::value::{FormValue, FormValues};

/// A compiled regular expression used by pattern rules.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

impl Pattern {
    /// Compiles a pattern.
    pub fn new(pattern: &str) -> crate::error::Result<Self> {
        Ok(Self(Regex::new(pattern)?))
    }

    /// Basic email address pattern.
    pub fn email() -> Self {
        Self(EMAIL_PATTERN.clone())
    }

    /// Tests the pattern anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    /// Returns the source expression.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(serde::de::Error::custom)
    }
}

type CustomFn = dyn Fn(&FormValue, &FormValues) -> Option<String> + Send + Sync;

/// A caller-supplied check over the field value and the whole value map.
#[derive(Clone)]
pub struct CustomValidator(Arc<CustomFn>);

impl CustomValidator {
    /// Wraps a check returning an error message, or `None` when valid.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&FormValue, &FormValues) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    fn call(&self, value: &FormValue, values: &FormValues) -> Option<String> {
        (self.0)(value, values)
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomValidator(..)")
    }
}

/// Declarative validation rules of a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    /// The value must not be empty.
    #[serde(default)]
    pub required: bool,
    /// Numeric lower bound (numeric and range kinds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Numeric upper bound (numeric and range kinds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Minimum length of a string or list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length of a string or list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Pattern the string form of the value must contain a match for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    /// Check run after all other rules.
    #[serde(skip)]
    pub custom: Option<CustomValidator>,
}

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Hand the value to the next stage.
    Continue,
    /// Accept the value without running later stages.
    Accept,
    /// Reject the value with a message.
    Reject(String),
}

/// A single validation stage.
pub trait Rule: Send + Sync {
    /// Short name of the rule, used in logs.
    fn name(&self) -> &'static str;

    /// Checks `value` of `field` given all current values.
    fn check(&self, field: &FieldDefinition, value: &FormValue, values: &FormValues) -> Step;
}

/// Rejects empty required values; accepts empty optional ones outright.
#[derive(Debug, Clone)]
pub struct RequiredRule {
    required: bool,
}

impl RequiredRule {
    /// Creates the rule.
    pub fn new(required: bool) -> Self {
        Self { required }
    }
}

impl Rule for RequiredRule {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(&self, field: &FieldDefinition, value: &FormValue, _values: &FormValues) -> Step {
        match (value.is_empty(), self.required) {
            (true, true) => Step::Reject(format!("{} is required", field.label)),
            (true, false) => Step::Accept,
            (false, _) => Step::Continue,
        }
    }
}

/// Bounds the length of strings (characters) and lists (items).
#[derive(Debug, Clone)]
pub struct LengthRule {
    min: Option<usize>,
    max: Option<usize>,
}

impl LengthRule {
    /// Creates the rule.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }
}

impl Rule for LengthRule {
    fn name(&self) -> &'static str {
        "length"
    }

    fn check(&self, field: &FieldDefinition, value: &FormValue, _values: &FormValues) -> Step {
        let Some(len) = value.length() else {
            return Step::Continue;
        };
        let unit = if matches!(value, FormValue::List(_)) {
            "selections"
        } else {
            "characters"
        };

        if let Some(min) = self.min.filter(|min| len < *min) {
            return Step::Reject(format!("{} must be at least {min} {unit}", field.label));
        }
        if let Some(max) = self.max.filter(|max| len > *max) {
            return Step::Reject(format!("{} must be at most {max} {unit}", field.label));
        }
        Step::Continue
    }
}

/// Bounds numeric values; only applies to numeric and range kinds.
#[derive(Debug, Clone)]
pub struct RangeRule {
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeRule {
    /// Creates the rule.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl Rule for RangeRule {
    fn name(&self) -> &'static str {
        "range"
    }

    fn check(&self, field: &FieldDefinition, value: &FormValue, _values: &FormValues) -> Step {
        if !field.kind.is_numeric() {
            return Step::Continue;
        }
        // A value that is not a number satisfies neither comparison.
        let Some(num) = value.to_number() else {
            return Step::Continue;
        };

        if let Some(min) = self.min.filter(|min| num < *min) {
            return Step::Reject(format!("{} must be at least {min}", field.label));
        }
        if let Some(max) = self.max.filter(|max| num > *max) {
            return Step::Reject(format!("{} must be at most {max}", field.label));
        }
        Step::Continue
    }
}

/// Requires a pattern match in the string form of the value.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Pattern,
}

impl PatternRule {
    /// Creates the rule.
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }
}

impl Rule for PatternRule {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn check(&self, field: &FieldDefinition, value: &FormValue, _values: &FormValues) -> Step {
        if self.pattern.is_match(&value.coerce_to_string()) {
            Step::Continue
        } else {
            Step::Reject(format!("{} format is invalid", field.label))
        }
    }
}

/// Runs a caller-supplied check. Always the last stage.
#[derive(Debug, Clone)]
pub struct CustomRule {
    validator: CustomValidator,
}

impl CustomRule {
    /// Creates the rule.
    pub fn new(validator: CustomValidator) -> Self {
        Self { validator }
    }
}

impl Rule for CustomRule {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn check(&self, _field: &FieldDefinition, value: &FormValue, values: &FormValues) -> Step {
        match self.validator.call(value, values) {
            Some(message) => Step::Reject(message),
            None => Step::Accept,
        }
    }
}

/// Ordered validation stages of one field.
pub struct ValidationPipeline {
    stages: Vec<Box<dyn Rule>>,
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|stage| stage.name()))
            .finish()
    }
}

impl ValidationPipeline {
    /// Compiles declarative rules into stages.
    pub fn from_rules(rules: &ValidationRules) -> Self {
        let mut stages: Vec<Box<dyn Rule>> = vec![Box::new(RequiredRule::new(rules.required))];

        if rules.min_length.is_some() || rules.max_length.is_some() {
            stages.push(Box::new(LengthRule::new(rules.min_length, rules.max_length)));
        }
        if rules.min.is_some() || rules.max.is_some() {
            stages.push(Box::new(RangeRule::new(rules.min, rules.max)));
        }
        if let Some(pattern) = &rules.pattern {
            stages.push(Box::new(PatternRule::new(pattern.clone())));
        }
        if let Some(custom) = &rules.custom {
            stages.push(Box::new(CustomRule::new(custom.clone())));
        }

        Self { stages }
    }

    /// Names of the stages, in run order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Runs the stages and returns the first error.
    pub fn run(
        &self,
        field: &FieldDefinition,
        value: &FormValue,
        values: &FormValues,
    ) -> Option<String> {
        for stage in &self.stages {
            match stage.check(field, value, values) {
                Step::Continue => {}
                Step::Accept => return None,
                Step::Reject(message) => return Some(message),
            }
        }
        None
    }
}

/// Validates a field's value; returns the error message, if any.
///
/// A field without rules is always valid.
pub fn validate(field: &FieldDefinition, value: &FormValue, values: &FormValues) -> Option<String> {
    let rules = field.validation.as_ref()?;
    ValidationPipeline::from_rules(rules).run(field, value, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{
        boolean_field, email_field, multiple_choice_field, number_field, text_field,
    };

    fn check(field: &FieldDefinition, value: impl Into<FormValue>) -> Option<String> {
        validate(field, &value.into(), &FormValues::new())
    }

    #[test]
    fn test_no_rules_never_fails() {
        let field = text_field("name", "Name");
        assert_eq!(check(&field, ""), None);
        assert_eq!(validate(&field, &FormValue::Null, &FormValues::new()), None);
    }

    #[test]
    fn test_required() {
        let field = text_field("name", "Name").required();
        assert_eq!(check(&field, ""), Some("Name is required".to_string()));
        assert_eq!(
            validate(&field, &FormValue::Null, &FormValues::new()),
            Some("Name is required".to_string())
        );
        assert_eq!(
            check(&field, Vec::<String>::new()),
            Some("Name is required".to_string())
        );
        assert_eq!(check(&field, "x"), None);
    }

    #[test]
    fn test_zero_and_false_are_not_empty() {
        let field = number_field("count", "Count").required();
        assert_eq!(check(&field, 0), None);

        let field = boolean_field("agree", "Agree").required();
        assert_eq!(check(&field, false), None);
    }

    #[test]
    fn test_empty_optional_skips_everything() {
        let field = text_field("code", "Code")
            .min_length(5)
            .pattern(Pattern::new(r"^\d+$").unwrap())
            .custom(|_, _| Some("always".to_string()));
        assert_eq!(check(&field, ""), None);
    }

    #[test]
    fn test_length_bounds() {
        let field = text_field("code", "Code").min_length(3).max_length(5);
        assert_eq!(
            check(&field, "ab"),
            Some("Code must be at least 3 characters".to_string())
        );
        assert_eq!(
            check(&field, "abcdef"),
            Some("Code must be at most 5 characters".to_string())
        );
        assert_eq!(check(&field, "abcd"), None);
    }

    #[test]
    fn test_length_applies_to_lists() {
        let field =
            multiple_choice_field("tags", "Tags", vec![("a", "A"), ("b", "B")]).min_length(2);
        assert_eq!(
            check(&field, vec!["a"]),
            Some("Tags must be at least 2 selections".to_string())
        );
        assert_eq!(check(&field, vec!["a", "b"]), None);
    }

    #[test]
    fn test_range_only_for_numeric_kinds() {
        let field = number_field("age", "age").min(18.0).max(99.0);
        assert_eq!(check(&field, "15"), Some("age must be at least 18".to_string()));
        assert_eq!(check(&field, 100), Some("age must be at most 99".to_string()));
        assert_eq!(check(&field, "25"), None);

        let text = text_field("age", "age").min(18.0);
        assert_eq!(check(&text, "15"), None);
    }

    #[test]
    fn test_non_numeric_passes_range() {
        let field = number_field("age", "age").min(18.0);
        assert_eq!(check(&field, "abc"), None);
        assert_eq!(check(&field, "   "), None);
    }

    #[test]
    fn test_pattern() {
        let field = text_field("zip", "Zip").pattern(Pattern::new(r"^\d{5}$").unwrap());
        assert_eq!(check(&field, "1234a"), Some("Zip format is invalid".to_string()));
        assert_eq!(check(&field, "12345"), None);

        let email = email_field("email", "Email");
        assert_eq!(check(&email, "user@example.com"), None);
        assert!(check(&email, "invalid").is_some());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            Pattern::new(r"^(\d+$"),
            Err(crate::error::FormError::InvalidPattern(_))
        ));
        assert!(serde_json::from_str::<ValidationRules>(r#"{"pattern": "[a-"}"#).is_err());
    }

    #[test]
    fn test_pattern_is_unanchored() {
        let field = text_field("ref", "Ref").pattern(Pattern::new(r"\d").unwrap());
        assert_eq!(check(&field, "abc1def"), None);
    }

    #[test]
    fn test_first_failure_wins() {
        let field = text_field("code", "Code")
            .min_length(4)
            .pattern(Pattern::new(r"^\d+$").unwrap())
            .custom(|_, _| Some("custom".to_string()));

        assert_eq!(
            check(&field, "ab"),
            Some("Code must be at least 4 characters".to_string())
        );
        assert_eq!(check(&field, "abcd"), Some("Code format is invalid".to_string()));
        assert_eq!(check(&field, "1234"), Some("custom".to_string()));
    }

    #[test]
    fn test_custom_sees_all_values() {
        let field = text_field("confirm", "Confirm").custom(|value, values| {
            (values.get("password") != Some(value)).then(|| "Passwords differ".to_string())
        });
        let values = FormValues::new().with("password", "secret");

        assert_eq!(validate(&field, &FormValue::from("secret"), &values), None);
        assert_eq!(
            validate(&field, &FormValue::from("other"), &values),
            Some("Passwords differ".to_string())
        );
    }

    #[test]
    fn test_pipeline_order() {
        let rules = ValidationRules {
            required: true,
            min: Some(1.0),
            max_length: Some(3),
            pattern: Some(Pattern::new("x").unwrap()),
            custom: Some(CustomValidator::new(|_, _| None)),
            ..ValidationRules::default()
        };
        let pipeline = ValidationPipeline::from_rules(&rules);
        assert_eq!(
            pipeline.stage_names(),
            vec!["required", "length", "range", "pattern", "custom"]
        );
    }

    #[test]
    fn test_pattern_serde() {
        let rules: ValidationRules =
            serde_json::from_str(r#"{"required": true, "pattern": "^\\d+$", "minLength": 2}"#)
                .unwrap();
        assert!(rules.required);
        assert_eq!(rules.min_length, Some(2));
        assert_eq!(rules.pattern.unwrap().as_str(), r"^\d+$");

        let bad: Result<ValidationRules, _> = serde_json::from_str(r#"{"pattern": "("}"#);
        assert!(bad.is_err());
    }
}
