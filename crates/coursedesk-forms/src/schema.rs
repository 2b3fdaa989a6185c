//! Form schemas: the field list plus form-level presentation settings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::field::FieldDefinition;

/// Layout hint for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormLayout {
    #[default]
    Vertical,
    Horizontal,
    Inline,
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

fn default_cancel_label() -> String {
    "Cancel".to_string()
}

fn default_columns() -> usize {
    1
}

/// A complete form configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Form title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Submit button label.
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
    /// Cancel button label.
    #[serde(default = "default_cancel_label")]
    pub cancel_label: String,
    /// Layout hint.
    #[serde(default)]
    pub layout: FormLayout,
    /// Number of grid columns.
    #[serde(default = "default_columns")]
    pub columns: usize,
    /// Fields in display order.
    pub fields: Vec<FieldDefinition>,
}

impl FormSchema {
    /// Starts building a schema.
    pub fn builder() -> FormSchemaBuilder {
        FormSchemaBuilder::default()
    }

    /// Parses a schema from JSON and checks it.
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(json)?;
        schema.check()?;
        Ok(schema)
    }

    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks field names and dependencies.
    ///
    /// Names must be unique, every dependency must watch an existing field,
    /// and the compared value must have the watched field's value type.
    /// `Null` dependency values are accepted for any field.
    pub fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
        }

        for field in &self.fields {
            let Some(dependency) = &field.dependency else {
                continue;
            };
            let target = self
                .field(&dependency.field)
                .ok_or_else(|| FormError::UnknownDependency {
                    field: field.name.clone(),
                    target: dependency.field.clone(),
                })?;

            let expected = target.kind.value_type();
            if let Some(found) = dependency.value.value_type() {
                if found != expected {
                    return Err(FormError::DependencyTypeMismatch {
                        field: field.name.clone(),
                        target: target.name.clone(),
                        expected,
                        found,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Builder for [`FormSchema`].
#[derive(Debug)]
pub struct FormSchemaBuilder {
    schema: FormSchema,
}

impl Default for FormSchemaBuilder {
    fn default() -> Self {
        Self {
            schema: FormSchema {
                title: None,
                submit_label: default_submit_label(),
                cancel_label: default_cancel_label(),
                layout: FormLayout::default(),
                columns: default_columns(),
                fields: Vec::new(),
            },
        }
    }
}

impl FormSchemaBuilder {
    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.schema.title = Some(title.into());
        self
    }

    /// Sets the submit button label.
    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.schema.submit_label = label.into();
        self
    }

    /// Sets the cancel button label.
    #[must_use]
    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.schema.cancel_label = label.into();
        self
    }

    /// Sets the layout hint.
    #[must_use]
    pub fn layout(mut self, layout: FormLayout) -> Self {
        self.schema.layout = layout;
        self
    }

    /// Sets the number of grid columns.
    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.schema.columns = columns.max(1);
        self
    }

    /// Adds a field to the form.
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.schema.fields.push(field);
        self
    }

    /// Checks and returns the schema.
    pub fn build(self) -> Result<FormSchema> {
        self.schema.check()?;
        Ok(self.schema)
    }
}
