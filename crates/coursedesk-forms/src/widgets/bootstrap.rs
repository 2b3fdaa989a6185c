//! Bootstrap 5 form widgets.

use super::{html_escape, is_selected, scalar_value_attr, Widget, WidgetAttrs};
use crate::field::SelectOption;
use crate::value::FormValue;

/// Bootstrap 5 single-line input widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextInput {
    /// The HTML input type (text, email, password, etc.).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Step for numeric inputs.
    pub step: Option<f64>,
}

impl Default for BootstrapTextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
            step: None,
        }
    }
}

impl BootstrapTextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input of the given HTML type.
    pub fn of_type(input_type: &str) -> Self {
        Self {
            input_type: input_type.to_string(),
            ..Default::default()
        }
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self::of_type("password")
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::of_type("email")
    }

    /// Creates a number input.
    pub fn number(step: Option<f64>) -> Self {
        Self {
            step,
            ..Self::of_type("number")
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: Option<&str>) -> Self {
        self.placeholder = text.map(str::to_string);
        self
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let value_attr = scalar_value_attr(value);

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        let step_attr = self
            .step
            .map(|s| format!(r#" step="{s}""#))
            .unwrap_or_default();

        format!(
            r#"<input type="{}" class="{}" id="{}" name="{}"{}{}{}{}>"#,
            self.input_type,
            attrs.class_with("form-control"),
            attrs.id_for(name),
            html_escape(name),
            value_attr,
            placeholder_attr,
            step_attr,
            attrs.extra_html()
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Bootstrap 5 textarea widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self {
            rows: 4,
            placeholder: None,
        }
    }
}

impl BootstrapTextarea {
    /// Creates a new textarea with the specified rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: Option<&str>) -> Self {
        self.placeholder = text.map(str::to_string);
        self
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let content = match value {
            FormValue::Null => String::new(),
            other => html_escape(&other.coerce_to_string()),
        };

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        format!(
            r#"<textarea class="{}" id="{}" name="{}" rows="{}"{placeholder_attr}{}>{}</textarea>"#,
            attrs.class_with("form-control"),
            attrs.id_for(name),
            html_escape(name),
            self.rows,
            attrs.extra_html(),
            content
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Bootstrap 5 select widget, single or multiple.
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    /// Available choices.
    pub choices: Vec<SelectOption>,
    /// Whether several options can be picked.
    pub multiple: bool,
    /// Whether to include an empty option.
    pub include_blank: bool,
    /// Label for blank option.
    pub blank_label: String,
}

impl Default for BootstrapSelect {
    fn default() -> Self {
        Self {
            choices: Vec::new(),
            multiple: false,
            include_blank: true,
            blank_label: "---------".to_string(),
        }
    }
}

impl BootstrapSelect {
    /// Creates a new select with the given choices.
    pub fn new(choices: Vec<SelectOption>) -> Self {
        Self {
            choices,
            ..Default::default()
        }
    }

    /// Creates a multi-select; it has no blank option.
    pub fn multiple(choices: Vec<SelectOption>) -> Self {
        Self {
            choices,
            multiple: true,
            include_blank: false,
            ..Default::default()
        }
    }

    /// Sets the blank label.
    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = label.into();
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let mut options = String::new();

        if self.include_blank {
            options.push_str(&format!(
                r#"<option value="">{}</option>"#,
                html_escape(&self.blank_label)
            ));
        }

        for choice in &self.choices {
            let selected_attr = if is_selected(value, &choice.value) {
                " selected"
            } else {
                ""
            };
            let disabled_attr = if choice.disabled { " disabled" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}{disabled_attr}>{}</option>"#,
                html_escape(&choice.value),
                html_escape(&choice.label)
            ));
        }

        let multiple_attr = if self.multiple { " multiple" } else { "" };

        format!(
            r#"<select class="{}" id="{}" name="{}"{multiple_attr}{}>{}</select>"#,
            attrs.class_with("form-select"),
            attrs.id_for(name),
            html_escape(name),
            attrs.extra_html(),
            options
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Bootstrap 5 single checkbox widget holding a boolean.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckbox {
    /// Label for the checkbox.
    pub label: Option<String>,
    /// Whether to use switch style.
    pub is_switch: bool,
}

impl BootstrapCheckbox {
    /// Creates a new checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a switch-style checkbox.
    pub fn switch() -> Self {
        Self {
            is_switch: true,
            ..Default::default()
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Widget for BootstrapCheckbox {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let id = attrs.id_for(name);
        let checked = match value {
            FormValue::Bool(b) => *b,
            FormValue::Text(v) => v == "true" || v == "on" || v == "1",
            _ => false,
        };
        let checked_attr = if checked { " checked" } else { "" };

        let wrapper_class = if self.is_switch {
            "form-check form-switch"
        } else {
            "form-check"
        };

        let label_html = self
            .label
            .as_ref()
            .map(|l| {
                format!(
                    r#"<label class="form-check-label" for="{}">{}</label>"#,
                    id,
                    html_escape(l)
                )
            })
            .unwrap_or_default();

        format!(
            r#"<div class="{}">
  <input class="{}" type="checkbox" id="{}" name="{}" value="true"{checked_attr}{}>
  {}
</div>"#,
            wrapper_class,
            attrs.class_with("form-check-input"),
            id,
            html_escape(name),
            attrs.extra_html(),
            label_html
        )
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// Bootstrap 5 checkbox group; emits the list of checked option values.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckboxGroup {
    /// Available choices.
    pub choices: Vec<SelectOption>,
}

impl BootstrapCheckboxGroup {
    /// Creates a new checkbox group.
    pub fn new(choices: Vec<SelectOption>) -> Self {
        Self { choices }
    }
}

impl Widget for BootstrapCheckboxGroup {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let mut html = String::new();
        let extra = attrs.extra_html();

        for (i, choice) in self.choices.iter().enumerate() {
            let id = format!("id_{name}_{i}");
            let checked_attr = if is_selected(value, &choice.value) {
                " checked"
            } else {
                ""
            };
            let disabled_attr = if choice.disabled { " disabled" } else { "" };

            html.push_str(&format!(
                r#"<div class="form-check">
  <input class="{}" type="checkbox" id="{}" name="{}[]" value="{}"{checked_attr}{disabled_attr}{extra}>
  <label class="form-check-label" for="{}">{}</label>
</div>
"#,
                attrs.class_with("form-check-input"),
                id,
                html_escape(name),
                html_escape(&choice.value),
                id,
                html_escape(&choice.label)
            ));
        }

        html
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// Bootstrap 5 radio select widget.
#[derive(Debug, Clone, Default)]
pub struct BootstrapRadioSelect {
    /// Available choices.
    pub choices: Vec<SelectOption>,
    /// Whether to display inline.
    pub inline: bool,
}

impl BootstrapRadioSelect {
    /// Creates a new radio select with the given choices.
    pub fn new(choices: Vec<SelectOption>) -> Self {
        Self {
            choices,
            inline: false,
        }
    }

    /// Makes the radios display inline.
    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

impl Widget for BootstrapRadioSelect {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let wrapper_class = if self.inline {
            "form-check form-check-inline"
        } else {
            "form-check"
        };
        let extra = attrs.extra_html();

        let mut html = String::new();

        for (i, choice) in self.choices.iter().enumerate() {
            let id = format!("id_{name}_{i}");
            let checked_attr = if is_selected(value, &choice.value) {
                " checked"
            } else {
                ""
            };
            let disabled_attr = if choice.disabled { " disabled" } else { "" };

            html.push_str(&format!(
                r#"<div class="{}">
  <input class="{}" type="radio" id="{}" name="{}" value="{}"{checked_attr}{disabled_attr}{extra}>
  <label class="form-check-label" for="{}">{}</label>
</div>
"#,
                wrapper_class,
                attrs.class_with("form-check-input"),
                id,
                html_escape(name),
                html_escape(&choice.value),
                id,
                html_escape(&choice.label)
            ));
        }

        html
    }

    fn input_type(&self) -> &str {
        "radio"
    }
}

/// Bootstrap 5 file input widget.
#[derive(Debug, Clone, Default)]
pub struct BootstrapFileInput {
    /// Accepted MIME types or extensions.
    pub accept: Option<String>,
    /// Whether several files can be picked.
    pub multiple: bool,
}

impl Widget for BootstrapFileInput {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let accept_attr = self
            .accept
            .as_ref()
            .map(|a| format!(r#" accept="{}""#, html_escape(a)))
            .unwrap_or_default();
        let multiple_attr = if self.multiple { " multiple" } else { "" };

        // File inputs cannot be pre-filled; show the current file name instead.
        let current = match value {
            FormValue::File(file) => format!(
                r#"<div class="form-text">Current file: {}</div>"#,
                html_escape(&file.name)
            ),
            _ => String::new(),
        };

        format!(
            r#"<input type="file" class="{}" id="{}" name="{}"{accept_attr}{multiple_attr}{}>{current}"#,
            attrs.class_with("form-control"),
            attrs.id_for(name),
            html_escape(name),
            attrs.extra_html()
        )
    }

    fn input_type(&self) -> &str {
        "file"
    }
}

/// Bootstrap 5 range slider widget.
#[derive(Debug, Clone)]
pub struct BootstrapRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Step, if any.
    pub step: Option<f64>,
}

impl Widget for BootstrapRange {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let step_attr = self
            .step
            .map(|s| format!(r#" step="{s}""#))
            .unwrap_or_default();

        format!(
            r#"<input type="range" class="{}" id="{}" name="{}" min="{}" max="{}"{step_attr}{}{}>"#,
            attrs.class_with("form-range"),
            attrs.id_for(name),
            html_escape(name),
            self.min,
            self.max,
            scalar_value_attr(value),
            attrs.extra_html()
        )
    }

    fn input_type(&self) -> &str {
        "range"
    }
}

/// Bootstrap 5 color input with optional preset swatches.
#[derive(Debug, Clone, Default)]
pub struct BootstrapColorInput {
    /// Preset colors offered in a datalist.
    pub swatches: Vec<String>,
}

impl Widget for BootstrapColorInput {
    fn render(&self, name: &str, value: &FormValue, attrs: &WidgetAttrs) -> String {
        let id = attrs.id_for(name);
        let (list_attr, datalist) = if self.swatches.is_empty() {
            (String::new(), String::new())
        } else {
            let options: String = self
                .swatches
                .iter()
                .map(|color| format!(r#"<option value="{}">"#, html_escape(color)))
                .collect();
            (
                format!(r#" list="{id}_swatches""#),
                format!(r#"<datalist id="{id}_swatches">{options}</datalist>"#),
            )
        };

        format!(
            r#"<input type="color" class="{}" id="{}" name="{}"{list_attr}{}{}>{datalist}"#,
            attrs.class_with("form-control form-control-color"),
            id,
            html_escape(name),
            scalar_value_attr(value),
            attrs.extra_html()
        )
    }

    fn input_type(&self) -> &str {
        "color"
    }
}
