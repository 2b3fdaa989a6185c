//! Bootstrap 5 rendering of fields and mounted forms.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::Div;

use crate::field::{FieldDefinition, FieldKind};
use crate::form::Form;
use crate::value::FormValue;
use crate::widgets::{
    BootstrapCheckbox, BootstrapCheckboxGroup, BootstrapColorInput, BootstrapFileInput,
    BootstrapRadioSelect, BootstrapRange, BootstrapSelect, BootstrapTextInput, BootstrapTextarea,
    HiddenInput, Widget, WidgetAttrs,
};

/// Picks the widget that renders a field kind.
pub fn widget_for(field: &FieldDefinition) -> Box<dyn Widget> {
    let placeholder = field.placeholder.as_deref();
    match &field.kind {
        FieldKind::Text => Box::new(BootstrapTextInput::new().placeholder(placeholder)),
        FieldKind::Email => Box::new(BootstrapTextInput::email().placeholder(placeholder)),
        FieldKind::Password => Box::new(BootstrapTextInput::password().placeholder(placeholder)),
        FieldKind::Url => Box::new(BootstrapTextInput::of_type("url").placeholder(placeholder)),
        FieldKind::Phone => Box::new(BootstrapTextInput::of_type("tel").placeholder(placeholder)),
        FieldKind::Date => Box::new(BootstrapTextInput::of_type("date")),
        FieldKind::DateTime => Box::new(BootstrapTextInput::of_type("datetime-local")),
        FieldKind::Number { step } => {
            Box::new(BootstrapTextInput::number(*step).placeholder(placeholder))
        }
        FieldKind::Textarea { rows } => {
            Box::new(BootstrapTextarea::new(*rows).placeholder(placeholder))
        }
        FieldKind::Select { options } => {
            let widget = BootstrapSelect::new(options.clone());
            Box::new(match placeholder {
                Some(label) => widget.blank_label(label),
                None => widget,
            })
        }
        FieldKind::MultiSelect { options } => Box::new(BootstrapSelect::multiple(options.clone())),
        FieldKind::Radio { options, inline } => {
            let widget = BootstrapRadioSelect::new(options.clone());
            Box::new(if *inline { widget.inline() } else { widget })
        }
        FieldKind::Checkbox => Box::new(BootstrapCheckbox::new()),
        FieldKind::CheckboxGroup { options } => {
            Box::new(BootstrapCheckboxGroup::new(options.clone()))
        }
        FieldKind::File { accept, multiple } => Box::new(BootstrapFileInput {
            accept: accept.clone(),
            multiple: *multiple,
        }),
        FieldKind::Range { min, max, step } => Box::new(BootstrapRange {
            min: *min,
            max: *max,
            step: *step,
        }),
        FieldKind::Color { swatches } => Box::new(BootstrapColorInput {
            swatches: swatches.clone(),
        }),
        FieldKind::Hidden => Box::new(HiddenInput),
    }
}

/// Renders one field with its label, error and help text.
///
/// Hidden fields render as a bare input.
pub fn render_field(field: &FieldDefinition, value: &FormValue, error: Option<&str>) -> String {
    let widget = widget_for(field);

    if matches!(field.kind, FieldKind::Hidden) {
        return widget.render(&field.name, value, &WidgetAttrs::new());
    }

    let id = format!("id_{}", field.name);
    let required_marker = if field.is_required() { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);

    let mut attrs = WidgetAttrs::new().with("id", &id);
    if error.is_some() {
        attrs.set("class", "is-invalid");
    }
    if field.disabled {
        attrs.set("disabled", "disabled");
    }
    if field.readonly {
        attrs.set("readonly", "readonly");
    }

    let widget_html = widget.render(&field.name, value, &attrs);

    let label_el = html! {
        label.for_(#id).class("form-label") { #label_text }
    };

    let help_text = field.help_text.clone();

    html! { div.class("mb-3") }
        .raw(label_el.render())
        .raw(&widget_html)
        .children(error.into_iter(), |message, div: Element<Div>| {
            div.class("invalid-feedback").text(message)
        })
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| h.class("form-text").text(help_text.as_deref().unwrap_or("")))
        })
        .render()
}

/// Renders a mounted form.
///
/// Only visible fields are emitted, laid out in the schema's column grid.
/// The submit button is disabled while a submission is in flight.
pub fn render_form(form: &Form, action: &str, method: &str) -> String {
    let schema = form.schema();
    let values = form.values();
    let errors = form.errors();

    let title_html = schema
        .title
        .as_ref()
        .map(|title| html! { h2.class("h4 mb-3") { #title } }.render())
        .unwrap_or_default();

    let grid_class = format!("row row-cols-1 row-cols-md-{}", schema.columns.max(1));
    let mut grid = html! { div.class(#grid_class) };
    let mut hidden_inputs = String::new();

    for field in form.visible_fields() {
        let value = values.get(&field.name).unwrap_or(&FormValue::Null);
        let field_html = render_field(field, value, errors.get(&field.name));
        if matches!(field.kind, FieldKind::Hidden) {
            hidden_inputs.push_str(&field_html);
        } else {
            grid = grid.child::<Div, _>(|d| d.class("col").raw(&field_html));
        }
    }

    let grid_html = grid.render();

    let submit_label = schema.submit_label.clone();
    let cancel_label = schema.cancel_label.clone();
    let submit = html! {
        button.type_("submit").class("btn btn-primary") { #submit_label }
    };
    let submit = if form.is_submitting() {
        submit.attr("disabled", "disabled")
    } else {
        submit
    };
    let cancel = html! {
        button.type_("button").class("btn btn-secondary ms-2") { #cancel_label }
    };

    html! { div.class("coursedesk-form") }
        .child::<ironhtml_elements::Form, _>(|f| {
            f.attr("method", method)
                .attr("action", action)
                .child::<Div, _>(|d| {
                    d.class("form-body")
                        .raw(&title_html)
                        .raw(&hidden_inputs)
                        .raw(&grid_html)
                })
                .child::<Div, _>(|d| {
                    d.class("d-flex")
                        .raw(submit.render())
                        .raw(cancel.render())
                })
        })
        .render()
}
