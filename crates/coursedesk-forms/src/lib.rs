//! # coursedesk-forms
//!
//! Declarative forms for the course administration dashboard.
//!
//! This crate provides:
//! - Field definitions with a closed set of field kinds
//! - Per-field validation pipelines
//! - Conditional visibility driven by other fields' values
//! - A mounted [`Form`] with an async submit cycle
//! - Bootstrap 5 rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use coursedesk_forms::{
//!     choice_field, date_field, render_form, text_field, Form, FormSchema, FormValues,
//! };
//!
//! let schema = FormSchema::builder()
//!     .title("Session")
//!     .field(text_field("title", "Title").required().max_length(80))
//!     .field(choice_field(
//!         "status",
//!         "Status",
//!         vec![("active", "Active"), ("completed", "Completed")],
//!     ))
//!     .field(
//!         date_field("completionDate", "Completion date")
//!             .required()
//!             .shown_when("status", "completed"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let form = Form::mount(schema, Some(FormValues::new().with("status", "active")));
//! assert!(!form.is_visible("completionDate"));
//!
//! form.set_value("title", "Intro to Rust").unwrap();
//! assert!(form.validate());
//!
//! let html = render_form(&form, "/sessions", "post");
//! assert!(html.contains("Intro to Rust"));
//! ```
//!
//! ## Schemas from JSON
//!
//! ```rust
//! use coursedesk_forms::FormSchema;
//!
//! let schema = FormSchema::from_json(r#"{
//!     "fields": [
//!         {"name": "hours", "label": "Hours", "kind": "number",
//!          "validation": {"min": 1, "max": 40}}
//!     ]
//! }"#).unwrap();
//! assert_eq!(schema.fields.len(), 1);
//! ```

mod error;
mod field;
mod form;
mod render;
mod schema;
pub mod validation;
mod value;
mod visibility;
pub mod widgets;

pub use error::{FormError, FormErrors, Result, SubmitError};
pub use field::{
    boolean_field, choice_field, date_field, email_field, hidden_field, multiple_choice_field,
    number_field, options, password_field, text_field, textarea_field, Dependency,
    FieldDefinition, FieldKind, SelectOption,
};
pub use form::{CancelHandler, ErrorHandler, Form, FormStatus, SubmitHandler, SubmitOutcome};
pub use render::{render_field, render_form, widget_for};
pub use schema::{FormLayout, FormSchema, FormSchemaBuilder};
pub use validation::{validate, Pattern, ValidationPipeline, ValidationRules};
pub use value::{FileRef, FormValue, FormValues, ValueType};
pub use visibility::{is_visible, visible_fields};
