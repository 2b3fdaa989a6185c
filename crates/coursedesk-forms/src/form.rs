//! Mounted forms and the submission state machine.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::error::{FormError, FormErrors, Result, SubmitError};
use crate::field::FieldDefinition;
use crate::schema::FormSchema;
use crate::validation::validate;
use crate::value::{FormValue, FormValues};
use crate::visibility::is_visible;

/// A boxed async submit handler.
pub type SubmitHandler =
    Arc<dyn Fn(FormValues) -> BoxFuture<'static, std::result::Result<(), SubmitError>> + Send + Sync>;

/// A cancel callback.
pub type CancelHandler = Arc<dyn Fn() + Send + Sync>;

/// Receives submit handler failures, e.g. to show a toast.
pub type ErrorHandler = Arc<dyn Fn(&SubmitError) + Send + Sync>;

static NULL_VALUE: FormValue = FormValue::Null;

/// Where a form is in its edit/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// Accepting edits.
    Editing,
    /// Running a full validation pass.
    Validating,
    /// Waiting for the submit handler; edits and submits are refused.
    Submitting,
    /// The submit handler succeeded.
    Settled,
}

/// Result of a submit attempt.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The handler ran and succeeded.
    Submitted,
    /// Validation failed; the handler was not called.
    Invalid(FormErrors),
    /// The handler ran and failed.
    Failed(SubmitError),
    /// Another submission was in flight; nothing happened.
    Suppressed,
}

#[derive(Debug)]
struct FormState {
    values: FormValues,
    errors: FormErrors,
    status: FormStatus,
}

/// A mounted form.
///
/// Cloning yields another handle to the same form. The value map is the
/// only place field values live.
#[derive(Clone)]
pub struct Form {
    schema: Arc<FormSchema>,
    state: Arc<Mutex<FormState>>,
    on_submit: Option<SubmitHandler>,
    on_cancel: Option<CancelHandler>,
    on_error: Option<ErrorHandler>,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("schema", &self.schema.title)
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Mounts a form.
    ///
    /// Default values are seeded only for fields the caller supplied no
    /// value for; a supplied empty string is kept.
    pub fn mount(schema: FormSchema, initial: Option<FormValues>) -> Self {
        let mut values = initial.unwrap_or_default();
        for field in &schema.fields {
            if let Some(default) = &field.default_value {
                if !values.contains(&field.name) {
                    values.set(field.name.clone(), default.clone());
                }
            }
        }

        debug!(
            fields = schema.fields.len(),
            values = values.len(),
            "Mounted form"
        );

        Self {
            schema: Arc::new(schema),
            state: Arc::new(Mutex::new(FormState {
                values,
                errors: FormErrors::new(),
                status: FormStatus::Editing,
            })),
            on_submit: None,
            on_cancel: None,
            on_error: None,
        }
    }

    /// Sets the async submit handler.
    #[must_use]
    pub fn on_submit<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(FormValues) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), SubmitError>> + Send + 'static,
    {
        self.on_submit = Some(Arc::new(move |values| handler(values).boxed()));
        self
    }

    /// Sets the cancel callback.
    #[must_use]
    pub fn on_cancel(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Arc::new(handler));
        self
    }

    /// Sets the channel receiving submit handler failures.
    #[must_use]
    pub fn on_error(mut self, handler: impl Fn(&SubmitError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(handler));
        self
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The schema this form was mounted with.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Current status.
    pub fn status(&self) -> FormStatus {
        self.state().status
    }

    /// Whether a submission is in flight (the submit button is disabled).
    pub fn is_submitting(&self) -> bool {
        self.status() == FormStatus::Submitting
    }

    /// Returns the current value of a field.
    pub fn value(&self, name: &str) -> Option<FormValue> {
        self.state().values.get(name).cloned()
    }

    /// Returns a snapshot of all values.
    pub fn values(&self) -> FormValues {
        self.state().values.clone()
    }

    /// Stores a new value for a field and clears that field's error.
    ///
    /// Errors of other fields are left alone.
    pub fn set_value(&self, name: &str, value: impl Into<FormValue>) -> Result<()> {
        if self.schema.field(name).is_none() {
            return Err(FormError::UnknownField(name.to_string()));
        }

        let mut state = self.state();
        if state.status == FormStatus::Submitting {
            return Err(FormError::SubmissionInFlight);
        }

        state.values.set(name, value);
        state.errors.remove(name);
        if state.status == FormStatus::Settled {
            state.status = FormStatus::Editing;
        }
        Ok(())
    }

    /// Returns whether a field is currently visible.
    pub fn is_visible(&self, name: &str) -> bool {
        let state = self.state();
        self.schema
            .field(name)
            .is_some_and(|field| is_visible(field, &state.values))
    }

    /// Returns the currently visible fields, in declaration order.
    pub fn visible_fields(&self) -> Vec<&FieldDefinition> {
        let state = self.state();
        self.schema
            .fields
            .iter()
            .filter(|field| is_visible(field, &state.values))
            .collect()
    }

    /// Returns the errors of currently visible fields.
    ///
    /// Errors recorded for fields that have since been hidden are kept
    /// until the next full validation pass but are not reported.
    pub fn errors(&self) -> FormErrors {
        let state = self.state();
        state.errors.filtered(|name| {
            self.schema
                .field(name)
                .is_some_and(|field| is_visible(field, &state.values))
        })
    }

    /// Returns the error of a field, if it has one and is visible.
    pub fn error(&self, name: &str) -> Option<String> {
        let state = self.state();
        let field = self.schema.field(name)?;
        if !is_visible(field, &state.values) {
            return None;
        }
        state.errors.get(name).map(str::to_string)
    }

    /// Validates every visible field, replacing all previous errors.
    ///
    /// Returns `true` when the form is valid.
    pub fn validate(&self) -> bool {
        let mut state = self.state();
        if state.status == FormStatus::Submitting {
            return false;
        }
        let errors = self.validation_pass(&mut state);
        state.status = FormStatus::Editing;
        errors.is_empty()
    }

    fn validation_pass(&self, state: &mut FormState) -> FormErrors {
        state.status = FormStatus::Validating;

        let mut errors = FormErrors::new();
        for field in &self.schema.fields {
            if !is_visible(field, &state.values) {
                continue;
            }
            let value = state.values.get(&field.name).unwrap_or(&NULL_VALUE);
            if let Some(message) = validate(field, value, &state.values) {
                errors.insert(field.name.clone(), message);
            }
        }

        debug!(errors = errors.len(), "Validated form");
        state.errors = errors.clone();
        errors
    }

    /// Validates and, when clean, hands the full value map to the submit
    /// handler.
    ///
    /// Hidden fields are skipped by validation but included in the payload.
    /// A call made while another submission is in flight does nothing.
    /// A failing handler returns the form to editing; its error is logged
    /// and forwarded to the error channel, never mapped onto fields.
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = self.state();
            if state.status == FormStatus::Submitting {
                warn!("Submit ignored: a submission is already in flight");
                return SubmitOutcome::Suppressed;
            }

            let errors = self.validation_pass(&mut state);
            if !errors.is_empty() {
                state.status = FormStatus::Editing;
                return SubmitOutcome::Invalid(errors);
            }

            let Some(handler) = self.on_submit.clone() else {
                state.status = FormStatus::Settled;
                info!("Form settled without a submit handler");
                return SubmitOutcome::Submitted;
            };

            state.status = FormStatus::Submitting;
            (handler, state.values.clone())
        };

        let (handler, values) = payload;
        let mut guard = InFlight { form: self, armed: true };
        let result = handler(values).await;
        guard.armed = false;

        match result {
            Ok(()) => {
                self.state().status = FormStatus::Settled;
                info!("Form submitted");
                SubmitOutcome::Submitted
            }
            Err(err) => {
                self.state().status = FormStatus::Editing;
                warn!(error = %err, "Submit handler failed");
                if let Some(on_error) = &self.on_error {
                    on_error(&err);
                }
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Invokes the cancel callback. No validation runs.
    pub fn cancel(&self) {
        debug!("Form cancelled");
        if let Some(on_cancel) = &self.on_cancel {
            on_cancel();
        }
    }
}

/// Returns the form to editing if a submit future is dropped before the
/// handler settles.
struct InFlight<'a> {
    form: &'a Form,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.form.state();
        if state.status == FormStatus::Submitting {
            state.status = FormStatus::Editing;
            warn!("Submission dropped before the handler settled");
        }
    }
}
