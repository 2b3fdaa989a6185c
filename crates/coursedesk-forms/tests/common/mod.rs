#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use coursedesk_forms::{Form, FormSchema, FormSchemaBuilder, FormValues, SubmitError};

pub fn build(builder: FormSchemaBuilder) -> FormSchema {
    builder
        .build()
        .unwrap_or_else(|e| panic!("Failed to build schema: {e}"))
}

pub fn mount(builder: FormSchemaBuilder, initial: FormValues) -> Form {
    Form::mount(build(builder), Some(initial))
}

/// Records every payload handed to the submit handler.
#[derive(Clone, Default)]
pub struct Recorder {
    pub calls: Arc<AtomicUsize>,
    pub payloads: Arc<Mutex<Vec<FormValues>>>,
}

impl Recorder {
    pub fn attach(&self, form: Form) -> Form {
        self.attach_with_delay(form, Duration::ZERO)
    }

    pub fn attach_with_delay(&self, form: Form, delay: Duration) -> Form {
        let recorder = self.clone();
        form.on_submit(move |values| {
            let recorder = recorder.clone();
            async move {
                recorder.calls.fetch_add(1, Ordering::SeqCst);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                recorder.payloads.lock().unwrap().push(values);
                Ok::<(), SubmitError>(())
            }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> FormValues {
        self.payloads
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_else(|| panic!("Submit handler was never called"))
    }
}
