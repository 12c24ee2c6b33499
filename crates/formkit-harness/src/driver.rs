#![forbid(unsafe_code)]

//! Headless rendering layer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formkit_core::{FieldName, Form, FormBuilder, FormEvent, FormSnapshot, SubmitEvent};
use formkit_reactive::{Binding, BindingScope};

use crate::render::render_form;

/// One declared input, as a rendering layer would describe it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: String,
    pub placeholder: String,
    /// Render the value as `*` (password inputs).
    pub masked: bool,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<FieldName>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            placeholder: String::new(),
            masked: false,
        }
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    #[must_use]
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }
}

/// Inline error indicator state for one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    /// The field has a rule and passes it, or has no rule.
    Ok,
    /// The field has a rule and fails it.
    Error,
}

/// Drives a [`Form`] the way a user interface would.
pub struct FormDriver {
    heading: String,
    fields: Vec<FieldSpec>,
    form: Form,
    submitted: Rc<RefCell<Vec<FormSnapshot>>>,
    submit_enabled: Binding<bool>,
    validity_flips: Rc<Cell<usize>>,
    _scope: BindingScope,
}

impl std::fmt::Debug for FormDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDriver")
            .field("heading", &self.heading)
            .field("fields", &self.fields.len())
            .field("submitted", &self.submitted.borrow().len())
            .finish_non_exhaustive()
    }
}

impl FormDriver {
    /// Build the form from `builder` and declare `fields` as its inputs.
    ///
    /// Every declared input also becomes a declared form field. The driver
    /// installs its own submission callback, replacing any on `builder`.
    #[must_use]
    pub fn new(heading: impl Into<String>, builder: FormBuilder, fields: Vec<FieldSpec>) -> Self {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&submitted);
        let form = builder
            .fields(fields.iter().map(|f| f.name.clone()))
            .on_submit(move |payload| sink.borrow_mut().push(payload))
            .build();

        let validity_flips = Rc::new(Cell::new(0));
        let flips = Rc::clone(&validity_flips);
        let mut scope = BindingScope::new();
        scope.hold(form.engine().subscribe(move |_| flips.set(flips.get() + 1)));

        Self {
            heading: heading.into(),
            submit_enabled: form.bind_validity(),
            fields,
            form,
            submitted,
            validity_flips,
            _scope: scope,
        }
    }

    /// Simulate the user replacing the content of input `name`.
    pub fn type_into(&mut self, name: &str, value: &str) {
        tracing::trace!(field = name, "driver: input");
        self.form.dispatch(FormEvent::change(name, value));
    }

    /// Simulate a click on the submit button. Returns the event so tests can
    /// check that the default action was suppressed.
    pub fn click_submit(&mut self) -> SubmitEvent {
        let mut event = SubmitEvent::new();
        self.form.handle_submit(&mut event);
        event
    }

    /// Simulate a click on the reset button.
    pub fn click_reset(&mut self) {
        self.form.dispatch(FormEvent::Reset);
    }

    /// Deliver a scripted sequence of events in order.
    pub fn replay(&mut self, events: impl IntoIterator<Item = FormEvent>) {
        for event in events {
            self.form.dispatch(event);
        }
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled.get()
    }

    /// Indicator for input `name`.
    #[must_use]
    pub fn indicator(&self, name: &str) -> Indicator {
        if self.form.field_is_valid(name) {
            Indicator::Ok
        } else {
            Indicator::Error
        }
    }

    /// Every payload the form has handed to its submission callback.
    #[must_use]
    pub fn submissions(&self) -> Vec<FormSnapshot> {
        self.submitted.borrow().clone()
    }

    /// How many times the validity flag has flipped.
    #[must_use]
    pub fn validity_flips(&self) -> usize {
        self.validity_flips.get()
    }

    /// Draw the form as text.
    #[must_use]
    pub fn render(&self) -> String {
        render_form(&self.heading, &self.fields, &self.form)
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}
