#![forbid(unsafe_code)]

//! A form instance: store, validation and submission callback together.
//!
//! [`Form`] is what a rendering layer binds to. It routes change events into
//! the [`FieldStore`], gates submission on the [`ValidationEngine`], and hands
//! accepted payloads to the callback declared at construction.
//!
//! # Example
//!
//! ```
//! use formkit_core::{Form, FormEvent, RuleId, ValidationSchema};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let sent = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&sent);
//! let mut form = Form::builder()
//!     .fields(["email"])
//!     .schema(ValidationSchema::new().rule("email", RuleId::Email))
//!     .on_submit(move |payload| sink.borrow_mut().push(payload))
//!     .build();
//!
//! form.dispatch(FormEvent::Submit);
//! assert!(sent.borrow().is_empty());
//!
//! form.dispatch(FormEvent::change("email", "a@b.com"));
//! form.dispatch(FormEvent::Submit);
//! assert_eq!(sent.borrow().len(), 1);
//! ```

use std::fmt;

use formkit_reactive::{Binding, Subscription};

use crate::engine::ValidationEngine;
use crate::event::{FieldChange, FormEvent, SubmitEvent};
use crate::schema::ValidationSchema;
use crate::snapshot::{FieldName, FieldValue, FormSnapshot};
use crate::store::{FieldStore, ResetPolicy};

type SubmitCallback = Box<dyn FnMut(FormSnapshot)>;

/// Declares a [`Form`].
#[derive(Default)]
pub struct FormBuilder {
    initial: Option<FormSnapshot>,
    fields: Vec<FieldName>,
    schema: ValidationSchema,
    reset_policy: ResetPolicy,
    on_submit: Option<SubmitCallback>,
}

impl fmt::Debug for FormBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormBuilder")
            .field("initial", &self.initial)
            .field("fields", &self.fields)
            .field("schema", &self.schema)
            .field("reset_policy", &self.reset_policy)
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}

impl FormBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial values. Also the target of a [`ResetPolicy::Baseline`] reset.
    #[must_use]
    pub fn initial(mut self, snapshot: FormSnapshot) -> Self {
        self.initial = Some(snapshot);
        self
    }

    /// Declare fields that start present and empty. Initial values win over
    /// declarations for the same name.
    #[must_use]
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn schema(mut self, schema: ValidationSchema) -> Self {
        self.schema = schema;
        self
    }

    #[must_use]
    pub fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Callback receiving each accepted submission payload.
    #[must_use]
    pub fn on_submit(mut self, callback: impl FnMut(FormSnapshot) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn build(self) -> Form {
        let initial = if self.fields.is_empty() && self.initial.is_none() {
            None
        } else {
            let mut snapshot = FormSnapshot::blank(self.fields);
            if let Some(values) = self.initial {
                snapshot.extend(values.iter());
            }
            Some(snapshot)
        };
        let store = FieldStore::initialize(initial).with_reset_policy(self.reset_policy);
        let engine = ValidationEngine::attach(&store, self.schema);
        Form {
            store,
            engine,
            on_submit: self.on_submit,
        }
    }
}

/// One form instance.
pub struct Form {
    store: FieldStore,
    engine: ValidationEngine,
    on_submit: Option<SubmitCallback>,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("store", &self.store)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl Form {
    #[must_use]
    pub fn builder() -> FormBuilder {
        FormBuilder::new()
    }

    /// Current field values.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.store.snapshot()
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.store.value(name)
    }

    /// Whether the form may be submitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.engine.is_valid()
    }

    /// Whether one field passes its own rule.
    #[must_use]
    pub fn field_is_valid(&self, name: &str) -> bool {
        self.engine.field_is_valid(name)
    }

    /// Schema fields currently failing, in name order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<FieldName> {
        self.engine.invalid_fields()
    }

    pub fn update_field(
        &mut self,
        name: impl Into<FieldName>,
        value: impl Into<FieldValue>,
    ) -> FormSnapshot {
        self.store.update_field(name, value)
    }

    pub fn apply(&mut self, change: FieldChange) -> FormSnapshot {
        self.store.apply(change)
    }

    pub fn reset_form(&mut self) -> FormSnapshot {
        self.store.reset_form()
    }

    /// Swap the schema and return the resulting validity.
    pub fn set_schema(&mut self, schema: ValidationSchema) -> bool {
        self.engine.set_schema(schema)
    }

    /// Submit if valid.
    ///
    /// Returns the payload handed to the callback, or `None` when the form is
    /// invalid, in which case nothing happens.
    pub fn submit(&mut self) -> Option<FormSnapshot> {
        let _span = tracing::debug_span!("form_submit").entered();
        if !self.engine.is_valid() {
            tracing::debug!(
                invalid = ?self.engine.invalid_fields(),
                "submission blocked"
            );
            return None;
        }
        let payload = self.store.submit();
        tracing::debug!(fields = payload.len(), "submission accepted");
        if let Some(callback) = self.on_submit.as_mut() {
            callback(payload.clone());
        }
        Some(payload)
    }

    /// Handle a submit trigger: suppress the host's default action, then
    /// [`submit`](Self::submit).
    pub fn handle_submit(&mut self, event: &mut SubmitEvent) -> Option<FormSnapshot> {
        event.prevent_default();
        self.submit()
    }

    /// Route one rendering-layer event.
    pub fn dispatch(&mut self, event: FormEvent) {
        match event {
            FormEvent::Change(change) => {
                self.apply(change);
            }
            FormEvent::Submit => {
                self.handle_submit(&mut SubmitEvent::new());
            }
            FormEvent::Reset => {
                self.reset_form();
            }
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    /// The underlying validation engine.
    #[must_use]
    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    #[must_use]
    pub fn reset_policy(&self) -> ResetPolicy {
        self.store.reset_policy()
    }

    /// Read-only view of the validity flag.
    #[must_use]
    pub fn bind_validity(&self) -> Binding<bool> {
        self.engine.bind_validity()
    }

    /// Run `callback` after every snapshot change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&FormSnapshot) + 'static) -> Subscription {
        self.store.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_form(schema: ValidationSchema) -> (Form, Rc<RefCell<Vec<FormSnapshot>>>) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sent);
        let form = Form::builder()
            .schema(schema)
            .on_submit(move |payload| sink.borrow_mut().push(payload))
            .build();
        (form, sent)
    }

    #[test]
    fn builder_merges_fields_and_initial() {
        let form = Form::builder()
            .fields(["name", "email"])
            .initial(FormSnapshot::new().with("name", "Alice"))
            .build();
        assert_eq!(
            form.snapshot(),
            FormSnapshot::new().with("name", "Alice").with("email", "")
        );
    }

    #[test]
    fn builder_without_declarations_is_untouched() {
        let form = Form::builder().build();
        assert!(form.snapshot().is_empty());
        assert!(form.is_valid(), "no schema, no constraints");
    }

    #[test]
    fn invalid_submit_is_noop() {
        let (mut form, sent) = recording_form(ValidationSchema::new().rule("name", "required"));
        assert_eq!(form.submit(), None);
        form.update_field("name", "");
        assert_eq!(form.submit(), None);
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn valid_submit_hands_payload_to_callback() {
        let (mut form, sent) = recording_form(ValidationSchema::new().rule("name", "required"));
        form.update_field("name", "Alice");
        let payload = form.submit().expect("form is valid");
        assert_eq!(payload.get("name"), Some("Alice"));
        assert_eq!(*sent.borrow(), vec![payload]);
        assert_eq!(form.value("name").as_deref(), Some("Alice"));
    }

    #[test]
    fn submit_without_callback_still_returns_payload() {
        let mut form = Form::builder().build();
        form.update_field("x", "1");
        assert_eq!(form.submit(), Some(FormSnapshot::new().with("x", "1")));
    }

    #[test]
    fn handle_submit_prevents_default_even_when_blocked() {
        let (mut form, _) = recording_form(ValidationSchema::new().rule("name", "required"));
        let mut event = SubmitEvent::new();
        assert_eq!(form.handle_submit(&mut event), None);
        assert!(event.default_prevented());
    }

    #[test]
    fn dispatch_routes_events() {
        let (mut form, sent) = recording_form(
            ValidationSchema::new()
                .rule("email", RuleId::Email)
                .rule("zip", RuleId::PostalCode),
        );
        form.dispatch(FormEvent::change("email", "a@b.com"));
        form.dispatch(FormEvent::change("zip", "12345"));
        assert!(form.is_valid());
        form.dispatch(FormEvent::Submit);
        form.dispatch(FormEvent::Reset);
        assert!(!form.is_valid());
        form.dispatch(FormEvent::Submit);

        assert_eq!(sent.borrow().len(), 1);
        assert_eq!(form.snapshot(), FormSnapshot::blank(["email", "zip"]));
    }

    #[test]
    fn set_schema_regates_submission() {
        let (mut form, sent) = recording_form(ValidationSchema::new().rule("zip", "postal-code"));
        form.update_field("zip", "nope");
        assert!(!form.is_valid());
        assert!(form.set_schema(ValidationSchema::new().rule("zip", "required")));
        assert!(form.submit().is_some());
        assert_eq!(sent.borrow().len(), 1);
    }

    #[test]
    fn invalid_fields_passthrough() {
        let mut form = Form::builder()
            .schema(ValidationSchema::new().rule("a", "required").rule("b", "required"))
            .build();
        form.update_field("a", "x");
        assert_eq!(form.invalid_fields(), vec!["b"]);
        assert!(form.field_is_valid("a"));
    }
}
