#![forbid(unsafe_code)]

//! Schema-driven form validity.
//!
//! [`ValidationEngine`] observes a [`FieldStore`]'s snapshot and its own
//! schema, and keeps one derived flag current: whether the form may be
//! submitted. Recomputation runs synchronously inside the subscriber
//! callbacks, so by the time `update_field` or `set_schema` returns the flag
//! already reflects the change.
//!
//! # Validity
//!
//! 1. An empty schema is always valid.
//! 2. A snapshot with no keys is invalid (the form was never touched).
//! 3. Otherwise every `(field, rule)` pair in the schema must pass. Fields
//!    missing from the snapshot count as empty and fail; fields missing from
//!    the schema are ignored.
//!
//! Unknown rule tags fail closed and are reported with `tracing::warn!` when
//! the schema is installed.

use std::cell::Cell;
use std::rc::Rc;

use formkit_reactive::{
    Binding, BindingScope, Observable, Subscription, bind_mapped, bind_mapped2, bind_observable,
};

use crate::schema::ValidationSchema;
use crate::snapshot::{FieldName, FormSnapshot};
use crate::store::FieldStore;

/// Whether `snapshot` satisfies `schema` as a whole.
#[must_use]
pub fn form_validity(snapshot: &FormSnapshot, schema: &ValidationSchema) -> bool {
    if schema.is_empty() {
        return true;
    }
    if snapshot.is_empty() {
        return false;
    }
    schema
        .iter()
        .all(|(field, rule)| rule.check(snapshot.value_or_empty(field)))
}

/// Whether one field passes its own rule, ignoring the rest of the form.
///
/// A field without a rule is always valid.
#[must_use]
pub fn field_validity(snapshot: &FormSnapshot, schema: &ValidationSchema, field: &str) -> bool {
    schema
        .rule_for(field)
        .is_none_or(|rule| rule.check(snapshot.value_or_empty(field)))
}

fn warn_unknown_rules(schema: &ValidationSchema) {
    for (field, tag) in schema.unknown_rules() {
        tracing::warn!(field, rule = tag, "unknown validation rule; field can never be valid");
    }
}

/// Keeps the form-level validity flag in step with a store and a schema.
pub struct ValidationEngine {
    snapshot: Observable<FormSnapshot>,
    schema: Observable<ValidationSchema>,
    validity: Observable<bool>,
    recomputes: Rc<Cell<u64>>,
    _scope: BindingScope,
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("valid", &self.validity.get())
            .field("rules", &self.schema.with(ValidationSchema::len))
            .field("recomputes", &self.recomputes.get())
            .finish()
    }
}

impl ValidationEngine {
    /// Start observing `store` under `schema`. Validity is computed once
    /// immediately.
    #[must_use]
    pub fn attach(store: &FieldStore, schema: ValidationSchema) -> Self {
        warn_unknown_rules(&schema);
        let snapshot = store.observable().clone();
        let initial = snapshot.with(|snap| form_validity(snap, &schema));
        let schema = Observable::new(schema);
        let validity = Observable::new(initial);
        let recomputes = Rc::new(Cell::new(1));

        let mut scope = BindingScope::new();
        {
            let schema = schema.clone();
            let validity = validity.clone();
            let recomputes = Rc::clone(&recomputes);
            scope.subscribe(&snapshot, move |snap| {
                let valid = schema.with(|rules| form_validity(snap, rules));
                recomputes.set(recomputes.get() + 1);
                tracing::trace!(valid, trigger = "snapshot", "validity recomputed");
                validity.set(valid);
            });
        }
        {
            let snapshot = snapshot.clone();
            let validity = validity.clone();
            let recomputes = Rc::clone(&recomputes);
            scope.subscribe(&schema, move |rules| {
                let valid = snapshot.with(|snap| form_validity(snap, rules));
                recomputes.set(recomputes.get() + 1);
                tracing::trace!(valid, trigger = "schema", "validity recomputed");
                validity.set(valid);
            });
        }

        Self {
            snapshot,
            schema,
            validity,
            recomputes,
            _scope: scope,
        }
    }

    /// Current form-level validity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validity.get()
    }

    /// Install a new schema and return the resulting validity.
    ///
    /// Installing a schema equal to the current one does nothing.
    pub fn set_schema(&mut self, schema: ValidationSchema) -> bool {
        warn_unknown_rules(&schema);
        self.schema.set(schema);
        self.is_valid()
    }

    /// The schema currently in force.
    #[must_use]
    pub fn schema(&self) -> ValidationSchema {
        self.schema.get()
    }

    /// Whether `field` passes its own rule right now.
    #[must_use]
    pub fn field_is_valid(&self, field: &str) -> bool {
        self.snapshot
            .with(|snap| self.schema.with(|rules| field_validity(snap, rules, field)))
    }

    /// Schema fields that currently fail, in name order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<FieldName> {
        self.snapshot.with(|snap| {
            self.schema.with(|rules| {
                rules
                    .iter()
                    .filter(|(field, rule)| !rule.check(snap.value_or_empty(field)))
                    .map(|(field, _)| field.to_owned())
                    .collect()
            })
        })
    }

    /// Run `callback` whenever the validity flag flips.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.validity.subscribe(move |valid| callback(*valid))
    }

    /// Read-only view of the validity flag.
    #[must_use]
    pub fn bind_validity(&self) -> Binding<bool> {
        bind_observable(&self.validity)
    }

    /// Read-only view of one field's own validity, for an inline error
    /// indicator.
    #[must_use]
    pub fn bind_field(&self, field: impl Into<FieldName>) -> Binding<bool> {
        let field = field.into();
        bind_mapped2(&self.snapshot, &self.schema, move |snap, rules| {
            field_validity(snap, rules, &field)
        })
    }

    /// Read-only view of how many schema fields fail.
    #[must_use]
    pub fn bind_error_count(&self) -> Binding<usize> {
        let schema = self.schema.clone();
        bind_mapped(&self.snapshot, move |snap| {
            schema.with(|rules| {
                rules
                    .iter()
                    .filter(|(field, rule)| !rule.check(snap.value_or_empty(field)))
                    .count()
            })
        })
    }

    /// Number of times validity has been computed, including the first.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes.get()
    }
}
