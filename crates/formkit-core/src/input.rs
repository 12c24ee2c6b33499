#![forbid(unsafe_code)]

//! A free-standing input with its own rule.
//!
//! [`ValidatedInput`] is for single inputs that live outside any form, such
//! as a newsletter email box. Its validity is derived from its value and is
//! recomputed lazily the next time it is read after the value changes.

use formkit_reactive::{Computed, Observable, Subscription};

use crate::event::FieldChange;
use crate::rule::RuleId;
use crate::snapshot::FieldValue;

/// What a rendering layer may hand to [`ValidatedInput::apply`]: either the
/// new value itself or a full change event whose name is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputChange {
    Value(FieldValue),
    Event(FieldChange),
}

impl InputChange {
    fn into_value(self) -> FieldValue {
        match self {
            Self::Value(value) => value,
            Self::Event(change) => change.value,
        }
    }
}

impl From<&str> for InputChange {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl From<String> for InputChange {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<FieldChange> for InputChange {
    fn from(change: FieldChange) -> Self {
        Self::Event(change)
    }
}

/// One value plus the rule it must satisfy.
///
/// ```
/// use formkit_core::{RuleId, ValidatedInput};
///
/// let mut zip = ValidatedInput::new("", RuleId::PostalCode);
/// assert!(!zip.is_valid());
/// zip.apply("02139");
/// assert!(zip.is_valid());
/// ```
pub struct ValidatedInput {
    value: Observable<FieldValue>,
    rule: RuleId,
    valid: Computed<bool>,
}

impl std::fmt::Debug for ValidatedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedInput")
            .field("rule", &self.rule)
            .field("len", &self.value.with(String::len))
            .finish()
    }
}

impl ValidatedInput {
    /// Create an input. Pass `""` for no initial value.
    #[must_use]
    pub fn new(initial: impl Into<FieldValue>, rule: impl Into<RuleId>) -> Self {
        let rule = rule.into();
        if !rule.is_known() {
            tracing::warn!(
                rule = rule.as_str(),
                "unknown validation rule; input can never be valid"
            );
        }
        let value = Observable::new(initial.into());
        let check = rule.clone();
        let valid = Computed::from_observable(&value, move |v: &FieldValue| check.check(v));
        Self { value, rule, valid }
    }

    /// Replace the value.
    pub fn set(&mut self, value: impl Into<FieldValue>) {
        self.value.set(value.into());
    }

    /// Apply a raw value or a change event.
    pub fn apply(&mut self, change: impl Into<InputChange>) {
        self.set(change.into().into_value());
    }

    #[must_use]
    pub fn value(&self) -> FieldValue {
        self.value.get()
    }

    /// Whether the current value passes the rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid.get()
    }

    #[must_use]
    pub fn rule(&self) -> &RuleId {
        &self.rule
    }

    /// Run `callback` with each new value.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&FieldValue) + 'static) -> Subscription {
        self.value.subscribe(callback)
    }
}
