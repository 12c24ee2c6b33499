#![forbid(unsafe_code)]

//! Events a rendering layer delivers to a form.

use crate::snapshot::{FieldName, FieldValue};

/// Payload of one field edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    pub name: FieldName,
    pub value: FieldValue,
}

impl FieldChange {
    #[must_use]
    pub fn new(name: impl Into<FieldName>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<N: Into<FieldName>, V: Into<FieldValue>> From<(N, V)> for FieldChange {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// A submit trigger from the rendering layer.
///
/// The form marks the default action as prevented before it does anything
/// else, so the host never performs its own submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the host's default submission behaviour.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Anything a rendering layer can ask a form to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// A field was edited.
    Change(FieldChange),
    /// The user asked to submit.
    Submit,
    /// The user asked to reset.
    Reset,
}

impl FormEvent {
    /// Shorthand for a [`FormEvent::Change`].
    #[must_use]
    pub fn change(name: impl Into<FieldName>, value: impl Into<FieldValue>) -> Self {
        Self::Change(FieldChange::new(name, value))
    }
}

impl From<FieldChange> for FormEvent {
    fn from(change: FieldChange) -> Self {
        Self::Change(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_from_tuple() {
        let change: FieldChange = ("zip", "12345").into();
        assert_eq!(change, FieldChange::new("zip", "12345"));
    }

    #[test]
    fn submit_event_prevent_default() {
        let mut event = SubmitEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }

    #[test]
    fn form_event_shorthand() {
        assert_eq!(
            FormEvent::change("a", "b"),
            FormEvent::from(FieldChange::new("a", "b"))
        );
    }
}
