#![forbid(unsafe_code)]

//! Single source of truth for the field values of one form.
//!
//! # Invariants
//!
//! 1. Only [`FieldStore`] writes the snapshot; observers get read access
//!    through subscriptions and bindings.
//! 2. No key is ever removed, under either [`ResetPolicy`].
//! 3. Every mutation notifies subscribers before it returns, so anything
//!    derived from the snapshot is current by the time the caller continues.
//! 4. `submit()` never mutates.
//!
//! Field values are never logged; only names and lengths are.

use formkit_reactive::{Binding, Observable, Subscription, bind_observable};

use crate::event::FieldChange;
use crate::snapshot::{FieldName, FieldValue, FormSnapshot};

/// What `reset_form` returns the snapshot to.
///
/// The policy is fixed when the store is built and applies to every reset of
/// that store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "form-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ResetPolicy {
    /// Every present field is set to the empty string; keys are kept.
    #[default]
    Blank,
    /// Fields captured at construction get their initial values back;
    /// fields added later are set to the empty string. Keys are kept.
    Baseline,
}

/// Owns the [`FormSnapshot`] of one form instance.
///
/// ```
/// use formkit_core::{FieldStore, FormSnapshot, ResetPolicy};
///
/// let mut store = FieldStore::initialize(Some(FormSnapshot::new().with("name", "Alice")))
///     .with_reset_policy(ResetPolicy::Baseline);
/// store.update_field("name", "Bob");
/// assert_eq!(store.reset_form().get("name"), Some("Alice"));
/// ```
#[derive(Debug)]
pub struct FieldStore {
    snapshot: Observable<FormSnapshot>,
    baseline: FormSnapshot,
    policy: ResetPolicy,
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStore {
    /// Build a store from an optional initial snapshot. No validation runs.
    #[must_use]
    pub fn initialize(initial: Option<FormSnapshot>) -> Self {
        let baseline = initial.unwrap_or_default();
        tracing::debug!(fields = baseline.len(), "field store initialized");
        Self {
            snapshot: Observable::new(baseline.clone()),
            baseline,
            policy: ResetPolicy::default(),
        }
    }

    /// An untouched store: no keys at all.
    #[must_use]
    pub fn new() -> Self {
        Self::initialize(None)
    }

    /// A store with each declared field present and empty.
    #[must_use]
    pub fn with_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        Self::initialize(Some(FormSnapshot::blank(names)))
    }

    /// Choose the reset policy.
    #[must_use]
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Merge `{name: value}` into the snapshot and return the result.
    ///
    /// Names not seen before are added. Other fields are untouched.
    pub fn update_field(
        &mut self,
        name: impl Into<FieldName>,
        value: impl Into<FieldValue>,
    ) -> FormSnapshot {
        let name = name.into();
        let value = value.into();
        tracing::debug!(field = %name, len = value.len(), "field updated");
        self.snapshot.update(|snap| snap.insert(name, value));
        self.snapshot()
    }

    /// Apply a change-event payload from the rendering layer.
    pub fn apply(&mut self, change: FieldChange) -> FormSnapshot {
        let FieldChange { name, value } = change;
        self.update_field(name, value)
    }

    /// Return the snapshot to its baseline according to the active policy.
    ///
    /// Idempotent: a second reset leaves the snapshot unchanged.
    pub fn reset_form(&mut self) -> FormSnapshot {
        tracing::debug!(policy = ?self.policy, "form reset");
        match self.policy {
            ResetPolicy::Blank => {
                self.snapshot.update(FormSnapshot::clear_values);
            }
            ResetPolicy::Baseline => {
                let baseline = &self.baseline;
                self.snapshot.update(|snap| snap.revert_to(baseline));
            }
        }
        self.snapshot()
    }

    /// The payload to hand to the submission callback. Does not mutate.
    ///
    /// Whether submission is allowed is the caller's decision.
    #[must_use]
    pub fn submit(&self) -> FormSnapshot {
        self.snapshot()
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.snapshot.get()
    }

    /// Current value of one field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.snapshot.with(|snap| snap.get(name).map(str::to_owned))
    }

    /// Snapshot captured at construction.
    #[must_use]
    pub fn baseline(&self) -> &FormSnapshot {
        &self.baseline
    }

    #[must_use]
    pub fn reset_policy(&self) -> ResetPolicy {
        self.policy
    }

    /// Run `callback` with the new snapshot after every change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&FormSnapshot) + 'static) -> Subscription {
        self.snapshot.subscribe(callback)
    }

    /// Read-only view of the snapshot for a rendering layer.
    #[must_use]
    pub fn bind(&self) -> Binding<FormSnapshot> {
        bind_observable(&self.snapshot)
    }

    /// Number of mutations that changed the snapshot.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.snapshot.version()
    }

    pub(crate) fn observable(&self) -> &Observable<FormSnapshot> {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn new_store_is_untouched() {
        let store = FieldStore::new();
        assert!(store.snapshot().is_empty());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn initialize_with_snapshot() {
        let initial = FormSnapshot::new().with("name", "Alice");
        let store = FieldStore::initialize(Some(initial.clone()));
        assert_eq!(store.snapshot(), initial);
        assert_eq!(store.baseline(), &initial);
    }

    #[test]
    fn update_adds_unknown_field() {
        let mut store = FieldStore::with_fields(["name"]);
        let snap = store.update_field("nickname", "Al");
        assert_eq!(snap.get("nickname"), Some("Al"));
        assert_eq!(snap.get("name"), Some(""));
    }

    #[test]
    fn update_leaves_other_fields() {
        let mut store =
            FieldStore::initialize(Some(FormSnapshot::new().with("a", "1").with("b", "2")));
        let snap = store.update_field("a", "9");
        assert_eq!(snap.get("a"), Some("9"));
        assert_eq!(snap.get("b"), Some("2"));
    }

    #[test]
    fn last_write_wins() {
        let mut store = FieldStore::new();
        store.update_field("n", "v1");
        store.update_field("n", "v2");
        assert_eq!(store.value("n").as_deref(), Some("v2"));
    }

    #[test]
    fn apply_change_event() {
        let mut store = FieldStore::new();
        store.apply(FieldChange::new("email", "a@b.com"));
        assert_eq!(store.value("email").as_deref(), Some("a@b.com"));
    }

    #[test]
    fn blank_reset_keeps_keys() {
        let mut store = FieldStore::initialize(Some(FormSnapshot::new().with("name", "Alice")));
        store.update_field("name", "Bob");
        store.update_field("email", "b@c.com");
        let snap = store.reset_form();
        assert_eq!(snap, FormSnapshot::blank(["name", "email"]));
    }

    #[test]
    fn baseline_reset_restores_initial_and_blanks_later_fields() {
        let mut store = FieldStore::initialize(Some(FormSnapshot::new().with("name", "Alice")))
            .with_reset_policy(ResetPolicy::Baseline);
        store.update_field("name", "Bob");
        store.update_field("email", "b@c.com");
        let snap = store.reset_form();
        assert_eq!(snap, FormSnapshot::new().with("name", "Alice").with("email", ""));
    }

    #[test]
    fn baseline_reset_of_untouched_store_keeps_written_keys() {
        let mut store = FieldStore::new().with_reset_policy(ResetPolicy::Baseline);
        store.update_field("name", "Bob");
        let snap = store.reset_form();
        assert!(snap.contains("name"));
        assert_eq!(snap.get("name"), Some(""));
        assert!(!snap.is_empty());
    }

    #[test]
    fn reset_is_idempotent_under_both_policies() {
        for policy in [ResetPolicy::Blank, ResetPolicy::Baseline] {
            let mut store = FieldStore::initialize(Some(FormSnapshot::new().with("x", "1")))
                .with_reset_policy(policy);
            store.update_field("x", "2");
            let once = store.reset_form();
            let version = store.version();
            let twice = store.reset_form();
            assert_eq!(once, twice, "{policy:?}");
            assert_eq!(store.version(), version, "second reset must not notify");
        }
    }

    #[test]
    fn submit_does_not_mutate() {
        let mut store = FieldStore::new();
        store.update_field("name", "Alice");
        let version = store.version();
        let payload = store.submit();
        assert_eq!(payload.get("name"), Some("Alice"));
        assert_eq!(store.version(), version);
    }

    #[test]
    fn subscribers_see_every_update_in_order() {
        let mut store = FieldStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = store.subscribe(move |snap| {
            s.borrow_mut().push(snap.value_or_empty("q").to_owned());
        });

        store.update_field("q", "a");
        store.update_field("q", "ab");
        store.reset_form();
        assert_eq!(*seen.borrow(), vec!["a", "ab", ""]);
    }

    #[test]
    fn bind_reads_current_snapshot() {
        let mut store = FieldStore::new();
        let view = store.bind();
        store.update_field("k", "v");
        assert_eq!(view.get().get("k"), Some("v"));
    }
}
