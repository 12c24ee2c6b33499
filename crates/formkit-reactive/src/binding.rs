#![forbid(unsafe_code)]

//! Read-only views over [`Observable`] values.
//!
//! A [`Binding<T>`] wraps an observable source plus an optional transform.
//! Rendering layers hold bindings instead of the observables themselves, so
//! they can read derived state (e.g. "submit button enabled") without gaining
//! write access to it.
//!
//! # Usage
//!
//! ```
//! use formkit_reactive::{Observable, bind_mapped};
//!
//! let valid = Observable::new(false);
//! let label = bind_mapped(&valid, |v| if *v { "Submit" } else { "Fix errors" });
//! assert_eq!(label.get(), "Fix errors");
//!
//! valid.set(true);
//! assert_eq!(label.get(), "Submit");
//! ```
//!
//! # Invariants
//!
//! 1. `Binding::get()` always returns the current (not stale) value.
//! 2. A binding's transform is applied on every `get()` call (no caching).
//!    Use [`Computed`] when memoization is needed.
//! 3. Bindings are `Clone` and share their source.
//!
//! [`Computed`]: super::Computed

use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// A read-only binding to an [`Observable`] value with an optional transform.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Create a binding that evaluates `f` on each `get()` call.
    pub fn new(f: impl Fn() -> T + 'static) -> Self {
        Self { eval: Rc::new(f) }
    }

    /// Get the current bound value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }

    /// Apply a further transform, returning a new `Binding`.
    pub fn then<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Binding<U> {
        Binding {
            eval: Rc::new(move || f((self.eval)())),
        }
    }
}

/// Create a direct binding to an observable.
pub fn bind_observable<T: Clone + PartialEq + 'static>(source: &Observable<T>) -> Binding<T> {
    let src = source.clone();
    Binding::new(move || src.get())
}

/// Create a mapped binding: `source` value transformed by `map`.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.clone();
    Binding::new(move || src.with(|v| map(v)))
}

/// Create a binding from two observables combined by `map`.
pub fn bind_mapped2<S1, S2, T>(
    s1: &Observable<S1>,
    s2: &Observable<S2>,
    map: impl Fn(&S1, &S2) -> T + 'static,
) -> Binding<T>
where
    S1: Clone + PartialEq + 'static,
    S2: Clone + PartialEq + 'static,
    T: 'static,
{
    let src1 = s1.clone();
    let src2 = s2.clone();
    Binding::new(move || src1.with(|v1| src2.with(|v2| map(v1, v2))))
}

/// Collects subscriptions for a logical owner (a validation engine, a
/// rendering adapter).
///
/// Dropping the scope releases every held subscription.
#[derive(Default)]
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep an existing subscription alive for the lifetime of the scope.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe to an observable within this scope.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        let sub = source.subscribe(callback);
        self.subscriptions.push(sub);
        self
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release all subscriptions now; the scope stays usable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingScope")
            .field("len", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn binding_tracks_source() {
        let obs = Observable::new(String::from("a@b.com"));
        let b = bind_observable(&obs);
        assert_eq!(b.get(), "a@b.com");

        obs.set("c@d.org".into());
        assert_eq!(b.get(), "c@d.org");
    }

    #[test]
    fn mapped_binding() {
        let valid = Observable::new(false);
        let enabled = bind_mapped(&valid, |v| !*v);
        assert!(enabled.get());
        valid.set(true);
        assert!(!enabled.get());
    }

    #[test]
    fn mapped2_binding() {
        let first = Observable::new(String::from("Ada"));
        let last = Observable::new(String::from("Lovelace"));
        let full = bind_mapped2(&first, &last, |a, b| format!("{a} {b}"));
        assert_eq!(full.get(), "Ada Lovelace");

        first.set("Augusta".into());
        assert_eq!(full.get(), "Augusta Lovelace");
    }

    #[test]
    fn then_chains_transforms() {
        let obs = Observable::new(3usize);
        let label = bind_observable(&obs).then(|n| format!("{n} errors"));
        assert_eq!(label.get(), "3 errors");
    }

    #[test]
    fn clone_shares_source() {
        let obs = Observable::new(1);
        let b1 = bind_observable(&obs);
        let b2 = b1.clone();
        obs.set(9);
        assert_eq!(b1.get(), 9);
        assert_eq!(b2.get(), 9);
    }

    #[test]
    fn scope_drop_releases_subscriptions() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        {
            let mut scope = BindingScope::new();
            let s = Rc::clone(&seen);
            scope.subscribe(&obs, move |v| s.set(*v));
            obs.set(1);
            assert_eq!(seen.get(), 1);
        }
        obs.set(2);
        assert_eq!(seen.get(), 1, "callback must not fire after scope drop");
    }

    #[test]
    fn scope_clear_and_reuse() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let mut scope = BindingScope::new();

        let h = Rc::clone(&hits);
        scope.hold(obs.subscribe(move |_| h.set(h.get() + 1)));
        assert_eq!(scope.len(), 1);
        scope.clear();
        assert!(scope.is_empty());

        let h = Rc::clone(&hits);
        scope.subscribe(&obs, move |_| h.set(h.get() + 10));
        obs.set(1);
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn scope_debug_format() {
        let obs = Observable::new(0);
        let mut scope = BindingScope::new();
        scope.subscribe(&obs, |_| {}).subscribe(&obs, |_| {});
        assert!(format!("{scope:?}").contains("len: 2"));
    }
}
