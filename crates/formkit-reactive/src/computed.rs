#![forbid(unsafe_code)]

//! Memoized values derived from observables.
//!
//! A [`Computed<T>`] subscribes to its sources and marks itself dirty when
//! any of them change. The derivation only runs on the next `get()`, so a
//! burst of source changes costs one recomputation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// A lazily recomputed value derived from one or two observables.
pub struct Computed<T> {
    compute: Box<dyn Fn() -> T>,
    cached: RefCell<Option<T>>,
    dirty: Rc<Cell<bool>>,
    evaluations: Cell<u64>,
    _subscriptions: Vec<Subscription>,
}

impl<T: fmt::Debug> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("cached", &self.cached.borrow())
            .field("dirty", &self.dirty.get())
            .finish()
    }
}

impl<T: Clone + 'static> Computed<T> {
    /// Derive a value from a single source.
    pub fn from_observable<S: Clone + PartialEq + 'static>(
        source: &Observable<S>,
        map: impl Fn(&S) -> T + 'static,
    ) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let sub = source.subscribe(move |_| flag.set(true));
        let src = source.clone();
        Self {
            compute: Box::new(move || src.with(|v| map(v))),
            cached: RefCell::new(None),
            dirty,
            evaluations: Cell::new(0),
            _subscriptions: vec![sub],
        }
    }

    /// Derive a value from two sources.
    pub fn from_observables<S1, S2>(
        first: &Observable<S1>,
        second: &Observable<S2>,
        map: impl Fn(&S1, &S2) -> T + 'static,
    ) -> Self
    where
        S1: Clone + PartialEq + 'static,
        S2: Clone + PartialEq + 'static,
    {
        let dirty = Rc::new(Cell::new(true));
        let f1 = Rc::clone(&dirty);
        let f2 = Rc::clone(&dirty);
        let subs = vec![
            first.subscribe(move |_| f1.set(true)),
            second.subscribe(move |_| f2.set(true)),
        ];
        let a = first.clone();
        let b = second.clone();
        Self {
            compute: Box::new(move || a.with(|x| b.with(|y| map(x, y)))),
            cached: RefCell::new(None),
            dirty,
            evaluations: Cell::new(0),
            _subscriptions: subs,
        }
    }

    /// Current value, recomputed first if any source changed.
    #[must_use]
    pub fn get(&self) -> T {
        if !self.dirty.get()
            && let Some(value) = self.cached.borrow().as_ref()
        {
            return value.clone();
        }
        let value = (self.compute)();
        self.evaluations.set(self.evaluations.get() + 1);
        *self.cached.borrow_mut() = Some(value.clone());
        self.dirty.set(false);
        value
    }

    /// Whether the next `get()` will recompute.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// How many times the derivation has run.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }
}
