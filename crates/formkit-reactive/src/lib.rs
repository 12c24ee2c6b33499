#![forbid(unsafe_code)]

//! Change-tracking primitives for formkit.
//!
//! - [`Observable`]: A shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`Computed`]: A lazily-evaluated, memoized value derived from one or
//!   two `Observable` dependencies.
//! - [`Binding`]: An uncached read view over an observable, optionally mapped.
//! - [`BindingScope`]: Holds subscriptions for the lifetime of a consumer.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscribers are stored as `Weak` function pointers and cleaned up lazily
//! during notification. None of the types here are `Send`; one form instance
//! lives on one thread.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order, synchronously, before
//!    the mutating call returns.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. `Computed::get()` never returns a stale value.

pub mod binding;
pub mod computed;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped, bind_mapped2, bind_observable};
pub use computed::Computed;
pub use observable::{Observable, Subscription};
