#![forbid(unsafe_code)]

//! Form state and validation for formkit.
//!
//! The crate has two collaborating parts:
//!
//! - [`FieldStore`] owns the field values of one form and applies updates,
//!   resets and submissions.
//! - [`ValidationEngine`] watches the store and a [`ValidationSchema`] and
//!   keeps a single validity flag current.
//!
//! [`Form`] ties both to a submission callback and is what a rendering layer
//! binds to. Nothing here renders, performs I/O, or spawns threads; every
//! operation runs synchronously on the caller's thread.

#[cfg(feature = "form-config")]
pub mod config;
pub mod engine;
pub mod event;
pub mod form;
pub mod input;
pub mod rule;
pub mod schema;
pub mod snapshot;
pub mod store;

#[cfg(feature = "form-config")]
pub use config::{FormConfig, FormConfigError};
pub use engine::{ValidationEngine, field_validity, form_validity};
pub use event::{FieldChange, FormEvent, SubmitEvent};
pub use form::{Form, FormBuilder};
pub use input::{InputChange, ValidatedInput};
pub use rule::RuleId;
pub use schema::ValidationSchema;
pub use snapshot::{FieldName, FieldValue, FormSnapshot};
pub use store::{FieldStore, ResetPolicy};
