#![forbid(unsafe_code)]

//! formkit public facade.
//!
//! Form state and schema-driven validation for any rendering layer. Most
//! users only need the [`prelude`].
//!
//! ```
//! use formkit::prelude::*;
//!
//! let mut form = Form::builder()
//!     .schema(
//!         ValidationSchema::new()
//!             .rule("email", RuleId::Email)
//!             .rule("zip", RuleId::PostalCode),
//!     )
//!     .build();
//! assert!(!form.is_valid());
//!
//! form.update_field("email", "a@b.com");
//! form.update_field("zip", "12345");
//! assert!(form.is_valid());
//! assert!(form.submit().is_some());
//! ```

pub use formkit_reactive as reactive;

pub use formkit_core::{
    FieldChange, FieldName, FieldStore, FieldValue, Form, FormBuilder, FormEvent, FormSnapshot,
    InputChange, ResetPolicy, RuleId, SubmitEvent, ValidatedInput, ValidationEngine,
    ValidationSchema, field_validity, form_validity,
};
#[cfg(feature = "form-config")]
pub use formkit_core::{FormConfig, FormConfigError};

/// Everything needed to declare, drive and bind a form.
pub mod prelude {
    #[cfg(feature = "form-config")]
    pub use formkit_core::FormConfig;
    pub use formkit_core::{
        FieldChange, FieldStore, Form, FormEvent, FormSnapshot, ResetPolicy, RuleId, SubmitEvent,
        ValidatedInput, ValidationEngine, ValidationSchema,
    };
    pub use formkit_reactive::{Binding, Subscription};
}
