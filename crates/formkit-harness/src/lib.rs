#![forbid(unsafe_code)]

//! Test harness for formkit.
//!
//! [`FormDriver`] plays the part of a rendering layer without rendering
//! anything real: it declares inputs, turns "typing" and "clicks" into
//! [`FormEvent`](formkit_core::FormEvent)s, records every submitted payload,
//! and draws the form as plain text so tests can assert on what a user would
//! see.
//!
//! ```
//! use formkit_core::{Form, ValidationSchema};
//! use formkit_harness::{FieldSpec, FormDriver};
//!
//! let mut driver = FormDriver::new(
//!     "Subscribe",
//!     Form::builder().schema(ValidationSchema::new().rule("email", "email")),
//!     vec![FieldSpec::new("email", "Email:")],
//! );
//! assert!(!driver.submit_enabled());
//! driver.type_into("email", "a@b.com");
//! driver.click_submit();
//! assert_eq!(driver.submissions().len(), 1);
//! ```

pub mod driver;
pub mod render;

pub use driver::{FieldSpec, FormDriver, Indicator};
pub use render::render_form;

/// Compare a driver's text rendering with an expected frame.
///
/// Leading/trailing blank lines, common indentation and per-line trailing
/// whitespace are ignored so frames can be written as indented raw strings.
#[macro_export]
macro_rules! assert_frame {
    ($driver:expr, $expected:expr) => {{
        let actual = $driver.render();
        let expected = $crate::render::normalize_frame($expected);
        assert_eq!(
            $crate::render::normalize_frame(&actual),
            expected,
            "\n--- actual ---\n{actual}\n--- expected ---\n{expected}\n"
        );
    }};
}
