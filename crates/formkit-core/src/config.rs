#![forbid(unsafe_code)]

//! Form declarations loaded from TOML or JSON.
//!
//! ```toml
//! reset_policy = "baseline"
//! fields = ["name", "email", "zip"]
//!
//! [initial]
//! name = "Alice"
//!
//! [schema]
//! email = "email"
//! zip = "postal-code"
//! ```
//!
//! Every key is optional. Unknown keys are rejected; unknown rule tags are
//! accepted and fail closed at validation time.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unreadable file | Missing path, permissions | `FormConfigError::Io` |
//! | Bad syntax or unknown key | Typo in the declaration | `Toml` / `Json` |
//! | Unrecognized extension | Not `.toml` or `.json` | `UnsupportedFormat` |

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::form::{Form, FormBuilder};
use crate::schema::ValidationSchema;
use crate::snapshot::{FieldName, FormSnapshot};
use crate::store::ResetPolicy;

/// Errors from loading a [`FormConfig`].
#[derive(Debug)]
pub enum FormConfigError {
    /// The file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// TOML was malformed or did not match the expected shape.
    Toml(toml::de::Error),
    /// JSON was malformed or did not match the expected shape.
    Json(serde_json::Error),
    /// The file extension names no supported format.
    UnsupportedFormat(PathBuf),
}

impl fmt::Display for FormConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Toml(err) => write!(f, "invalid TOML form config: {err}"),
            Self::Json(err) => write!(f, "invalid JSON form config: {err}"),
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported form config format: {}", path.display())
            }
        }
    }
}

impl std::error::Error for FormConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Toml(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnsupportedFormat(_) => None,
        }
    }
}

impl From<toml::de::Error> for FormConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

impl From<serde_json::Error> for FormConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Declarative description of a form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub reset_policy: ResetPolicy,
    /// Fields that start present and empty.
    pub fields: Vec<FieldName>,
    /// Initial values; the target of a baseline reset.
    pub initial: FormSnapshot,
    pub schema: ValidationSchema,
}

impl FormConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, FormConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn from_json_str(src: &str) -> Result<Self, FormConfigError> {
        Ok(serde_json::from_str(src)?)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormConfigError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str());
        if !matches!(ext, Some("toml" | "json")) {
            return Err(FormConfigError::UnsupportedFormat(path.to_path_buf()));
        }
        let src = fs::read_to_string(path).map_err(|source| FormConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = match ext {
            Some("json") => Self::from_json_str(&src)?,
            _ => Self::from_toml_str(&src)?,
        };
        tracing::debug!(
            path = %path.display(),
            fields = config.fields.len(),
            rules = config.schema.len(),
            "form config loaded"
        );
        Ok(config)
    }

    /// A builder pre-filled from this declaration. Attach a submission
    /// callback before building.
    #[must_use]
    pub fn into_builder(self) -> FormBuilder {
        let mut builder = Form::builder()
            .fields(self.fields)
            .schema(self.schema)
            .reset_policy(self.reset_policy);
        if !self.initial.is_empty() {
            builder = builder.initial(self.initial);
        }
        builder
    }
}
