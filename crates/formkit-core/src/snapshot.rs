#![forbid(unsafe_code)]

//! Field values of one form instance at one instant.
//!
//! A [`FormSnapshot`] maps field names to string values. The empty string
//! means "unset"; a field that was never written is simply absent. Keys are
//! never removed once written, which lets validation tell an untouched form
//! (no keys) apart from one that was touched and cleared (keys with empty
//! values).

use std::collections::BTreeMap;
use std::fmt;

/// Name of a field, unique within one form.
pub type FieldName = String;

/// Value of a field. Empty means unset.
pub type FieldValue = String;

/// Mapping from field names to their current values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "form-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FormSnapshot {
    fields: BTreeMap<FieldName, FieldValue>,
}

impl FormSnapshot {
    /// An empty snapshot: no field has been touched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot with every named field present and empty.
    #[must_use]
    pub fn blank<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        names
            .into_iter()
            .map(|name| (name.into(), FieldValue::new()))
            .collect()
    }

    /// Value of `name`, or `None` if it was never written.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Value of `name`, treating an absent field as empty.
    #[must_use]
    pub fn value_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Write `value` under `name`, adding the key if needed.
    pub fn insert(&mut self, name: impl Into<FieldName>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<FieldName>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set every present value to the empty string, keeping the key set.
    pub fn clear_values(&mut self) {
        for value in self.fields.values_mut() {
            value.clear();
        }
    }

    /// Set every present value back to its value in `baseline`, or to the
    /// empty string if `baseline` lacks the key. Keys missing here but
    /// present in `baseline` are added. No key is removed.
    pub fn revert_to(&mut self, baseline: &FormSnapshot) {
        self.clear_values();
        self.extend(baseline.iter());
    }

    /// Whether `name` has ever been written, even if its value is empty.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has ever been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<FieldName>, V: Into<FieldValue>> FromIterator<(K, V)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<FieldName>, V: Into<FieldValue>> Extend<(K, V)> for FormSnapshot {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl fmt::Display for FormSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value:?}")?;
        }
        f.write_str("}")
    }
}
