#![forbid(unsafe_code)]

//! Declarative field-to-rule mapping.

use std::collections::BTreeMap;

use crate::rule::RuleId;
use crate::snapshot::FieldName;

/// Which rule each constrained field must satisfy.
///
/// A schema is declared once per form and treated as immutable while in use;
/// re-parameterizing validation means installing a whole new schema.
///
/// ```
/// use formkit_core::{RuleId, ValidationSchema};
///
/// let schema = ValidationSchema::new()
///     .rule("email", RuleId::Email)
///     .rule("zip", "postal-code");
/// assert_eq!(schema.rule_for("zip"), Some(&RuleId::PostalCode));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "form-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ValidationSchema {
    rules: BTreeMap<FieldName, RuleId>,
}

impl ValidationSchema {
    /// A schema with no constraints. Every snapshot is valid under it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn rule(mut self, field: impl Into<FieldName>, rule: impl Into<RuleId>) -> Self {
        self.insert(field, rule);
        self
    }

    /// Constrain `field` by `rule`, replacing any earlier rule for it.
    pub fn insert(&mut self, field: impl Into<FieldName>, rule: impl Into<RuleId>) {
        self.rules.insert(field.into(), rule.into());
    }

    /// Rule for `field`, if constrained.
    #[must_use]
    pub fn rule_for(&self, field: &str) -> Option<&RuleId> {
        self.rules.get(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `(field, rule)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleId)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fields whose rule tag names no predicate.
    pub fn unknown_rules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter(|(_, rule)| !rule.is_known())
            .map(|(field, rule)| (field, rule.as_str()))
    }
}

impl<K: Into<FieldName>, R: Into<RuleId>> FromIterator<(K, R)> for ValidationSchema {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(k, r)| (k.into(), r.into()))
                .collect(),
        }
    }
}
