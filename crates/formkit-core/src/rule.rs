#![forbid(unsafe_code)]

//! Validation predicates identified by a fixed tag.
//!
//! The set of rules is closed: new predicates are added as new [`RuleId`]
//! variants, never supplied as patterns at runtime. A tag that does not name
//! a known predicate parses to [`RuleId::Unknown`], which fails every value.
//!
//! | Tag | Passes when |
//! |-----|-------------|
//! | `required` | at least one character outside the ECMAScript `\s` set |
//! | `email` | `^\w[^ ]*@\w+([.-]?\w+)*(\.\w{2,3})+$` (ASCII `\w`) |
//! | `postal-code` | US ZIP: `^\d{5}(-\d{4})?$` (ASCII digits) |
//!
//! Every rule rejects the empty string, including rules whose pattern is not
//! itself an emptiness check.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_][^ ]*@[A-Za-z0-9_]+(?:[.-]?[A-Za-z0-9_]+)*(?:\.[A-Za-z0-9_]{2,3})+$",
    )
    .expect("email pattern is valid")
});

/// Any character that is not ECMAScript whitespace. U+0085 is content here,
/// U+FEFF is whitespace.
static NON_BLANK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[^\t\n\x0B\x0C\r \x{00A0}\x{1680}\x{2000}-\x{200A}",
        r"\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]",
    ))
    .expect("non-blank pattern is valid")
});

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(?:-[0-9]{4})?$").expect("postal pattern is valid"));

/// Tag naming a validation predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "form-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum RuleId {
    /// Non-blank value.
    Required,
    /// Email address.
    Email,
    /// US ZIP or ZIP+4 code.
    PostalCode,
    /// A tag with no predicate behind it. Always fails.
    Unknown(String),
}

impl RuleId {
    /// Every known rule, in declaration order.
    pub const KNOWN: [RuleId; 3] = [RuleId::Required, RuleId::Email, RuleId::PostalCode];

    /// Parse a tag. Unrecognized tags become [`RuleId::Unknown`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "required" => Self::Required,
            "email" => Self::Email,
            "postal-code" => Self::PostalCode,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// The tag this rule is written as in a schema.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::PostalCode => "postal-code",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether a predicate backs this tag.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Apply the predicate to `value`.
    #[must_use]
    pub fn check(&self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self {
            Self::Required => NON_BLANK.is_match(value),
            Self::Email => EMAIL.is_match(value),
            Self::PostalCode => POSTAL_CODE.is_match(value),
            Self::Unknown(_) => false,
        }
    }
}

impl FromStr for RuleId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for RuleId {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<String> for RuleId {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<RuleId> for String {
    fn from(rule: RuleId) -> Self {
        match rule {
            RuleId::Unknown(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tags() {
        assert_eq!(RuleId::parse("required"), RuleId::Required);
        assert_eq!(RuleId::parse("email"), RuleId::Email);
        assert_eq!(RuleId::parse("postal-code"), RuleId::PostalCode);
        for rule in RuleId::KNOWN {
            assert_eq!(RuleId::parse(rule.as_str()), rule);
        }
    }

    #[test]
    fn parse_unknown_tag_fails_closed() {
        let rule: RuleId = "phone".parse().unwrap();
        assert_eq!(rule, RuleId::Unknown("phone".into()));
        assert!(!rule.is_known());
        assert!(!rule.check("555-1234"));
        assert_eq!(rule.to_string(), "phone");
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!(!RuleId::parse("EMAIL").is_known());
    }

    #[test]
    fn required() {
        assert!(RuleId::Required.check("Alice"));
        assert!(RuleId::Required.check("  x "));
        assert!(!RuleId::Required.check(""));
        assert!(!RuleId::Required.check("   "));
        assert!(!RuleId::Required.check("\t\n"));
        assert!(!RuleId::Required.check("\u{a0}\u{3000}\u{2009}"));
    }

    #[test]
    fn required_uses_ecmascript_whitespace() {
        assert!(RuleId::Required.check("\u{85}"));
        assert!(!RuleId::Required.check("\u{feff}"));
        assert!(!RuleId::Required.check("\u{feff} \u{b}\u{c}"));
    }

    #[test]
    fn email_accepts() {
        for ok in [
            "a@b.com",
            "first.last@example.org",
            "user+tag@sub-domain.example.co.uk",
            "x_y@mail.io",
        ] {
            assert!(RuleId::Email.check(ok), "{ok} should pass");
        }
    }

    #[test]
    fn email_rejects() {
        for bad in [
            "",
            "not-an-email",
            "@b.com",
            "a@b",
            "a@b.c",
            "a b@c.com",
            "a@b.info",
            ".a@b.com",
        ] {
            assert!(!RuleId::Email.check(bad), "{bad} should fail");
        }
    }

    #[test]
    fn email_word_class_is_ascii() {
        assert!(!RuleId::Email.check("é@b.com"));
    }

    #[test]
    fn postal_code() {
        assert!(RuleId::PostalCode.check("12345"));
        assert!(RuleId::PostalCode.check("12345-6789"));
        assert!(!RuleId::PostalCode.check("1234"));
        assert!(!RuleId::PostalCode.check("123456"));
        assert!(!RuleId::PostalCode.check("12345-678"));
        assert!(!RuleId::PostalCode.check("12345 6789"));
        assert!(!RuleId::PostalCode.check("١٢٣٤٥"));
        assert!(!RuleId::PostalCode.check(""));
    }

    #[test]
    fn string_conversions() {
        assert_eq!(String::from(RuleId::PostalCode), "postal-code");
        assert_eq!(String::from(RuleId::Unknown("zip".into())), "zip");
        assert_eq!(RuleId::from("email"), RuleId::Email);
    }
}
