use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("email pattern compiles")
});

/// A single declarative check on a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// At least this many characters; whitespace counts.
    MinChars(usize),
    MaxChars(usize),
    Email,
    /// Parses as a finite number greater than zero.
    PositiveNumber,
    /// One of a closed set of option values.
    OneOf(&'static [&'static str]),
}

impl Constraint {
    pub fn holds(&self, value: &str) -> bool {
        match *self {
            Constraint::MinChars(min) => value.chars().count() >= min,
            Constraint::MaxChars(max) => value.chars().count() <= max,
            Constraint::Email => is_email(value),
            Constraint::PositiveNumber => value
                .trim()
                .parse::<f64>()
                .map(|number| number.is_finite() && number > 0.0)
                .unwrap_or(false),
            Constraint::OneOf(options) => options.contains(&value),
        }
    }
}

pub fn is_email(value: &str) -> bool {
    !value.contains("..") && EMAIL.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub constraint: Constraint,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn new(constraint: Constraint, message: &'static str) -> Self {
        Self {
            constraint,
            message,
        }
    }
}

/// A named field and the rules its value must satisfy, checked in order.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rules: &'static [FieldRule],
}

impl FieldSpec {
    /// Message of the first rule the value breaks.
    pub fn first_violation(&self, value: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| !rule.constraint.holds(value))
            .map(|rule| rule.message)
    }
}

/// Inline messages keyed by field name, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, spec: &FieldSpec, value: &str) {
        if let Some(message) = spec.first_violation(value) {
            self.reject(spec.name, message);
        }
    }

    /// Record a message unless the field already has one.
    pub fn reject(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Shared bio rule for both onboarding variants.
pub const BIO: FieldSpec = FieldSpec {
    name: "bio",
    rules: &[
        FieldRule::new(Constraint::MinChars(10), "Bio must be at least 10 characters"),
        FieldRule::new(Constraint::MaxChars(300), "Bio must be less than 300 characters"),
    ],
};

pub const EMAIL_FIELD: FieldSpec = FieldSpec {
    name: "email",
    rules: &[FieldRule::new(
        Constraint::Email,
        "Please enter a valid email address",
    )],
};

pub const PASSWORD: FieldSpec = FieldSpec {
    name: "password",
    rules: &[FieldRule::new(
        Constraint::MinChars(8),
        "Password must be at least 8 characters",
    )],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn bio_errors(bio: &str) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check(&BIO, bio);
        errors
    }

    #[test]
    fn bio_is_accepted_iff_length_is_between_10_and_300() {
        for length in [0, 1, 5, 9, 301, 500] {
            let errors = bio_errors(&"a".repeat(length));
            assert!(errors.contains("bio"), "length {length} should be rejected");
        }
        for length in [10, 11, 150, 299, 300] {
            assert!(
                bio_errors(&"a".repeat(length)).is_empty(),
                "length {length} should be accepted"
            );
        }
    }

    #[test]
    fn bio_length_counts_characters_not_bytes() {
        assert!(bio_errors(&"é".repeat(300)).is_empty());
        assert_eq!(
            bio_errors("short").get("bio"),
            Some("Bio must be at least 10 characters")
        );
        assert_eq!(
            bio_errors(&"x".repeat(301)).get("bio"),
            Some("Bio must be less than 300 characters")
        );
    }

    #[test]
    fn email_syntax() {
        for valid in ["ada@example.com", "first.last+tag@mail.example.co", "o'neil@ex-ample.io"] {
            assert!(is_email(valid), "{valid}");
        }
        for invalid in ["", "ada", "ada@", "@example.com", "ada@example", "a b@example.com", "ada..b@example.com", "ada@-example.com"] {
            assert!(!is_email(invalid), "{invalid}");
        }
    }

    #[test]
    fn positive_number_and_one_of() {
        assert!(Constraint::PositiveNumber.holds("50"));
        assert!(Constraint::PositiveNumber.holds(" 49.5 "));
        assert!(!Constraint::PositiveNumber.holds(""));
        assert!(!Constraint::PositiveNumber.holds("0"));
        assert!(!Constraint::PositiveNumber.holds("-3"));
        assert!(!Constraint::PositiveNumber.holds("fifty"));
        assert!(!Constraint::PositiveNumber.holds("inf"));

        let options = Constraint::OneOf(&["solo", "small"]);
        assert!(options.holds("solo"));
        assert!(!options.holds("Solo"));
        assert!(!options.holds(""));
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.reject("email", "first");
        errors.reject("email", "second");
        assert_eq!(errors.get("email"), Some("first"));
        assert_eq!(errors.len(), 1);
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
