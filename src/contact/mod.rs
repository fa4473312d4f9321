//! Contact form validation.
//!
//! Fields are validated one at a time on blur and all together before
//! submission. Editing a field clears its error until the next validation.
//! Sending the message is left to the host.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// A contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Sender name.
    Name,
    /// Reply address.
    Email,
    /// Subject line.
    Subject,
    /// Message body.
    Message,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Form control name.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    /// Field for a form control name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field value was rejected. The display text is shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Name shorter than two characters.
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    /// Email not shaped like `name@host.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,
    /// Subject shorter than three characters.
    #[error("Subject must be at least 3 characters")]
    SubjectTooShort,
    /// Message shorter than ten characters.
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

fn min_trimmed(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Check a single field value.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    let ok = match field {
        Field::Name => min_trimmed(value, 2),
        Field::Email => EMAIL.as_ref().is_some_and(|re| re.is_match(value)),
        Field::Subject => min_trimmed(value, 3),
        Field::Message => min_trimmed(value, 10),
    };
    if ok {
        return Ok(());
    }
    Err(match field {
        Field::Name => FieldError::NameTooShort,
        Field::Email => FieldError::InvalidEmail,
        Field::Subject => FieldError::SubjectTooShort,
        Field::Message => FieldError::MessageTooShort,
    })
}

/// Form values plus the errors currently displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, FieldError>,
}

impl ContactForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`, empty if never set.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Error displayed under `field`, if any.
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Every displayed error, in field order.
    pub fn errors(&self) -> &BTreeMap<Field, FieldError> {
        &self.errors
    }

    /// User edited a field. Clears that field's error.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    /// Field lost focus. Shows its error, if any, and leaves a valid field's
    /// state untouched.
    pub fn blur(&mut self, field: Field) {
        if let Err(err) = validate_field(field, self.value(field)) {
            self.errors.insert(field, err);
        }
    }

    /// Validate every field, replacing the displayed errors. Returns `true`
    /// when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = Field::ALL
            .into_iter()
            .filter_map(|f| validate_field(f, self.value(f)).err().map(|e| (f, e)))
            .collect();
        self.errors.is_empty()
    }

    /// Clear every value and error.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_counts_trimmed_characters() {
        assert_eq!(validate_field(Field::Name, " a "), Err(FieldError::NameTooShort));
        assert_eq!(validate_field(Field::Name, "Al"), Ok(()));
        assert_eq!(validate_field(Field::Name, "Zoë"), Ok(()));
    }

    #[test]
    fn email_shape() {
        assert_eq!(validate_field(Field::Email, "dev@example.com"), Ok(()));
        for bad in ["", "dev", "dev@example", "dev @example.com", "@example.com", "a@b@c.d"] {
            assert_eq!(
                validate_field(Field::Email, bad),
                Err(FieldError::InvalidEmail),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn subject_and_message_lengths() {
        assert!(validate_field(Field::Subject, "Hi").is_err());
        assert!(validate_field(Field::Subject, "Hey").is_ok());
        assert!(validate_field(Field::Message, "   too short   ").is_err());
        assert!(validate_field(Field::Message, "long enough").is_ok());
    }

    #[test]
    fn messages_match_site_copy() {
        assert_eq!(
            FieldError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            FieldError::MessageTooShort.to_string(),
            "Message must be at least 10 characters"
        );
    }

    #[test]
    fn blur_then_edit_clears_error() {
        let mut form = ContactForm::new();
        form.set(Field::Email, "nope");
        form.blur(Field::Email);
        assert_eq!(form.error(Field::Email), Some(FieldError::InvalidEmail));

        form.set(Field::Email, "still nope");
        assert_eq!(form.error(Field::Email), None);
    }

    #[test]
    fn validate_reports_every_failing_field() {
        let mut form = ContactForm::new();
        form.set(Field::Name, "Ada");
        assert!(!form.validate());
        assert_eq!(
            form.errors().keys().copied().collect::<Vec<_>>(),
            vec![Field::Email, Field::Subject, Field::Message]
        );

        form.set(Field::Email, "ada@example.com");
        form.set(Field::Subject, "Hello");
        form.set(Field::Message, "I liked the portfolio.");
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::parse(field.as_str()), Some(field));
        }
        assert_eq!(Field::parse("phone"), None);
    }
}
