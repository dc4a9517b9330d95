//! Applicant and account e-mail address.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum accepted length of an e-mail address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// Input was blank.
    #[error("email must not be empty")]
    Empty,
    /// Input exceeded [`EMAIL_MAX`] characters.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Upper bound.
        max: usize,
    },
    /// Input did not look like `local@domain`.
    #[error("email must look like name@example.com")]
    Malformed,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// E-mail address used to correlate applications with their applicant and
/// as the uniqueness key for user accounts.
///
/// Comparison is exact and case-sensitive; no normalisation is applied.
///
/// # Examples
/// ```
/// use microloan_backend::domain::Email;
///
/// assert!(Email::new("ada@example.com").is_ok());
/// assert!(Email::new("ada").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an address.
    ///
    /// # Errors
    /// Returns [`EmailValidationError`] when the input is blank, too long, or
    /// not of the form `local@domain.tld`.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmailValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if raw.chars().count() > EMAIL_MAX {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&raw) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(raw))
    }

    /// Admit an address read back from the store without re-validating it.
    pub(crate) fn from_store(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}
