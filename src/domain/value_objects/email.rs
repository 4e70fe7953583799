//! Email value object

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{DomainError, DomainResult};

/// Maximum stored length, matching the `email` column width.
pub const EMAIL_MAX_LEN: usize = 150;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// A trimmed, lowercased email address of the form `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email {
    value: String,
}

impl Email {
    pub fn new(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Email is required"));
        }
        if trimmed.chars().count() > EMAIL_MAX_LEN {
            return Err(DomainError::validation(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LEN
            )));
        }
        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(DomainError::validation("Email format is invalid"));
        }

        Ok(Self {
            value: trimmed.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<&str> for Email {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
