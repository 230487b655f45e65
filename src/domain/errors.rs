//! Domain validation errors.

use std::fmt;

/// Errors raised when constructing an email address value object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSyntaxError {
    /// The address does not match the strict email grammar.
    InvalidEmail(String),
}

impl fmt::Display for EmailSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for EmailSyntaxError {}
