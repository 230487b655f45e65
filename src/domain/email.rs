//! EmailAddress value object and the strict email grammar.

use super::errors::EmailSyntaxError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Local part from `[A-Za-z0-9._%+-']`, a dotted domain, and an alphabetic TLD
/// of at least two letters.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-']+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("Failed to compile email regex")
});

/// Check an address against the strict email grammar.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// A type-safe wrapper for email addresses that match the strict grammar.
///
/// # Example
///
/// ```
/// use lead_finder::domain::EmailAddress;
///
/// let email = EmailAddress::new("jane.smith@example.com").unwrap();
/// assert_eq!(email.domain(), "example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `EmailSyntaxError::InvalidEmail` if the address fails the grammar.
    pub fn new(email: impl Into<String>) -> Result<Self, EmailSyntaxError> {
        let email = email.into();

        if !is_valid_email(&email) {
            return Err(EmailSyntaxError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the domain part (after '@').
    pub fn domain(&self) -> &str {
        // The grammar admits exactly one '@'
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        let email = EmailAddress::new("user@example.com").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_validates_format() {
        assert!(EmailAddress::new("not-an-email").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@").is_err());
        assert!(EmailAddress::new("user@domain").is_err());
        assert!(EmailAddress::new("user@@example.com").is_err());
        assert!(EmailAddress::new("user@example.c").is_err());
        assert!(EmailAddress::new("user@example.c0m").is_err());
        assert!(EmailAddress::new("first last@example.com").is_err());
        assert!(EmailAddress::new("valid@example.com").is_ok());
        assert!(EmailAddress::new("o'brien@example.co.uk").is_ok());
        assert!(EmailAddress::new("user.name+tag%x@example-mail.io").is_ok());
    }

    #[test]
    fn test_email_domain() {
        let email = EmailAddress::new("user@example.com").unwrap();
        assert_eq!(email.domain(), "example.com");
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_serialization() {
        let email = EmailAddress::new("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");
    }

    #[test]
    fn test_email_deserialization_invalid_fails() {
        let result: Result<EmailAddress, _> = serde_json::from_str("\"invalid\"");
        assert!(result.is_err());
    }
}
