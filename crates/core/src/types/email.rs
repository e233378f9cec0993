//! Email address type.
//!
//! Used for the login and registration forms. The backend is the authority
//! on whether an account exists; this type only rejects input that can
//! never be an address, so the form can complain before any request is
//! made.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty or only whitespace.
    #[error("email cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("email cannot contain spaces")]
    ContainsWhitespace,
    /// The input does not have exactly one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    AtSymbol,
    /// Either side of the @ is empty.
    #[error("email must have a name before and a domain after the @")]
    MissingPart,
}

/// An email address as typed by a user or returned by the backend.
///
/// Surrounding whitespace is trimmed on parse. Values deserialized from the
/// backend are trusted as-is.
///
/// ```
/// use bazaar_core::Email;
///
/// let email = Email::parse("  seller@example.com ").unwrap();
/// assert_eq!(email.as_str(), "seller@example.com");
/// assert_eq!(email.domain(), "example.com");
///
/// assert!(Email::parse("seller.example.com").is_err());
/// assert!(Email::parse("a@b@c").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 254
    /// characters, contains whitespace, or is not of the form
    /// `local@domain` with both parts non-empty.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::AtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::AtSymbol);
        }
        if local.is_empty() || domain.is_empty() {
            return Err(EmailError::MissingPart);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_input() {
        let email = Email::parse("\tbuyer@shop.test\n").unwrap();
        assert_eq!(email.as_str(), "buyer@shop.test");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_rejects_overlong_input() {
        let long = format!("{}@shop.test", "x".repeat(250));
        assert_eq!(
            Email::parse(&long),
            Err(EmailError::TooLong {
                max: Email::MAX_LENGTH
            })
        );
    }

    #[test]
    fn test_parse_rejects_inner_whitespace() {
        assert_eq!(
            Email::parse("first last@shop.test"),
            Err(EmailError::ContainsWhitespace)
        );
    }

    #[test]
    fn test_parse_requires_single_at() {
        assert_eq!(Email::parse("shop.test"), Err(EmailError::AtSymbol));
        assert_eq!(Email::parse("a@b@shop.test"), Err(EmailError::AtSymbol));
    }

    #[test]
    fn test_parse_requires_both_parts() {
        assert_eq!(Email::parse("@shop.test"), Err(EmailError::MissingPart));
        assert_eq!(Email::parse("buyer@"), Err(EmailError::MissingPart));
    }

    #[test]
    fn test_domain() {
        let email = Email::parse("buyer@mail.shop.test").unwrap();
        assert_eq!(email.domain(), "mail.shop.test");
    }

    #[test]
    fn test_deserialize_trusts_backend_value() {
        let email: Email = serde_json::from_str("\"Buyer@Shop.Test\"").unwrap();
        assert_eq!(email.to_string(), "Buyer@Shop.Test");
    }
}
