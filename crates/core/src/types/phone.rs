//! Russian national-format phone number type.
//!
//! The checkout form accepts numbers with optional separators, e.g.
//! `+7 (912) 345-67-89`. Parsing strips the separator characters and
//! stores the normalized form `+79123456789`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Characters treated as visual separators and stripped before
/// validation.
const SEPARATORS: &[char] = &[' ', '(', ')', '-'];

/// Number of digits after the `+7` country prefix.
const NATIONAL_DIGITS: usize = 10;

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The number does not start with the +7 country prefix.
    #[error("phone number must start with +7")]
    MissingCountryPrefix,
    /// Wrong number of digits after the prefix.
    #[error("phone number must have {expected} digits after +7, got {got}")]
    WrongDigitCount {
        /// Expected digit count.
        expected: usize,
        /// Actual digit count.
        got: usize,
    },
    /// A character that is neither a digit nor a separator.
    #[error("phone number contains an invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// A normalized Russian phone number (`+7` followed by ten digits).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from user input.
    ///
    /// Separator characters (spaces, parentheses, dashes) are stripped
    /// before validation; the stored value is always `+7XXXXXXXXXX`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, lacks the `+7` prefix,
    /// has the wrong number of digits, or contains a character that is
    /// neither a digit nor a separator.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut compact = String::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            if SEPARATORS.contains(&c) {
                continue;
            }
            if c.is_ascii_digit() || c == '+' {
                compact.push(c);
            } else {
                return Err(PhoneError::InvalidCharacter(c));
            }
        }

        let digits = compact
            .strip_prefix("+7")
            .ok_or(PhoneError::MissingCountryPrefix)?;

        if digits.contains('+') {
            return Err(PhoneError::InvalidCharacter('+'));
        }

        if digits.len() != NATIONAL_DIGITS {
            return Err(PhoneError::WrongDigitCount {
                expected: NATIONAL_DIGITS,
                got: digits.len(),
            });
        }

        Ok(Self(format!("+7{digits}")))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
