//! EAN-13 code type.
//!
//! An EAN code is the natural key for catalog entries: exactly 13 ASCII
//! decimal digits. Validation happens at parse time; the bulk-import path
//! deliberately accepts raw strings without this check (matching the
//! lenient behaviour of the upload flow), while the single-lookup path
//! parses before dispatching any request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated 13-digit EAN code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EanCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EanCodeError {
    #[error("EAN code must be exactly 13 digits, got {0} characters")]
    WrongLength(usize),
    #[error("EAN code must contain only decimal digits")]
    NonDigit,
}

impl EanCode {
    /// Parses a 13-digit EAN code, rejecting anything else.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`EanCodeError::WrongLength`] if the trimmed input is not 13
    /// characters, or [`EanCodeError::NonDigit`] if any character is not an
    /// ASCII decimal digit.
    pub fn parse(raw: &str) -> Result<Self, EanCodeError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() != 13 {
            return Err(EanCodeError::WrongLength(trimmed.chars().count()));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(EanCodeError::NonDigit);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EanCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EanCode> for String {
    fn from(code: EanCode) -> Self {
        code.0
    }
}
