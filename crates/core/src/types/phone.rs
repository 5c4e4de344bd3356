//! Nigerian mobile phone numbers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than digits, spaces, dashes or a leading +.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// The number has the wrong number of digits for its prefix.
    #[error("phone number must be 11 digits (0XXXXXXXXXX) or +234 followed by 10 digits")]
    WrongLength,
}

/// A phone number normalized to E.164 form (`+234XXXXXXXXXX`).
///
/// Accepts the local form `0803 123 4567` and the international forms
/// `+2348031234567` / `2348031234567`. Spaces and dashes are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const COUNTRY_CODE: &'static str = "234";

    /// Parse and normalize a phone number.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] if the input is empty, has stray characters,
    /// or does not have the expected number of digits.
    pub fn parse(input: &str) -> Result<Self, PhoneError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let (plus, rest) = trimmed
            .strip_prefix('+')
            .map_or((false, trimmed), |rest| (true, rest));

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        let subscriber = if let Some(national) = digits.strip_prefix(Self::COUNTRY_CODE) {
            national
        } else if plus {
            return Err(PhoneError::WrongLength);
        } else if let Some(local) = digits.strip_prefix('0') {
            local
        } else {
            return Err(PhoneError::WrongLength);
        };

        if subscriber.len() != 10 {
            return Err(PhoneError::WrongLength);
        }

        Ok(Self(format!("+{}{subscriber}", Self::COUNTRY_CODE)))
    }

    /// Returns the E.164 form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_form() {
        let phone = PhoneNumber::parse("0803 123 4567").unwrap();
        assert_eq!(phone.as_str(), "+2348031234567");
    }

    #[test]
    fn test_parse_international_forms() {
        assert_eq!(
            PhoneNumber::parse("+234-803-123-4567").unwrap().as_str(),
            "+2348031234567"
        );
        assert_eq!(
            PhoneNumber::parse("2348031234567").unwrap().as_str(),
            "+2348031234567"
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(PhoneNumber::parse(""), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            PhoneNumber::parse("0803(123)4567"),
            Err(PhoneError::InvalidCharacter('('))
        );
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(PhoneNumber::parse("080312345"), Err(PhoneError::WrongLength));
        assert_eq!(
            PhoneNumber::parse("+448031234567"),
            Err(PhoneError::WrongLength)
        );
        assert_eq!(PhoneNumber::parse("8031234567"), Err(PhoneError::WrongLength));
    }

    #[test]
    fn test_serde_normalizes_on_read() {
        let phone: PhoneNumber = serde_json::from_str("\"08031234567\"").unwrap();
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"+2348031234567\"");
    }
}
