//! Phone number normalization to E.164 (`+` followed by digits only).

use crate::error::PhoneError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fewer digits than this cannot form a dialable number in any region.
pub const MIN_DIGITS: usize = 7;

/// Region whose dialing rules apply to numbers written without a country code
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    /// Israel: country code 972, trunk prefix 0
    #[default]
    Il,
    /// No local rules; digits are assumed to already carry a country code
    Other,
}

impl Region {
    pub fn calling_code(&self) -> Option<&'static str> {
        match self {
            Region::Il => Some("972"),
            Region::Other => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Il => write!(f, "IL"),
            Region::Other => write!(f, "OTHER"),
        }
    }
}

impl FromStr for Region {
    type Err = crate::RebrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IL" => Ok(Region::Il),
            "OTHER" => Ok(Region::Other),
            other => Err(crate::RebrandError::Configuration(format!("Unknown phone region '{}'", other))),
        }
    }
}

/// Normalize a free-form phone number to E.164.
///
/// Every non-digit is stripped first. For a region with a calling code:
/// digits already starting with the code get a bare `+`, a leading trunk `0`
/// is replaced by `+<code>`, anything else is prefixed with `+<code>`.
/// Without regional rules the digits are only prefixed with `+`.
pub fn normalize_to_e164(raw: &str, region: Region) -> Result<String, PhoneError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(PhoneError::Empty);
    }
    if digits.len() < MIN_DIGITS {
        return Err(PhoneError::TooShort { digits: digits.len() });
    }

    let normalized = match region.calling_code() {
        Some(code) if digits.starts_with(code) => format!("+{}", digits),
        Some(code) => match digits.strip_prefix('0') {
            Some(national) => format!("+{}{}", code, national),
            None => format!("+{}{}", code, digits),
        },
        None => format!("+{}", digits),
    };

    Ok(normalized)
}

/// E.164 number without the leading `+`, as used in `wa.me` links
pub fn bare_digits(e164: &str) -> &str {
    e164.trim_start_matches('+')
}
