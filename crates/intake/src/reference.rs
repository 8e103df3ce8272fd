//! Reference codes handed back to the requester.
//!
//! A reference is `ESUP-` followed by a five digit number drawn uniformly from
//! `10000..=99999`. Codes are neither persisted nor checked for collisions;
//! deduplication belongs to whatever system receives the payload.
use std::fmt;

use serde::{Deserialize, Serialize};

pub const REFERENCE_PREFIX: &str = "ESUP-";
pub const REFERENCE_MIN: u32 = 10_000;
pub const REFERENCE_MAX: u32 = 99_999;

/// A generated reference code such as `ESUP-48213`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reference(u32);

impl Reference {
    /// `None` when `number` is outside `10000..=99999`.
    pub fn from_number(number: u32) -> Option<Self> {
        (REFERENCE_MIN..=REFERENCE_MAX)
            .contains(&number)
            .then_some(Self(number))
    }

    /// Parses `ESUP-ddddd`.
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix(REFERENCE_PREFIX)?;
        if digits.len() != 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().and_then(Self::from_number)
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REFERENCE_PREFIX}{}", self.0)
    }
}

impl TryFrom<String> for Reference {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Reference::parse(&value).ok_or_else(|| format!("invalid reference code {value:?}"))
    }
}

impl From<Reference> for String {
    fn from(value: Reference) -> Self {
        value.to_string()
    }
}

/// Draws a reference from the thread-local generator.
///
/// Not cryptographically secure and not unique across submissions.
pub fn generate_reference() -> Reference {
    Reference(fastrand::u32(REFERENCE_MIN..=REFERENCE_MAX))
}

/// Draws a reference from a caller-owned generator, for reproducible runs.
pub fn generate_reference_with(rng: &mut fastrand::Rng) -> Reference {
    Reference(rng.u32(REFERENCE_MIN..=REFERENCE_MAX))
}
