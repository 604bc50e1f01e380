//! Typed student identifier.
//!
//! Identifiers look like `WDF1` followed by three digits. Internally the
//! numeric part (`1000..=1999`) is kept so ordering and "next identifier"
//! arithmetic never go through string comparison.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const STUDENT_ID_PREFIX: &str = "WDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentId(u16);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentIdError {
    #[error("student id must be in format WDF1XXX (e.g., WDF1000 to WDF1999)")]
    InvalidFormat,
}

impl StudentId {
    /// Lowest numeric part accepted by the format.
    pub const MIN_NUMBER: u16 = 1000;
    /// Highest numeric part the allocator may hand out.
    pub const MAX_NUMBER: u16 = 1999;
    /// First identifier assigned in an empty roster.
    pub const FIRST: StudentId = StudentId(1001);

    pub fn from_number(number: u16) -> Result<Self, StudentIdError> {
        if (Self::MIN_NUMBER..=Self::MAX_NUMBER).contains(&number) {
            Ok(Self(number))
        } else {
            Err(StudentIdError::InvalidFormat)
        }
    }

    pub fn number(&self) -> u16 {
        self.0
    }

    /// The following identifier, or `None` once the sequence is exhausted.
    pub fn next(&self) -> Option<StudentId> {
        if self.0 >= Self::MAX_NUMBER {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", STUDENT_ID_PREFIX, self.0)
    }
}

impl FromStr for StudentId {
    type Err = StudentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(STUDENT_ID_PREFIX)
            .ok_or(StudentIdError::InvalidFormat)?;
        if digits.len() != 4 || !digits.starts_with('1') || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(StudentIdError::InvalidFormat);
        }
        let number = digits
            .parse::<u16>()
            .map_err(|_| StudentIdError::InvalidFormat)?;
        Self::from_number(number)
    }
}

impl From<StudentId> for String {
    fn from(id: StudentId) -> Self {
        id.to_string()
    }
}

impl Serialize for StudentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StudentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_round_trip() {
        let id: StudentId = "WDF1042".parse().unwrap();
        assert_eq!(id.number(), 1042);
        assert_eq!(id.to_string(), "WDF1042");
    }

    #[test]
    fn rejects_malformed_values() {
        for raw in ["", "WDF", "WDF2001", "WDF100", "WDF10000", "wdf1001", "ABC1001", "WDF1O01"] {
            assert_eq!(
                raw.parse::<StudentId>(),
                Err(StudentIdError::InvalidFormat),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn next_stops_at_the_end_of_the_sequence() {
        assert_eq!(
            StudentId::FIRST.next().map(|id| id.to_string()),
            Some("WDF1002".to_string())
        );
        let last = StudentId::from_number(1998).unwrap().next().unwrap();
        assert_eq!(last.to_string(), "WDF1999");
        assert!(last.next().is_none());
    }

    #[test]
    fn ordering_follows_the_numeric_part() {
        let a: StudentId = "WDF1009".parse().unwrap();
        let b: StudentId = "WDF1010".parse().unwrap();
        assert!(a < b);
    }
}
