use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MAX_GRADE: u8 = 12;

/// A school grade level. Level `0` is kindergarten.
///
/// Displays (and serializes) as the canonical label used in prompts and UI,
/// e.g. `"Kindergarten"`, `"3rd Grade"`, `"11th Grade"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u8);

impl Grade {
    pub const KINDERGARTEN: Grade = Grade(0);

    pub fn new(level: u8) -> Option<Self> {
        (level <= MAX_GRADE).then_some(Self(level))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn is_kindergarten(self) -> bool {
        self.0 == 0
    }
}

fn ordinal_suffix(n: u8) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_kindergarten() {
            f.write_str("Kindergarten")
        } else {
            write!(f, "{}{} Grade", self.0, ordinal_suffix(self.0))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized grade: {0}")]
pub struct GradeParseError(String);

impl FromStr for Grade {
    type Err = GradeParseError;

    /// Accepts `"Kindergarten"`, `"K"`, `"3rd Grade"`, `"grade 3"`, `"3rd"` and `"3"`.
    /// Kindergarten is only reachable by name, never as `0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GradeParseError(s.to_string());
        let lower = s.trim().to_ascii_lowercase();

        if matches!(lower.as_str(), "k" | "kinder" | "kindergarten") {
            return Ok(Self::KINDERGARTEN);
        }

        let core = lower
            .strip_suffix("grade")
            .or_else(|| lower.strip_prefix("grade"))
            .unwrap_or(&lower)
            .trim();
        let digits = core.trim_end_matches(|c: char| c.is_ascii_alphabetic());

        let level: u8 = digits.parse().map_err(|_| err())?;
        if level == 0 {
            return Err(err());
        }
        if digits.len() != core.len() && !core.ends_with(ordinal_suffix(level)) {
            return Err(err());
        }
        Self::new(level).ok_or_else(err)
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
