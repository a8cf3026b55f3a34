use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PedigreeError, Result};

/// Biological sex of an individual, also used as the parental role when
/// linking a child to a parent (`Female` = mother, `Male` = father).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Single-letter tag used in pedigree files.
    pub fn tag(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Sex {
    type Err = PedigreeError;

    /// Accepts `M`/`F` and `male`/`female`, ignoring case and surrounding
    /// whitespace. Anything else is rejected rather than ignored.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("m") || trimmed.eq_ignore_ascii_case("male") {
            Ok(Sex::Male)
        } else if trimmed.eq_ignore_ascii_case("f") || trimmed.eq_ignore_ascii_case("female") {
            Ok(Sex::Female)
        } else {
            Err(PedigreeError::InvalidSex(trimmed.to_string()))
        }
    }
}

/// Parse an affection status field.
///
/// Accepted values (case-insensitive): `1`/`0`, `true`/`false`, `yes`/`no`,
/// `y`/`n`, `affected`/`unaffected`, `a`/`u`.
pub fn parse_affected(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "affected" | "a" => Ok(true),
        "0" | "false" | "no" | "n" | "unaffected" | "u" => Ok(false),
        _ => Err(PedigreeError::InvalidAffection(s.trim().to_string())),
    }
}
