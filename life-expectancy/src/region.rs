//! Eurostat geographic codes.

use anyhow::Error;
use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The region cleaned when none is requested: Portugal.
pub const DEFAULT_REGION: &str = "PT";

/// A Eurostat geographic code.
///
/// This is a country code (`PT`), a NUTS region nested within a country (`PT11`, `PT170`) or an
/// aggregate (`EU27_2020`). Codes are always stored in upper case, which is how they appear in
/// Eurostat exports.
#[derive(
    Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Into, Deserialize, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    /// The code as it appears in the `geo` column of a dataset.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(DEFAULT_REGION.into())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::msg("region code cannot be empty"));
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::msg(format!("invalid region code {s:?}")));
        }
        Ok(Self(s.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for Region {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
