//! Credit rating scale
//!
//! Agency notation from `AAA` down to `BB-`. Notches collapse into tiers,
//! which is the granularity pricing decisions are made at.

use crate::errors::InstrumentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Long-term credit rating in agency notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA+")]
    AaPlus,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AA-")]
    AaMinus,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "BBB+")]
    BbbPlus,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "BBB-")]
    BbbMinus,
    #[serde(rename = "BB+")]
    BbPlus,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "BB-")]
    BbMinus,
}

/// Rating bucket without notches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RatingTier {
    Aaa,
    Aa,
    A,
    Bbb,
    Bb,
}

impl Rating {
    /// Every rating, best first
    pub const ALL: [Rating; 13] = [
        Rating::Aaa,
        Rating::AaPlus,
        Rating::Aa,
        Rating::AaMinus,
        Rating::APlus,
        Rating::A,
        Rating::AMinus,
        Rating::BbbPlus,
        Rating::Bbb,
        Rating::BbbMinus,
        Rating::BbPlus,
        Rating::Bb,
        Rating::BbMinus,
    ];

    /// Agency notation
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Aaa => "AAA",
            Rating::AaPlus => "AA+",
            Rating::Aa => "AA",
            Rating::AaMinus => "AA-",
            Rating::APlus => "A+",
            Rating::A => "A",
            Rating::AMinus => "A-",
            Rating::BbbPlus => "BBB+",
            Rating::Bbb => "BBB",
            Rating::BbbMinus => "BBB-",
            Rating::BbPlus => "BB+",
            Rating::Bb => "BB",
            Rating::BbMinus => "BB-",
        }
    }

    /// Tier this notch belongs to
    pub fn tier(&self) -> RatingTier {
        match self {
            Rating::Aaa => RatingTier::Aaa,
            Rating::AaPlus | Rating::Aa | Rating::AaMinus => RatingTier::Aa,
            Rating::APlus | Rating::A | Rating::AMinus => RatingTier::A,
            Rating::BbbPlus | Rating::Bbb | Rating::BbbMinus => RatingTier::Bbb,
            Rating::BbPlus | Rating::Bb | Rating::BbMinus => RatingTier::Bb,
        }
    }
}

impl RatingTier {
    /// BBB- and above
    pub fn is_investment_grade(&self) -> bool {
        !matches!(self, RatingTier::Bb)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Rating::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| InstrumentError::UnknownRating(s.to_string()))
    }
}
