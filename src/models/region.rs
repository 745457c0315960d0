//! Regional and platform routing values.
//!
//! Account and match endpoints are addressed by a broad regional route
//! (`americas`, `asia`, ...). Summoner and league endpoints live on a
//! specific platform cluster derived from the region by a fixed mapping.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Rejected region input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid region '{input}'. Please choose from: americas, asia, europe, sea")]
pub struct RegionParseError {
    pub input: String,
}

/// Regional routing value. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Americas, Region::Asia, Region::Europe, Region::Sea];

    /// Routing host label for account and match endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::Sea => "sea",
        }
    }

    /// Platform cluster serving summoner and league data for this region.
    pub fn platform(&self) -> Platform {
        match self {
            Region::Americas => Platform::Na1,
            Region::Asia => Platform::Kr,
            Region::Europe => Platform::Euw1,
            Region::Sea => Platform::Oc1,
        }
    }

    /// Servers covered by the region, shown when prompting.
    pub fn examples(&self) -> &'static str {
        match self {
            Region::Americas => "North America, Brazil, Latin America",
            Region::Asia => "Korea, Japan",
            Region::Europe => "EUW, EUNE, Turkey, Russia",
            Region::Sea => "Southeast Asia, Oceania",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or(RegionParseError { input: normalized })
    }
}

/// Platform routing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Na1,
    Kr,
    Euw1,
    Oc1,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Na1 => "na1",
            Platform::Kr => "kr",
            Platform::Euw1 => "euw1",
            Platform::Oc1 => "oc1",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
