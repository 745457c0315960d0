//! Player lookup inputs and resolved identities.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::{Puuid, Region};

/// Errors parsing a `Name#Tag` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiotIdParseError {
    #[error("Expected NAME#TAG, got '{0}'")]
    MissingSeparator(String),

    #[error("Game name must not be empty")]
    EmptyName,

    #[error("Tag line must not be empty")]
    EmptyTag,
}

/// Display name plus tag line, e.g. `Faker#KR1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

impl RiotId {
    pub fn new(
        game_name: impl Into<String>,
        tag_line: impl Into<String>,
    ) -> Result<Self, RiotIdParseError> {
        let game_name = game_name.into().trim().to_string();
        let tag_line = tag_line.into().trim().trim_start_matches('#').to_string();
        if game_name.is_empty() {
            return Err(RiotIdParseError::EmptyName);
        }
        if tag_line.is_empty() {
            return Err(RiotIdParseError::EmptyTag);
        }
        Ok(Self {
            game_name,
            tag_line,
        })
    }
}

impl std::fmt::Display for RiotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

impl FromStr for RiotId {
    type Err = RiotIdParseError;

    /// Splits on the last `#` so names containing `#` keep it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, tag) = s
            .rsplit_once('#')
            .ok_or_else(|| RiotIdParseError::MissingSeparator(s.to_string()))?;
        RiotId::new(name, tag)
    }
}

/// Which side of the comparison a player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn number(&self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }
}

impl std::fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// A validated request to look up one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerQuery {
    pub riot_id: RiotId,
    pub region: Region,
}

impl PlayerQuery {
    pub fn new(riot_id: RiotId, region: Region) -> Self {
        Self { riot_id, region }
    }
}

/// A player whose durable identifier has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub display_name: String,
    pub tag: String,
    pub region: Region,
    pub durable_id: Puuid,
}

impl PlayerIdentity {
    pub fn new(query: &PlayerQuery, durable_id: Puuid) -> Self {
        Self {
            display_name: query.riot_id.game_name.clone(),
            tag: query.riot_id.tag_line.clone(),
            region: query.region,
            durable_id,
        }
    }

    /// `Name#Tag` label used throughout the report.
    pub fn label(&self) -> String {
        format!("{}#{}", self.display_name, self.tag)
    }
}
