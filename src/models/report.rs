//! Comparison report structures.

use serde::{Deserialize, Serialize};

use super::{MatchParticipantRecord, PlayerIdentity, Standings};

/// Everything collected for one player during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub identity: PlayerIdentity,

    /// Empty when no standing data could be obtained
    pub standings: Standings,

    /// Most recent first
    pub matches: Vec<MatchParticipantRecord>,
}

/// Derived per-player figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub identity: PlayerIdentity,
    pub standings: Standings,
    pub matches: Vec<MatchParticipantRecord>,
    pub wins: u32,

    /// Fraction of available matches won, 0.0 when there are none
    pub win_rate: f64,

    /// (kills + assists) / max(deaths, 1) over all available matches
    pub avg_kda: f64,
}

impl PlayerSummary {
    pub fn label(&self) -> String {
        self.identity.label()
    }

    pub fn matches_played(&self) -> usize {
        self.matches.len()
    }
}

/// Side-by-side comparison of two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub player_a: PlayerSummary,
    pub player_b: PlayerSummary,

    /// Number of matches asked for per player
    pub requested_matches: usize,

    /// Match i of A next to match i of B, truncated to the shorter history
    pub paired_matches: Vec<(MatchParticipantRecord, MatchParticipantRecord)>,
}

impl ComparisonReport {
    /// True when either player returned fewer matches than requested.
    pub fn has_shortfall(&self) -> bool {
        self.player_a.matches_played() < self.requested_matches
            || self.player_b.matches_played() < self.requested_matches
    }
}
