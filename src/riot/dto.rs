//! Wire types for the Riot endpoints used by the pipeline.
//!
//! Only the fields the pipeline reads are declared; everything else in the
//! payloads is ignored. A missing required field fails deserialization and
//! is treated like any other failed lookup.

use serde::Deserialize;

use crate::models::{MatchId, MatchParticipantRecord, Puuid, QueueKind, RankedStanding, Standings};

/// `account/v1/accounts/by-riot-id`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

/// `summoner/v4/summoners/by-puuid`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner ID
    pub id: String,
    pub puuid: Option<String>,
    pub summoner_level: Option<u64>,
}

/// One element of `league/v4/entries/by-summoner`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,

    /// Division, e.g. `II`
    pub rank: String,

    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
}

impl LeagueEntryDto {
    fn to_standing(&self) -> RankedStanding {
        RankedStanding {
            tier: self.tier.clone(),
            division: self.rank.clone(),
            league_points: self.league_points,
            wins: self.wins,
            losses: self.losses,
        }
    }
}

/// Keep solo and flex entries; any other queue type is dropped.
pub fn standings_from_entries(entries: &[LeagueEntryDto]) -> Standings {
    let mut standings = Standings::new();
    for entry in entries {
        if let Some(queue) = QueueKind::from_queue_type(&entry.queue_type) {
            standings.insert(queue, entry.to_standing());
        }
    }
    standings
}

/// `match/v5/matches/{matchId}`
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    pub metadata: Option<MatchMetadataDto>,
    pub info: MatchInfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadataDto {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfoDto {
    pub game_mode: String,

    /// Seconds, or milliseconds for games predating `gameEndTimestamp`
    pub game_duration: u64,

    /// Epoch milliseconds
    pub game_creation: i64,

    pub game_end_timestamp: Option<i64>,
    pub participants: Vec<ParticipantDto>,
}

impl MatchInfoDto {
    pub fn duration_seconds(&self) -> u64 {
        if self.game_end_timestamp.is_some() {
            self.game_duration
        } else {
            self.game_duration / 1000
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
}

impl MatchDto {
    /// Extract the record for `puuid`, or `None` if they are not a participant.
    pub fn participant_record(
        &self,
        match_id: &MatchId,
        puuid: &Puuid,
    ) -> Option<MatchParticipantRecord> {
        let participant = self
            .info
            .participants
            .iter()
            .find(|p| p.puuid == puuid.as_str())?;

        Some(MatchParticipantRecord {
            match_id: match_id.clone(),
            champion_name: participant.champion_name.clone(),
            kills: participant.kills,
            deaths: participant.deaths,
            assists: participant.assists,
            win: participant.win,
            game_mode: self.info.game_mode.clone(),
            duration_seconds: self.info.duration_seconds(),
            creation_timestamp: self.info.game_creation,
        })
    }
}
