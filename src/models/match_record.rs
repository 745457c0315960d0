//! Per-match participant records.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::MatchId;

/// One player's line from one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchParticipantRecord {
    pub match_id: MatchId,
    pub champion_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
    pub game_mode: String,
    pub duration_seconds: u64,

    /// Epoch milliseconds
    pub creation_timestamp: i64,
}

impl MatchParticipantRecord {
    /// `K/D/A` as shown in the breakdown.
    pub fn kda_line(&self) -> String {
        format!("{}/{}/{}", self.kills, self.deaths, self.assists)
    }

    pub fn outcome_label(&self) -> &'static str {
        if self.win {
            "WIN"
        } else {
            "LOSS"
        }
    }

    /// Game start in UTC, `None` if the timestamp is out of range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.creation_timestamp).single()
    }

    /// Game start in the local timezone, `%Y-%m-%d %H:%M:%S`.
    pub fn created_local(&self) -> String {
        match self.created_at() {
            Some(utc) => utc
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => "unknown".to_string(),
        }
    }

    /// Duration as `m:ss`.
    pub fn duration_display(&self) -> String {
        format!(
            "{}:{:02}",
            self.duration_seconds / 60,
            self.duration_seconds % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::record;

    #[test]
    fn test_kda_line_and_outcome() {
        let won = record(5, 2, 3, true);
        assert_eq!(won.kda_line(), "5/2/3");
        assert_eq!(won.outcome_label(), "WIN");
        assert_eq!(record(0, 4, 0, false).outcome_label(), "LOSS");
    }

    #[test]
    fn test_created_at_from_epoch_millis() {
        let rec = record(0, 0, 0, true);
        let created = rec.created_at().unwrap();
        assert_eq!(created.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_created_local_format() {
        let local = record(0, 0, 0, true).created_local();
        // 2023-11-14 in every timezone
        assert!(local.starts_with("2023-11-1"));
        assert_eq!(local.len(), "2023-11-14 22:13:20".len());
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(record(0, 0, 0, true).duration_display(), "30:34");

        let mut short = record(0, 0, 0, true);
        short.duration_seconds = 65;
        assert_eq!(short.duration_display(), "1:05");
    }
}
