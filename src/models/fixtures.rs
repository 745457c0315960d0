//! Builders shared by unit tests.

use super::*;

pub fn record(kills: u32, deaths: u32, assists: u32, win: bool) -> MatchParticipantRecord {
    MatchParticipantRecord {
        match_id: MatchId::from("NA1_1"),
        champion_name: "Ahri".to_string(),
        kills,
        deaths,
        assists,
        win,
        game_mode: "CLASSIC".to_string(),
        duration_seconds: 1834,
        creation_timestamp: 1_700_000_000_000,
    }
}

pub fn identity(name: &str, tag: &str, region: Region) -> PlayerIdentity {
    PlayerIdentity {
        display_name: name.to_string(),
        tag: tag.to_string(),
        region,
        durable_id: Puuid::new(format!("puuid-{}", name.to_lowercase())),
    }
}

pub fn standing(tier: &str, division: &str, lp: u32, wins: u32, losses: u32) -> RankedStanding {
    RankedStanding {
        tier: tier.to_string(),
        division: division.to_string(),
        league_points: lp,
        wins,
        losses,
    }
}
