//! Statistics calculation.
//!
//! Derived figures over a player's recent matches and ranked records:
//! - Win rate over the matches actually available
//! - Aggregate KDA ratio with a zero-death guard
//! - Ranked queue win percentage

use crate::models::{MatchParticipantRecord, RankedStanding};

/// Count matches won.
pub fn count_wins(matches: &[MatchParticipantRecord]) -> u32 {
    matches.iter().filter(|m| m.win).count() as u32
}

/// Fraction of `matches` won. The denominator is the number of matches
/// present, not the number requested.
pub fn calculate_win_rate(matches: &[MatchParticipantRecord]) -> f64 {
    if matches.is_empty() {
        0.0
    } else {
        count_wins(matches) as f64 / matches.len() as f64
    }
}

/// Σ(kills + assists) / max(Σdeaths, 1).
pub fn calculate_avg_kda(matches: &[MatchParticipantRecord]) -> f64 {
    let takedowns: u64 = matches
        .iter()
        .map(|m| u64::from(m.kills) + u64::from(m.assists))
        .sum();
    let deaths: u64 = matches.iter().map(|m| u64::from(m.deaths)).sum();

    takedowns as f64 / deaths.max(1) as f64
}

/// Ranked win percentage (0–100), 0.0 with no games played.
pub fn calculate_queue_win_pct(standing: &RankedStanding) -> f64 {
    let total = standing.wins + standing.losses;
    if total == 0 {
        0.0
    } else {
        standing.wins as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{record, standing};

    fn sample() -> Vec<MatchParticipantRecord> {
        vec![
            record(5, 2, 3, true),
            record(1, 3, 1, false),
            record(0, 4, 0, false),
        ]
    }

    #[test]
    fn test_calculate_win_rate() {
        let rate = calculate_win_rate(&sample());
        assert!((rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(count_wins(&sample()), 1);
    }

    #[test]
    fn test_win_rate_uses_available_count() {
        // Two matches available out of, say, twenty requested.
        let matches = vec![record(1, 1, 1, true), record(1, 1, 1, false)];
        assert_eq!(calculate_win_rate(&matches), 0.5);
    }

    #[test]
    fn test_win_rate_no_matches() {
        assert_eq!(calculate_win_rate(&[]), 0.0);
    }

    #[test]
    fn test_calculate_avg_kda() {
        let kda = calculate_avg_kda(&sample());
        assert!((kda - 10.0 / 9.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", kda), "1.11");
    }

    #[test]
    fn test_avg_kda_zero_deaths() {
        let matches = vec![record(4, 0, 6, true), record(2, 0, 1, true)];
        assert_eq!(calculate_avg_kda(&matches), 13.0);
    }

    #[test]
    fn test_avg_kda_no_matches() {
        assert_eq!(calculate_avg_kda(&[]), 0.0);
    }

    #[test]
    fn test_calculate_queue_win_pct() {
        let pct = calculate_queue_win_pct(&standing("GOLD", "II", 45, 30, 25));
        assert_eq!(format!("{:.1}", pct), "54.5");

        assert_eq!(
            calculate_queue_win_pct(&standing("IRON", "IV", 0, 0, 0)),
            0.0
        );
        assert_eq!(
            calculate_queue_win_pct(&standing("GOLD", "I", 0, 3, 0)),
            100.0
        );
    }
}
