//! Aggregation and rendering of comparison reports.

use std::fmt::Write;

use crate::calculate::{calculate_avg_kda, calculate_queue_win_pct, calculate_win_rate, count_wins};
use crate::models::{ComparisonReport, PlayerData, PlayerSummary, QueueKind, Standings};

const BANNER_WIDTH: usize = 60;

/// Output format for a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("Unknown format '{}'. Use 'text' or 'json'.", other)),
        }
    }
}

/// Combine two players' data into a report.
///
/// Matches are paired by position (i-th most recent of each player), not by
/// shared match ID, and truncated to the shorter of the two histories.
pub fn aggregate(a: PlayerData, b: PlayerData, requested_matches: usize) -> ComparisonReport {
    let paired_matches = a
        .matches
        .iter()
        .cloned()
        .zip(b.matches.iter().cloned())
        .collect();

    ComparisonReport {
        player_a: summarize(a),
        player_b: summarize(b),
        requested_matches,
        paired_matches,
    }
}

fn summarize(data: PlayerData) -> PlayerSummary {
    PlayerSummary {
        wins: count_wins(&data.matches),
        win_rate: calculate_win_rate(&data.matches),
        avg_kda: calculate_avg_kda(&data.matches),
        identity: data.identity,
        standings: data.standings,
        matches: data.matches,
    }
}

/// `"{Tier} {Division} ({LP} LP) - {W}W/{L}L ({winrate}%)"`, or `"Unranked"`
/// when the queue is absent.
pub fn format_rank(standings: &Standings, queue: QueueKind) -> String {
    let Some(rank) = standings.get(queue) else {
        return "Unranked".to_string();
    };

    format!(
        "{} {} ({} LP) - {}W/{}L ({:.1}%)",
        capitalize(&rank.tier),
        rank.division,
        rank.league_points,
        rank.wins,
        rank.losses,
        calculate_queue_win_pct(rank)
    )
}

/// `GOLD` -> `Gold`
fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the side-by-side text report.
pub fn render_text(report: &ComparisonReport) -> String {
    let a = &report.player_a;
    let b = &report.player_b;
    let (label_a, label_b) = (a.label(), b.label());
    let banner = "=".repeat(BANNER_WIDTH);

    let mut out = String::new();
    let _ = writeln!(out, "{}", banner);
    let _ = writeln!(out, "PLAYER COMPARISON: {} vs {}", label_a, label_b);
    let _ = writeln!(out, "{}", banner);

    if report.has_shortfall() {
        let _ = writeln!(
            out,
            "\nWarning: One or both players don't have {} recent matches available.",
            report.requested_matches
        );
    }

    let _ = writeln!(out, "\nRank Comparison:");
    for player in [a, b] {
        write_rank_block(&mut out, player);
    }

    let _ = writeln!(
        out,
        "\nRecent Performance (Last {} matches):",
        report.requested_matches
    );
    for player in [a, b] {
        let _ = writeln!(
            out,
            "{}: {}/{} wins ({:.1}%)",
            player.label(),
            player.wins,
            player.matches_played(),
            player.win_rate * 100.0
        );
    }

    let _ = writeln!(out, "\nAverage KDA Ratio:");
    for player in [a, b] {
        let _ = writeln!(out, "{}: {:.2}", player.label(), player.avg_kda);
    }

    let _ = writeln!(out, "\nDetailed Match Breakdown:");
    if report.paired_matches.is_empty() {
        let _ = writeln!(out, "No matches available to compare.");
    }
    for (i, (match_a, match_b)) in report.paired_matches.iter().enumerate() {
        let _ = writeln!(out, "\nMatch {}:", i + 1);
        for (label, m) in [(&label_a, match_a), (&label_b, match_b)] {
            let _ = writeln!(
                out,
                "  {}: {} | {} | {}",
                label,
                m.champion_name,
                m.kda_line(),
                m.outcome_label()
            );
        }
    }

    out
}

fn write_rank_block(out: &mut String, player: &PlayerSummary) {
    if player.standings.is_empty() {
        let _ = writeln!(out, "{}: Rank data unavailable", player.label());
        return;
    }

    let _ = writeln!(out, "{}:", player.label());
    for queue in [QueueKind::Solo, QueueKind::Flex] {
        let _ = writeln!(
            out,
            "  {}: {}",
            queue.label(),
            format_rank(&player.standings, queue)
        );
    }
}

/// Render the report as pretty JSON.
pub fn render_json(report: &ComparisonReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Render a single player's recent matches.
pub fn render_history(data: &PlayerData, requested_matches: usize) -> String {
    let mut out = String::new();
    let label = data.identity.label();

    let _ = writeln!(out, "Match history for {}", label);
    let _ = writeln!(out, "Analyzing last {} matches...", requested_matches);

    if data.standings.is_empty() {
        let _ = writeln!(out, "Rank data unavailable");
    } else {
        for queue in [QueueKind::Solo, QueueKind::Flex] {
            let _ = writeln!(
                out,
                "{}: {}",
                queue.label(),
                format_rank(&data.standings, queue)
            );
        }
    }

    if data.matches.is_empty() {
        let _ = writeln!(out, "\nNo match history found");
        return out;
    }

    let _ = writeln!(out, "Found {} matches", data.matches.len());
    for (i, m) in data.matches.iter().enumerate() {
        let _ = writeln!(out, "\n--- Match {}: {} ---", i + 1, m.match_id);
        let _ = writeln!(out, "Game Mode: {}", m.game_mode);
        let _ = writeln!(
            out,
            "Game Duration: {} seconds ({})",
            m.duration_seconds,
            m.duration_display()
        );
        let _ = writeln!(out, "Game Creation: {}", m.created_local());
        let _ = writeln!(out, "Champion: {}", m.champion_name);
        let _ = writeln!(out, "KDA: {}", m.kda_line());
        let _ = writeln!(out, "Win: {}", if m.win { "Yes" } else { "No" });
    }

    let _ = writeln!(
        out,
        "\nWin rate: {:.1}% | Average KDA: {:.2}",
        calculate_win_rate(&data.matches) * 100.0,
        calculate_avg_kda(&data.matches)
    );

    out
}
