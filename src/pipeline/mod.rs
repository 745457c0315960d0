//! Comparison pipeline.
//!
//! Coordinates the dependent lookups for two players:
//! 1. Resolve each player's puuid (both players, concurrently)
//! 2. Per player: ranked standings, match history, per-match detail
//! 3. Aggregate both branches into a `ComparisonReport`
//!
//! Stage failures degrade to absent data and never abort the run, with one
//! exception: a player whose identity cannot be resolved leaves nothing to
//! compare, so report generation stops with `PipelineError::UnresolvedPlayers`.

use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{
    ComparisonReport, MatchId, MatchParticipantRecord, PlayerData, PlayerIdentity, PlayerQuery,
    PlayerSlot, Puuid, RiotId, Standings, SummonerId,
};
use crate::report::aggregate;
use crate::riot::dto::standings_from_entries;
use crate::riot::{RiotClient, MAX_MATCH_COUNT};

/// A player whose identity lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedPlayer {
    pub slot: Option<PlayerSlot>,
    pub riot_id: RiotId,
}

impl std::fmt::Display for UnresolvedPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.slot {
            Some(slot) => write!(
                f,
                "Could not retrieve identifier for {} ({}). Please check the name and tag.",
                slot, self.riot_id
            ),
            None => write!(
                f,
                "Could not retrieve identifier for {}. Please check the name and tag.",
                self.riot_id
            ),
        }
    }
}

/// Errors that stop report generation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{}", join_lines(.0))]
    UnresolvedPlayers(Vec<UnresolvedPlayer>),
}

fn join_lines(players: &[UnresolvedPlayer]) -> String {
    players
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comparison pipeline over a shared, rate-budgeted client.
pub struct ComparisonPipeline {
    client: RiotClient,
}

impl ComparisonPipeline {
    pub fn new(client: RiotClient) -> Self {
        Self { client }
    }

    /// Compare two players over their `count` most recent matches.
    pub async fn compare(
        &self,
        query_a: &PlayerQuery,
        query_b: &PlayerQuery,
        count: usize,
    ) -> Result<ComparisonReport, PipelineError> {
        let start = Instant::now();
        let count = count.min(MAX_MATCH_COUNT);

        let (identity_a, identity_b) = tokio::join!(
            self.resolve_identity(query_a),
            self.resolve_identity(query_b)
        );

        let (identity_a, identity_b) = match (identity_a, identity_b) {
            (Some(a), Some(b)) => (a, b),
            (a, b) => {
                let mut unresolved = Vec::new();
                if a.is_none() {
                    unresolved.push(UnresolvedPlayer {
                        slot: Some(PlayerSlot::One),
                        riot_id: query_a.riot_id.clone(),
                    });
                }
                if b.is_none() {
                    unresolved.push(UnresolvedPlayer {
                        slot: Some(PlayerSlot::Two),
                        riot_id: query_b.riot_id.clone(),
                    });
                }
                return Err(PipelineError::UnresolvedPlayers(unresolved));
            }
        };

        let (data_a, data_b) = tokio::join!(
            self.collect_player(identity_a, count),
            self.collect_player(identity_b, count)
        );

        if data_a.matches.len() < count || data_b.matches.len() < count {
            warn!(
                "One or both players don't have {} recent matches available",
                count
            );
        }

        let report = aggregate(data_a, data_b, count);
        info!("Comparison built in {:?}", start.elapsed());
        Ok(report)
    }

    /// Single-player branch: resolve, then collect standings and recent matches.
    pub async fn player_history(
        &self,
        query: &PlayerQuery,
        count: usize,
    ) -> Result<PlayerData, PipelineError> {
        let identity = self.resolve_identity(query).await.ok_or_else(|| {
            PipelineError::UnresolvedPlayers(vec![UnresolvedPlayer {
                slot: None,
                riot_id: query.riot_id.clone(),
            }])
        })?;

        Ok(self.collect_player(identity, count.min(MAX_MATCH_COUNT)).await)
    }

    /// Everything after identity resolution for one player.
    pub async fn collect_player(&self, identity: PlayerIdentity, count: usize) -> PlayerData {
        let label = identity.label();

        info!("Getting rank information for {}...", label);
        let standings = self.fetch_standings(&identity).await;

        info!("Fetching last {} matches for {}...", count, label);
        let match_ids = self.fetch_history(&identity, count).await;
        if match_ids.is_empty() {
            warn!("No match history found for {}", label);
        }

        let mut matches = Vec::with_capacity(match_ids.len());
        for match_id in &match_ids {
            if let Some(record) = self.fetch_match_record(&identity, match_id).await {
                matches.push(record);
            }
        }

        info!(
            "{}: {} ranked queue(s), {}/{} matches retrieved",
            label,
            standings.len(),
            matches.len(),
            match_ids.len()
        );

        PlayerData {
            identity,
            standings,
            matches,
        }
    }

    /// Identity Resolver. `None` covers every failure: not found, transport,
    /// or an unexpected body.
    pub async fn resolve_identity(&self, query: &PlayerQuery) -> Option<PlayerIdentity> {
        info!("Getting PUUID for {}...", query.riot_id);

        match self
            .client
            .account_by_riot_id(query.region, &query.riot_id)
            .await
        {
            Ok(account) if !account.puuid.is_empty() => {
                Some(PlayerIdentity::new(query, Puuid::new(account.puuid)))
            }
            Ok(_) => {
                warn!("Account lookup for {} returned an empty puuid", query.riot_id);
                None
            }
            Err(e) => {
                warn!("Could not resolve {}: {}", query.riot_id, e);
                None
            }
        }
    }

    /// Standing Fetcher. Empty when the summoner or league lookup fails.
    pub async fn fetch_standings(&self, identity: &PlayerIdentity) -> Standings {
        let platform = identity.region.platform();

        let summoner = match self
            .client
            .summoner_by_puuid(platform, &identity.durable_id)
            .await
        {
            Ok(summoner) => summoner,
            Err(e) => {
                warn!("Error getting summoner ID for {}: {}", identity.label(), e);
                return Standings::new();
            }
        };

        match self
            .client
            .league_entries(platform, &SummonerId::new(summoner.id))
            .await
        {
            Ok(entries) => standings_from_entries(&entries),
            Err(e) => {
                warn!("Error getting rank info for {}: {}", identity.label(), e);
                Standings::new()
            }
        }
    }

    /// History Fetcher. At most `count` IDs, most recent first; empty on failure.
    pub async fn fetch_history(&self, identity: &PlayerIdentity, count: usize) -> Vec<MatchId> {
        if count == 0 {
            return Vec::new();
        }

        match self
            .client
            .match_ids(identity.region, &identity.durable_id, 0, count)
            .await
        {
            Ok(mut ids) => {
                ids.truncate(count);
                ids
            }
            Err(e) => {
                warn!("Error getting match history for {}: {}", identity.label(), e);
                Vec::new()
            }
        }
    }

    /// Match Detail Fetcher. `None` when the fetch fails or the player is
    /// not among the participants.
    pub async fn fetch_match_record(
        &self,
        identity: &PlayerIdentity,
        match_id: &MatchId,
    ) -> Option<MatchParticipantRecord> {
        let detail = match self.client.match_detail(identity.region, match_id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Error getting match details for {}: {}", match_id, e);
                return None;
            }
        };

        let record = detail.participant_record(match_id, &identity.durable_id);
        if record.is_none() {
            warn!(
                "{} is not a participant in {}, skipping",
                identity.label(),
                match_id
            );
        }
        record
    }
}
