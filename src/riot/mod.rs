//! Riot Games API client.
//!
//! Builds endpoint URLs for the account, summoner, league, and match
//! families and decodes their JSON bodies. All Riot API specifics are
//! isolated in this module. Every call draws one token from the shared
//! `RateBudget` before it is sent, including retries.

pub mod dto;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::fetch::{FetchError, RateBudget, Transport};
use crate::models::{MatchId, Platform, Puuid, Region, RiotId, SummonerId};

pub use dto::{AccountDto, LeagueEntryDto, MatchDto, SummonerDto};

/// Default host template; `{route}` is replaced by a region or platform code.
pub const DEFAULT_HOST_TEMPLATE: &str = "https://{route}.api.riotgames.com";

/// Most match IDs the service returns per request.
pub const MAX_MATCH_COUNT: usize = 100;

/// Retry policy for rate-limited (429) responses.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,

    /// Upper bound on a single `Retry-After` wait
    pub max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            max_wait: Duration::from_secs(10),
        }
    }
}

/// Riot API client.
pub struct RiotClient {
    transport: Arc<dyn Transport>,
    budget: Arc<RateBudget>,
    host_template: String,
    retry: RetryPolicy,
}

impl RiotClient {
    pub fn new(transport: Arc<dyn Transport>, budget: Arc<RateBudget>) -> Self {
        Self {
            transport,
            budget,
            host_template: DEFAULT_HOST_TEMPLATE.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_host_template(mut self, template: impl Into<String>) -> Self {
        self.host_template = template.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn budget(&self) -> &Arc<RateBudget> {
        &self.budget
    }

    /// Look up an account by display name and tag (regional routing).
    pub async fn account_by_riot_id(
        &self,
        region: Region,
        riot_id: &RiotId,
    ) -> Result<AccountDto, FetchError> {
        let url = self.endpoint(
            region.as_str(),
            &[
                "riot",
                "account",
                "v1",
                "accounts",
                "by-riot-id",
                &riot_id.game_name,
                &riot_id.tag_line,
            ],
        )?;
        self.get_json(&url).await
    }

    /// Resolve the platform-scoped summoner for a puuid (platform routing).
    pub async fn summoner_by_puuid(
        &self,
        platform: Platform,
        puuid: &Puuid,
    ) -> Result<SummonerDto, FetchError> {
        let url = self.endpoint(
            platform.as_str(),
            &["lol", "summoner", "v4", "summoners", "by-puuid", puuid.as_str()],
        )?;
        self.get_json(&url).await
    }

    /// Ranked league entries for a summoner (platform routing).
    pub async fn league_entries(
        &self,
        platform: Platform,
        summoner_id: &SummonerId,
    ) -> Result<Vec<LeagueEntryDto>, FetchError> {
        let url = self.endpoint(
            platform.as_str(),
            &["lol", "league", "v4", "entries", "by-summoner", summoner_id.as_str()],
        )?;
        self.get_json(&url).await
    }

    /// Match IDs for a puuid, most recent first (regional routing).
    pub async fn match_ids(
        &self,
        region: Region,
        puuid: &Puuid,
        start: usize,
        count: usize,
    ) -> Result<Vec<MatchId>, FetchError> {
        let mut url = self.endpoint(
            region.as_str(),
            &["lol", "match", "v5", "matches", "by-puuid", puuid.as_str(), "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("start", &start.to_string())
            .append_pair("count", &count.to_string());
        self.get_json(&url).await
    }

    /// Full match detail (regional routing).
    pub async fn match_detail(
        &self,
        region: Region,
        match_id: &MatchId,
    ) -> Result<MatchDto, FetchError> {
        let url = self.endpoint(
            region.as_str(),
            &["lol", "match", "v5", "matches", match_id.as_str()],
        )?;
        self.get_json(&url).await
    }

    /// Build `https://{route}.api.riotgames.com/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, route: &str, segments: &[&str]) -> Result<Url, FetchError> {
        let base = self.host_template.replace("{route}", route);
        let mut url = Url::parse(&base)
            .map_err(|e| FetchError::InvalidUrl(format!("Bad API host {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(format!("API host cannot have a path: {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let mut attempt = 0;
        let body = loop {
            self.budget.acquire().await;
            debug!("[{}] GET {}", self.transport.name(), url);
            match self.transport.get(url).await {
                Err(e) if e.retry_after().is_some() && attempt < self.retry.max_retries => {
                    let wait = Duration::from_secs(e.retry_after().unwrap_or(1))
                        .min(self.retry.max_wait);
                    attempt += 1;
                    warn!(
                        "Rate limited on {}, retrying in {:?} (attempt {}/{})",
                        url.path(),
                        wait,
                        attempt,
                        self.retry.max_retries
                    );
                    tokio::time::sleep(wait).await;
                }
                other => break other?,
            }
        };

        Ok(serde_json::from_str(&body)?)
    }
}
