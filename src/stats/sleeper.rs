//! Sleeper stats provider (compact stat keys).
//!
//! One request returns every player's stats for a week, keyed by Sleeper's
//! player id, so the payload is cached and shared by the whole batch.

use super::{StatsSource, StatsTarget};
use crate::{
    core::{get_json, ResponseCache},
    error::FflError,
    models::{Player, Team},
    scoring::RawPlayerStats,
    PlayerId, Result, Season, TeamId, WeekNumber,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

const WEEK_CACHE_CAPACITY: usize = 8;

pub struct SleeperSource {
    client: Client,
    base_url: String,
    season: Season,
    cache: ResponseCache<String, Value>,
}

impl SleeperSource {
    pub fn new(client: Client, season: Season) -> Self {
        Self::with_base_url(client, season, SLEEPER_BASE_URL)
    }

    pub fn with_base_url(client: Client, season: Season, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            season,
            cache: ResponseCache::new(WEEK_CACHE_CAPACITY),
        }
    }

    pub fn week_stats_url(&self, week: WeekNumber) -> Result<String> {
        let nfl_week = week
            .nfl_week()
            .ok_or_else(|| FflError::not_found("Playoff week", week))?;
        Ok(format!(
            "{}/stats/nfl/regular/{}/{}",
            self.base_url,
            self.season.as_u16(),
            nfl_week
        ))
    }

    async fn week_payload(&self, week: WeekNumber) -> Result<Value> {
        let url = self.week_stats_url(week)?;
        self.cache
            .get_or_fetch(&url, || async {
                debug!(%url, "fetching Sleeper week stats");
                let payload = get_json(&self.client, &url).await?;
                if !payload.is_object() {
                    return Err(FflError::Upstream {
                        source_name: "Sleeper",
                        message: "week stats payload is not an object".to_string(),
                    });
                }
                Ok(payload)
            })
            .await
    }

    /// Every NFL player Sleeper knows about, used to back-fill external ids.
    pub async fn fetch_player_directory(&self) -> Result<Vec<DirectoryPlayer>> {
        let url = format!("{}/players/nfl", self.base_url);
        let payload = get_json(&self.client, &url).await?;
        let players: HashMap<String, DirectoryPlayer> = serde_json::from_value(payload)?;
        Ok(players.into_values().collect())
    }
}

#[async_trait]
impl StatsSource for SleeperSource {
    fn name(&self) -> &'static str {
        "Sleeper"
    }

    async fn fetch_raw_stats(
        &self,
        week: WeekNumber,
        target: &StatsTarget,
    ) -> Result<Option<RawPlayerStats>> {
        let external_id = target
            .external_id
            .as_deref()
            .ok_or_else(|| FflError::not_found("Sleeper id", &target.name))?;

        let payload = self.week_payload(week).await?;
        Ok(payload
            .get(external_id)
            .and_then(Value::as_object)
            .map(|stats| RawPlayerStats::from(stats.clone())))
    }
}

/// One entry of Sleeper's player directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectoryPlayer {
    pub player_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

/// Pair local players with directory ids by exact name (case-insensitive)
/// and team code. Unmatched players are left out.
pub fn match_external_ids(
    players: &[Player],
    teams: &HashMap<TeamId, Team>,
    directory: &[DirectoryPlayer],
) -> Vec<(PlayerId, String)> {
    let index: HashMap<(String, String), &str> = directory
        .iter()
        .filter_map(|d| {
            let name = d.full_name.as_deref()?.trim().to_lowercase();
            let team = d.team.as_deref()?.trim().to_uppercase();
            Some(((name, team), d.player_id.as_str()))
        })
        .collect();

    players
        .iter()
        .filter_map(|p| {
            let team = teams.get(&p.team_id)?;
            let key = (
                p.name.trim().to_lowercase(),
                team.short_code.trim().to_uppercase(),
            );
            index.get(&key).map(|id| (p.id, id.to_string()))
        })
        .collect()
}
