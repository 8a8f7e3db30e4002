//! ESPN stats provider (verbose stat keys).
//!
//! There is no per-player endpoint: a lookup walks the week's scoreboard,
//! then each game's boxscore, until the player turns up under their team.
//! Every response is cached so a batch fetches each document once.

use super::{StatsSource, StatsTarget};
use crate::{
    core::{get_json, ResponseCache},
    scoring::RawPlayerStats,
    Result, WeekNumber,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

pub const ESPN_BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl";

// A playoff week has at most six games plus its scoreboard
const RESPONSE_CACHE_CAPACITY: usize = 32;

pub struct EspnSource {
    client: Client,
    base_url: String,
    cache: ResponseCache<String, Value>,
}

impl EspnSource {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, ESPN_BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: ResponseCache::new(RESPONSE_CACHE_CAPACITY),
        }
    }

    pub fn scoreboard_url(&self, week: WeekNumber) -> String {
        format!("{}/scoreboard?week={}", self.base_url, week.as_u8())
    }

    async fn cached_json(&self, url: &str) -> Result<Value> {
        self.cache
            .get_or_fetch(&url.to_string(), || async {
                debug!(%url, "fetching ESPN document");
                get_json(&self.client, url).await
            })
            .await
    }
}

#[async_trait]
impl StatsSource for EspnSource {
    fn name(&self) -> &'static str {
        "ESPN"
    }

    async fn fetch_raw_stats(
        &self,
        week: WeekNumber,
        target: &StatsTarget,
    ) -> Result<Option<RawPlayerStats>> {
        let scoreboard = self.cached_json(&self.scoreboard_url(week)).await?;

        let mut last_error = None;
        for url in boxscore_links(&scoreboard) {
            let boxscore = match self.cached_json(&url).await {
                Ok(boxscore) => boxscore,
                Err(e) => {
                    warn!(%url, error = %e, "skipping boxscore");
                    last_error = Some(e);
                    continue;
                }
            };
            if let Some(stats) = find_player_stats(&boxscore, &target.team_code, &target.name) {
                return Ok(Some(stats));
            }
        }

        // The player may have been in a game that failed to load
        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

/// Boxscore URLs of every game on a scoreboard
pub fn boxscore_links(scoreboard: &Value) -> Vec<String> {
    let Some(events) = scoreboard.get("events").and_then(Value::as_array) else {
        return Vec::new();
    };

    events
        .iter()
        .filter_map(|event| {
            event
                .get("links")?
                .as_array()?
                .iter()
                .find(|link| link_has_rel(link, "boxscore"))?
                .get("href")?
                .as_str()
                .map(str::to_string)
        })
        .collect()
}

fn link_has_rel(link: &Value, rel: &str) -> bool {
    match link.get("rel") {
        Some(Value::Array(rels)) => rels.iter().any(|r| r.as_str() == Some(rel)),
        Some(Value::String(s)) => s.contains(rel),
        _ => false,
    }
}

/// Stats of the first player on the matching team whose display name contains
/// `player_name`, or whose "first last" equals it (both case-insensitive).
pub fn find_player_stats(
    boxscore: &Value,
    team_code: &str,
    player_name: &str,
) -> Option<RawPlayerStats> {
    let wanted = player_name.trim().to_lowercase();

    boxscore
        .get("teams")?
        .as_array()?
        .iter()
        .filter(|team| team_matches(team, team_code))
        .filter_map(|team| team.get("players")?.as_array())
        .flatten()
        .find(|player| player_matches(player, &wanted))
        .and_then(|player| player.get("stats")?.as_object())
        .map(|stats| RawPlayerStats::from(stats.clone()))
}

fn team_field<'a>(team: &'a Value, field: &str) -> Option<&'a str> {
    team.get(field)
        .or_else(|| team.get("team")?.get(field))
        .and_then(Value::as_str)
}

fn team_matches(team: &Value, code: &str) -> bool {
    team_field(team, "displayName").is_some_and(|name| name.contains(code))
        || team_field(team, "abbreviation") == Some(code)
}

fn player_matches(player: &Value, wanted: &str) -> bool {
    let text = |field: &str| player.get(field).and_then(Value::as_str).unwrap_or_default();

    if text("displayName").to_lowercase().contains(wanted) {
        return true;
    }
    let full = format!("{} {}", text("firstName"), text("lastName"));
    full.trim().to_lowercase() == wanted
}
