//! External stat providers.
//!
//! A provider turns (week, player) into a raw stat bag. `fetch_week_stats`
//! drives one provider over a whole batch with bounded concurrency and a
//! per-player timeout; a failing player is reported, never fatal.

pub mod espn;
pub mod sleeper;


pub use espn::EspnSource;
pub use sleeper::SleeperSource;

use crate::{
    error::FflError,
    models::{Player, Team},
    scoring::RawPlayerStats,
    PlayerId, Result, TeamId, WeekNumber,
};
use async_trait::async_trait;
use futures::{stream, StreamExt};
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};
use tracing::{debug, info, warn};

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Everything a provider may need to locate one player's stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsTarget {
    pub player_id: PlayerId,
    pub name: String,
    pub team_code: String,
    pub external_id: Option<String>,
}

impl StatsTarget {
    /// Join players with their team codes; players whose team is unknown are skipped.
    pub fn from_players(players: &[Player], teams: &HashMap<TeamId, Team>) -> Vec<Self> {
        players
            .iter()
            .filter_map(|p| {
                let team = teams.get(&p.team_id)?;
                Some(Self {
                    player_id: p.id,
                    name: p.name.clone(),
                    team_code: team.short_code.clone(),
                    external_id: p.external_id.clone(),
                })
            })
            .collect()
    }
}

#[async_trait]
pub trait StatsSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Raw stats for one player in a playoff week; `Ok(None)` when the
    /// provider has no entry for them.
    async fn fetch_raw_stats(
        &self,
        week: WeekNumber,
        target: &StatsTarget,
    ) -> Result<Option<RawPlayerStats>>;
}

/// A player the provider could not supply stats for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unmapped {
    pub player_id: PlayerId,
    pub name: String,
    pub reason: String,
}

/// Outcome of a batch fetch.
#[derive(Debug, Default, Serialize)]
pub struct FetchReport {
    pub stats: BTreeMap<PlayerId, RawPlayerStats>,
    pub unmapped: Vec<Unmapped>,
}

impl FetchReport {
    pub fn fetched_count(&self) -> usize {
        self.stats.len()
    }

    pub fn unmapped_count(&self) -> usize {
        self.unmapped.len()
    }
}

/// Fetch stats for every target, at most `concurrency` requests in flight.
pub async fn fetch_week_stats(
    source: &dyn StatsSource,
    week: WeekNumber,
    targets: &[StatsTarget],
    concurrency: usize,
    timeout: Duration,
) -> FetchReport {
    info!(
        source = source.name(),
        week = %week,
        players = targets.len(),
        "fetching stats"
    );

    let results: Vec<_> = stream::iter(targets)
        .map(|target| async move {
            let outcome = tokio::time::timeout(timeout, source.fetch_raw_stats(week, target))
                .await
                .unwrap_or_else(|_| {
                    Err(FflError::Timeout {
                        seconds: timeout.as_secs(),
                    })
                });
            (target, outcome)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut report = FetchReport::default();
    for (target, outcome) in results {
        let reason = match outcome {
            Ok(Some(raw)) => {
                debug!(player = %target.name, "stats fetched");
                report.stats.insert(target.player_id, raw);
                continue;
            }
            Ok(None) => format!("not found in {} data", source.name()),
            Err(e) => e.to_string(),
        };
        warn!(player = %target.name, team = %target.team_code, %reason, "no stats");
        report.unmapped.push(Unmapped {
            player_id: target.player_id,
            name: target.name.clone(),
            reason,
        });
    }
    report.unmapped.sort_by_key(|u| u.player_id);

    info!(
        fetched = report.fetched_count(),
        unmapped = report.unmapped_count(),
        "stat fetch complete"
    );
    report
}
