//! Stat fetching, manual score entry and ad-hoc scoring

use super::print_json;
use crate::{
    cli::StatSourceKind,
    core::build_client,
    error::FflError,
    scoring::{calculate_score, score_batch, RawPlayerStats, StatLine},
    stats::{fetch_week_stats, EspnSource, FetchReport, SleeperSource, StatsSource, StatsTarget},
    storage::LeagueDatabase,
    PlayerId, Result, Season, WeekNumber,
};
use serde::Serialize;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::Path,
    time::Duration,
};

/// Build the provider selected on the command line
pub fn build_source(
    kind: StatSourceKind,
    season: Season,
    timeout: Duration,
) -> Result<Box<dyn StatsSource>> {
    let client = build_client(timeout)?;
    Ok(match kind {
        StatSourceKind::Sleeper => Box::new(SleeperSource::new(client, season)),
        StatSourceKind::Espn => Box::new(EspnSource::new(client)),
    })
}

/// Every distinct player appearing in the week's lineups, with team codes
pub fn lineup_targets(db: &LeagueDatabase, week: WeekNumber) -> Result<Vec<StatsTarget>> {
    let ids: BTreeSet<PlayerId> = db
        .get_lineups_for_week(week)?
        .iter()
        .flat_map(|l| l.slots.player_ids())
        .collect();

    let mut players = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(player) = db.get_player(id)? {
            players.push(player);
        }
    }
    let teams: HashMap<_, _> = db
        .get_all_teams()?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    Ok(StatsTarget::from_players(&players, &teams))
}

#[derive(Debug, Serialize)]
struct FetchOutput<'a> {
    week: WeekNumber,
    source: &'static str,
    scores: Vec<ScoreRow>,
    fetched_count: usize,
    unmapped_count: usize,
    unmapped: &'a [crate::stats::Unmapped],
    saved: bool,
}

#[derive(Debug, Serialize)]
struct ScoreRow {
    player_id: PlayerId,
    name: String,
    points: f64,
}

/// Handle `scores fetch`: fetch, score and optionally save. Returns the report.
pub async fn handle_scores_fetch(
    db: &mut LeagueDatabase,
    source: &dyn StatsSource,
    week: WeekNumber,
    concurrency: usize,
    timeout: Duration,
    save: bool,
    as_json: bool,
) -> Result<FetchReport> {
    if db.get_week(week)?.is_none() {
        return Err(FflError::not_found("Week", week));
    }

    let targets = lineup_targets(db, week)?;
    if targets.is_empty() {
        println!("No lineups submitted for week {}", week);
        return Ok(FetchReport::default());
    }
    if !as_json {
        println!(
            "Fetching {} stats for {} players...",
            source.name(),
            targets.len()
        );
    }

    let report = fetch_week_stats(source, week, &targets, concurrency, timeout).await;
    let scores = score_batch(&report.stats);

    if save {
        db.upsert_player_scores(week, &scores)?;
    }

    let names: HashMap<_, _> = targets.iter().map(|t| (t.player_id, t.name.as_str())).collect();
    let rows: Vec<ScoreRow> = scores
        .iter()
        .map(|(player_id, points)| ScoreRow {
            player_id: *player_id,
            name: names.get(player_id).copied().unwrap_or_default().to_string(),
            points: *points,
        })
        .collect();

    if as_json {
        print_json(&FetchOutput {
            week,
            source: source.name(),
            scores: rows,
            fetched_count: report.fetched_count(),
            unmapped_count: report.unmapped_count(),
            unmapped: &report.unmapped,
            saved: save,
        })?;
        return Ok(report);
    }

    for row in &rows {
        println!("✓ {:<28} {:>7.2}", row.name, row.points);
    }
    for unmapped in &report.unmapped {
        println!("✗ {:<28} {}", unmapped.name, unmapped.reason);
    }
    println!(
        "Fetched stats for {} players{}",
        report.fetched_count(),
        if report.unmapped_count() > 0 {
            format!(", {} not found", report.unmapped_count())
        } else {
            String::new()
        }
    );
    if save {
        println!("✓ {} scores saved for week {}", scores.len(), week);
    } else {
        println!("(not saved; re-run with --save to store these scores)");
    }
    Ok(report)
}

/// Handle `scores set`
pub fn handle_scores_set(
    db: &mut LeagueDatabase,
    week: WeekNumber,
    player_id: PlayerId,
    points: f64,
) -> Result<()> {
    if !points.is_finite() {
        return Err(FflError::Config {
            message: format!("points must be a finite number, got {}", points),
        });
    }
    let player = db
        .get_player(player_id)?
        .ok_or_else(|| FflError::not_found("Player", player_id))?;
    if db.get_week(week)?.is_none() {
        return Err(FflError::not_found("Week", week));
    }

    db.upsert_player_score(week, player_id, points)?;
    println!("✓ {} scored {:.2} in week {}", player.name, points, week);
    Ok(())
}

/// Handle `scores show`
pub fn handle_scores_show(db: &LeagueDatabase, week: WeekNumber, as_json: bool) -> Result<()> {
    let scores: BTreeMap<PlayerId, f64> = db.get_scores_for_week(week)?;

    let mut rows = Vec::with_capacity(scores.len());
    for (player_id, points) in scores {
        let name = db
            .get_player(player_id)?
            .map_or_else(|| format!("#{}", player_id), |p| p.name);
        rows.push(ScoreRow {
            player_id,
            name,
            points,
        });
    }
    rows.sort_by(|a, b| b.points.total_cmp(&a.points).then_with(|| a.name.cmp(&b.name)));

    if as_json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No scores recorded for week {}", week);
    }
    for row in rows {
        println!("{:<28} {:>7.2}", row.name, row.points);
    }
    Ok(())
}

/// Handle `scores calc`: score a JSON object of raw stats. Returns the points.
pub fn handle_scores_calc(file: &Path) -> Result<f64> {
    let content = std::fs::read_to_string(file)?;
    let raw: RawPlayerStats = serde_json::from_str(&content)?;

    let line = StatLine::from_raw(&raw);
    let points = calculate_score(&raw);
    println!("{}", serde_json::to_string_pretty(&line)?);
    println!("Points: {:.2}", points);
    Ok(points)
}
