//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use playoff_ffl::{
    cli::{
        Commands, LineupCmd, ManagerCmd, PlayerCmd, PlayoffFfl, ScoresCmd, TeamCmd, WeekCmd,
    },
    commands::{
        leaderboard::handle_leaderboard,
        lineup::{handle_lineup_check, handle_lineup_remove, handle_lineup_show, handle_lineup_submit},
        resolve_db_path, resolve_season,
        roster::{
            handle_manager_add, handle_manager_list, handle_map_ids, handle_player_add,
            handle_player_list, handle_team_add, handle_team_list,
        },
        scores::{
            build_source, handle_scores_calc, handle_scores_fetch, handle_scores_set,
            handle_scores_show,
        },
        week::{handle_week_deadline, handle_week_list, handle_week_seed, handle_week_set_locked},
    },
    core::{build_client, DEFAULT_TIMEOUT_SECS},
    stats::SleeperSource,
    storage::LeagueDatabase,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "playoff_ffl=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = PlayoffFfl::parse();
    init_tracing(app.verbose);

    // Scoring a file needs no database
    if let Commands::Scores {
        cmd: ScoresCmd::Calc { file },
    } = &app.command
    {
        handle_scores_calc(file).with_context(|| format!("scoring {}", file.display()))?;
        return Ok(());
    }

    let db_path = resolve_db_path(app.db)?;
    let mut db = LeagueDatabase::open(&db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;
    tracing::debug!(path = %db_path.display(), "database opened");
    let now = Utc::now();

    match app.command {
        Commands::Week { cmd } => match cmd {
            WeekCmd::List { json } => handle_week_list(&db, now, json)?,
            WeekCmd::Seed => handle_week_seed(&mut db)?,
            WeekCmd::Lock { week } => handle_week_set_locked(&mut db, week, true, now)?,
            WeekCmd::Unlock { week } => handle_week_set_locked(&mut db, week, false, now)?,
            WeekCmd::Deadline { week, at, .. } => handle_week_deadline(&mut db, week, at)?,
        },

        Commands::Team { cmd } => match cmd {
            TeamCmd::Add { name, code } => {
                handle_team_add(&mut db, &name, &code)?;
            }
            TeamCmd::List => handle_team_list(&db)?,
        },

        Commands::Player { cmd } => match cmd {
            PlayerCmd::Add {
                name,
                position,
                team,
                external_id,
            } => handle_player_add(&mut db, &name, position, &team, external_id)?,
            PlayerCmd::List { team, json } => handle_player_list(&db, team.as_deref(), json)?,
            PlayerCmd::MapIds { dry_run } => {
                let client = build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS * 6))?;
                let source = SleeperSource::new(client, resolve_season(None)?);
                handle_map_ids(&mut db, &source, dry_run).await?;
            }
        },

        Commands::Manager { cmd } => match cmd {
            ManagerCmd::Add { name } => handle_manager_add(&mut db, &name)?,
            ManagerCmd::List => handle_manager_list(&db)?,
        },

        Commands::Lineup { cmd } => match cmd {
            LineupCmd::Submit {
                manager,
                week,
                slots,
            } => handle_lineup_submit(&mut db, &manager, week, slots.into(), now)?,
            LineupCmd::Check {
                manager,
                week,
                slots,
            } => {
                if !handle_lineup_check(&db, &manager, week, slots.into())? {
                    std::process::exit(1);
                }
            }
            LineupCmd::Show {
                week,
                manager,
                json,
            } => handle_lineup_show(&db, week, manager.as_deref(), json)?,
            LineupCmd::Remove { manager, week } => {
                handle_lineup_remove(&mut db, &manager, week, now)?
            }
        },

        Commands::Scores { cmd } => match cmd {
            ScoresCmd::Fetch {
                week,
                source,
                season,
                concurrency,
                timeout,
                save,
                json,
            } => {
                let timeout = Duration::from_secs(timeout);
                let source = build_source(source, resolve_season(season)?, timeout)?;
                handle_scores_fetch(
                    &mut db,
                    source.as_ref(),
                    week,
                    concurrency,
                    timeout,
                    save,
                    json,
                )
                .await?;
            }
            ScoresCmd::Set {
                week,
                player,
                points,
            } => handle_scores_set(&mut db, week, player, points)?,
            ScoresCmd::Show { week, json } => handle_scores_show(&db, week, json)?,
            ScoresCmd::Calc { .. } => {}
        },

        Commands::Leaderboard { json } => handle_leaderboard(&db, json)?,
    }

    Ok(())
}
