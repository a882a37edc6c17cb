use std::path::PathBuf;

use clap::Parser;

use cardcount_core::AppInfo;
use cardcount_core::model::player::PlayerId;
use cardcount_replay::config::{ReplayConfig, ResolvedPaths};
use cardcount_replay::logging::init_logging;
use cardcount_replay::replay::ReplayRunner;

/// Replays an observed game log through the resource tracker.
#[derive(Debug, Parser)]
#[command(
    name = "cardcount",
    author,
    version,
    about = "Belief-state resource tracker replay"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "cardcount.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the JSONL event log to replay.
    #[arg(long, value_name = "FILE")]
    events: Option<String>,

    /// Override the player that "you" resolves to.
    #[arg(long, value_name = "NAME")]
    local_player: Option<String>,

    /// Override the hypothesis cap.
    #[arg(long, value_name = "COUNT")]
    max_hypotheses: Option<usize>,

    /// Exit after validating the configuration (no replay is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReplayConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(events) = cli.events {
        config.inputs.events = events;
    }

    if let Some(local_player) = cli.local_player {
        config.session.local_player = Some(PlayerId::new(local_player)?);
    }

    if let Some(max_hypotheses) = cli.max_hypotheses {
        config.tracker.max_hypotheses = Some(max_hypotheses);
    }

    config.validate()?;

    let paths: ResolvedPaths = config.resolved_paths();
    let run_id = config.run_id.clone();
    let player_count = config.session.player_count;

    println!(
        "{} {}: loaded configuration '{run_id}' for {player_count} players (events: {})",
        AppInfo::name(),
        AppInfo::version(),
        paths.events.display()
    );

    let logging_guard = init_logging(&config.logging, &paths, &run_id)?;

    if cli.validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let runner = ReplayRunner::new(config, paths)?;
    let summary = runner.run()?;
    println!(
        "Replay complete for '{run_id}': {} events applied, {} rejected, {} state{} remaining",
        summary.events_applied,
        summary.events_rejected,
        summary.hypotheses,
        if summary.hypotheses == 1 { "" } else { "s" }
    );
    if summary.metrics.recoveries > 0 {
        println!(
            "  Recovered from {} contradiction{}",
            summary.metrics.recoveries,
            if summary.metrics.recoveries == 1 { "" } else { "s" }
        );
    }
    println!("Summary table: {}", summary.summary_path.display());
    println!("Snapshot: {}", summary.snapshot_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
