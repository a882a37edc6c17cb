use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedPaths};

/// Written beside the summary report, one JSON object per tracing event.
pub const TELEMETRY_FILE: &str = "tracker.jsonl";

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Installs the JSON subscriber next to the summary report. Returns `None`
/// when structured logging is disabled. `RUST_LOG` overrides the configured
/// level.
pub fn init_logging(
    logging: &LoggingConfig,
    paths: &ResolvedPaths,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_dir = paths
        .summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&telemetry_dir).with_context(|| {
        format!(
            "creating telemetry directory at {}",
            telemetry_dir.display()
        )
    })?;

    let telemetry_path = telemetry_dir.join(TELEMETRY_FILE);
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed when running under tests.
    let _ = tracing::subscriber::set_global_default(subscriber);
    tracing::info!(
        run_id,
        events = %paths.events.display(),
        resumed = paths.resume_from.is_some(),
        "structured logging enabled"
    );

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

/// Only the tracker crates log at `level`; dependencies stay at `warn`.
/// At `debug` the belief set emits one event per recorded action.
fn default_directive(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    format!("warn,cardcount_core={level},cardcount_replay={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(dir: &Path) -> ResolvedPaths {
        ResolvedPaths {
            events: dir.join("events.jsonl"),
            resume_from: None,
            summary_md: dir.join("run").join("summary.md"),
            snapshot_json: dir.join("run").join("snapshot.json"),
        }
    }

    #[test]
    fn directive_scopes_level_to_tracker_crates() {
        assert_eq!(
            default_directive(Level::DEBUG),
            "warn,cardcount_core=debug,cardcount_replay=debug"
        );
    }

    #[test]
    fn disabled_logging_creates_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let logging = LoggingConfig {
            enable_structured: false,
            ..LoggingConfig::default()
        };
        let guard = init_logging(&logging, &paths(dir.path()), "quiet").unwrap();
        assert!(guard.is_none());
        assert!(!dir.path().join("run").exists());
    }
}
