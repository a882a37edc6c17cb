use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use cardcount_core::belief::BeliefMetrics;
use cardcount_core::game::serialization::TrackerSnapshot;
use cardcount_core::game::session::{GameSession, SessionError, SessionEvent};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ReplayConfig, ResolvedPaths};
use crate::report;

/// Feeds a JSONL event log through a game session and writes the report
/// and snapshot artifacts.
pub struct ReplayRunner {
    config: ReplayConfig,
    paths: ResolvedPaths,
}

/// Summary details returned after a replay.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub events_applied: usize,
    pub events_rejected: usize,
    pub lines_skipped: usize,
    pub hypotheses: usize,
    pub resumed: bool,
    pub metrics: BeliefMetrics,
    pub summary_path: PathBuf,
    pub snapshot_path: PathBuf,
}

impl ReplayRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: ReplayConfig, paths: ResolvedPaths) -> Result<Self, ReplayError> {
        if !paths.events.is_file() {
            return Err(ReplayError::MissingInput {
                path: paths.events.clone(),
            });
        }
        Ok(Self { config, paths })
    }

    /// Builds the session: restored from a snapshot when configured,
    /// otherwise fresh with the seeded starting hands.
    pub fn open_session(&self) -> Result<GameSession, ReplayError> {
        let session_config = self.config.session_config();
        if let Some(path) = self.paths.resume_from.as_ref() {
            let json = fs::read_to_string(path).map_err(|source| ReplayError::Read {
                path: path.clone(),
                source,
            })?;
            let snapshot = TrackerSnapshot::from_json(&json).map_err(|source| {
                ReplayError::Snapshot {
                    path: path.clone(),
                    source,
                }
            })?;
            info!(path = %path.display(), "resuming from snapshot");
            return Ok(GameSession::restore(session_config, snapshot));
        }

        let mut session = GameSession::new(session_config);
        if !self.config.session.seed.is_empty() {
            session.seed(self.config.session.seed.clone())?;
        }
        Ok(session)
    }

    /// Replay every event, then write the Markdown summary and JSON snapshot.
    pub fn run(&self) -> Result<ReplaySummary, ReplayError> {
        let mut session = self.open_session()?;
        let file = File::open(&self.paths.events).map_err(|source| ReplayError::Read {
            path: self.paths.events.clone(),
            source,
        })?;

        let mut events_applied = 0usize;
        let mut events_rejected = 0usize;
        let mut lines_skipped = 0usize;

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|source| ReplayError::Read {
                path: self.paths.events.clone(),
                source,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                lines_skipped += 1;
                continue;
            }

            let value: serde_json::Value =
                serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse {
                    line: line_number,
                    source,
                })?;
            let event = match SessionEvent::deserialize(value) {
                Ok(event) => event,
                Err(err) => {
                    warn!(line = line_number, error = %err, "skipping malformed event");
                    events_rejected += 1;
                    continue;
                }
            };

            match session.apply(event) {
                Ok(_) => events_applied += 1,
                Err(err) => {
                    warn!(line = line_number, error = %err, "event rejected");
                    events_rejected += 1;
                }
            }
        }

        let tracker = session.tracker();
        ensure_parent(self.paths.summary_md.parent())?;
        ensure_parent(self.paths.snapshot_json.parent())?;
        report::write_markdown(&self.paths.summary_md, &self.config.run_id, tracker).map_err(
            |source| ReplayError::Write {
                path: self.paths.summary_md.clone(),
                source,
            },
        )?;
        let snapshot = session.snapshot().to_json().map_err(|source| {
            ReplayError::Snapshot {
                path: self.paths.snapshot_json.clone(),
                source,
            }
        })?;
        fs::write(&self.paths.snapshot_json, snapshot).map_err(|source| ReplayError::Write {
            path: self.paths.snapshot_json.clone(),
            source,
        })?;

        info!(
            run_id = %self.config.run_id,
            events_applied,
            events_rejected,
            hypotheses = tracker.hypothesis_count(),
            "replay complete"
        );

        Ok(ReplaySummary {
            events_applied,
            events_rejected,
            lines_skipped,
            hypotheses: tracker.hypothesis_count(),
            resumed: self.paths.resume_from.is_some(),
            metrics: *tracker.metrics(),
            summary_path: self.paths.summary_md.clone(),
            snapshot_path: self.paths.snapshot_json.clone(),
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), ReplayError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ReplayError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("event log {path:?} does not exist")]
    MissingInput { path: PathBuf },
    #[error("failed to read {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("line {line} is not valid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot {path:?} could not be processed: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("session setup failed: {0}")]
    Session(#[from] SessionError),
}
