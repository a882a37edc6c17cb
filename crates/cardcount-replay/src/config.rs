use cardcount_core::belief::TrackerConfig;
use cardcount_core::game::session::{DEFAULT_PLAYER_COUNT, SessionConfig};
use cardcount_core::model::hand::Hand;
use cardcount_core::model::player::PlayerId;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const PLAYER_COUNT_RANGE: RangeInclusive<u8> = 2..=8;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root replay configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayConfig {
    pub run_id: String,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub tracker: TrackerConfig,
    pub inputs: InputsConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReplayConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ReplayConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.session.validate()?;
        validate_tracker(&self.tracker)?;
        self.inputs.validate(&self.run_id)?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            local_player: self.session.local_player.clone(),
            player_count: self.session.player_count,
            tracker: self.tracker,
        }
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_paths(&self) -> ResolvedPaths {
        ResolvedPaths {
            events: resolve_template(&self.run_id, &self.inputs.events),
            resume_from: self
                .inputs
                .resume_from
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
            snapshot_json: resolve_template(&self.run_id, &self.outputs.snapshot_json),
        }
    }
}

/// Table and starting-hand configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionSection {
    #[serde(default)]
    pub local_player: Option<PlayerId>,
    #[serde(default = "default_player_count")]
    pub player_count: u8,
    #[serde(default)]
    pub seed: BTreeMap<PlayerId, Hand>,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            local_player: None,
            player_count: DEFAULT_PLAYER_COUNT,
            seed: BTreeMap::new(),
        }
    }
}

impl SessionSection {
    fn validate(&self) -> Result<(), ValidationError> {
        if !PLAYER_COUNT_RANGE.contains(&self.player_count) {
            return Err(ValidationError::InvalidField {
                field: "session.player_count".to_string(),
                message: format!(
                    "player count must be between {} and {}",
                    PLAYER_COUNT_RANGE.start(),
                    PLAYER_COUNT_RANGE.end()
                ),
            });
        }

        if self.seed.len() > usize::from(self.player_count) {
            return Err(ValidationError::InvalidField {
                field: "session.seed".to_string(),
                message: format!(
                    "{} starting hands given for {} players",
                    self.seed.len(),
                    self.player_count
                ),
            });
        }

        Ok(())
    }
}

fn default_player_count() -> u8 {
    DEFAULT_PLAYER_COUNT
}

fn validate_tracker(tracker: &TrackerConfig) -> Result<(), ValidationError> {
    if tracker.max_hypotheses == Some(0) {
        return Err(ValidationError::InvalidField {
            field: "tracker.max_hypotheses".to_string(),
            message: "hypothesis cap must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Input artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InputsConfig {
    pub events: String,
    /// Snapshot to resume from instead of starting with the seeded hands.
    #[serde(default)]
    pub resume_from: Option<String>,
}

impl InputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        validate_path("inputs.events", &self.events, run_id)?;
        if let Some(resume_from) = self.resume_from.as_ref() {
            validate_path("inputs.resume_from", resume_from, run_id)?;
        }
        Ok(())
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub summary_md: String,
    pub snapshot_json: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.summary_md", &self.summary_md),
            ("outputs.snapshot_json", &self.snapshot_json),
        ] {
            validate_path(label, value, run_id)?;
        }

        if self.summary_md == self.snapshot_json {
            return Err(ValidationError::InvalidField {
                field: "outputs.snapshot_json".to_string(),
                message: "snapshot and summary must be written to different files".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_path(label: &str, value: &str, run_id: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: label.to_string(),
            message: "path must not be empty".to_string(),
        });
    }

    let resolved = resolve_template(run_id, value);
    if resolved.components().count() == 0 {
        return Err(ValidationError::InvalidField {
            field: label.to_string(),
            message: "resolved path is invalid".to_string(),
        });
    }
    Ok(())
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved input and output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub events: PathBuf,
    pub resume_from: Option<PathBuf>,
    pub summary_md: PathBuf,
    pub snapshot_json: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
