use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "feeledger.toml";
const ENV_PREFIX: &str = "FEELEDGER";

/// Runtime settings, read from an optional TOML file and then `FEELEDGER_*`
/// environment variables. Command-line flags override both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of the RocksDB payment store; in-memory when unset.
    pub db_path: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `path` (or [`DEFAULT_CONFIG_PATH`]) and the environment.
    /// A missing file is not an error unless `path` names it.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        Self::load_from(file, path.is_some(), None)
    }

    /// `env` replaces the process environment when given.
    fn load_from(
        file: &Path,
        required: bool,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(file).required(required))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
