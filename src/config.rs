use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::rules::RawRuleConfig;

/// Environment variable naming a default rules file
pub const ENV_RULES_FILE: &str = "BATCH_RENAMER_RULES";
/// Environment variable holding the default date stamp format
pub const ENV_DATE_FORMAT: &str = "BATCH_RENAMER_DATE_FORMAT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read rules file {path}: {message}")]
    RulesFile { path: PathBuf, message: String },
}

/// Defaults picked up from the environment (or a `.env` file)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub rules_file: Option<PathBuf>,
    pub date_format: Option<String>,
}

/// Load defaults from environment variables
///
/// - `BATCH_RENAMER_RULES`: JSON rules file used when none is given
/// - `BATCH_RENAMER_DATE_FORMAT`: date format used when none is given
pub fn config_from_env() -> EnvConfig {
    let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

    EnvConfig {
        rules_file: non_empty(ENV_RULES_FILE).map(PathBuf::from),
        date_format: non_empty(ENV_DATE_FORMAT),
    }
}

/// Read a JSON rules file into the loosely typed rule input
pub fn load_rules_file(path: &Path) -> Result<RawRuleConfig, ConfigError> {
    let file = File::open(path).map_err(|e| ConfigError::RulesFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| ConfigError::RulesFile {
        path: path.to_path_buf(),
        message: format!("Invalid JSON: {}", e),
    })
}

/// Starting rule input before command-line flags are laid over it.
///
/// An explicit rules file wins over the one named in the environment. The
/// environment date format only fills a format the file left empty.
pub fn base_rules(rules_file: Option<&Path>, env: &EnvConfig) -> Result<RawRuleConfig, ConfigError> {
    let file = rules_file.or(env.rules_file.as_deref());

    let mut raw = match file {
        Some(path) => {
            debug!(path = ?path, "Loading rules file");
            load_rules_file(path)?
        }
        None => RawRuleConfig::default(),
    };

    if raw.date_stamp.format.is_none() {
        raw.date_stamp.format = env.date_format.clone();
    }

    Ok(raw)
}
