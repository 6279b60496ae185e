use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::errors::LoxbenchError;

pub const DEFAULT_BENCHMARK_DIR: &str = "tests/benchmarks/lox";
pub const DEFAULT_EXTENSION: &str = "lox";
pub const DEFAULT_RUNS: usize = 5;
pub const DEFAULT_COOLDOWN_MS: u64 = 2000;

const LOCAL_SETTINGS_FILE: &str = "loxbench.toml";

/// Optional suite settings, as read from a TOML file or collected from CLI flags.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub benchmark_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub runs: Option<usize>,
    pub cooldown_ms: Option<u64>,
}

impl Settings {
    /// Read settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, LoxbenchError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoxbenchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| LoxbenchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find the settings file to use.
    ///
    /// An explicit path must exist. Otherwise `./loxbench.toml` is tried, then
    /// `<config dir>/loxbench/config.toml`; when neither exists the defaults apply.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, LoxbenchError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = Path::new(LOCAL_SETTINGS_FILE);
        if local.is_file() {
            return Self::load(local);
        }

        if let Some(user) = dirs::config_dir().map(|d| d.join("loxbench").join("config.toml"))
            && user.is_file()
        {
            return Self::load(&user);
        }

        Ok(Self::default())
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            benchmark_dir: overrides.benchmark_dir.or(self.benchmark_dir),
            extension: overrides.extension.or(self.extension),
            runs: overrides.runs.or(self.runs),
            cooldown_ms: overrides.cooldown_ms.or(self.cooldown_ms),
        }
    }
}

/// Immutable run configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Canonical path of the interpreter under test.
    pub binary: PathBuf,
    pub benchmark_dir: PathBuf,
    /// Source suffix without the leading dot.
    pub extension: String,
    pub runs: usize,
    /// Pause between consecutive runs of the same benchmark.
    pub cooldown: Duration,
}

impl Config {
    pub fn resolve(binary: &Path, settings: Settings) -> Result<Self, LoxbenchError> {
        let runs = settings.runs.unwrap_or(DEFAULT_RUNS);
        if runs == 0 {
            return Err(LoxbenchError::InvalidConfig {
                detail: "runs must be at least 1".to_string(),
            });
        }

        let extension = settings
            .extension
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let extension = extension.trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(LoxbenchError::InvalidConfig {
                detail: "extension must not be empty".to_string(),
            });
        }

        let binary = std::fs::canonicalize(binary).map_err(|source| {
            LoxbenchError::BinaryNotFound {
                path: binary.to_path_buf(),
                source,
            }
        })?;

        Ok(Config {
            binary,
            benchmark_dir: settings
                .benchmark_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BENCHMARK_DIR)),
            extension,
            runs,
            cooldown: Duration::from_millis(settings.cooldown_ms.unwrap_or(DEFAULT_COOLDOWN_MS)),
        })
    }
}
