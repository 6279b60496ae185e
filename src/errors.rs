use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum LoxbenchError {
    #[error("Interpreter binary not found at {path}: {source}")]
    BinaryNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Failed to launch interpreter for {benchmark}: {source}")]
    Spawn {
        benchmark: String,
        source: std::io::Error,
    },

    #[error("Interpreter failed on {benchmark} (run {run}): {status}")]
    ExecutionFailed {
        benchmark: String,
        run: usize,
        status: String,
    },

    #[error("Interpreter produced no output for {benchmark} (run {run})")]
    MissingTiming { benchmark: String, run: usize },

    #[error("Could not parse timing from last output line of {benchmark} (run {run}): {line:?}")]
    InvalidTiming {
        benchmark: String,
        run: usize,
        line: String,
    },

    #[error("Failed to write report: {source}")]
    Output { source: std::io::Error },
}
