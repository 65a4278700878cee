use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbiGenError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{path}:{line}: dev block is never closed")]
    UnterminatedDevBlock { path: PathBuf, line: usize },

    #[error("{path}:{line}: closing dev marker without an opening one")]
    UnexpectedDevEnd { path: PathBuf, line: usize },

    #[error("{path}: no address configured for {name}")]
    UnknownAddress { path: PathBuf, name: String },

    #[error("failed to run compiler `{program}`: {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("compiler exited with {status}: {stderr}")]
    CompilerFailed { status: String, stderr: String },

    #[error("malformed compiler output: {0}")]
    MalformedOutput(String),

    #[error("compiler produced no units for {0}")]
    NoCompiledUnits(String),

    #[error("ABI of {contract} is not a list of descriptors")]
    InvalidAbi { contract: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AbiGenError>;
