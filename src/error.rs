use std::io;

use thiserror::Error;

use crate::dispatch::ParamType;

pub type Result<T> = std::result::Result<T, NclipError>;

#[derive(Debug, Error)]
pub enum NclipError {
    #[error("unclosed string")]
    UnclosedQuote,

    #[error("expected args to be greater than 0")]
    EmptyInvocation,

    #[error("command '{0}' does not exist")]
    CommandNotFound(String),

    #[error("expected {expected} args but got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("argument {position}: expected {expected}, got '{value}'")]
    ArgumentParse {
        position: usize,
        value: String,
        expected: ParamType,
    },

    #[error("{0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid utf-8 path: {0}")]
    InvalidUtfPath(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    #[error("failed to serialize entry: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to initialize telemetry: {0}")]
    TelemetryInit(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("host discovery failed: {0}")]
    Discovery(String),
}
