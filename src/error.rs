use std::io;

use thiserror::Error;

/// Configuration-time failures. Conformance itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("mask must be a string or an array, got {0}")]
    InvalidMaskSpec(&'static str),
    #[error("invalid mask element at index {index}: {reason}")]
    InvalidMaskElement { index: usize, reason: String },
    #[error("placeholder key {0:?} must be exactly one character")]
    InvalidPlaceholderKey(String),
    #[error("unknown mask {name:?}, use any of {known:?}")]
    UnknownMask { name: String, known: Vec<String> },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to parse yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
