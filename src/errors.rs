// src/errors.rs
use thiserror::Error;

use crate::ui::{Phase, Transition};

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Both datasets required: {0}")]
    Validation(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Malformed analysis payload: {0}")]
    MalformedPayload(String),

    #[error("Illegal UI transition {transition:?} from {from:?}")]
    InvalidTransition { from: Phase, transition: Transition },

    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Preview server error: {0}")]
    Server(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;
