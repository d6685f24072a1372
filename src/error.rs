//! Errors for the fallible edges of the crate.
//!
//! Layout operations never fail; only reading documents and configuration
//! does.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] json5::Error),

    #[error("Invalid graph document: {0}")]
    InvalidDocument(String),

    #[error("Unknown direction '{0}'; use TB or LR")]
    UnknownDirection(String),

    #[error("Unknown layout strategy '{0}'")]
    UnknownStrategy(String),
}
