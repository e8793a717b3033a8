//! Error types for expanse_core.

use expanse_io::IoError;
use thiserror::Error;

/// Errors surfaced by world construction and persistence.
///
/// `World::step` never fails; everything here happens at the edges.
#[derive(Error, Debug)]
pub enum SimError {
    /// The configuration cannot produce a valid world. Not recoverable
    /// without changing the configuration.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Reading or writing a save document failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] IoError),

    /// The TOML configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
