//! Error types for daemon operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use swagent_state::StateError;

/// Result type alias for daemon operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors surfaced by the daemon's reconfiguration path.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        /// Path of the file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for the record schema.
    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        /// Path of the file.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The desired configuration was rejected by the state core.
    #[error(transparent)]
    State(#[from] StateError),
}
