/*!
 * Error types for the tavernkit utilities.
 *
 * Each concern (translation backends, process launching, locale
 * dictionaries, markup extraction) gets its own error enum built with
 * thiserror. The CLI wraps them with anyhow context.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when calling a translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backend is missing a required setting (URL, key)
    #[error("Provider is not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised while starting the backend server or the tunnel
#[derive(Error, Debug)]
pub enum LauncherError {
    /// The shell could not spawn the command
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        /// Command line handed to the shell
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the process output or waiting on the process failed
    #[error("Failed to read process output: {0}")]
    Output(#[from] std::io::Error),

    /// Creating, opening or reading a server or tunnel log file failed
    #[error("Failed to access log file {path:?}: {source}")]
    LogFile {
        /// Log file path
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading or saving a locale dictionary
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The dictionary file could not be read
    #[error("Failed to read dictionary {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dictionary file is not a JSON object of strings
    #[error("Failed to parse dictionary {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dictionary could not be serialized or written
    #[error("Failed to write dictionary {path:?}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Errors raised while extracting keys from markup
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The marker attribute does not form a valid selector
    #[error("Invalid marker attribute '{0}'")]
    InvalidMarker(String),

    /// A markup file could not be read
    #[error("Failed to read markup file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the markup directory failed
    #[error("Failed to walk directory {path:?}: {message}")]
    Walk { path: PathBuf, message: String },
}
