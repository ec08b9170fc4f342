use std::path::PathBuf;

/// Result type for playlist operations
pub type Result<T> = std::result::Result<T, PlaylistError>;

/// Error types for playlist extraction and downloads
#[derive(thiserror::Error, Debug)]
pub enum PlaylistError {
    #[error("HTTP error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("status code error: {status} {reason} ({url})")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("playlist is not found on the page")]
    NotFound,

    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid track url {src:?}: {source}")]
    InvalidUrl {
        src: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to download file in {attempts} tries")]
    RetriesExhausted { attempts: u32 },

    #[error("cannot create {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlaylistError {
    pub(crate) fn status(url: &str, status: reqwest::StatusCode) -> Self {
        PlaylistError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}
