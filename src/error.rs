//! DifyASR Error Types
//!
//! Centralized error handling for the adapter. The caller needs to tell
//! apart transport failures, upstream rejections (non-success status with a
//! body), and local decode problems. A successfully transcribed empty
//! string is not an error.

use thiserror::Error;

/// Central error type for the ASR adapter
#[derive(Error, Debug)]
pub enum AsrError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream rejected request ({status}): {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("audio decode error: {0}")]
    Audio(#[from] base64::DecodeError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for adapter operations
pub type AsrResult<T> = Result<T, AsrError>;
