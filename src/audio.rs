//! Audio clip model
//!
//! The adapter receives recorded audio either as raw bytes or as a
//! base64-encoded string (the transport used by the digital-human web
//! frontend). Format conversion is out of scope here; the clip just records
//! the container it claims to be.

use crate::error::AsrResult;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Audio container formats accepted by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    /// MIME type used when uploading this clip
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mp3",
        }
    }

    /// File extension used for the upload file name
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
        }
    }

    /// Guess the format from a file extension, defaulting to mp3
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Self::Wav,
            _ => Self::Mp3,
        }
    }
}

/// A single recorded utterance
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Decode a base64-encoded clip as sent by the web frontend
    pub fn from_base64(encoded: &str, format: AudioFormat) -> AsrResult<Self> {
        let data = BASE64.decode(encoded.trim())?;
        Ok(Self { data, format })
    }
}
