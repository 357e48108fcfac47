//! ASR (Automatic Speech Recognition) Module
//!
//! Backends turn a recorded audio clip into a transcript string. The only
//! shipped backend is Dify, which forwards the clip to a remote workflow
//! API.

pub mod dify;

use crate::audio::AudioClip;
use crate::config::Config;
use crate::error::AsrResult;
use async_trait::async_trait;
use std::sync::Arc;

// Re-export main types
pub use dify::DifyAsr;

/// Trait for ASR engines
///
/// A transcript may legitimately be empty; failures are surfaced through
/// the error, never as empty text.
#[async_trait]
pub trait AsrEngine: Send + Sync {
    /// Transcribe one audio clip
    async fn transcribe(&self, clip: &AudioClip) -> AsrResult<String>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Factory to create the configured ASR engine
pub fn create_engine(config: &Config) -> AsrResult<Arc<dyn AsrEngine>> {
    match config.asr_engine.as_str() {
        "dify" => Ok(Arc::new(DifyAsr::new(config)?)),
        other => {
            tracing::warn!("Unknown ASR engine '{}', falling back to dify", other);
            Ok(Arc::new(DifyAsr::new(config)?))
        }
    }
}
