//! ASR Plugin Surface
//!
//! Ties a transcription backend to the wake gate. Callers hand in a
//! session id and an audio clip and get back the gated text, with the
//! full transcript attached only when it differs (for UI display).

use crate::asr::AsrEngine;
use crate::audio::AudioClip;
use crate::error::AsrResult;
use crate::gate::WakeGate;
use std::sync::Arc;
use tracing::debug;

/// Result of one recognition round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    /// Text to dispatch downstream; empty when the gate suppressed it
    pub emitted: String,
    /// Full transcript, present only when it differs from `emitted`
    pub full: Option<String>,
}

/// The enclosing ASR plugin: transcribe, then gate
pub struct AsrPlugin {
    engine: Arc<dyn AsrEngine>,
    gate: WakeGate,
}

impl AsrPlugin {
    pub fn new(engine: Arc<dyn AsrEngine>, gate: WakeGate) -> Self {
        Self { engine, gate }
    }

    /// Transcribe one clip and run the wake gate for the session
    pub async fn recognize(&self, session_id: &str, clip: &AudioClip) -> AsrResult<Recognition> {
        let text = self.engine.transcribe(clip).await?;
        debug!(
            "🎙️ [{}] '{}' heard: '{}'",
            self.engine.name(),
            session_id,
            text
        );

        let decision = self.gate.apply(session_id, &text);
        let full = if decision.emitted != decision.full {
            Some(decision.full)
        } else {
            None
        };

        Ok(Recognition {
            emitted: decision.emitted,
            full,
        })
    }

    pub fn gate(&self) -> &WakeGate {
        &self.gate
    }
}
