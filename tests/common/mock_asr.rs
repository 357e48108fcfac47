//! Mock ASR Engine for Testing
//!
//! Returns predetermined transcripts so plugin tests run without a Dify
//! server.

use async_trait::async_trait;
use dify_asr::asr::AsrEngine;
use dify_asr::audio::AudioClip;
use dify_asr::error::{AsrError, AsrResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock engine that returns queued transcripts in order
pub struct MockAsr {
    transcripts: Mutex<VecDeque<String>>,
    /// Record clip sizes received (for verification)
    pub received: Mutex<Vec<usize>>,
}

impl MockAsr {
    pub fn new(transcripts: Vec<&str>) -> Self {
        Self {
            transcripts: Mutex::new(transcripts.into_iter().map(String::from).collect()),
            received: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AsrEngine for MockAsr {
    async fn transcribe(&self, clip: &AudioClip) -> AsrResult<String> {
        self.received
            .lock()
            .expect("mock lock poisoned")
            .push(clip.data.len());

        Ok(self
            .transcripts
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Mock engine that always fails with an upstream rejection
pub struct FailingAsr;

#[async_trait]
impl AsrEngine for FailingAsr {
    async fn transcribe(&self, _clip: &AudioClip) -> AsrResult<String> {
        Err(AsrError::Upstream {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "workflow unavailable".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
