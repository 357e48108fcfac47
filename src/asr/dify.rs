//! Dify ASR Backend
//!
//! Two sequential HTTP calls against a Dify workflow API: upload the audio
//! file, then run the transcription workflow with the uploaded file id.
//! The workflow answer carries the transcript at `data.outputs.text`; a
//! missing field degrades to an empty transcript rather than an error.

use crate::asr::AsrEngine;
use crate::audio::AudioClip;
use crate::config::Config;
use crate::error::{AsrError, AsrResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, error};

/// Answer from `POST /files/upload`
#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

/// ASR backend talking to a Dify workflow
pub struct DifyAsr {
    client: reqwest::Client,
    api_server: String,
    api_key: String,
    username: String,
}

impl DifyAsr {
    /// Create a new backend from config
    pub fn new(config: &Config) -> AsrResult<Self> {
        if config.api_server.is_empty() {
            return Err(AsrError::Config("api_server is not set".to_string()));
        }
        if config.api_key.is_empty() {
            return Err(AsrError::Config("api_key is not set".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_server: config.api_server.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            username: config.username.clone(),
        })
    }

    /// Step 1: upload the clip, returns the Dify file id
    async fn upload(&self, clip: &AudioClip) -> AsrResult<String> {
        let part = Part::bytes(clip.data.clone())
            .file_name(format!("audio.{}", clip.format.extension()))
            .mime_str(clip.format.mime_type())?;
        let form = Form::new()
            .part("file", part)
            .text("user", self.username.clone());

        let response = self
            .client
            .post(format!("{}/files/upload", self.api_server))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("❌ Dify file upload error ({}): {}", status, body);
            return Err(AsrError::Upstream { status, body });
        }

        let upload: UploadResponse = serde_json::from_str(&body)?;
        debug!("📤 File uploaded, id: {}", upload.id);
        Ok(upload.id)
    }

    /// Step 2: run the workflow against the uploaded file
    async fn run_workflow(&self, file_id: &str) -> AsrResult<String> {
        let payload = serde_json::json!({
            "inputs": {
                "x": {
                    "transfer_method": "local_file",
                    "upload_file_id": file_id,
                    "type": "audio"
                }
            },
            "response_mode": "blocking",
            "user": self.username,
        });

        let response = self
            .client
            .post(format!("{}/workflows/run", self.api_server))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("❌ Dify workflow error ({}): {}", status, body);
            return Err(AsrError::Upstream { status, body });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(extract_transcript(&value))
    }
}

/// Pull `data.outputs.text` out of the workflow answer, degrading to an
/// empty transcript when the field is missing
fn extract_transcript(value: &serde_json::Value) -> String {
    value
        .pointer("/data/outputs/text")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl AsrEngine for DifyAsr {
    async fn transcribe(&self, clip: &AudioClip) -> AsrResult<String> {
        let file_id = self.upload(clip).await?;
        let transcript = self.run_workflow(&file_id).await?;
        debug!("📝 Engine response: {}", transcript);
        Ok(transcript)
    }

    fn name(&self) -> &'static str {
        "dify"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_transcript() {
        let value = json!({"data": {"outputs": {"text": "hello there"}}});
        assert_eq!(extract_transcript(&value), "hello there");
    }

    #[test]
    fn test_extract_transcript_missing_field_degrades_to_empty() {
        assert_eq!(extract_transcript(&json!({"data": {"outputs": {}}})), "");
        assert_eq!(extract_transcript(&json!({"data": {}})), "");
        assert_eq!(extract_transcript(&json!({})), "");
        // Wrong type also degrades
        assert_eq!(
            extract_transcript(&json!({"data": {"outputs": {"text": 7}}})),
            ""
        );
    }

    #[test]
    fn test_upload_response_parsing() {
        let upload: UploadResponse =
            serde_json::from_str(r#"{"id": "f-123", "name": "audio.mp3"}"#).unwrap();
        assert_eq!(upload.id, "f-123");
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        let mut config = Config::default();
        config.api_key = String::new();
        assert!(matches!(DifyAsr::new(&config), Err(AsrError::Config(_))));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let mut config = Config::default();
        config.api_server = "https://dify.example/v1/".to_string();
        config.api_key = "secret".to_string();
        let asr = DifyAsr::new(&config).unwrap();
        assert_eq!(asr.api_server, "https://dify.example/v1");
    }
}
