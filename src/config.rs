use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Dify API
    pub api_server: String,
    pub api_key: String,
    pub username: String,

    // Speech
    pub asr_engine: String,

    // Wake gate
    /// Comma-separated string (Latin or Chinese comma) or a list of strings
    pub wake_words: serde_json::Value,
    pub auto_sleep: bool,
    pub auto_sleep_seconds: u64,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_server: "http://localhost/v1".to_string(),
            api_key: "".to_string(),
            username: "digital-human".to_string(),
            asr_engine: "dify".to_string(),
            wake_words: serde_json::Value::String("小木小木".to_string()),
            auto_sleep: false,
            auto_sleep_seconds: 60,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = path.with_extension("json.corrupt");
                    let _ = std::fs::rename(path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dify-asr")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.asr_engine, "dify");
        assert_eq!(config.wake_words, serde_json::json!("小木小木"));
        assert!(!config.auto_sleep);
        assert_eq!(config.auto_sleep_seconds, 60);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        let restored: Config = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config.api_server, restored.api_server);
        assert_eq!(config.wake_words, restored.wake_words);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.wake_words = serde_json::json!(["hey bot", "小木"]);
        config.save_to(&path).expect("Failed to save");

        let restored = Config::load_from(&path).expect("Failed to load");
        assert_eq!(restored.wake_words, serde_json::json!(["hey bot", "小木"]));
    }

    #[test]
    fn test_config_corrupt_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").expect("Failed to write");

        let config = Config::load_from(&path).expect("Load should not fail");
        assert_eq!(config.asr_engine, "dify");
        assert!(path.with_extension("json.corrupt").exists());
    }

    #[test]
    fn test_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("nope.json")).expect("Load failed");
        assert_eq!(config.username, "digital-human");
    }
}
