use crate::error::{Result, VaaniError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default recognize endpoint (Google web speech API shape).
const DEFAULT_SPEECH_API_URL: &str = "https://www.google.com/speech-api/v2/recognize";

/// Default translate endpoint (LibreTranslate-compatible).
const DEFAULT_TRANSLATE_API_URL: &str = "https://libretranslate.com/translate";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub speech_api_url: String,
    pub speech_api_key: Option<String>,
    pub translate_api_url: String,
    pub translate_api_key: Option<String>,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speech_api_url: DEFAULT_SPEECH_API_URL.to_string(),
            speech_api_key: None,
            translate_api_url: DEFAULT_TRANSLATE_API_URL.to_string(),
            translate_api_key: None,
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                if let Ok(file_config) = toml::from_str::<Config>(&contents) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables
        if let Ok(url) = std::env::var("VAANI_SPEECH_API_URL") {
            config.speech_api_url = url;
        }
        if let Ok(key) = std::env::var("VAANI_SPEECH_API_KEY") {
            config.speech_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("VAANI_TRANSLATE_API_URL") {
            config.translate_api_url = url;
        }
        if let Ok(key) = std::env::var("VAANI_TRANSLATE_API_KEY") {
            config.translate_api_key = Some(key);
        }
        if let Ok(bind) = std::env::var("VAANI_BIND") {
            config.bind_addr = bind;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.speech_api_url.trim().is_empty() {
            return Err(VaaniError::Config(
                "speech_api_url must not be empty. Set VAANI_SPEECH_API_URL.".to_string(),
            ));
        }

        if self.translate_api_url.trim().is_empty() {
            return Err(VaaniError::Config(
                "translate_api_url must not be empty. Set VAANI_TRANSLATE_API_URL.".to_string(),
            ));
        }

        if self.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(VaaniError::Config(format!(
                "bind_addr '{}' is not a valid socket address",
                self.bind_addr
            )));
        }

        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vaani").join("config.toml"))
    }
}
