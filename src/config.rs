use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    ParseJson { path: PathBuf, source: serde_json::Error },
    /// Validation error.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read config file '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse config file '{}': {}", path.display(), source)
            }
            Self::Validation(msg) => write!(f, "config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    openai_api_key: String,
    telegram_bot_token: String,
    openweathermap_api_key: String,
    newsapi_api_key: String,
    /// ISO 3166-1 alpha-2 country code used for headlines when geolocation
    /// is unavailable (e.g. "us").
    country_code: Option<String>,
    /// OpenWeatherMap city id used for forecasts when geolocation is
    /// unavailable.
    city_id: Option<u64>,
    /// Directory for log files. Defaults to current directory.
    data_dir: Option<String>,
}

pub struct Config {
    pub openai_api_key: String,
    pub telegram_bot_token: String,
    pub openweathermap_api_key: String,
    pub newsapi_api_key: String,
    /// Static fallback country code for headlines.
    pub country_code: Option<String>,
    /// Static fallback city id for forecasts.
    pub city_id: Option<u64>,
    /// Directory for log files.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::ReadFile { path: config_path.clone(), source: e })?;
        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseJson { path: config_path.clone(), source: e })?;

        // Validate required fields
        if file.openai_api_key.is_empty() {
            return Err(ConfigError::Validation("openai_api_key is required".into()));
        }
        if file.telegram_bot_token.is_empty() {
            return Err(ConfigError::Validation("telegram_bot_token is required".into()));
        }
        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let token_parts: Vec<&str> = file.telegram_bot_token.split(':').collect();
        if token_parts.len() != 2 || token_parts[0].parse::<u64>().is_err() || token_parts[1].is_empty() {
            return Err(ConfigError::Validation(
                "telegram_bot_token appears invalid (expected format: 123456789:ABCdefGHI...)".into()
            ));
        }
        if file.openweathermap_api_key.is_empty() {
            return Err(ConfigError::Validation("openweathermap_api_key is required".into()));
        }
        if file.newsapi_api_key.is_empty() {
            return Err(ConfigError::Validation("newsapi_api_key is required".into()));
        }
        if let Some(ref cc) = file.country_code
            && (cc.len() != 2 || !cc.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(ConfigError::Validation(format!(
                "country_code '{cc}' is not a two-letter country code"
            )));
        }

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            openai_api_key: file.openai_api_key,
            telegram_bot_token: file.telegram_bot_token,
            openweathermap_api_key: file.openweathermap_api_key,
            newsapi_api_key: file.newsapi_api_key,
            country_code: file.country_code.map(|cc| cc.to_lowercase()),
            city_id: file.city_id,
            data_dir,
        })
    }
}
