//! Configuration management for the trip map server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Connection string; the server refuses to start without one
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Kakao developer keys and endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct KakaoConfig {
    /// Server-side key for the local keyword search API
    pub rest_key: Option<String>,
    /// Browser key for the maps JavaScript SDK
    pub js_key: Option<String>,
    pub search_url: String,
    pub sdk_url: String,
    /// Per-request timeout for keyword searches
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    pub level: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub kakao: KakaoConfig,
    #[serde(default)]
    pub map: MapConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix TRIPMAP_)
            .add_source(
                Environment::with_prefix("TRIPMAP")
                    .separator("_")
                    .try_parsing(true),
            )
            .set_override_option("database.url", non_empty_var("DATABASE_URL"))?
            .set_override_option("kakao.rest_key", non_empty_var("KAKAO_REST_KEY"))?
            .set_override_option("kakao.js_key", non_empty_var("KAKAO_JS_KEY"))?
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.kakao.rest_key = config.kakao.rest_key.filter(|key| !key.is_empty());
        config.kakao.js_key = config.kakao.js_key.filter(|key| !key.is_empty());
        Ok(config)
    }
}

/// Environment variable value, `None` when unset or blank
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl KakaoConfig {
    /// Script URL for the maps SDK, loaded with `autoload=false` so the page
    /// decides when the widget is created
    pub fn sdk_script_url(&self) -> Option<String> {
        self.js_key.as_deref().filter(|key| !key.is_empty()).map(|key| {
            format!(
                "{}?appkey={}&autoload=false&libraries=services",
                self.sdk_url, key
            )
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            min_connections: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self {
            rest_key: None,
            js_key: None,
            search_url: "https://dapi.kakao.com/v2/local/search/keyword.json".to_string(),
            sdk_url: "https://dapi.kakao.com/v2/maps/sdk.js".to_string(),
            timeout_seconds: 5,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        // Hallasan, roughly the middle of Jeju island
        Self {
            center_lat: 33.3617,
            center_lng: 126.5292,
            level: 10,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            kakao: KakaoConfig::default(),
            map: MapConfig::default(),
        }
    }
}
