use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cache::ResourceKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProvidersConfig,

    pub cache: CacheConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:wayfarer.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: String,

    pub base_url: String,
}

impl ProviderConfig {
    fn with_base_url(base_url: &str) -> Self {
        Self {
            api_key: String::new(),
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Per-request timeout for upstream calls; expiry surfaces as a
    /// fetch failure, never as a hung request.
    pub request_timeout_seconds: u64,

    pub geocode: ProviderConfig,

    pub weather: ProviderConfig,

    pub events: ProviderConfig,

    pub movies: ProviderConfig,

    pub yelp: ProviderConfig,

    pub trails: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            geocode: ProviderConfig::with_base_url("https://maps.googleapis.com/maps/api/geocode"),
            weather: ProviderConfig::with_base_url("https://api.darksky.net"),
            events: ProviderConfig::with_base_url("https://www.eventbriteapi.com/v3"),
            movies: ProviderConfig::with_base_url("https://api.themoviedb.org/3"),
            yelp: ProviderConfig::with_base_url("https://api.yelp.com/v3"),
            trails: ProviderConfig::with_base_url("https://www.hikingproject.com/data"),
        }
    }
}

/// One TTL per resource kind, in seconds. These are plain configuration
/// constants; the freshness policy treats them as opaque durations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub location_ttl_seconds: u64,

    pub weather_ttl_seconds: u64,

    pub events_ttl_seconds: u64,

    pub movies_ttl_seconds: u64,

    pub reviews_ttl_seconds: u64,

    pub trails_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            location_ttl_seconds: 30 * 24 * 60 * 60,
            weather_ttl_seconds: 15 * 60,
            events_ttl_seconds: 24 * 60 * 60,
            movies_ttl_seconds: 7 * 24 * 60 * 60,
            reviews_ttl_seconds: 24 * 60 * 60,
            trails_ttl_seconds: 7 * 24 * 60 * 60,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl_seconds(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Location => self.location_ttl_seconds,
            ResourceKind::Weather => self.weather_ttl_seconds,
            ResourceKind::Events => self.events_ttl_seconds,
            ResourceKind::Movies => self.movies_ttl_seconds,
            ResourceKind::Reviews => self.reviews_ttl_seconds,
            ResourceKind::Trails => self.trails_ttl_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                let mut config = Self::load_from_path(path)?;
                config.apply_env_overrides();
                return Ok(config);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Provider API keys follow the original deployment convention of
    /// living in the environment (via dotenv) rather than the config
    /// file; an env var wins over a file value.
    pub fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut ProviderConfig); 6] = [
            ("GEOCODE_API_KEY", &mut self.providers.geocode),
            ("WEATHER_API_KEY", &mut self.providers.weather),
            ("EVENTS_API_KEY", &mut self.providers.events),
            ("MOVIES_API_KEY", &mut self.providers.movies),
            ("YELP_API_KEY", &mut self.providers.yelp),
            ("TRAILS_API_KEY", &mut self.providers.trails),
        ];

        for (var, provider) in overrides {
            if let Ok(key) = std::env::var(var)
                && !key.is_empty()
            {
                provider.api_key = key;
            }
        }

        if let Ok(url) = std::env::var("DATABASE_URL")
            && !url.is_empty()
        {
            self.general.database_path = url;
        }

        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("wayfarer").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".wayfarer").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.max_db_connections == 0 {
            anyhow::bail!("Database pool must allow at least one connection");
        }

        let ttls = [
            (ResourceKind::Location, self.cache.location_ttl_seconds),
            (ResourceKind::Weather, self.cache.weather_ttl_seconds),
            (ResourceKind::Events, self.cache.events_ttl_seconds),
            (ResourceKind::Movies, self.cache.movies_ttl_seconds),
            (ResourceKind::Reviews, self.cache.reviews_ttl_seconds),
            (ResourceKind::Trails, self.cache.trails_ttl_seconds),
        ];

        for (kind, ttl) in ttls {
            if ttl == 0 {
                anyhow::bail!("Cache TTL for {kind} must be > 0 seconds");
            }
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("Provider request timeout must be > 0 seconds");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cache.weather_ttl_seconds, 900);
        assert_eq!(config.cache.events_ttl_seconds, 86_400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[cache]"));
        assert!(toml_str.contains("[providers.geocode]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [cache]
            weather_ttl_seconds = 60
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.cache.weather_ttl_seconds, 60);

        assert_eq!(config.cache.movies_ttl_seconds, 7 * 24 * 60 * 60);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = Config::default();
        config.cache.weather_ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_lookup_per_kind() {
        let cache = CacheConfig::default();
        assert_eq!(cache.ttl_seconds(ResourceKind::Weather), 900);
        assert_eq!(cache.ttl_seconds(ResourceKind::Reviews), 86_400);
    }
}
