use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub cache: CacheConfig,
    pub classifier: ClassifierConfig,
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Exchange session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// IANA timezone of the reference exchange
    pub exchange_timezone: String,
    /// Exchange-local hour after which same-day calendar releases are dropped
    pub same_day_cutoff_hour: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exchange_timezone: "America/New_York".to_string(),
            same_day_cutoff_hour: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub news_ttl_secs: u64,
    pub calendar_ttl_secs: u64,
    /// Interval of the best-effort expired-entry sweep (0 disables it)
    pub cleanup_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            news_ttl_secs: 300,
            calendar_ttl_secs: 900,
            cleanup_interval_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Optional LLM classifier; rules are used alone when absent
    pub llm: Option<LlmConfig>,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            llm: None,
            cache_ttl_secs: 3600,
            cache_capacity: 2048,
        }
    }
}

/// OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_ms: u64,
    pub requests_per_minute: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_ms: 4000,
            requests_per_minute: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub finnhub_api_key: Option<String>,
    pub fmp_api_key: Option<String>,
    /// Enables the keyless FairEconomy weekly calendar
    pub fair_economy_enabled: bool,
    pub fetch_timeout_ms: u64,
    pub requests_per_minute: u32,
    /// Serve the built-in calendar when every provider fails
    pub use_static_fallback: bool,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            finnhub_api_key: None,
            fmp_api_key: None,
            fair_economy_enabled: true,
            fetch_timeout_ms: 8000,
            requests_per_minute: 30,
            use_static_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.session.exchange_timezone, "America/New_York");
        assert_eq!(config.session.same_day_cutoff_hour, 12);
        assert!(config.classifier.llm.is_none());
        assert!(config.providers.use_static_fallback);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"cache":{"news_ttl_secs":60}}"#).unwrap();
        assert_eq!(config.cache.news_ttl_secs, 60);
        assert_eq!(config.cache.calendar_ttl_secs, 900);
        assert_eq!(config.server.port, 8080);
    }
}
