//! Configuration for data provider clients

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration shared by the data provider clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CoinGecko API key (demo tier)
    pub coingecko_api_key: Option<String>,

    /// NewsAPI key
    pub news_api_key: Option<String>,

    /// SerpAPI key
    pub serpapi_key: Option<String>,

    /// Request timeout for all provider calls
    pub request_timeout: Duration,

    /// Maximum news articles to request per call
    pub max_news: usize,

    /// Maximum background documents to request per call
    pub max_docs: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            coingecko_api_key: None,
            news_api_key: None,
            serpapi_key: None,
            request_timeout: Duration::from_secs(15),
            max_news: 5,
            max_docs: 5,
        }
    }
}

impl DataConfig {
    /// Create a new configuration builder
    pub fn builder() -> DataConfigBuilder {
        DataConfigBuilder::default()
    }

    /// Load all provider keys from the environment
    ///
    /// Reads `COINGECKO_API_KEY`, `NEWS_API_KEY`, and `SERPAPI_KEY`. Missing
    /// keys are left unset; each client checks its own key at call time so a
    /// partially configured environment still serves the requests it can.
    pub fn from_env() -> Self {
        Self {
            coingecko_api_key: std::env::var("COINGECKO_API_KEY").ok(),
            news_api_key: std::env::var("NEWS_API_KEY").ok(),
            serpapi_key: std::env::var("SERPAPI_KEY").ok(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_news == 0 {
            return Err(DataError::ConfigError(
                "max_news must be greater than 0".to_string(),
            ));
        }
        if self.max_docs == 0 {
            return Err(DataError::ConfigError(
                "max_docs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for DataConfig
#[derive(Debug, Default)]
pub struct DataConfigBuilder {
    coingecko_api_key: Option<String>,
    news_api_key: Option<String>,
    serpapi_key: Option<String>,
    request_timeout: Option<Duration>,
    max_news: Option<usize>,
    max_docs: Option<usize>,
}

impl DataConfigBuilder {
    /// Set the CoinGecko API key
    pub fn coingecko_api_key(mut self, key: impl Into<String>) -> Self {
        self.coingecko_api_key = Some(key.into());
        self
    }

    /// Set the NewsAPI key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set the SerpAPI key
    pub fn serpapi_key(mut self, key: impl Into<String>) -> Self {
        self.serpapi_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the maximum news articles per call
    pub fn max_news(mut self, max: usize) -> Self {
        self.max_news = Some(max);
        self
    }

    /// Set the maximum background documents per call
    pub fn max_docs(mut self, max: usize) -> Self {
        self.max_docs = Some(max);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DataConfig> {
        let defaults = DataConfig::default();

        let config = DataConfig {
            coingecko_api_key: self.coingecko_api_key,
            news_api_key: self.news_api_key,
            serpapi_key: self.serpapi_key,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_news: self.max_news.unwrap_or(defaults.max_news),
            max_docs: self.max_docs.unwrap_or(defaults.max_docs),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DataConfig::default();
        assert_eq!(config.max_news, 5);
        assert_eq!(config.max_docs, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DataConfig::builder()
            .news_api_key("test_key")
            .max_news(3)
            .request_timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(config.news_api_key.as_deref(), Some("test_key"));
        assert_eq!(config.max_news, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_validation_rejects_zero_limits() {
        assert!(DataConfig::builder().max_news(0).build().is_err());
        assert!(DataConfig::builder().max_docs(0).build().is_err());
    }
}
