//! NewsAPI client
//!
//! Best-effort provider: a failure here should degrade to an empty article
//! list at the call site, never abort the request.

use crate::config::DataConfig;
use crate::error::{DataError, Result};
use brief_core::NewsArticle;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Search queries per symbol. Falls back to the raw symbol for anything
/// not in this table.
const SYMBOL_TO_QUERY: &[(&str, &str)] = &[
    ("BTC", "bitcoin OR \"bitcoin price\""),
    ("ETH", "ethereum OR \"ethereum price\""),
    ("AAPL", "Apple Inc OR AAPL OR \"Apple stock\""),
    ("TSLA", "Tesla Inc OR TSLA OR \"Tesla stock\""),
];

/// NewsAPI client
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    api_key: String,
}

impl NewsClient {
    /// Create a new client from configuration
    ///
    /// Requires `news_api_key` to be set.
    pub fn new(config: &DataConfig) -> Result<Self> {
        let api_key = config
            .news_api_key
            .clone()
            .ok_or(DataError::MissingKey("NEWS_API_KEY"))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Fetch recent news for a symbol
    ///
    /// `start_date` and `end_date` are accepted to keep the collaborator
    /// contract shape, but deliberately not forwarded: the NewsAPI free plan
    /// only serves a limited recent window, so the provider's default range
    /// is used instead.
    pub async fn fetch_news(
        &self,
        symbol: &str,
        _start_date: &str,
        _end_date: &str,
        max_articles: usize,
    ) -> Result<Vec<NewsArticle>> {
        let query = symbol_query(symbol);
        let page_size = max_articles.to_string();

        debug!("Fetching news for {symbol} (query: {query})");

        let response = self
            .client
            .get(NEWS_API_URL)
            .header("X-Api-Key", self.api_key.as_str())
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::ApiError {
                provider: "NewsAPI",
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let data: NewsResponse = response.json().await?;

        Ok(data
            .articles
            .into_iter()
            .map(|a| {
                let snippet = a
                    .description
                    .clone()
                    .or_else(|| a.content.clone())
                    .unwrap_or_default();
                NewsArticle {
                    title: a.title.unwrap_or_default(),
                    snippet,
                    content: a.content,
                    url: a.url.unwrap_or_default(),
                    published_at: a.published_at.unwrap_or_default(),
                }
            })
            .collect())
    }
}

fn symbol_query(symbol: &str) -> &str {
    let upper = symbol.to_uppercase();
    SYMBOL_TO_QUERY
        .iter()
        .find(|(s, _)| *s == upper)
        .map_or(symbol, |(_, q)| *q)
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_query_mapping() {
        assert_eq!(symbol_query("BTC"), "bitcoin OR \"bitcoin price\"");
        assert_eq!(symbol_query("btc"), "bitcoin OR \"bitcoin price\"");
        assert_eq!(symbol_query("ADA"), "ADA");
    }

    #[test]
    fn test_article_parsing() {
        let json = r#"{
            "articles": [{
                "title": "Bitcoin rallies",
                "description": "Price up",
                "content": "Full text",
                "url": "https://example.com/a",
                "publishedAt": "2024-01-15T09:00:00Z"
            }]
        }"#;
        let parsed: NewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(parsed.articles[0].title.as_deref(), Some("Bitcoin rallies"));
    }

    #[tokio::test]
    #[ignore] // Requires network access and NEWS_API_KEY
    async fn test_fetch_news() {
        let config = DataConfig::from_env();
        let client = NewsClient::new(&config).unwrap();
        let news = client
            .fetch_news("BTC", "2024-01-01", "2024-02-01", 5)
            .await
            .unwrap();
        assert!(news.len() <= 5);
    }
}
