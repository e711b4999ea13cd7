//! Background document retrieval (SerpAPI + Wikipedia)
//!
//! Fetches long-term historical source material for an asset: a Wikipedia
//! summary first (treated as the most important document), then SerpAPI
//! web results. Best-effort overall; a Wikipedia failure is only a warning.

use crate::config::DataConfig;
use crate::error::{DataError, Result};
use brief_core::SourceDoc;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

const SERPAPI_URL: &str = "https://serpapi.com/search.json";
const WIKIPEDIA_SEARCH_URL: &str = "https://en.wikipedia.org/w/api.php";
const WIKIPEDIA_SUMMARY_BASE: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";

/// Background document client
#[derive(Debug, Clone)]
pub struct BackgroundDocsClient {
    client: Client,
    serpapi_key: String,
}

impl BackgroundDocsClient {
    /// Create a new client from configuration
    ///
    /// Requires `serpapi_key` to be set.
    pub fn new(config: &DataConfig) -> Result<Self> {
        let serpapi_key = config
            .serpapi_key
            .clone()
            .ok_or(DataError::MissingKey("SERPAPI_KEY"))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            serpapi_key,
        })
    }

    /// Fetch background documents about an asset
    ///
    /// Wikipedia (if found) is placed first; SerpAPI results fill the rest,
    /// deduplicated by URL and capped at `max_results`.
    pub async fn fetch_background_docs(
        &self,
        symbol: &str,
        max_results: usize,
    ) -> Result<Vec<SourceDoc>> {
        let mut docs: Vec<SourceDoc> = Vec::new();

        if let Some(wiki) = self.fetch_wikipedia_doc(symbol).await {
            docs.push(wiki);
        }

        let query = format!(
            "{symbol} cryptocurrency history, launch date, whitepaper, \
             important protocol upgrades, forks, controversies, major events"
        );

        debug!("Fetching background docs for {symbol} from SerpAPI");

        let num = max_results.to_string();
        let response = self
            .client
            .get(SERPAPI_URL)
            .query(&[
                ("engine", "google"),
                ("q", query.as_str()),
                ("api_key", self.serpapi_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::ApiError {
                provider: "SerpAPI",
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let data: SerpResponse = response.json().await?;

        let mut seen_urls: HashSet<String> =
            docs.iter().map(|d| d.url.clone()).collect();

        for item in data.organic_results {
            if docs.len() >= max_results {
                break;
            }

            let url = item.link.unwrap_or_default();
            if !url.is_empty() && seen_urls.contains(&url) {
                continue;
            }

            let snippet = item.snippet.unwrap_or_default();
            docs.push(SourceDoc {
                title: item.title.unwrap_or_else(|| "Untitled result".to_string()),
                snippet: snippet.clone(),
                content: Some(snippet),
                url: url.clone(),
                published_at: item.date.unwrap_or_default(),
            });
            if !url.is_empty() {
                seen_urls.insert(url);
            }
        }

        Ok(docs)
    }

    /// Try to fetch a Wikipedia page summary for the asset
    ///
    /// Returns None if nothing useful was found; never fails the request.
    async fn fetch_wikipedia_doc(&self, symbol: &str) -> Option<SourceDoc> {
        match self.wikipedia_lookup(symbol).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Wikipedia lookup failed for {symbol}: {e}");
                None
            }
        }
    }

    async fn wikipedia_lookup(&self, symbol: &str) -> Result<Option<SourceDoc>> {
        // Bias the search toward crypto pages.
        let search_query = format!("{symbol} (cryptocurrency)");

        let response = self
            .client
            .get(WIKIPEDIA_SEARCH_URL)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", search_query.as_str()),
                ("format", "json"),
                ("srlimit", "1"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(DataError::NetworkError)?;

        let search: WikiSearchResponse = response.json().await?;
        let Some(top) = search.query.search.into_iter().next() else {
            return Ok(None);
        };

        let summary_url = wikipedia_summary_url(&top.title)?;
        let page_url = summary_url.to_string();

        let summary: WikiSummary = self
            .client
            .get(summary_url)
            .send()
            .await?
            .error_for_status()
            .map_err(DataError::NetworkError)?
            .json()
            .await?;

        let snippet = summary.extract.unwrap_or_default();
        let url = summary
            .content_urls
            .and_then(|u| u.desktop)
            .map(|d| d.page)
            .unwrap_or(page_url);

        Ok(Some(SourceDoc {
            title: format!("Wikipedia: {}", top.title),
            snippet: snippet.clone(),
            content: Some(snippet),
            url,
            // Wikipedia doesn't give a single 'published' date
            published_at: String::new(),
        }))
    }
}

/// Build the REST summary endpoint URL for a page title
fn wikipedia_summary_url(title: &str) -> Result<Url> {
    let base = Url::parse(WIKIPEDIA_SUMMARY_BASE)
        .map_err(|e| DataError::ConfigError(format!("invalid Wikipedia base URL: {e}")))?;
    base.join(&title.replace(' ', "_"))
        .map_err(|e| DataError::ConfigError(format!("invalid Wikipedia title: {e}")))
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<SerpResult>,
}

#[derive(Debug, Deserialize)]
struct SerpResult {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WikiSearchResponse {
    query: WikiSearchQuery,
}

#[derive(Debug, Deserialize)]
struct WikiSearchQuery {
    #[serde(default)]
    search: Vec<WikiSearchHit>,
}

#[derive(Debug, Deserialize)]
struct WikiSearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct WikiSummary {
    extract: Option<String>,
    content_urls: Option<WikiContentUrls>,
}

#[derive(Debug, Deserialize)]
struct WikiContentUrls {
    desktop: Option<WikiDesktopUrl>,
}

#[derive(Debug, Deserialize)]
struct WikiDesktopUrl {
    page: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wikipedia_summary_url() {
        let url = wikipedia_summary_url("Bitcoin Cash").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Bitcoin_Cash"
        );
    }

    #[test]
    fn test_serp_response_parsing() {
        let json = r#"{
            "organic_results": [
                {"title": "Bitcoin history", "snippet": "Launched 2009", "link": "https://a.example", "date": "2023-05-01"},
                {"title": "No link result", "snippet": "s"}
            ]
        }"#;
        let parsed: SerpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.organic_results.len(), 2);
        assert_eq!(parsed.organic_results[1].link, None);
    }

    #[tokio::test]
    #[ignore] // Requires network access and SERPAPI_KEY
    async fn test_fetch_background_docs() {
        let config = DataConfig::from_env();
        let client = BackgroundDocsClient::new(&config).unwrap();
        let docs = client.fetch_background_docs("BTC", 3).await.unwrap();
        assert!(docs.len() <= 3);
    }
}
