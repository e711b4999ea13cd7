//! Domain record types shared across the workspace
//!
//! These are the normalized shapes the data collaborators return and the
//! pipeline consumes. The pipeline treats all of them as read-only inputs.

use serde::{Deserialize, Serialize};

/// A single point of a price time series (ISO date + close price in USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Date in `YYYY-MM-DD` form
    pub date: String,
    /// Price in USD
    pub price: f64,
}

impl ChartPoint {
    /// Create a new chart point
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }
}

/// Scalar summary statistics computed from a price series
///
/// Computed upstream by the market-data collaborator; the pipeline injects
/// them into every prompt as read-only numeric facts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// First price in the range
    pub start_price: f64,
    /// Last price in the range
    pub end_price: f64,
    /// Total return over the range, in percent
    pub return_pct: f64,
    /// Worst peak-to-trough drop over the range, in percent (<= 0)
    pub max_drawdown_pct: f64,
}

/// A normalized news record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub snippet: String,
    /// Full article body when the provider supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub url: String,
    pub published_at: String,
}

impl NewsArticle {
    /// The best available body text: full content when present, else snippet
    pub fn body(&self) -> &str {
        self.content.as_deref().unwrap_or(&self.snippet)
    }
}

/// A retrieved background document used as long-term historical source
/// material (web search result or encyclopedia summary)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDoc {
    pub title: String,
    pub snippet: String,
    /// Full document text when the provider supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub url: String,
    pub published_at: String,
}

impl SourceDoc {
    /// The best available body text: full content when present, else snippet
    pub fn body(&self) -> &str {
        self.content.as_deref().unwrap_or(&self.snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_point() {
        let point = ChartPoint::new("2024-01-01", 42000.0);
        assert_eq!(point.date, "2024-01-01");
        assert_eq!(point.price, 42000.0);
    }

    #[test]
    fn test_news_body_prefers_content() {
        let article = NewsArticle {
            title: "Title".to_string(),
            snippet: "Short".to_string(),
            content: Some("Full body".to_string()),
            url: "https://example.com".to_string(),
            published_at: "2024-01-01".to_string(),
        };
        assert_eq!(article.body(), "Full body");
    }

    #[test]
    fn test_news_body_falls_back_to_snippet() {
        let article = NewsArticle {
            title: "Title".to_string(),
            snippet: "Short".to_string(),
            content: None,
            url: "https://example.com".to_string(),
            published_at: "2024-01-01".to_string(),
        };
        assert_eq!(article.body(), "Short");
    }

    #[test]
    fn test_indicators_serialization() {
        let indicators = Indicators {
            start_price: 42000.0,
            end_price: 44500.0,
            return_pct: 5.95,
            max_drawdown_pct: -3.2,
        };
        let json = serde_json::to_string(&indicators).unwrap();
        let back: Indicators = serde_json::from_str(&json).unwrap();
        assert_eq!(back, indicators);
    }
}
