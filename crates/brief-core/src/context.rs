//! Per-request pipeline state
//!
//! [`RequestContext`] is the working state threaded through the pipeline
//! stages. Each inbound request builds its own instance, the formatting
//! stages populate the derived text fields exactly once, and the selected
//! generator writes `answer`. Nothing is shared between requests.

use crate::error::{Error, Result};
use crate::types::{ChartPoint, Indicators, NewsArticle, SourceDoc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The narrative a request asks for
///
/// A closed enum: typed callers cannot construct an unsupported mode, and
/// the string boundary rejects unknown values in [`Mode::from_str`] before
/// any pipeline work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Short price-action summary from indicators and sampled chart
    Overview,
    /// Grounded answer to a free-text question using indicators and news
    Answer,
    /// Long-term background brief from retrieved source documents
    History,
}

impl Mode {
    /// Stable string form (used in logs and error messages)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Answer => "answer",
            Self::History => "history",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "overview" => Ok(Self::Overview),
            "answer" => Ok(Self::Answer),
            "history" => Ok(Self::History),
            other => Err(Error::UnsupportedMode(other.to_string())),
        }
    }
}

/// Working state for one request
///
/// Raw inputs (`chart`, `news`, `docs`, `indicators`, `question`) are set by
/// the caller and read-only afterwards. Derived text fields are `None` until
/// their formatting stage runs and are written once. `answer` holds the
/// final narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Request mode; set before the pipeline runs, never changed after
    pub mode: Mode,
    /// Asset symbol, e.g. "BTC"
    pub symbol: String,
    /// Range start, ISO date (overview and history requests)
    pub start_date: String,
    /// Range end, ISO date (overview and history requests)
    pub end_date: String,
    /// Numeric summary statistics for the range
    pub indicators: Indicators,
    /// Ordered price series
    pub chart: Vec<ChartPoint>,
    /// Ordered news records
    pub news: Vec<NewsArticle>,
    /// Ordered background documents
    pub docs: Vec<SourceDoc>,
    /// Free-text user question (answer requests)
    pub question: String,

    /// Bounded textual rendering of `chart` (written by the chart stage)
    pub chart_text: Option<String>,
    /// Textual rendering of `news` (written by the news stage)
    pub news_text: Option<String>,
    /// Numbered source block built from `docs` (written by the context stage)
    pub context_text: Option<String>,

    /// Final narrative, written by the selected generator
    pub answer: Option<String>,
}

impl RequestContext {
    fn empty(mode: Mode, symbol: impl Into<String>) -> Self {
        Self {
            mode,
            symbol: symbol.into(),
            start_date: String::new(),
            end_date: String::new(),
            indicators: Indicators::default(),
            chart: Vec::new(),
            news: Vec::new(),
            docs: Vec::new(),
            question: String::new(),
            chart_text: None,
            news_text: None,
            context_text: None,
            answer: None,
        }
    }

    /// Build the state for an overview request
    pub fn overview(
        symbol: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        indicators: Indicators,
        chart: Vec<ChartPoint>,
    ) -> Self {
        let mut ctx = Self::empty(Mode::Overview, symbol);
        ctx.start_date = start_date.into();
        ctx.end_date = end_date.into();
        ctx.indicators = indicators;
        ctx.chart = chart;
        ctx
    }

    /// Build the state for a question-answering request
    pub fn answer(
        symbol: impl Into<String>,
        indicators: Indicators,
        news: Vec<NewsArticle>,
        question: impl Into<String>,
    ) -> Self {
        let mut ctx = Self::empty(Mode::Answer, symbol);
        ctx.indicators = indicators;
        ctx.news = news;
        ctx.question = question.into();
        ctx
    }

    /// Build the state for a background-brief request
    pub fn history(symbol: impl Into<String>, docs: Vec<SourceDoc>) -> Self {
        let mut ctx = Self::empty(Mode::History, symbol);
        ctx.docs = docs;
        ctx
    }

    /// Check that every field the selected mode requires is present
    ///
    /// Runs synchronously before any formatting stage or model call. An
    /// empty chart, news list, or document list is NOT a contract violation;
    /// those degrade to empty or fallback text downstream.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::MissingField {
                mode: self.mode,
                field: "symbol",
            });
        }

        match self.mode {
            Mode::Overview => {
                if self.start_date.trim().is_empty() {
                    return Err(Error::MissingField {
                        mode: self.mode,
                        field: "start_date",
                    });
                }
                if self.end_date.trim().is_empty() {
                    return Err(Error::MissingField {
                        mode: self.mode,
                        field: "end_date",
                    });
                }
            }
            Mode::Answer => {
                if self.question.trim().is_empty() {
                    return Err(Error::MissingField {
                        mode: self.mode,
                        field: "question",
                    });
                }
            }
            Mode::History => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        for mode in [Mode::Overview, Mode::Answer, Mode::History] {
            let parsed: Mode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn test_mode_rejects_unknown() {
        let err = "ask_the_oracle".parse::<Mode>().unwrap_err();
        match err {
            Error::UnsupportedMode(s) => assert_eq!(s, "ask_the_oracle"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overview_constructor_defaults() {
        let ctx = RequestContext::overview(
            "BTC",
            "2024-01-01",
            "2024-03-01",
            Indicators::default(),
            vec![],
        );
        assert_eq!(ctx.mode, Mode::Overview);
        assert!(ctx.news.is_empty());
        assert!(ctx.docs.is_empty());
        assert!(ctx.question.is_empty());
        assert!(ctx.chart_text.is_none());
        assert!(ctx.answer.is_none());
    }

    #[test]
    fn test_validate_requires_symbol() {
        let ctx = RequestContext::history("", vec![]);
        let err = ctx.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                field: "symbol",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_overview_requires_dates() {
        let ctx = RequestContext::overview("BTC", "", "2024-03-01", Indicators::default(), vec![]);
        let err = ctx.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                field: "start_date",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_answer_requires_question() {
        let ctx = RequestContext::answer("ETH", Indicators::default(), vec![], "  ");
        let err = ctx.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                field: "question",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_history_allows_empty_docs() {
        let ctx = RequestContext::history("BTC", vec![]);
        assert!(ctx.validate().is_ok());
    }
}
