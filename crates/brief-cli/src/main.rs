//! Command-line interface for marketbrief
//!
//! One subcommand per narrative mode, plus a dependency-readiness probe.
//! Market data failures are fatal (there is nothing to narrate without a
//! price series); news and background-doc failures degrade to empty inputs;
//! generation failures substitute the deterministic indicator narrative so
//! the user always receives some answer.

use anyhow::Context as _;
use brief_core::{NewsArticle, SourceDoc};
use brief_data::{BackgroundDocsClient, DataConfig, MarketDataClient, NewsClient};
use brief_llm::providers::OpenAIProvider;
use brief_pipeline::{fallback, Pipeline, PipelineConfig};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "marketbrief")]
#[command(about = "Grounded narratives about an asset's price history", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize price action over a date range
    Overview {
        /// Asset symbol, e.g. BTC, ETH
        #[arg(short, long)]
        symbol: String,

        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },

    /// Ask a question about the asset's recent move
    Ask {
        /// Asset symbol, e.g. BTC, ETH
        #[arg(short, long)]
        symbol: String,

        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// The question to answer
        #[arg(short, long)]
        question: String,
    },

    /// Generate a long-term background brief for the asset
    History {
        /// Asset symbol, e.g. BTC, ETH
        #[arg(short, long)]
        symbol: String,
    },

    /// Check which provider keys are configured
    Deps,
}

/// Initialize tracing subscriber with default configuration
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    match args.command {
        Command::Overview { symbol, start, end } => run_overview(&symbol, &start, &end).await,
        Command::Ask {
            symbol,
            start,
            end,
            question,
        } => run_ask(&symbol, &start, &end, &question).await,
        Command::History { symbol } => run_history(&symbol).await,
        Command::Deps => {
            print_deps();
            Ok(())
        }
    }
}

fn build_pipeline() -> anyhow::Result<Pipeline> {
    let provider = OpenAIProvider::from_env().context("failed to create OpenAI provider")?;
    Ok(Pipeline::new(Arc::new(provider), PipelineConfig::default()))
}

async fn run_overview(symbol: &str, start: &str, end: &str) -> anyhow::Result<()> {
    let config = DataConfig::from_env();

    // Market baseline first; everything else depends on it.
    let market = MarketDataClient::new(&config)?;
    let history = market.fetch_history(symbol, start, end).await?;

    let pipeline = build_pipeline()?;
    match pipeline
        .run_overview(symbol, start, end, history.indicators, history.chart)
        .await
    {
        Ok(text) => println!("{text}"),
        Err(e) if e.is_contract() => return Err(e.into()),
        Err(e) => {
            error!("overview generation failed: {e}");
            println!(
                "{}",
                fallback::indicator_fallback(symbol, start, end, &history.indicators)
            );
        }
    }

    Ok(())
}

async fn run_ask(symbol: &str, start: &str, end: &str, question: &str) -> anyhow::Result<()> {
    let config = DataConfig::from_env();
    let market = MarketDataClient::new(&config)?;

    // The two fetches are independent; news is best-effort.
    let (history, news) = tokio::join!(
        market.fetch_history(symbol, start, end),
        fetch_news_best_effort(&config, symbol, start, end),
    );
    let history = history?;

    let pipeline = build_pipeline()?;
    match pipeline
        .run_answer(symbol, history.indicators, news, question)
        .await
    {
        Ok(text) => println!("{text}"),
        Err(e) if e.is_contract() => return Err(e.into()),
        Err(e) => {
            error!("answer generation failed: {e}");
            println!(
                "{}",
                fallback::indicator_fallback(symbol, start, end, &history.indicators)
            );
        }
    }

    Ok(())
}

async fn run_history(symbol: &str) -> anyhow::Result<()> {
    let config = DataConfig::from_env();
    let docs = fetch_docs_best_effort(&config, symbol).await;

    let pipeline = build_pipeline()?;
    match pipeline.run_history(symbol, docs).await {
        Ok(text) => println!("{text}"),
        Err(e) if e.is_contract() => return Err(e.into()),
        Err(e) => {
            error!("history generation failed: {e}");
            println!("{}", fallback::history_fallback(symbol));
        }
    }

    Ok(())
}

async fn fetch_news_best_effort(
    config: &DataConfig,
    symbol: &str,
    start: &str,
    end: &str,
) -> Vec<NewsArticle> {
    let client = match NewsClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            warn!("news client unavailable: {e}");
            return Vec::new();
        }
    };

    match client.fetch_news(symbol, start, end, config.max_news).await {
        Ok(news) => news,
        Err(e) => {
            warn!("news fetch failed for {symbol}: {e}");
            Vec::new()
        }
    }
}

async fn fetch_docs_best_effort(config: &DataConfig, symbol: &str) -> Vec<SourceDoc> {
    let client = match BackgroundDocsClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            warn!("background docs client unavailable: {e}");
            return Vec::new();
        }
    };

    match client.fetch_background_docs(symbol, config.max_docs).await {
        Ok(docs) => docs,
        Err(e) => {
            warn!("background docs fetch failed for {symbol}: {e}");
            Vec::new()
        }
    }
}

/// Print readiness of the environment keys the external services need
fn print_deps() {
    const KEYS: &[&str] = &[
        "OPENAI_API_KEY",
        "COINGECKO_API_KEY",
        "NEWS_API_KEY",
        "SERPAPI_KEY",
    ];

    let mut all_ready = true;
    for key in KEYS {
        let ready = std::env::var(key).is_ok_and(|v| !v.is_empty());
        println!("{key}: {}", if ready { "ok" } else { "missing" });
        all_ready &= ready;
    }

    println!("status: {}", if all_ready { "ok" } else { "degraded" });
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_ask() {
        let args = Args::try_parse_from([
            "marketbrief",
            "ask",
            "--symbol",
            "BTC",
            "--start",
            "2024-01-01",
            "--end",
            "2024-03-01",
            "--question",
            "Why did it move?",
        ])
        .unwrap();

        match args.command {
            Command::Ask {
                symbol, question, ..
            } => {
                assert_eq!(symbol, "BTC");
                assert_eq!(question, "Why did it move?");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_missing_question() {
        let result = Args::try_parse_from([
            "marketbrief",
            "ask",
            "--symbol",
            "BTC",
            "--start",
            "2024-01-01",
            "--end",
            "2024-03-01",
        ]);
        assert!(result.is_err());
    }
}
