//! Formatting stages
//!
//! The three text-preparation stages that run unconditionally, in fixed
//! order, before routing: chart compression, news formatting, and source
//! context building. Each stage takes the request context by value and
//! returns it updated, writes its derived field exactly once, and is a safe
//! no-op when its input collection is empty (the empty-docs case writes the
//! deterministic fallback sentence instead). All three are pure text
//! transforms: same input, byte-identical output.

use brief_core::{Mode, RequestContext};
use std::fmt::Write as _;
use tracing::warn;

/// Maximum chart points rendered into a prompt. Longer series are stride
/// sampled (not averaged) to keep a roughly even temporal spread that
/// always includes the first point.
const MAX_CHART_POINTS: usize = 20;

/// Reduce the price series to a bounded textual sample
///
/// One line per kept point, `"<date>: <price to 2 decimals>"`. An empty
/// chart yields an empty rendering; that is only worth a warning in
/// overview mode, where a chart is expected.
pub fn compress_chart(mut ctx: RequestContext) -> RequestContext {
    if ctx.chart_text.is_some() {
        return ctx;
    }

    if ctx.chart.is_empty() {
        if ctx.mode == Mode::Overview {
            warn!("chart is empty for {} overview request", ctx.symbol);
        }
        ctx.chart_text = Some(String::new());
        return ctx;
    }

    let step = if ctx.chart.len() > MAX_CHART_POINTS {
        ctx.chart.len().div_ceil(MAX_CHART_POINTS)
    } else {
        1
    };

    let mut text = String::new();
    for point in ctx.chart.iter().step_by(step) {
        let _ = writeln!(text, "{}: {:.2}", point.date, point.price);
    }

    ctx.chart_text = Some(text);
    ctx
}

/// Render the news list into prompt text
///
/// One block per record, in input order: publish date, title, body
/// (full content when present, else snippet), URL. The list is never
/// reordered, deduplicated, or truncated here; the upstream provider owns
/// result capping. An empty list is only worth a warning in answer mode,
/// where news is expected.
pub fn format_news(mut ctx: RequestContext) -> RequestContext {
    if ctx.news_text.is_some() {
        return ctx;
    }

    if ctx.news.is_empty() {
        if ctx.mode == Mode::Answer {
            warn!(
                "no news articles available for {}; the news provider may \
                 not have returned results",
                ctx.symbol
            );
        }
        ctx.news_text = Some(String::new());
        return ctx;
    }

    let mut text = String::new();
    for article in &ctx.news {
        let _ = writeln!(text, "published at: {}", article.published_at);
        let _ = writeln!(text, "title: {}", article.title);
        let _ = writeln!(text, "content: {}", article.body());
        let _ = writeln!(text, "URL: {}", article.url);
    }

    ctx.news_text = Some(text);
    ctx
}

/// Build the numbered source block from the background documents
///
/// One `[Source N]` block per document, numbered from 1 in input order.
/// When no documents are available the deterministic fallback sentence is
/// written instead, so the generator sees an explicit statement of the
/// information gap rather than an absent input it could fill by fabricating.
pub fn build_context(mut ctx: RequestContext) -> RequestContext {
    if ctx.context_text.is_some() {
        return ctx;
    }

    if ctx.docs.is_empty() {
        ctx.context_text = Some(empty_context_fallback(&ctx.symbol));
        return ctx;
    }

    let mut text = String::new();
    for (idx, doc) in ctx.docs.iter().enumerate() {
        let _ = writeln!(text, "[Source {}]", idx + 1);
        let _ = writeln!(text, "title: {}", doc.title);
        let _ = writeln!(text, "content: {}", doc.body());
        let _ = writeln!(text, "url: {}", doc.url);
        let _ = writeln!(text, "published_at: {}", doc.published_at);
    }

    ctx.context_text = Some(text);
    ctx
}

/// The deterministic sentence fed to the history generator when no
/// background documents were retrieved
pub fn empty_context_fallback(symbol: &str) -> String {
    format!(
        "This is supposed to be a historical overview of {symbol}, but no \
         background documents were available from the search engine."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::{ChartPoint, Indicators, NewsArticle, SourceDoc};

    fn chart_ctx(n: usize) -> RequestContext {
        let chart = (0..n)
            .map(|i| ChartPoint::new(format!("2024-01-{:02}", (i % 28) + 1), 42000.0 + i as f64))
            .collect();
        RequestContext::overview("BTC", "2024-01-01", "2024-03-01", Indicators::default(), chart)
    }

    fn article(title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            snippet: format!("{title} snippet"),
            content: None,
            url: format!("https://news.example/{title}"),
            published_at: "2024-01-15".to_string(),
        }
    }

    fn doc(title: &str) -> SourceDoc {
        SourceDoc {
            title: title.to_string(),
            snippet: format!("{title} snippet"),
            content: None,
            url: format!("https://docs.example/{title}"),
            published_at: "2023-06-01".to_string(),
        }
    }

    #[test]
    fn test_short_chart_renders_every_point() {
        for n in [1, 5, 20] {
            let ctx = compress_chart(chart_ctx(n));
            let text = ctx.chart_text.unwrap();
            assert_eq!(text.lines().count(), n, "length {n}");
        }
    }

    #[test]
    fn test_long_chart_stride_sampling() {
        for n in [21, 30, 45, 100, 365] {
            let ctx = compress_chart(chart_ctx(n));
            let text = ctx.chart_text.unwrap();
            let step = n.div_ceil(20);
            let expected = n.div_ceil(step);
            assert_eq!(text.lines().count(), expected, "length {n}");
            // First point always survives sampling
            assert!(text.starts_with("2024-01-01: 42000.00"));
        }
    }

    #[test]
    fn test_price_formatted_to_two_decimals() {
        let ctx = RequestContext::overview(
            "BTC",
            "2024-01-01",
            "2024-01-02",
            Indicators::default(),
            vec![ChartPoint::new("2024-01-01", 42000.123_45)],
        );
        let ctx = compress_chart(ctx);
        assert_eq!(ctx.chart_text.as_deref(), Some("2024-01-01: 42000.12\n"));
    }

    #[test]
    fn test_empty_chart_is_not_an_error() {
        let ctx = compress_chart(chart_ctx(0));
        assert_eq!(ctx.chart_text.as_deref(), Some(""));
    }

    #[test]
    fn test_news_rendered_in_input_order() {
        let mut ctx = RequestContext::answer(
            "BTC",
            Indicators::default(),
            vec![article("first"), article("second"), article("third")],
            "Why did it move?",
        );
        ctx = format_news(ctx);
        let text = ctx.news_text.unwrap();

        let first = text.find("title: first").unwrap();
        let second = text.find("title: second").unwrap();
        let third = text.find("title: third").unwrap();
        assert!(first < second && second < third);
        assert_eq!(text.matches("URL: ").count(), 3);
    }

    #[test]
    fn test_news_prefers_full_content() {
        let mut item = article("a");
        item.content = Some("the full story".to_string());
        let ctx = format_news(RequestContext::answer(
            "BTC",
            Indicators::default(),
            vec![item],
            "q",
        ));
        let text = ctx.news_text.unwrap();
        assert!(text.contains("content: the full story"));
        assert!(!text.contains("a snippet"));
    }

    #[test]
    fn test_empty_news_yields_empty_rendering() {
        let ctx = format_news(RequestContext::answer(
            "BTC",
            Indicators::default(),
            vec![],
            "q",
        ));
        assert_eq!(ctx.news_text.as_deref(), Some(""));
    }

    #[test]
    fn test_context_numbering() {
        let ctx = build_context(RequestContext::history(
            "BTC",
            vec![doc("a"), doc("b"), doc("c")],
        ));
        let text = ctx.context_text.unwrap();

        for n in 1..=3 {
            assert_eq!(text.matches(&format!("[Source {n}]")).count(), 1);
        }
        assert!(!text.contains("[Source 4]"));
        let one = text.find("[Source 1]").unwrap();
        let two = text.find("[Source 2]").unwrap();
        assert!(one < two);
    }

    #[test]
    fn test_empty_docs_fallback_names_symbol() {
        let ctx = build_context(RequestContext::history("DOGE", vec![]));
        let text = ctx.context_text.unwrap();
        assert!(text.contains("DOGE"));
        assert!(!text.contains("[Source"));
        assert_eq!(text, empty_context_fallback("DOGE"));
    }

    #[test]
    fn test_stages_are_pure() {
        let a = compress_chart(chart_ctx(45)).chart_text.unwrap();
        let b = compress_chart(chart_ctx(45)).chart_text.unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_derived_fields_are_write_once() {
        let mut ctx = chart_ctx(5);
        ctx.chart_text = Some("already formatted".to_string());
        let ctx = compress_chart(ctx);
        assert_eq!(ctx.chart_text.as_deref(), Some("already formatted"));
    }

    #[test]
    fn test_stage_order_independence() {
        // The stages have no data dependency on each other; applying them
        // in any order yields the same derived fields.
        let base = RequestContext::answer(
            "ETH",
            Indicators::default(),
            vec![article("x")],
            "what happened?",
        );

        let forward = build_context(format_news(compress_chart(base.clone())));
        let reverse = compress_chart(format_news(build_context(base)));

        assert_eq!(forward.chart_text, reverse.chart_text);
        assert_eq!(forward.news_text, reverse.news_text);
        assert_eq!(forward.context_text, reverse.context_text);
    }
}
