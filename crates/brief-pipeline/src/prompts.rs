//! Prompt templates for the narrative generators
//!
//! Prompt wording and persona are configuration, not contract: everything
//! the generators send to the model is rendered here from named MiniJinja
//! templates, so tuning the wording never touches the orchestration logic.
//! Each generator pairs a system instruction with one rendered user prompt
//! per call.

use crate::error::{PipelineError, Result};
use brief_core::RequestContext;
use minijinja::{Environment, context};

/// System instruction for drafting price-action text
pub const ANALYST_SYSTEM: &str = "You are a concise, factual financial analyst.";

/// System instruction for the answer verify pass
pub const ANSWER_VERIFIER_SYSTEM: &str = "You are a strict fact-checker. \
     You only allow statements grounded in the given news and indicators.";

/// System instruction for drafting the background brief
pub const HISTORIAN_SYSTEM: &str = "You are a careful, neutral crypto historian. \
     You only use the information provided in the context.";

/// System instruction for the history verify pass
pub const HISTORY_VERIFIER_SYSTEM: &str = "You are a strict fact-checker. \
     You only allow statements that are supported by the given sources.";

const OVERVIEW_TEMPLATE: &str = "\
You are a financial analyst.

You are given price data for {{ symbol }} between {{ start_date }} and {{ end_date }}.
Summarize the important changes in price and overall trend in 3-5 sentences.
Be concrete with numbers (approximate is fine) and DO NOT give any investment advice.

Indicators:
- Start price: {{ start_price }}
- End price: {{ end_price }}
- Return (%): {{ return_pct }}
- Max drawdown (%): {{ max_drawdown_pct }}

Sampled prices over time:
{{ chart_text }}

Write a clear, human-friendly paragraph describing:
- overall direction (up, down, sideways),
- approximate magnitude of moves,
- whether the path was smooth or volatile,
- where major dips or peaks occurred (dates + approximate levels).
";

const ANSWER_DRAFT_TEMPLATE: &str = "\
You are a financial analyst.

A user is asking a question about {{ symbol }}. Use the numeric indicators and
the recent news headlines to answer. You are allowed to speculate about
possible causes, but you must use cautious language like \"likely\", \"may\",
or \"could\", and you must NOT give investment advice.

Asset: {{ symbol }}

Indicators:
- Start price: {{ start_price }}
- End price: {{ end_price }}
- Return (%): {{ return_pct }}
- Max drawdown (%): {{ max_drawdown_pct }}

Recent news:
{{ news_text }}

User question:
\"\"\"{{ question }}\"\"\"

Answer in a few concise paragraphs. Clearly explain how the price moved
and how the news might relate to that move. Do not mention that you are an AI.
";

const ANSWER_VERIFY_TEMPLATE: &str = "\
You are verifying an answer about {{ symbol }} against the available news and price indicators.

Indicators:
- Start price: {{ start_price }}
- End price: {{ end_price }}
- Return (%): {{ return_pct }}
- Max drawdown (%): {{ max_drawdown_pct }}

News:
{{ news_text }}

Draft answer:
\"\"\"{{ draft }}\"\"\"

Task:
- Rewrite the answer so that every factual claim is clearly supported by the news and/or indicators.
- Remove or soften any claims that are not clearly grounded in the news or indicators.
- If the user's question cannot be directly answered from these news articles and indicators,
  explicitly say that the available news and price data do not directly answer the question.
- Do NOT introduce any new facts beyond what appears in the news text or indicators.
- It is OK to explain uncertainty, but do not fabricate unseen events or news.
";

const HISTORY_DRAFT_TEMPLATE: &str = "\
You are a crypto historian. Using ONLY the information in the sources below,
write a concise but rich background history for the asset {{ symbol }} (a cryptocurrency).

Your draft must:
- Focus on long-term history, not just recent price moves.
- Cover, when possible:
  * its creation or launch,
  * who created it (if known),
  * what problem it tries to solve,
  * key technical ideas (briefly),
  * major protocol upgrades or forks,
  * important historical events (bubbles, crashes, regulatory moments, hacks, etc.).
- Mention specific years or rough dates when you can.
- Stay factual and neutral. No investment advice or price predictions.
- Optionally reference sources like \"(Source 1)\" when you use them.

Sources:
{{ context_text }}

Now write 2-4 short paragraphs in clear, accessible language.
";

const HISTORY_VERIFY_TEMPLATE: &str = "\
You are verifying a draft historical summary about {{ symbol }} against the sources.

Sources:
{{ context_text }}

Draft summary:
\"\"\"{{ draft }}\"\"\"

Task:
- Rewrite the summary so that EVERY factual claim is directly supported by the sources.
- Remove or soften any claims that are not clearly grounded in the sources.
- If specific details (dates, names, events) are not in the sources, do NOT invent them.
- If some part of the requested history is not covered by the sources, explicitly say
  that the sources do not provide that information.
- Do NOT add any new facts beyond what appears in the Sources.
- Keep the final answer concise (2-4 short paragraphs).
";

/// Render a named template, mapping engine failures into pipeline errors
fn render(name: &str, template: &str, vars: minijinja::Value) -> Result<String> {
    let env = Environment::new();
    env.render_str(template, vars)
        .map_err(|e| PipelineError::Prompt(format!("{name}: {e}")))
}

/// User prompt for the single-pass overview generation
pub fn overview_prompt(ctx: &RequestContext) -> Result<String> {
    render(
        "overview",
        OVERVIEW_TEMPLATE,
        context! {
            symbol => ctx.symbol,
            start_date => ctx.start_date,
            end_date => ctx.end_date,
            start_price => ctx.indicators.start_price,
            end_price => ctx.indicators.end_price,
            return_pct => ctx.indicators.return_pct,
            max_drawdown_pct => ctx.indicators.max_drawdown_pct,
            chart_text => ctx.chart_text.as_deref().unwrap_or(""),
        },
    )
}

/// User prompt for the answer draft pass
pub fn answer_draft_prompt(ctx: &RequestContext, news_text: &str) -> Result<String> {
    render(
        "answer_draft",
        ANSWER_DRAFT_TEMPLATE,
        context! {
            symbol => ctx.symbol,
            start_price => ctx.indicators.start_price,
            end_price => ctx.indicators.end_price,
            return_pct => ctx.indicators.return_pct,
            max_drawdown_pct => ctx.indicators.max_drawdown_pct,
            news_text => news_text,
            question => ctx.question,
        },
    )
}

/// User prompt for the answer verify pass
///
/// Receives the draft text plus the same grounding inputs the draft saw,
/// and nothing else.
pub fn answer_verify_prompt(
    ctx: &RequestContext,
    news_text: &str,
    draft: &str,
) -> Result<String> {
    render(
        "answer_verify",
        ANSWER_VERIFY_TEMPLATE,
        context! {
            symbol => ctx.symbol,
            start_price => ctx.indicators.start_price,
            end_price => ctx.indicators.end_price,
            return_pct => ctx.indicators.return_pct,
            max_drawdown_pct => ctx.indicators.max_drawdown_pct,
            news_text => news_text,
            draft => draft,
        },
    )
}

/// User prompt for the history draft pass
pub fn history_draft_prompt(symbol: &str, context_text: &str) -> Result<String> {
    render(
        "history_draft",
        HISTORY_DRAFT_TEMPLATE,
        context! {
            symbol => symbol,
            context_text => context_text,
        },
    )
}

/// User prompt for the history verify pass
pub fn history_verify_prompt(symbol: &str, context_text: &str, draft: &str) -> Result<String> {
    render(
        "history_verify",
        HISTORY_VERIFY_TEMPLATE,
        context! {
            symbol => symbol,
            context_text => context_text,
            draft => draft,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::{Indicators, RequestContext};

    fn overview_ctx() -> RequestContext {
        let mut ctx = RequestContext::overview(
            "BTC",
            "2024-01-01",
            "2024-03-01",
            Indicators {
                start_price: 42000.0,
                end_price: 44500.0,
                return_pct: 5.95,
                max_drawdown_pct: -3.2,
            },
            vec![],
        );
        ctx.chart_text = Some("2024-01-01: 42000.00\n".to_string());
        ctx
    }

    #[test]
    fn test_overview_prompt_includes_inputs() {
        let prompt = overview_prompt(&overview_ctx()).unwrap();
        assert!(prompt.contains("BTC"));
        assert!(prompt.contains("2024-01-01"));
        assert!(prompt.contains("Start price: 42000"));
        assert!(prompt.contains("Max drawdown (%): -3.2"));
        assert!(prompt.contains("2024-01-01: 42000.00"));
        assert!(prompt.contains("DO NOT give any investment advice"));
    }

    #[test]
    fn test_answer_prompts_carry_question_and_draft() {
        let ctx = RequestContext::answer(
            "ETH",
            Indicators::default(),
            vec![],
            "Why did it move?",
        );

        let draft_prompt = answer_draft_prompt(&ctx, "some news").unwrap();
        assert!(draft_prompt.contains("Why did it move?"));
        assert!(draft_prompt.contains("some news"));

        let verify_prompt = answer_verify_prompt(&ctx, "some news", "the draft text").unwrap();
        assert!(verify_prompt.contains("the draft text"));
        assert!(verify_prompt.contains("some news"));
        assert!(verify_prompt.contains("do not directly answer the question"));
    }

    #[test]
    fn test_history_prompts_carry_sources() {
        let draft = history_draft_prompt("BTC", "[Source 1]\ntitle: x\n").unwrap();
        assert!(draft.contains("[Source 1]"));
        assert!(draft.contains("BTC"));

        let verify = history_verify_prompt("BTC", "[Source 1]", "draft body").unwrap();
        assert!(verify.contains("draft body"));
        assert!(verify.contains("[Source 1]"));
    }
}
