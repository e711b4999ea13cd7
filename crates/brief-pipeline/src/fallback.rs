//! Deterministic fallback narratives
//!
//! When the language-model capability is unavailable, callers substitute a
//! templated narrative built purely from the numeric indicators so the end
//! user always receives some answer. No model involvement, fully
//! deterministic.

use brief_core::Indicators;

/// Indicator-only substitute for a failed overview or answer generation
pub fn indicator_fallback(
    symbol: &str,
    start_date: &str,
    end_date: &str,
    indicators: &Indicators,
) -> String {
    format!(
        "Between {start_date} and {end_date}, {symbol} moved from {} to {} USD \
         ({}% return). A detailed summary is temporarily unavailable.",
        indicators.start_price, indicators.end_price, indicators.return_pct
    )
}

/// Substitute for a failed background-brief generation
pub fn history_fallback(symbol: &str) -> String {
    format!(
        "This is supposed to be a historical overview of {symbol}, but the \
         summary component failed. Please try again later."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_fallback_is_deterministic() {
        let indicators = Indicators {
            start_price: 42000.0,
            end_price: 44500.0,
            return_pct: 5.95,
            max_drawdown_pct: -3.2,
        };
        let a = indicator_fallback("BTC", "2024-01-01", "2024-03-01", &indicators);
        let b = indicator_fallback("BTC", "2024-01-01", "2024-03-01", &indicators);
        assert_eq!(a, b);
        assert!(a.contains("BTC"));
        assert!(a.contains("42000"));
        assert!(a.contains("5.95% return"));
    }

    #[test]
    fn test_history_fallback_names_symbol() {
        assert!(history_fallback("ETH").contains("ETH"));
    }
}
