//! Counters for the normalization engine.
//!
//! Everything goes through the `metrics` facade. Nothing is recorded unless the
//! embedding service installs a recorder, so calling these from the engine has
//! no observable side effect otherwise.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    PricesNormalized,
    PriceParseFailures,
    CurrencyUnresolved,
    SummariesComposed,
    SummariesEmpty,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PricesNormalized => "price_normalizer_prices_normalized_total",
            MetricName::PriceParseFailures => "price_normalizer_parse_failures_total",
            MetricName::CurrencyUnresolved => "price_normalizer_currency_unresolved_total",
            MetricName::SummariesComposed => "price_normalizer_summaries_total",
            MetricName::SummariesEmpty => "price_normalizer_summaries_empty_total",
        }
    }

    pub fn all() -> &'static [MetricName] {
        &[
            MetricName::PricesNormalized,
            MetricName::PriceParseFailures,
            MetricName::CurrencyUnresolved,
            MetricName::SummariesComposed,
            MetricName::SummariesEmpty,
        ]
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod price {
    use super::MetricName;

    /// Record a finished price normalization; `source` is "explicit" or "parsed"
    pub fn normalized(source: &'static str) {
        ::metrics::counter!(MetricName::PricesNormalized.as_str(), "source" => source).increment(1);
    }

    pub fn parse_failed() {
        ::metrics::counter!(MetricName::PriceParseFailures.as_str()).increment(1);
    }

    pub fn currency_unresolved() {
        ::metrics::counter!(MetricName::CurrencyUnresolved.as_str()).increment(1);
    }
}

pub mod summary {
    use super::MetricName;

    pub fn composed() {
        ::metrics::counter!(MetricName::SummariesComposed.as_str()).increment(1);
    }

    pub fn empty() {
        ::metrics::counter!(MetricName::SummariesEmpty.as_str()).increment(1);
    }
}
