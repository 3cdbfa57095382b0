//! Price and promotion normalization.
//!
//! Leaf modules each own one heuristic (currency detection, number parsing,
//! money rendering, promotion matching); [`NormalizationFacade`] composes them
//! into the operations the web layer calls. Everything here is pure and
//! synchronous, so a single facade can be shared freely across threads.

pub mod candidates;
pub mod currency;
pub mod matchers;
pub mod money;
pub mod number;
pub mod promotions;

use tracing::debug;

use crate::config::{CandidateConfig, Config, SummaryConfig};
use crate::metrics;
use crate::types::{CurrencyCode, NormalizedPrice, RawPriceInput, RefineInput, Refinement};

#[derive(Debug, Clone, Default)]
pub struct NormalizationFacade {
    summary: SummaryConfig,
    candidates: CandidateConfig,
}

impl NormalizationFacade {
    pub fn new(config: Config) -> Self {
        Self {
            summary: config.summary,
            candidates: config.candidates,
        }
    }

    pub fn summary_config(&self) -> &SummaryConfig {
        &self.summary
    }

    /// Resolve currency and value for a scraped price.
    ///
    /// A non-blank explicit currency code wins over detection, even when it is
    /// not one we recognize (that resolves to `None`). An explicit value wins
    /// over parsing: the heuristics only fill what the caller lacks.
    pub fn normalize_price(&self, input: &RawPriceInput) -> NormalizedPrice {
        let raw_text = input.raw_text.as_deref();

        let currency = match input.explicit_currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => CurrencyCode::parse_lenient(code),
            _ => currency::detect(&input.source_url, raw_text),
        };
        if currency.is_none() {
            metrics::price::currency_unresolved();
        }

        let value = match input.explicit_value {
            Some(value) => {
                metrics::price::normalized("explicit");
                Some(value)
            }
            None => {
                let parsed = number::parse(raw_text, currency, &input.source_url);
                if parsed.is_none() && raw_text.is_some_and(|r| !r.trim().is_empty()) {
                    metrics::price::parse_failed();
                }
                metrics::price::normalized("parsed");
                parsed
            }
        };

        debug!(url = %input.source_url, currency = ?currency, value = ?value, "price normalized");
        NormalizedPrice { currency, value }
    }

    pub fn summarize_promotions<S: AsRef<str>>(
        &self,
        promotions: &[S],
        source_url: &str,
        currency: Option<CurrencyCode>,
    ) -> Option<String> {
        promotions::summarize(promotions, source_url, currency, &self.summary)
    }

    pub fn promotion_candidates<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        candidates::collect_promotion_candidates(texts, &self.candidates)
    }

    /// Heuristic refinement of a forwarded product; merge an external
    /// extractor's answer on top with [`Refinement::merge_external`].
    pub fn refine(&self, input: &RefineInput) -> Refinement {
        let price = self.normalize_price(&RawPriceInput {
            raw_text: input.price_raw.clone(),
            explicit_value: input.price_value,
            explicit_currency: input.price_currency.clone(),
            source_url: input.url.clone(),
        });

        Refinement {
            title: input
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            price_value: price.value,
            price_currency: price.currency,
            has_discount: promotions::has_discount(&input.promotions),
            promo_summary: self.summarize_promotions(&input.promotions, &input.url, price.currency),
        }
    }
}

/// [`NormalizationFacade::normalize_price`] with default configuration
pub fn normalize_price(input: &RawPriceInput) -> NormalizedPrice {
    NormalizationFacade::default().normalize_price(input)
}

/// [`NormalizationFacade::summarize_promotions`] with default configuration
pub fn summarize_promotions<S: AsRef<str>>(
    promotions: &[S],
    source_url: &str,
    currency: Option<CurrencyCode>,
) -> Option<String> {
    NormalizationFacade::default().summarize_promotions(promotions, source_url, currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const US_URL: &str = "https://www.amazon.com/dp/B0TEST";
    const BR_URL: &str = "https://produto.mercadolivre.com.br/MLB-1";

    #[test]
    fn test_explicit_value_wins() {
        let input = RawPriceInput::new(US_URL)
            .with_raw_text("not a price 1.2.3")
            .with_explicit_value(Decimal::from(99));
        let price = normalize_price(&input);
        assert_eq!(price.value, Some(Decimal::from(99)));
        assert_eq!(price.currency, None);
    }

    #[test]
    fn test_explicit_currency_is_uppercased_and_wins() {
        let input = RawPriceInput::new(US_URL)
            .with_raw_text("$ 1.234,56")
            .with_explicit_currency("brl");
        let price = normalize_price(&input);
        assert_eq!(price.currency, Some(CurrencyCode::Brl));
        assert_eq!(price.value, Some(Decimal::from_str("1234.56").unwrap()));
    }

    #[test]
    fn test_unknown_explicit_currency_is_not_redetected() {
        let input = RawPriceInput::new(US_URL)
            .with_raw_text("£12.50")
            .with_explicit_currency("JPY");
        let price = normalize_price(&input);
        assert_eq!(price.currency, None);
        assert_eq!(price.value, Some(Decimal::from_str("12.50").unwrap()));
    }

    #[test]
    fn test_blank_explicit_currency_falls_back_to_detection() {
        let input = RawPriceInput::new(US_URL)
            .with_raw_text("£12.50")
            .with_explicit_currency("  ");
        assert_eq!(normalize_price(&input).currency, Some(CurrencyCode::Gbp));
    }

    #[test]
    fn test_detected_currency_drives_parsing() {
        let input = RawPriceInput::new(BR_URL).with_raw_text("R$ 2.499,00");
        let price = normalize_price(&input);
        assert_eq!(price.currency, Some(CurrencyCode::Brl));
        assert_eq!(price.value, Some(Decimal::from(2499)));
    }

    #[test]
    fn test_nothing_to_work_with() {
        let price = normalize_price(&RawPriceInput::new(US_URL));
        assert_eq!(price, NormalizedPrice::default());
    }

    #[test]
    fn test_refine_builds_heuristic_fields() {
        let facade = NormalizationFacade::default();
        let input = RefineInput {
            url: BR_URL.to_string(),
            title: Some("  Fone Bluetooth  ".to_string()),
            price_raw: Some("R$ 229,99".to_string()),
            price_value: None,
            price_currency: None,
            promotions: vec!["10x R$ 23,00 sem juros".to_string(), "15% OFF no Pix".to_string()],
        };
        let refined = facade.refine(&input);
        assert_eq!(refined.title.as_deref(), Some("Fone Bluetooth"));
        assert_eq!(refined.price_value, Some(Decimal::from_str("229.99").unwrap()));
        assert_eq!(refined.price_currency, Some(CurrencyCode::Brl));
        assert_eq!(refined.has_discount, Some(true));
        assert_eq!(refined.promo_summary.as_deref(), Some("15% OFF; 10x R$23,00 no interest"));
    }

    #[test]
    fn test_refine_without_promotions() {
        let facade = NormalizationFacade::default();
        let input = RefineInput {
            url: US_URL.to_string(),
            price_raw: Some("$19.99".to_string()),
            ..Default::default()
        };
        let refined = facade.refine(&input);
        assert_eq!(refined.price_currency, Some(CurrencyCode::Usd));
        assert_eq!(refined.has_discount, None);
        assert_eq!(refined.promo_summary, None);
    }
}
