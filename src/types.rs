use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::NormalizerError;

/// Currencies the engine recognizes. Anything else is modeled as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Brl,
    Eur,
    Gbp,
    Usd,
}

impl CurrencyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Brl => "BRL",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Brl => "R$",
            CurrencyCode::Eur => "€",
            CurrencyCode::Gbp => "£",
            CurrencyCode::Usd => "$",
        }
    }

    /// Lenient parse of a caller-supplied code; blank or unknown codes are `None`.
    pub fn parse_lenient(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = NormalizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BRL" => Ok(CurrencyCode::Brl),
            "EUR" => Ok(CurrencyCode::Eur),
            "GBP" => Ok(CurrencyCode::Gbp),
            "USD" => Ok(CurrencyCode::Usd),
            _ => Err(NormalizerError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Price fields as extracted from a page or screenshot, before normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPriceInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_currency: Option<String>,
    #[serde(default)]
    pub source_url: String,
}

impl RawPriceInput {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Default::default()
        }
    }

    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = Some(raw_text.into());
        self
    }

    pub fn with_explicit_value(mut self, value: Decimal) -> Self {
        self.explicit_value = Some(value);
        self
    }

    pub fn with_explicit_currency(mut self, code: impl Into<String>) -> Self {
        self.explicit_currency = Some(code.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
}

/// One "N x amount" offer found in a promotion phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentOffer {
    pub count: u32,
    pub amount: Option<Decimal>,
    pub no_interest: bool,
}

/// Signals pulled out of a deduplicated promotion list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionSignals {
    pub has_free_shipping: bool,
    pub percent_offs: Vec<u32>,
    pub installment_offers: Vec<InstallmentOffer>,
}

/// Product fields forwarded by the web layer for refinement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefineInput {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price_raw: Option<String>,
    #[serde(default)]
    pub price_value: Option<Decimal>,
    #[serde(default)]
    pub price_currency: Option<String>,
    #[serde(default)]
    pub promotions: Vec<String>,
}

/// Refined product fields; also the shape an external extractor reports back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refinement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<CurrencyCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_discount: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_summary: Option<String>,
}

impl Refinement {
    /// Merge with fields reported by an external extractor.
    ///
    /// External title, price, currency and discount flag win when present and the
    /// heuristic values fill the gaps. The heuristic promotion summary is the
    /// opposite: it wins whenever it exists.
    pub fn merge_external(self, external: Refinement) -> Refinement {
        Refinement {
            title: external.title.or(self.title),
            price_value: external.price_value.or(self.price_value),
            price_currency: external.price_currency.or(self.price_currency),
            has_discount: external.has_discount.or(self.has_discount),
            promo_summary: self.promo_summary.or(external.promo_summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_str_is_case_insensitive() {
        assert_eq!("brl".parse::<CurrencyCode>().unwrap(), CurrencyCode::Brl);
        assert_eq!(" Usd ".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert!(matches!(
            "JPY".parse::<CurrencyCode>(),
            Err(NormalizerError::UnknownCurrency(_))
        ));
        assert_eq!(CurrencyCode::parse_lenient(""), None);
    }

    #[test]
    fn test_currency_serializes_as_iso_code() {
        let json = serde_json::to_string(&CurrencyCode::Gbp).unwrap();
        assert_eq!(json, "\"GBP\"");
        let parsed: CurrencyCode = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, CurrencyCode::Eur);
    }

    #[test]
    fn test_normalized_price_omits_absent_fields() {
        let price = NormalizedPrice {
            currency: Some(CurrencyCode::Usd),
            value: None,
        };
        assert_eq!(serde_json::to_string(&price).unwrap(), r#"{"currency":"USD"}"#);
    }

    #[test]
    fn test_merge_external_prefers_heuristic_summary() {
        let heuristic = Refinement {
            title: Some("Scraped title".to_string()),
            price_value: Some(Decimal::new(22999, 2)),
            price_currency: Some(CurrencyCode::Brl),
            has_discount: Some(true),
            promo_summary: Some("10% OFF".to_string()),
        };
        let external = Refinement {
            title: Some("Clean title".to_string()),
            price_value: None,
            price_currency: Some(CurrencyCode::Brl),
            has_discount: None,
            promo_summary: Some("Ten percent off".to_string()),
        };

        let merged = heuristic.merge_external(external);
        assert_eq!(merged.title.as_deref(), Some("Clean title"));
        assert_eq!(merged.price_value, Some(Decimal::new(22999, 2)));
        assert_eq!(merged.has_discount, Some(true));
        assert_eq!(merged.promo_summary.as_deref(), Some("10% OFF"));
    }

    #[test]
    fn test_merge_external_falls_back_to_external_summary() {
        let heuristic = Refinement::default();
        let external = Refinement {
            promo_summary: Some("Free shipping".to_string()),
            ..Default::default()
        };
        let merged = heuristic.merge_external(external);
        assert_eq!(merged.promo_summary.as_deref(), Some("Free shipping"));
    }
}
