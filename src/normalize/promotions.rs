use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;

use super::{matchers, money, number};
use crate::config::SummaryConfig;
use crate::constants::SUMMARY_SEPARATOR;
use crate::metrics;
use crate::types::{CurrencyCode, InstallmentOffer, PromotionSignals};

/// Collapse whitespace runs, trim, and drop empty and case-insensitive repeats.
/// The first spelling of a phrase is the one kept.
pub fn normalize_and_dedupe<S: AsRef<str>>(promotions: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut phrases = Vec::new();

    for promotion in promotions {
        let phrase = promotion.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
        if phrase.is_empty() {
            continue;
        }
        if seen.insert(phrase.to_lowercase()) {
            phrases.push(phrase);
        }
    }

    phrases
}

/// Signals plus, per phrase, whether the phrase fed any of them.
struct Extraction {
    signals: PromotionSignals,
    contributed: Vec<bool>,
}

fn extract(
    phrases: &[String],
    source_url: &str,
    currency: Option<CurrencyCode>,
) -> Extraction {
    let mut signals = PromotionSignals::default();
    let mut contributed = Vec::with_capacity(phrases.len());

    for phrase in phrases {
        let free_shipping = matchers::is_free_shipping(phrase);
        signals.has_free_shipping |= free_shipping;

        let percents = matchers::percent_offs(phrase);
        let installment = matchers::installment(phrase);

        contributed.push(free_shipping || !percents.is_empty() || installment.is_some());
        signals.percent_offs.extend(percents);
        if let Some((count, amount)) = installment {
            signals.installment_offers.push(InstallmentOffer {
                count,
                amount: number::parse(Some(amount), currency, source_url),
                no_interest: matchers::is_no_interest(phrase),
            });
        }
    }

    Extraction { signals, contributed }
}

/// Signals found across an already deduplicated phrase list.
pub fn extract_signals(
    phrases: &[String],
    source_url: &str,
    currency: Option<CurrencyCode>,
) -> PromotionSignals {
    extract(phrases, source_url, currency).signals
}

/// The offer a shopper cares about most: most installments, then the cheapest.
pub fn best_installment(offers: &[InstallmentOffer]) -> Option<&InstallmentOffer> {
    offers.iter().min_by(|a, b| {
        let a_amount = a.amount.unwrap_or(Decimal::ZERO);
        let b_amount = b.amount.unwrap_or(Decimal::ZERO);
        b.count.cmp(&a.count).then_with(|| a_amount.cmp(&b_amount))
    })
}

fn render_installment(
    offer: &InstallmentOffer,
    source_url: &str,
    currency: Option<CurrencyCode>,
) -> String {
    let mut rendered = match money::format(offer.amount, currency, source_url) {
        Some(amount) => format!("{}x {}", offer.count, amount),
        None => format!("{}x", offer.count),
    };
    if offer.no_interest {
        rendered.push_str(" no interest");
    }
    rendered
}

/// Build a short summary of a page's promotions.
///
/// Parts come in a fixed order: best percent off, best installment offer, free
/// shipping. Short keyword-bearing phrases that no signal already covers are
/// backfilled after that, and if nothing at all was composed the first few
/// phrases are returned verbatim. `None` only when there is no non-blank input.
pub fn summarize<S: AsRef<str>>(
    promotions: &[S],
    source_url: &str,
    currency: Option<CurrencyCode>,
    config: &SummaryConfig,
) -> Option<String> {
    let phrases = normalize_and_dedupe(promotions);
    if phrases.is_empty() {
        metrics::summary::empty();
        return None;
    }

    let Extraction { signals, contributed } = extract(&phrases, source_url, currency);
    let mut parts: Vec<String> = Vec::new();

    if let Some(max) = signals.percent_offs.iter().max() {
        parts.push(format!("{}% OFF", max));
    }
    if let Some(offer) = best_installment(&signals.installment_offers) {
        parts.push(render_installment(offer, source_url, currency));
    }
    if signals.has_free_shipping {
        parts.push("Free shipping".to_string());
    }

    let keywords: Vec<String> = config.backfill_keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut backfilled = 0;
    for (phrase, covered) in phrases.iter().zip(&contributed) {
        if parts.len() >= config.max_parts || backfilled >= config.max_backfill {
            break;
        }
        if *covered || phrase.chars().count() > config.max_backfill_len {
            continue;
        }
        let lower = phrase.to_lowercase();
        if !keywords.iter().any(|k| lower.contains(k.as_str())) {
            continue;
        }
        if parts.iter().any(|p| p.to_lowercase() == lower) {
            continue;
        }
        parts.push(phrase.clone());
        backfilled += 1;
    }

    if parts.is_empty() {
        parts = phrases.iter().take(config.fallback_phrases.max(1)).cloned().collect();
    }

    debug!(
        phrases = phrases.len(),
        percent_offs = signals.percent_offs.len(),
        installments = signals.installment_offers.len(),
        free_shipping = signals.has_free_shipping,
        parts = parts.len(),
        "promotion summary composed"
    );
    metrics::summary::composed();

    Some(parts.join(SUMMARY_SEPARATOR))
}

/// Whether the promotions indicate a discount: any promotion at all counts,
/// blank entries included. Unknown (not false) when the list is empty.
pub fn has_discount<S: AsRef<str>>(promotions: &[S]) -> Option<bool> {
    (!promotions.is_empty()).then_some(true)
}
