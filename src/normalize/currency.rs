use tracing::trace;

use crate::constants::is_br_url;
use crate::types::CurrencyCode;

/// Infer the currency of a price from its symbol, falling back to the URL's domain.
///
/// Symbols are checked in a fixed priority so "R$" wins over a bare "$". A bare
/// "$" on a Brazilian domain is read as BRL.
pub fn detect(source_url: &str, raw_text: Option<&str>) -> Option<CurrencyCode> {
    let br_domain = is_br_url(source_url);

    let detected = match raw_text {
        Some(raw) if raw.contains("R$") => Some(CurrencyCode::Brl),
        Some(raw) if raw.contains('€') => Some(CurrencyCode::Eur),
        Some(raw) if raw.contains('£') => Some(CurrencyCode::Gbp),
        Some(raw) if raw.contains('$') => {
            if br_domain {
                Some(CurrencyCode::Brl)
            } else {
                Some(CurrencyCode::Usd)
            }
        }
        _ if br_domain => Some(CurrencyCode::Brl),
        _ => None,
    };

    trace!(url = source_url, currency = ?detected, "currency detected");
    detected
}
