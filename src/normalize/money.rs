use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::is_br_url;
use crate::types::CurrencyCode;

/// Symbol used when rendering an amount; Brazilian storefronts always get "R$".
pub fn currency_symbol(currency: Option<CurrencyCode>, source_url: &str) -> &'static str {
    if currency == Some(CurrencyCode::Brl) || is_br_url(source_url) {
        return CurrencyCode::Brl.symbol();
    }
    currency.map_or(CurrencyCode::Usd.symbol(), |c| c.symbol())
}

/// Render an amount as `<symbol><units>.<cents>`, with a decimal comma in
/// Brazilian style. No thousands grouping: this is for short installment
/// displays, and `number::parse` reads the output back unchanged.
pub fn format(
    value: Option<Decimal>,
    currency: Option<CurrencyCode>,
    source_url: &str,
) -> Option<String> {
    let value = value?;
    let symbol = currency_symbol(currency, source_url);

    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    let digits = cents.to_string();

    if currency == Some(CurrencyCode::Brl) || is_br_url(source_url) {
        Some(format!("{}{}", symbol, digits.replace('.', ",")))
    } else {
        Some(format!("{}{}", symbol, digits))
    }
}
