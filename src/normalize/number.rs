use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use crate::constants::is_br_url;
use crate::types::CurrencyCode;

/// Parse a scraped price string into a decimal, honoring the separator
/// convention implied by the currency or storefront.
///
/// Brazilian style (`1.234,56`) applies when the currency is BRL, the text
/// carries "R$", or the URL is a `.br` domain. Otherwise a string with both
/// separators uses comma for thousands, and a lone comma is a decimal point.
/// Anything that does not survive that cleanup is `None`, never an error.
pub fn parse(
    raw_text: Option<&str>,
    currency: Option<CurrencyCode>,
    source_url: &str,
) -> Option<Decimal> {
    let raw = raw_text.filter(|r| !r.is_empty())?;

    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if stripped.is_empty() {
        return None;
    }

    let brl_style =
        currency == Some(CurrencyCode::Brl) || raw.contains("R$") || is_br_url(source_url);
    let has_comma = stripped.contains(',');
    let has_dot = stripped.contains('.');

    let canonical = if brl_style {
        stripped.replace('.', "").replace(',', ".")
    } else if has_comma && has_dot {
        stripped.replace(',', "")
    } else if has_comma {
        stripped.replace(',', ".")
    } else {
        stripped
    };

    match Decimal::from_str(&canonical) {
        Ok(value) if value.is_sign_negative() && !value.is_zero() => {
            trace!(raw, canonical = %canonical, "negative price discarded");
            None
        }
        Ok(value) => Some(value.normalize()),
        Err(e) => {
            trace!(raw, canonical = %canonical, error = %e, "price text not parsable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const US_URL: &str = "https://www.example.com/item";
    const BR_URL: &str = "https://www.loja.com.br/item";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_brl_style_with_thousands() {
        assert_eq!(
            parse(Some("R$ 1.234,56"), Some(CurrencyCode::Brl), US_URL),
            Some(dec("1234.56"))
        );
        assert_eq!(parse(Some("R$ 1.234,56"), None, US_URL), Some(dec("1234.56")));
        assert_eq!(parse(Some("1.299"), None, BR_URL), Some(dec("1299")));
    }

    #[test]
    fn test_us_style_comma_thousands() {
        assert_eq!(parse(Some("$1,234.56"), None, US_URL), Some(dec("1234.56")));
        assert_eq!(
            parse(Some("USD 12,345,678.90"), Some(CurrencyCode::Usd), US_URL),
            Some(dec("12345678.9"))
        );
    }

    #[test]
    fn test_lone_comma_is_decimal() {
        assert_eq!(parse(Some("12,5"), None, US_URL), Some(dec("12.5")));
        assert_eq!(
            parse(Some("€ 19,99"), Some(CurrencyCode::Eur), US_URL),
            Some(dec("19.99"))
        );
    }

    #[test]
    fn test_plain_digits_and_period() {
        assert_eq!(parse(Some("229.99"), None, US_URL), Some(dec("229.99")));
        assert_eq!(parse(Some("Price: 42"), None, US_URL), Some(dec("42")));
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(parse(None, None, US_URL), None);
        assert_eq!(parse(Some(""), None, US_URL), None);
        assert_eq!(parse(Some("free!"), None, US_URL), None);
    }

    #[test]
    fn test_malformed_yields_none() {
        // Two decimal points once thousands are handled
        assert_eq!(parse(Some("1.2.3"), None, US_URL), None);
        assert_eq!(parse(Some("R$ 1,2,3"), None, US_URL), None);
        assert_eq!(parse(Some("10-20"), None, US_URL), None);
        assert_eq!(parse(Some("-"), None, US_URL), None);
    }

    #[test]
    fn test_negative_is_discarded() {
        assert_eq!(parse(Some("-5.00"), None, US_URL), None);
    }
}
