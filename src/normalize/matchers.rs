//! One matcher per promotion signal, kept apart from the summary policy so
//! each can be checked on its own.

use once_cell::sync::Lazy;
use regex::Regex;

static PERCENT_OFF_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]{1,3})\s*%\s*off").expect("valid percent-off regex"));

/// `<count>x <symbol?><amount>`; the symbol may be the two-character "R$"
static INSTALLMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,2})\s*x\s*((?:R\$|[€£$])?\s*[0-9][0-9.,]*)")
        .expect("valid installment regex")
});

static NO_INTEREST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)sem\s+juros|s/\s*juros").expect("valid no-interest regex"));

const SHIPPING_WORDS: [&str; 2] = ["shipping", "freight"];
const FREE_WORDS: [&str; 3] = ["free", "gratis", "grátis"];

/// A phrase offers free shipping when it names shipping and "free" anywhere.
pub fn is_free_shipping(phrase: &str) -> bool {
    let lower = phrase.to_lowercase();
    SHIPPING_WORDS.iter().any(|w| lower.contains(w))
        && FREE_WORDS.iter().any(|w| lower.contains(w))
}

/// Every "<n>% off" percentage in the phrase, in order of appearance.
pub fn percent_offs(phrase: &str) -> Vec<u32> {
    PERCENT_OFF_REGEX
        .captures_iter(phrase)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// The first installment offer in the phrase as (count, raw amount text
/// including any symbol). Later offers in the same phrase are ignored.
pub fn installment(phrase: &str) -> Option<(u32, &str)> {
    let caps = INSTALLMENT_REGEX.captures(phrase)?;
    let count = caps.get(1)?.as_str().parse().ok()?;
    let amount = caps.get(2)?.as_str();
    Some((count, amount))
}

/// "sem juros" / "s/juros" in any casing and spacing.
pub fn is_no_interest(phrase: &str) -> bool {
    NO_INTEREST_REGEX.is_match(phrase)
}
