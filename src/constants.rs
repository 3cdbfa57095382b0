//! Heuristic thresholds used by promotion summarization and candidate filtering.
//! These are the defaults for `SummaryConfig` / `CandidateConfig` and can be
//! overridden from the TOML config file.

// Summary backfill
pub const BACKFILL_KEYWORDS: [&str; 5] = ["off", "cupom", "voucher", "frete", "juros"];
pub const MAX_BACKFILL_LEN: usize = 60;
pub const MAX_BACKFILL: usize = 2;
pub const MAX_SUMMARY_PARTS: usize = 3;
pub const FALLBACK_PHRASES: usize = 2;

// Promotion candidate filtering over scraped page text
pub const CANDIDATE_KEYWORDS: [&str; 8] = [
    "promo",
    "promotion",
    "discount",
    "off",
    "coupon",
    "voucher",
    "shipping",
    "installment",
];
pub const MAX_CANDIDATE_LEN: usize = 160;
pub const MAX_CANDIDATES: usize = 20;

/// Separator placed between composed summary parts
pub const SUMMARY_SEPARATOR: &str = "; ";

/// Environment variable naming a TOML config file for the CLI
pub const CONFIG_ENV_VAR: &str = "PRICE_NORMALIZER_CONFIG";

/// Domain suffixes that imply Brazilian locale conventions
pub const BR_DOMAIN_SUFFIX: &str = ".br";
pub const BR_COMMERCIAL_DOMAIN: &str = ".com.br";

/// Returns true when the source URL points at a Brazilian storefront.
pub fn is_br_url(url: &str) -> bool {
    url.ends_with(BR_DOMAIN_SUFFIX) || url.contains(BR_COMMERCIAL_DOMAIN)
}

pub fn default_backfill_keywords() -> Vec<String> {
    BACKFILL_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

pub fn default_candidate_keywords() -> Vec<String> {
    CANDIDATE_KEYWORDS.iter().map(|k| k.to_string()).collect()
}
