use std::collections::HashSet;

use crate::config::CandidateConfig;

/// Pick promotion-looking snippets out of text blocks scraped from a product page.
///
/// A block qualifies when it is non-blank once trimmed, no longer than
/// `max_len` characters and mentions one of the configured keywords. Exact
/// duplicates are dropped, page order is kept, and at most `max_candidates`
/// are returned.
pub fn collect_promotion_candidates<S: AsRef<str>>(
    texts: &[S],
    config: &CandidateConfig,
) -> Vec<String> {
    let keywords: Vec<String> = config.keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for text in texts {
        if candidates.len() >= config.max_candidates {
            break;
        }
        let text = text.as_ref().trim();
        if text.is_empty() || text.chars().count() > config.max_len {
            continue;
        }
        let lower = text.to_lowercase();
        if !keywords.iter().any(|k| lower.contains(k.as_str())) {
            continue;
        }
        if seen.insert(text.to_string()) {
            candidates.push(text.to_string());
        }
    }

    candidates
}
