use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::{NormalizerError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub summary: SummaryConfig,
    pub candidates: CandidateConfig,
}

/// Knobs for the promotion summary backfill and fallback steps
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// A backfilled phrase must contain at least one of these (case-insensitive)
    pub backfill_keywords: Vec<String>,
    /// Longest phrase, in characters, that may be backfilled
    pub max_backfill_len: usize,
    /// How many phrases backfill may add on top of the detected signals
    pub max_backfill: usize,
    /// Upper bound on composed parts once backfill runs
    pub max_parts: usize,
    /// Phrases emitted verbatim when nothing else was composed
    pub fallback_phrases: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            backfill_keywords: constants::default_backfill_keywords(),
            max_backfill_len: constants::MAX_BACKFILL_LEN,
            max_backfill: constants::MAX_BACKFILL,
            max_parts: constants::MAX_SUMMARY_PARTS,
            fallback_phrases: constants::FALLBACK_PHRASES,
        }
    }
}

/// Knobs for picking promotion-looking snippets out of scraped page text
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    pub keywords: Vec<String>,
    pub max_len: usize,
    pub max_candidates: usize,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            keywords: constants::default_candidate_keywords(),
            max_len: constants::MAX_CANDIDATE_LEN,
            max_candidates: constants::MAX_CANDIDATES,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            NormalizerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.summary.max_parts == 0 {
            return Err(NormalizerError::Config(
                "summary.max_parts must be at least 1".to_string(),
            ));
        }
        if self.summary.backfill_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(NormalizerError::Config(
                "summary.backfill_keywords must not contain blank entries".to_string(),
            ));
        }
        if self.candidates.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(NormalizerError::Config(
                "candidates.keywords must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(
            config.summary.backfill_keywords,
            vec!["off", "cupom", "voucher", "frete", "juros"]
        );
        assert_eq!(config.summary.max_backfill_len, 60);
        assert_eq!(config.summary.max_parts, 3);
        assert_eq!(config.candidates.max_len, 160);
        assert_eq!(config.candidates.max_candidates, 20);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [summary]
            max_backfill_len = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.summary.max_backfill_len, 40);
        assert_eq!(config.summary.max_backfill, 2);
        assert_eq!(config.candidates.keywords.len(), 8);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[summary]\nbackfill_keywords = [\"desconto\"]\n\n[candidates]\nmax_candidates = 5"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.summary.backfill_keywords, vec!["desconto"]);
        assert_eq!(config.candidates.max_candidates, 5);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = Config::load("/definitely/not/here/price_normalizer.toml");
        assert!(matches!(result, Err(NormalizerError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_parts() {
        let result = Config::from_toml_str("[summary]\nmax_parts = 0");
        assert!(matches!(result, Err(NormalizerError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_toml_error() {
        let result = Config::from_toml_str("[summary\nmax_parts = ");
        assert!(matches!(result, Err(NormalizerError::Toml(_))));
    }
}
