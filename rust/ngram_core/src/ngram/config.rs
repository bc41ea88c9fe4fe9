//! Index configuration and JSON parsing helpers.

use serde::{Deserialize, Serialize};

use super::error::{NgramError, Result};

/// Default gram size bound (N).
pub const DEFAULT_GRAM_SIZE: usize = 3;

/// Largest accepted gram size. One posting table is allocated per length.
pub const MAX_GRAM_SIZE: usize = 64;

/// Default wildcard byte.
pub const DEFAULT_WILDCARD: u8 = b'*';

/// When gram-intersection candidates are checked against the literal segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyPolicy {
    /// Verify only patterns with two or more literal segments. A single
    /// segment is accepted once each of its covering grams is present in the
    /// value. Those windows may match at separate places (`"hello"` with
    /// N=3 matches `"helxllo"`), and a hash collision can also surface as a
    /// false positive.
    #[default]
    MultiSegment,
    /// Verify every candidate, whatever the segment count.
    Always,
}

/// Configuration fixed at index construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Largest gram length indexed (N). Grams of every length 1..=N are kept.
    pub gram_size: usize,
    /// Byte that means "any sequence of bytes" in a pattern.
    pub wildcard: u8,
    /// When candidates are checked against the literal segments.
    pub verify: VerifyPolicy,
    /// Drop a posting list from its table once its last record is removed.
    pub prune_empty_postings: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            gram_size: DEFAULT_GRAM_SIZE,
            wildcard: DEFAULT_WILDCARD,
            verify: VerifyPolicy::default(),
            prune_empty_postings: true,
        }
    }
}

impl IndexConfig {
    /// Default configuration with the given gram size.
    pub fn new(gram_size: usize) -> Self {
        IndexConfig {
            gram_size,
            ..Default::default()
        }
    }

    pub fn with_wildcard(mut self, wildcard: u8) -> Self {
        self.wildcard = wildcard;
        self
    }

    pub fn with_verify(mut self, verify: VerifyPolicy) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_pruning(mut self, prune_empty_postings: bool) -> Self {
        self.prune_empty_postings = prune_empty_postings;
        self
    }

    /// Reject configurations the index cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.gram_size == 0 || self.gram_size > MAX_GRAM_SIZE {
            return Err(NgramError::InvalidGramSize(self.gram_size));
        }
        Ok(())
    }
}

/// Parse and validate an index config from a JSON string.
///
/// Missing fields take their defaults.
pub fn parse_index_config(json: &str) -> Result<IndexConfig> {
    let config: IndexConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.gram_size, 3);
        assert_eq!(config.wildcard, b'*');
        assert_eq!(config.verify, VerifyPolicy::MultiSegment);
        assert!(config.prune_empty_postings);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = IndexConfig::new(5)
            .with_wildcard(b'%')
            .with_verify(VerifyPolicy::Always)
            .with_pruning(false);
        assert_eq!(config.gram_size, 5);
        assert_eq!(config.wildcard, b'%');
        assert_eq!(config.verify, VerifyPolicy::Always);
        assert!(!config.prune_empty_postings);
    }

    #[test]
    fn test_zero_gram_size_rejected() {
        let err = IndexConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, NgramError::InvalidGramSize(0)));
    }

    #[test]
    fn test_parse_partial_json() {
        let config = parse_index_config(r#"{"gram_size":4,"verify":"always"}"#).unwrap();
        assert_eq!(config.gram_size, 4);
        assert_eq!(config.verify, VerifyPolicy::Always);
        assert_eq!(config.wildcard, b'*');
        assert!(config.prune_empty_postings);
    }

    #[test]
    fn test_parse_empty_object_is_default() {
        let config = parse_index_config("{}").unwrap();
        assert_eq!(config, IndexConfig::default());
    }

    #[test]
    fn test_parse_rejects_zero_gram_size() {
        let err = parse_index_config(r#"{"gram_size":0}"#).unwrap_err();
        assert!(matches!(err, NgramError::InvalidGramSize(0)));
    }

    #[test]
    fn test_oversized_gram_size_rejected() {
        assert!(IndexConfig::new(MAX_GRAM_SIZE).validate().is_ok());
        let err = IndexConfig::new(MAX_GRAM_SIZE + 1).validate().unwrap_err();
        assert!(matches!(err, NgramError::InvalidGramSize(65)));

        let err = parse_index_config(r#"{"gram_size":18446744073709551615}"#).unwrap_err();
        assert!(matches!(err, NgramError::InvalidGramSize(usize::MAX)));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_index_config("{gram_size:").unwrap_err();
        assert!(matches!(err, NgramError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = IndexConfig::new(2).with_verify(VerifyPolicy::Always);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""verify":"always""#));
        assert_eq!(parse_index_config(&json).unwrap(), config);
    }
}
