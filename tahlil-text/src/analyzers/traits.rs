//! Analyzer Traits
//!
//! Common interface for the tweet normalizer and its configuration.

use serde::{Deserialize, Serialize};

/// Where the minimum-length filter runs relative to repeat collapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthFilterOrder {
    /// Collapse repeated characters first, then measure the collapsed token.
    AfterCollapse,
    /// Measure the raw Arabic run, then collapse the survivors.
    BeforeCollapse,
}

impl Default for LengthFilterOrder {
    fn default() -> Self {
        LengthFilterOrder::AfterCollapse
    }
}

impl LengthFilterOrder {
    pub fn name(&self) -> &'static str {
        match self {
            LengthFilterOrder::AfterCollapse => "after_collapse",
            LengthFilterOrder::BeforeCollapse => "before_collapse",
        }
    }
}

/// Configuration for the tweet normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Minimum token length, counted in characters
    pub min_token_length: usize,
    /// Remove stop words
    pub remove_stop_words: bool,
    /// Order of the length filter and repeat collapsing
    pub length_filter: LengthFilterOrder,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_token_length: 3,
            remove_stop_words: true,
            length_filter: LengthFilterOrder::AfterCollapse,
        }
    }
}

impl NormalizerConfig {
    /// Config that filters on the raw run length before collapsing.
    pub fn filter_before_collapse() -> Self {
        Self {
            length_filter: LengthFilterOrder::BeforeCollapse,
            ..Self::default()
        }
    }
}

/// Common trait for text analyzers.
pub trait Analyzer: Send + Sync {
    /// Split text into cleaned tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Process text into the tokens used for frequency analysis.
    fn analyze(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_collapses_before_filtering() {
        let config = NormalizerConfig::default();
        assert_eq!(config.min_token_length, 3);
        assert!(config.remove_stop_words);
        assert_eq!(config.length_filter, LengthFilterOrder::AfterCollapse);
    }

    #[test]
    fn test_order_names_match_serde_spelling() {
        for order in [LengthFilterOrder::AfterCollapse, LengthFilterOrder::BeforeCollapse] {
            let json = serde_json::to_string(&order).unwrap();
            assert_eq!(json, format!("\"{}\"", order.name()));
        }
    }

    #[test]
    fn test_config_fills_missing_fields_from_defaults() {
        let config: NormalizerConfig =
            serde_json::from_str(r#"{"length_filter":"before_collapse"}"#).unwrap();
        assert_eq!(config.length_filter, LengthFilterOrder::BeforeCollapse);
        assert_eq!(config.min_token_length, 3);
    }
}
