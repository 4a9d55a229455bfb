//! Arabic Tweet Normalizer
//!
//! Turns one raw post into the tokens used for frequency analysis:
//! - punctuation stripping (ASCII set plus the Arabic comma)
//! - extraction of Arabic-script runs, everything else is dropped
//! - collapsing of elongated letters (احببب -> احب)
//! - minimum length and stop-word filtering

use super::stop_words::StopWordSet;
use super::traits::{Analyzer, LengthFilterOrder, NormalizerConfig};

/// Arabic comma, stripped along with ASCII punctuation.
pub const ARABIC_COMMA: char = '\u{060C}';

/// Check if a character is removed by punctuation stripping.
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() || ch == ARABIC_COMMA
}

/// Check if a character is in the Arabic block (U+0600..=U+06FF).
pub fn is_arabic_char(ch: char) -> bool {
    matches!(ch, '\u{0600}'..='\u{06FF}')
}

/// Remove punctuation, leaving every other character untouched.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|&ch| !is_punctuation(ch)).collect()
}

/// Maximal runs of Arabic-block characters, in order.
pub fn arabic_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (is_arabic_char(ch), start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                runs.push(&text[s..idx]);
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        runs.push(&text[s..]);
    }

    runs
}

/// Collapse each run of identical consecutive characters to one character.
pub fn collapse_repeats(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut last: Option<char> = None;

    for ch in word.chars() {
        if last != Some(ch) {
            result.push(ch);
            last = Some(ch);
        }
    }

    result
}

/// Arabic tweet normalizer bound to a stop-word set.
pub struct ArabicNormalizer<'a> {
    config: NormalizerConfig,
    stop_words: &'a StopWordSet,
}

impl<'a> ArabicNormalizer<'a> {
    /// Create a normalizer with the default configuration.
    pub fn new(stop_words: &'a StopWordSet) -> Self {
        Self::with_config(stop_words, NormalizerConfig::default())
    }

    /// Create a normalizer with an explicit configuration.
    pub fn with_config(stop_words: &'a StopWordSet, config: NormalizerConfig) -> Self {
        Self { config, stop_words }
    }

    fn long_enough(&self, token: &str) -> bool {
        token.chars().count() >= self.config.min_token_length
    }

    fn is_stop_word(&self, token: &str) -> bool {
        self.config.remove_stop_words && self.stop_words.contains(token)
    }

    /// Clean a single Arabic run, or drop it.
    fn clean_run(&self, run: &str) -> Option<String> {
        let token = match self.config.length_filter {
            LengthFilterOrder::AfterCollapse => {
                let collapsed = collapse_repeats(run);
                if !self.long_enough(&collapsed) {
                    return None;
                }
                collapsed
            }
            LengthFilterOrder::BeforeCollapse => {
                if !self.long_enough(run) {
                    return None;
                }
                collapse_repeats(run)
            }
        };

        if self.is_stop_word(&token) {
            return None;
        }

        Some(token)
    }
}

impl Analyzer for ArabicNormalizer<'_> {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = strip_punctuation(text);
        arabic_runs(&cleaned)
            .into_iter()
            .filter_map(|run| self.clean_run(run))
            .collect()
    }
}

/// Normalize one post with the default configuration.
pub fn normalize(text: &str, stop_words: &StopWordSet) -> Vec<String> {
    ArabicNormalizer::new(stop_words).analyze(text)
}
