//! Text Analyzers Module
//!
//! Arabic tweet normalization and the stop-word set it filters against.

mod arabic;
mod stop_words;
mod traits;

pub use arabic::{
    arabic_runs, collapse_repeats, is_arabic_char, is_punctuation, normalize, strip_punctuation,
    ArabicNormalizer, ARABIC_COMMA,
};
pub use stop_words::{
    parse_stop_word_lines, StopWordError, StopWordSet, StopWordSetBuilder,
    DEFAULT_ARABIC_STOP_WORDS,
};
pub use traits::{Analyzer, LengthFilterOrder, NormalizerConfig};
