//! Arabic text normalization for tweet corpora.

pub mod analyzers;

pub use analyzers::{
    normalize, Analyzer, ArabicNormalizer, LengthFilterOrder, NormalizerConfig, StopWordError,
    StopWordSet,
};

/// Ordered tokens produced by normalizing one post.
pub type TokenList = Vec<String>;
