//! Corpus-level statistics for Arabic tweet collections: word frequency,
//! TF-IDF over normalized vocabulary and per-post surface statistics.

mod aggregate;
pub mod config;
mod corpus;
pub mod stats;
mod table;

pub use aggregate::{
    document_frequency, frequent_words, idf, inverse_document_frequency, term_frequency,
    word_frequency, Aggregator, FrequencyRow, FrequencyTable, TopWords, WordCount,
};
pub use config::{AnalysisConfig, ConfigError};
pub use corpus::Corpus;
pub use stats::{surface_report, StatsError, SurfaceReport, SurfaceRow};
pub use table::Tabular;

pub use tahlil_text::{
    normalize, LengthFilterOrder, NormalizerConfig, StopWordError, StopWordSet, TokenList,
};

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("invalid input at line {line}: {reason}")]
    InvalidInput { line: usize, reason: String },

    #[error("column {0:?} not found in csv header")]
    MissingColumn(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
