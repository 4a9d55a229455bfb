//! Stop Words
//!
//! The stop-word set is the union of a built-in Arabic list and an optional
//! custom list loaded from a file, one word per line. Once built it is
//! read-only.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Default Arabic stop words.
pub static DEFAULT_ARABIC_STOP_WORDS: &[&str] = &[
    // Particles and prepositions
    "من", "في", "على", "إلى", "الى", "عن", "مع", "بين", "حتى", "منذ", "لدى", "عبر",
    // Conjunctions
    "و", "أو", "او", "ثم", "لكن", "بل", "أم", "إما", "لو", "لولا", "كما", "بينما",
    // Pronouns
    "هو", "هي", "هم", "هن", "هما", "أنا", "انا", "نحن", "أنت", "انت", "أنتم", "أنتن",
    // Demonstratives
    "هذا", "هذه", "ذلك", "تلك", "هؤلاء", "أولئك", "هنالك",
    // Relative pronouns
    "الذي", "التي", "الذين", "اللواتي", "اللاتي", "اللذان", "اللتان",
    // Question words
    "ما", "ماذا", "أين", "متى", "كيف", "لماذا", "كم", "أي", "هل",
    // Auxiliary verbs
    "كان", "يكون", "كانت", "كانوا", "ليس", "ليست", "أصبح", "صار",
    // Common particles
    "قد", "لقد", "سوف", "لن", "لم", "لا", "إن", "أن", "ان", "إذا", "اذا", "إذ", "إلا", "الا",
    // Articles and prefixes
    "ال", "ب", "ل", "ك", "ف",
    // Common words
    "كل", "بعض", "غير", "عند", "ذات", "هناك", "هنا", "يا", "أيها",
    "فقط", "أيضا", "ايضا", "جدا", "معظم", "كثير", "قليل",
    "بعد", "قبل", "خلال", "أثناء", "ضد", "نحو", "حول",
    "فوق", "تحت", "أمام", "خلف", "بجانب", "عليه", "عليها", "فيه", "فيها", "منه", "منها",
];

#[derive(Debug, Error)]
pub enum StopWordError {
    #[error("stop-word file {path:?} not found")]
    MissingResource { path: PathBuf },

    #[error("failed to read stop-word file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Immutable stop-word set. Membership is exact string equality.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Start building a set.
    pub fn builder() -> StopWordSetBuilder {
        StopWordSetBuilder::default()
    }

    /// An empty set; nothing is treated as a stop word.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in Arabic list only.
    pub fn arabic() -> Self {
        Self::builder().with_defaults().build()
    }

    /// Create from a slice of words.
    pub fn from_slice(words: &[&str]) -> Self {
        Self::builder().with_words(words.iter().copied()).build()
    }

    /// The built-in Arabic list merged with the words in `path`.
    pub fn arabic_with_file(path: impl AsRef<Path>) -> Result<Self, StopWordError> {
        Ok(Self::builder().with_defaults().with_file(path)?.build())
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get an iterator over the stop words.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.words.iter()
    }
}

/// Accumulates stop-word sources before freezing them into a [`StopWordSet`].
#[derive(Debug, Default)]
pub struct StopWordSetBuilder {
    words: HashSet<String>,
}

impl StopWordSetBuilder {
    /// Add the built-in Arabic list.
    pub fn with_defaults(mut self) -> Self {
        self.words
            .extend(DEFAULT_ARABIC_STOP_WORDS.iter().map(|s| s.to_string()));
        self
    }

    /// Add multiple words.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Add the words listed in `path`.
    ///
    /// A missing file is fatal: the set is never built from a partial source.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, StopWordError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StopWordError::MissingResource {
                    path: path.to_path_buf(),
                }
            } else {
                StopWordError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let before = self.words.len();
        self.words.extend(parse_stop_word_lines(&content));
        info!(
            path = %path.display(),
            added = self.words.len() - before,
            "loaded custom stop words"
        );
        Ok(self)
    }

    /// Freeze the accumulated words.
    pub fn build(self) -> StopWordSet {
        debug!(size = self.words.len(), "stop-word set built");
        StopWordSet { words: self.words }
    }
}

/// Words from a stop-word file: first field of each non-blank,
/// non-comment line.
pub fn parse_stop_word_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_stop_words() {
        let sw = StopWordSet::arabic();
        assert!(sw.contains("من"));
        assert!(sw.contains("في"));
        assert!(sw.contains("هذا"));
        assert!(!sw.contains("كتاب"));
    }

    #[test]
    fn test_membership_is_exact() {
        let sw = StopWordSet::from_slice(&["هذا"]);
        assert!(sw.contains("هذا"));
        assert!(!sw.contains("هذاا"));
        assert!(!sw.contains(" هذا"));
    }

    #[test]
    fn test_union_of_sources() {
        let sw = StopWordSet::builder()
            .with_defaults()
            .with_words(["مرحبا", "من"])
            .build();
        assert_eq!(sw.len(), StopWordSet::arabic().len() + 1);
        assert!(sw.contains("مرحبا"));
    }

    #[test]
    fn test_empty_set() {
        let sw = StopWordSet::empty();
        assert!(sw.is_empty());
        assert!(!sw.contains("من"));
    }

    #[test]
    fn test_parse_lines() {
        let words: Vec<String> =
            parse_stop_word_lines("  يعني \n\n# comment\nطيب  extra\n").collect();
        assert_eq!(words, vec!["يعني", "طيب"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = StopWordSet::builder()
            .with_defaults()
            .with_file("/definitely/not/here/stop_words.txt")
            .unwrap_err();
        assert!(matches!(err, StopWordError::MissingResource { .. }));
    }
}
