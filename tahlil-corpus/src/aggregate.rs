//! Corpus-level word frequency and TF-IDF.
//!
//! Three strictly ordered passes over a corpus:
//! 1. term frequency over the normalized tokens of every post
//! 2. inverse document frequency, matching each word as a substring of the
//!    raw posts: `ln(n / (df + 1))`
//! 3. the product of the two

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use tahlil_text::{Analyzer, ArabicNormalizer, NormalizerConfig, StopWordSet, TokenList};

use crate::table::{format_float, Tabular};
use crate::Corpus;

/// One vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub word: String,
    pub tf: usize,
    pub idf: f64,
    #[serde(rename = "tf-idf")]
    pub tf_idf: f64,
}

/// Per-word tf, idf and tf-idf, one row per distinct normalized word in
/// first-appearance order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    fn from_rows(rows: Vec<FrequencyRow>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.word.clone(), idx))
            .collect();
        Self { rows, index }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyRow> {
        self.rows.iter()
    }

    pub fn get(&self, word: &str) -> Option<&FrequencyRow> {
        self.index.get(word).map(|&idx| &self.rows[idx])
    }

    /// The `k` highest tf-idf rows, ties kept in first-appearance order.
    pub fn top_by_tf_idf(&self, k: usize) -> FrequencyTable {
        let mut rows = self.rows.clone();
        rows.par_sort_by(|a, b| {
            b.tf_idf
                .partial_cmp(&a.tf_idf)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows.truncate(k);
        Self::from_rows(rows)
    }
}

impl Tabular for FrequencyTable {
    fn headers(&self) -> Vec<String> {
        vec!["words".into(), "tf".into(), "idf".into(), "tf-idf".into()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.word.clone(),
                    row.tf.to_string(),
                    format_float(row.idf),
                    format_float(row.tf_idf),
                ]
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Ranked view of the most (or least) frequent normalized words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopWords {
    pub ascending: bool,
    pub words: Vec<WordCount>,
}

impl TopWords {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.words.iter()
    }
}

impl Tabular for TopWords {
    fn headers(&self) -> Vec<String> {
        vec!["words".into(), "count".into()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.words
            .iter()
            .map(|entry| vec![entry.word.clone(), entry.count.to_string()])
            .collect()
    }
}

/// Runs the normalizer over whole corpora.
pub struct Aggregator<'a> {
    normalizer: ArabicNormalizer<'a>,
}

impl<'a> Aggregator<'a> {
    pub fn new(stop_words: &'a StopWordSet) -> Self {
        Self::with_config(stop_words, NormalizerConfig::default())
    }

    pub fn with_config(stop_words: &'a StopWordSet, config: NormalizerConfig) -> Self {
        Self {
            normalizer: ArabicNormalizer::with_config(stop_words, config),
        }
    }

    /// Token list of every post, aligned with the corpus.
    pub fn normalize_corpus(&self, corpus: &Corpus) -> Vec<TokenList> {
        corpus
            .iter()
            .map(|post| self.normalizer.analyze(post))
            .collect()
    }

    /// Occurrences of every normalized word across the corpus, in
    /// first-appearance order.
    pub fn term_frequency(&self, corpus: &Corpus) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for post in corpus.iter() {
            for token in self.normalizer.analyze(post) {
                match positions.get(&token) {
                    Some(&pos) => counts[pos].1 += 1,
                    None => {
                        positions.insert(token.clone(), counts.len());
                        counts.push((token, 1));
                    }
                }
            }
        }

        debug!(
            posts = corpus.len(),
            vocabulary = counts.len(),
            "term frequency pass"
        );
        counts
    }

    /// Most frequent words, descending unless `ascending` is set.
    pub fn frequent_words(&self, corpus: &Corpus, top_k: usize, ascending: bool) -> TopWords {
        let mut words: Vec<WordCount> = self
            .term_frequency(corpus)
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect();

        if ascending {
            words.par_sort_by(|a, b| a.count.cmp(&b.count));
        } else {
            words.par_sort_by(|a, b| b.count.cmp(&a.count));
        }
        words.truncate(top_k);

        TopWords { ascending, words }
    }

    /// Frequency table with tf, idf and tf-idf for every normalized word.
    pub fn word_frequency(&self, corpus: &Corpus) -> FrequencyTable {
        let terms = self.term_frequency(corpus);
        let idfs = inverse_document_frequency(corpus, &terms);

        let rows = terms
            .into_iter()
            .zip(idfs)
            .map(|((word, tf), idf)| FrequencyRow {
                word,
                tf,
                idf,
                tf_idf: tf as f64 * idf,
            })
            .collect::<Vec<_>>();

        debug!(rows = rows.len(), "tf-idf pass");
        FrequencyTable::from_rows(rows)
    }
}

/// Number of raw posts containing `word` as a literal substring.
pub fn document_frequency(corpus: &Corpus, word: &str) -> usize {
    corpus.iter().filter(|post| post.contains(word)).count()
}

/// `ln(n / (df + 1))` for a corpus of `n` posts.
pub fn idf(n: usize, df: usize) -> f64 {
    (n as f64 / (df as f64 + 1.0)).ln()
}

/// IDF of each term, aligned with `terms`.
pub fn inverse_document_frequency(corpus: &Corpus, terms: &[(String, usize)]) -> Vec<f64> {
    let n = corpus.len();
    let idfs: Vec<f64> = terms
        .par_iter()
        .map(|(word, _)| idf(n, document_frequency(corpus, word)))
        .collect();

    debug!(posts = n, terms = idfs.len(), "inverse document frequency pass");
    idfs
}

/// Corpus term frequency with the default normalizer configuration.
pub fn term_frequency(corpus: &Corpus, stop_words: &StopWordSet) -> Vec<(String, usize)> {
    Aggregator::new(stop_words).term_frequency(corpus)
}

/// Corpus frequency table with the default normalizer configuration.
pub fn word_frequency(corpus: &Corpus, stop_words: &StopWordSet) -> FrequencyTable {
    Aggregator::new(stop_words).word_frequency(corpus)
}

/// Top-k words with the default normalizer configuration.
pub fn frequent_words(
    corpus: &Corpus,
    stop_words: &StopWordSet,
    top_k: usize,
    ascending: bool,
) -> TopWords {
    Aggregator::new(stop_words).frequent_words(corpus, top_k, ascending)
}
