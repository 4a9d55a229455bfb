//! Per-post surface statistics.
//!
//! Each statistic is a named function over a single post plus a corpus-level
//! wrapper that returns one value per post, aligned with the corpus.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use tahlil_text::StopWordSet;

use crate::table::{format_float, Tabular};
use crate::Corpus;

static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\S+").expect("valid mention regex"));
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\S+").expect("valid hashtag regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("post {index} has no words; average word length is undefined")]
    DivisionByZero { index: usize },
}

pub fn post_word_count(post: &str) -> usize {
    post.split_whitespace().count()
}

/// Length in Unicode scalar values.
pub fn post_char_length(post: &str) -> usize {
    post.chars().count()
}

/// Mean word length, `None` when the post has no words.
pub fn post_avg_word_length(post: &str) -> Option<f64> {
    let (total, words) = post
        .split_whitespace()
        .fold((0usize, 0usize), |(total, words), word| {
            (total + word.chars().count(), words + 1)
        });
    if words == 0 {
        None
    } else {
        Some(total as f64 / words as f64)
    }
}

pub fn post_stop_word_count(post: &str, stop_words: &StopWordSet) -> usize {
    post.split_whitespace()
        .filter(|word| stop_words.contains(word))
        .count()
}

/// Mentions (`@user`) plus hashtags (`#tag`).
pub fn post_tag_count(post: &str) -> usize {
    MENTION.find_iter(post).count() + HASHTAG.find_iter(post).count()
}

/// Whitespace tokens made only of decimal digits: ASCII, Arabic-Indic or
/// Extended Arabic-Indic.
pub fn post_digit_count(post: &str) -> usize {
    post.split_whitespace()
        .filter(|word| word.chars().all(is_decimal_digit))
        .count()
}

fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}')
}

pub fn word_count(corpus: &Corpus) -> Vec<usize> {
    corpus.posts().par_iter().map(|p| post_word_count(p)).collect()
}

pub fn char_length(corpus: &Corpus) -> Vec<usize> {
    corpus.posts().par_iter().map(|p| post_char_length(p)).collect()
}

/// Average word length per post. Fails on the first post without words.
pub fn avg_word_length(corpus: &Corpus) -> Result<Vec<f64>, StatsError> {
    corpus
        .iter()
        .enumerate()
        .map(|(index, post)| {
            post_avg_word_length(post).ok_or(StatsError::DivisionByZero { index })
        })
        .collect()
}

pub fn stop_word_count(corpus: &Corpus, stop_words: &StopWordSet) -> Vec<usize> {
    corpus
        .posts()
        .par_iter()
        .map(|p| post_stop_word_count(p, stop_words))
        .collect()
}

pub fn tag_count(corpus: &Corpus) -> Vec<usize> {
    corpus.posts().par_iter().map(|p| post_tag_count(p)).collect()
}

pub fn digit_count(corpus: &Corpus) -> Vec<usize> {
    corpus.posts().par_iter().map(|p| post_digit_count(p)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceRow {
    pub word_count: usize,
    pub char_length: usize,
    pub avg_word_length: f64,
    pub stop_word_count: usize,
    pub tag_count: usize,
    pub digit_count: usize,
}

/// All surface statistics, one row per post.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SurfaceReport {
    pub rows: Vec<SurfaceRow>,
}

impl SurfaceReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Tabular for SurfaceReport {
    fn headers(&self) -> Vec<String> {
        [
            "post",
            "word_count",
            "char_length",
            "avg_word_length",
            "stop_word_count",
            "tag_count",
            "digit_count",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                vec![
                    idx.to_string(),
                    row.word_count.to_string(),
                    row.char_length.to_string(),
                    format_float(row.avg_word_length),
                    row.stop_word_count.to_string(),
                    row.tag_count.to_string(),
                    row.digit_count.to_string(),
                ]
            })
            .collect()
    }
}

pub fn surface_report(
    corpus: &Corpus,
    stop_words: &StopWordSet,
) -> Result<SurfaceReport, StatsError> {
    let averages = avg_word_length(corpus)?;
    let rows = corpus
        .posts()
        .par_iter()
        .zip(averages)
        .map(|(post, avg_word_length)| SurfaceRow {
            word_count: post_word_count(post),
            char_length: post_char_length(post),
            avg_word_length,
            stop_word_count: post_stop_word_count(post, stop_words),
            tag_count: post_tag_count(post),
            digit_count: post_digit_count(post),
        })
        .collect();
    Ok(SurfaceReport { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_words_and_chars() {
        let corpus = Corpus::from_posts(["صباح الخير  يا  جماعة", "hi", ""]);
        assert_eq!(word_count(&corpus), vec![4, 1, 0]);
        assert_eq!(char_length(&corpus), vec![21, 2, 0]);
    }

    #[test]
    fn test_averages_word_length() {
        let corpus = Corpus::from_posts(["ab abcd", "كتاب"]);
        assert_eq!(avg_word_length(&corpus).unwrap(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_average_of_empty_post_is_an_error() {
        let corpus = Corpus::from_posts(["كتاب", "   ", ""]);
        assert_eq!(
            avg_word_length(&corpus).unwrap_err(),
            StatsError::DivisionByZero { index: 1 }
        );
    }

    #[test]
    fn test_counts_stop_words_exactly() {
        let stop_words = StopWordSet::arabic();
        let corpus = Corpus::from_posts(["هذا هو الكتاب في البيت", "هذا، جميل"]);
        assert_eq!(stop_word_count(&corpus, &stop_words), vec![3, 0]);
    }

    #[test]
    fn test_counts_mentions_and_hashtags() {
        let corpus = Corpus::from_posts([
            "@ali شكرا #رمضان_كريم #السعودية",
            "no tags # @ here",
            "@a#b",
        ]);
        assert_eq!(tag_count(&corpus), vec![3, 0, 2]);
    }

    #[test]
    fn test_counts_decimal_digit_tokens() {
        let corpus = Corpus::from_posts([
            "الساعة 10 و ٣٠ دقيقة",
            "2024م 12.5 7",
            "½ Ⅻ ٣٠ 12 ۱۴",
        ]);
        assert_eq!(digit_count(&corpus), vec![2, 1, 3]);
    }

    #[test]
    fn test_report_bundles_every_statistic() {
        let stop_words = StopWordSet::arabic();
        let corpus = Corpus::from_posts(["@user في 2024 #عيد", "مرحبا"]);
        let report = surface_report(&corpus, &stop_words).unwrap();

        assert_eq!(report.len(), 2);
        let first = &report.rows[0];
        assert_eq!(first.word_count, 4);
        assert_eq!(first.stop_word_count, 1);
        assert_eq!(first.tag_count, 2);
        assert_eq!(first.digit_count, 1);
        assert_eq!(report.rows[1].avg_word_length, 5.0);
        assert_eq!(report.rows().len(), 2);
        assert_eq!(report.headers().len(), report.rows()[0].len());
    }

    #[test]
    fn test_report_propagates_division_by_zero() {
        let corpus = Corpus::from_posts(["مرحبا", ""]);
        let err = surface_report(&corpus, &StopWordSet::empty()).unwrap_err();
        assert_eq!(err, StatsError::DivisionByZero { index: 1 });
    }
}
