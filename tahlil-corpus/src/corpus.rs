use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::CorpusError;

/// Ordered collection of raw posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    posts: Vec<String>,
}

impl Corpus {
    pub fn new(posts: Vec<String>) -> Self {
        Self { posts }
    }

    pub fn from_posts<I, S>(posts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(posts.into_iter().map(Into::into).collect())
    }

    /// One post per line. Lines must be valid UTF-8; a trailing `\r` is dropped.
    pub fn from_lines<R: BufRead>(reader: R) -> Result<Self, CorpusError> {
        let mut posts = Vec::new();
        for (idx, line) in reader.split(b'\n').enumerate() {
            let mut bytes = line?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let post = String::from_utf8(bytes).map_err(|err| CorpusError::InvalidInput {
                line: idx + 1,
                reason: err.to_string(),
            })?;
            posts.push(post);
        }
        Ok(Self::new(posts))
    }

    /// Posts taken from the named column of a CSV document with a header row.
    pub fn from_csv<R: Read>(reader: R, column: &str) -> Result<Self, CorpusError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let column_idx = csv_reader
            .byte_headers()?
            .iter()
            .position(|header| header == column.as_bytes())
            .ok_or_else(|| CorpusError::MissingColumn(column.to_string()))?;

        let mut posts = Vec::new();
        for (idx, record) in csv_reader.byte_records().enumerate() {
            let record = record?;
            // header occupies line 1
            let line = idx + 2;
            let field = record.get(column_idx).ok_or_else(|| CorpusError::InvalidInput {
                line,
                reason: format!("record has no field for column {column:?}"),
            })?;
            let post = std::str::from_utf8(field).map_err(|err| CorpusError::InvalidInput {
                line,
                reason: err.to_string(),
            })?;
            posts.push(post.to_string());
        }
        Ok(Self::new(posts))
    }

    /// Load from a file: CSV when `column` is given, plain lines otherwise.
    pub fn from_path(path: impl AsRef<Path>, column: Option<&str>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let corpus = match column {
            Some(column) => Self::from_csv(file, column)?,
            None => Self::from_lines(BufReader::new(file))?,
        };
        debug!(path = %path.display(), posts = corpus.len(), "corpus loaded");
        Ok(corpus)
    }

    /// Drop posts that contain only whitespace.
    pub fn without_empty(self) -> Self {
        Self::new(
            self.posts
                .into_iter()
                .filter(|post| !post.trim().is_empty())
                .collect(),
        )
    }

    pub fn posts(&self) -> &[String] {
        &self.posts
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.posts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
