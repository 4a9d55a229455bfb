//! Command implementations behind the `tahlil` binary.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use tahlil_corpus::{
    surface_report, AnalysisConfig, Aggregator, Corpus, FrequencyTable, StopWordSet,
    SurfaceReport, Tabular, TokenList, TopWords,
};
use tahlil_export::{export_html, PdfExporter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Tfidf,
    Frequent,
    Stats,
}

/// Where the corpus comes from.
#[derive(Debug, Clone, Default)]
pub struct InputSpec {
    /// File to read; stdin when absent.
    pub path: Option<PathBuf>,
    /// CSV column holding the post text; plain lines when absent.
    pub column: Option<String>,
    pub skip_empty: bool,
}

impl InputSpec {
    pub fn load(&self) -> anyhow::Result<Corpus> {
        let corpus = match &self.path {
            Some(path) => Corpus::from_path(path, self.column.as_deref())
                .with_context(|| format!("failed to read corpus from {}", path.display()))?,
            None => {
                let stdin = io::stdin();
                match &self.column {
                    Some(column) => Corpus::from_csv(stdin.lock(), column)?,
                    None => Corpus::from_lines(stdin.lock())?,
                }
            }
        };
        Ok(if self.skip_empty {
            corpus.without_empty()
        } else {
            corpus
        })
    }
}

/// Token lists of each post, for display.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NormalizedPosts(pub Vec<TokenList>);

impl Tabular for NormalizedPosts {
    fn headers(&self) -> Vec<String> {
        vec!["post".into(), "tokens".into()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, tokens)| vec![idx.to_string(), tokens.join(" ")])
            .collect()
    }
}

/// Loaded configuration plus the stop-word set built from it.
pub struct Session {
    config: AnalysisConfig,
    stop_words: StopWordSet,
}

impl Session {
    pub fn new(config: AnalysisConfig) -> anyhow::Result<Self> {
        let stop_words = config
            .stop_words()
            .context("failed to build stop-word set")?;
        info!(
            stop_words = stop_words.len(),
            length_filter = config.normalizer.length_filter.name(),
            "session ready"
        );
        Ok(Self { config, stop_words })
    }

    fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::with_config(&self.stop_words, self.config.normalizer.clone())
    }

    pub fn stats(&self, corpus: &Corpus) -> anyhow::Result<SurfaceReport> {
        Ok(surface_report(corpus, &self.stop_words)?)
    }

    pub fn normalize(&self, corpus: &Corpus) -> NormalizedPosts {
        NormalizedPosts(self.aggregator().normalize_corpus(corpus))
    }

    /// `None` for either argument falls back to the config.
    pub fn frequent(
        &self,
        corpus: &Corpus,
        top_k: Option<usize>,
        ascending: Option<bool>,
    ) -> TopWords {
        let top_k = top_k.unwrap_or(self.config.top_k);
        let ascending = ascending.unwrap_or(self.config.ascending);
        self.aggregator().frequent_words(corpus, top_k, ascending)
    }

    pub fn tfidf(&self, corpus: &Corpus, top_k: Option<usize>) -> FrequencyTable {
        let table = self.aggregator().word_frequency(corpus);
        match top_k {
            Some(k) => table.top_by_tf_idf(k),
            None => table,
        }
    }

    /// Best-effort export; only the analysis itself can fail.
    pub fn export(
        &self,
        corpus: &Corpus,
        kind: ExportKind,
        stem: &Path,
        html_only: bool,
    ) -> anyhow::Result<()> {
        let table: Box<dyn Tabular> = match kind {
            ExportKind::Tfidf => Box::new(self.tfidf(corpus, None)),
            ExportKind::Frequent => Box::new(self.frequent(corpus, None, None)),
            ExportKind::Stats => Box::new(self.stats(corpus)?),
        };
        if html_only {
            export_html(table.as_ref(), stem);
        } else {
            PdfExporter::new(self.config.pdf_converter.clone()).export(table.as_ref(), stem);
        }
        Ok(())
    }
}

/// Tab-separated rendering with a header line.
pub fn render_text(table: &dyn Tabular) -> String {
    let mut out = table.headers().join("\t");
    out.push('\n');
    for row in table.rows() {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

pub fn render<T: Tabular + Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_text(value)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tahlil_corpus::LengthFilterOrder;

    fn corpus() -> Corpus {
        Corpus::from_posts(["شكراااا جزيلا #شكر", "شكرا لكم", "thanks"])
    }

    fn session() -> Session {
        Session::new(AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_normalizes_each_post() {
        let normalized = session().normalize(&corpus());
        assert_eq!(normalized.0[0], vec!["شكرا", "جزيلا", "شكر"]);
        assert!(normalized.0[2].is_empty());
        assert_eq!(
            render_text(&normalized),
            "post\ttokens\n0\tشكرا جزيلا شكر\n1\tشكرا لكم\n2\t\n"
        );
    }

    #[test]
    fn test_frequent_uses_config_defaults() {
        let config = AnalysisConfig {
            top_k: 1,
            ..AnalysisConfig::default()
        };
        let session = Session::new(config).unwrap();
        let top = session.frequent(&corpus(), None, None);
        assert_eq!(top.len(), 1);
        assert_eq!(top.words[0].word, "شكرا");
        assert_eq!(top.words[0].count, 2);

        assert_eq!(session.frequent(&corpus(), Some(5), None).len(), 4);
    }

    #[test]
    fn test_order_flag_overrides_config() {
        let config = AnalysisConfig {
            ascending: true,
            ..AnalysisConfig::default()
        };
        let session = Session::new(config).unwrap();

        let ascending = session.frequent(&corpus(), None, None);
        assert_eq!(ascending.words[0].word, "جزيلا");
        assert_eq!(ascending.words[0].count, 1);

        let descending = session.frequent(&corpus(), None, Some(false));
        assert_eq!(descending.words[0].word, "شكرا");
        assert_eq!(descending.words[0].count, 2);
    }

    #[test]
    fn test_tfidf_can_be_truncated() {
        let session = session();
        assert_eq!(session.tfidf(&corpus(), None).len(), 4);
        assert_eq!(session.tfidf(&corpus(), Some(2)).len(), 2);
    }

    #[test]
    fn test_json_output_is_serialized_rows() {
        let top = session().frequent(&corpus(), Some(1), None);
        let json = render(&top, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["words"][0]["word"], "شكرا");
        assert_eq!(value["ascending"], false);
    }

    #[test]
    fn test_stats_errors_propagate() {
        let corpus = Corpus::from_posts(["مرحبا", ""]);
        assert!(session().stats(&corpus).is_err());
        assert_eq!(session().stats(&corpus.without_empty()).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_stop_word_file_fails_session() {
        let config = AnalysisConfig {
            stop_words_file: Some(PathBuf::from("/no/such/file.txt")),
            ..AnalysisConfig::default()
        };
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn test_loads_input_file_and_skips_empty_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tweets.txt");
        std::fs::write(&path, "مرحبا بكم\n\n  \nاهلا وسهلا\n").unwrap();

        let input = InputSpec {
            path: Some(path),
            column: None,
            skip_empty: true,
        };
        assert_eq!(input.load().unwrap().len(), 2);
    }

    #[test]
    fn test_html_export_writes_selected_table() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("stats");
        session()
            .export(&corpus(), ExportKind::Stats, &stem, true)
            .unwrap();
        let html = std::fs::read_to_string(dir.path().join("stats.html")).unwrap();
        assert!(html.contains("<th>avg_word_length</th>"));
    }

    #[test]
    fn test_session_honours_filter_order() {
        let mut config = AnalysisConfig::default();
        config.normalizer.length_filter = LengthFilterOrder::BeforeCollapse;
        let session = Session::new(config).unwrap();
        let normalized = session.normalize(&Corpus::from_posts(["ههههه"]));
        assert_eq!(normalized.0[0], vec!["ه"]);
    }
}
