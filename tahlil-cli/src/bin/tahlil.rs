use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tahlil_cli::{render, ExportKind, InputSpec, OutputFormat, Session};
use tahlil_corpus::AnalysisConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "tahlil",
    about = "Descriptive statistics and TF-IDF for Arabic tweet corpora"
)]
struct Cli {
    /// Path to the analysis config file (JSON); falls back to $TAHLIL_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Custom stop-word file, one word per line
    #[arg(long, global = true, env = "TAHLIL_STOP_WORDS")]
    stop_words: Option<PathBuf>,

    /// Do not merge the built-in Arabic stop-word list
    #[arg(long, global = true)]
    no_default_stop_words: bool,

    /// Corpus file; stdin when omitted
    #[arg(long, short, global = true)]
    input: Option<PathBuf>,

    /// Read the corpus as CSV and take posts from this column
    #[arg(long, global = true)]
    column: Option<String>,

    /// Drop blank posts before analysis
    #[arg(long, global = true)]
    skip_empty: bool,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Per-post surface statistics
    Stats {},
    /// Normalized Arabic tokens of each post
    Normalize {},
    /// Most frequent normalized words
    Frequent {
        #[arg(long)]
        top_k: Option<usize>,
        /// Least frequent first
        #[arg(long, conflicts_with = "descending")]
        ascending: bool,
        /// Most frequent first, even when the config asks for ascending
        #[arg(long)]
        descending: bool,
    },
    /// Term frequency, inverse document frequency and tf-idf per word
    Tfidf {
        /// Keep only the highest tf-idf rows
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Export a table to <name>.pdf (best effort, never fails)
    Export {
        #[arg(long)]
        name: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportKind::Tfidf)]
        what: ExportKind,
        /// Keep the HTML rendering and skip PDF conversion
        #[arg(long)]
        html_only: bool,
    },
    /// Write the default config to a file
    InitConfig {
        #[arg(long)]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_observability(cli.log_json);

    if let Commands::InitConfig { path } = &cli.command {
        AnalysisConfig::default().to_path(path)?;
        info!(path = %path.display(), "wrote default config");
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::from_env_or_default()?,
    };
    if let Some(path) = cli.stop_words.clone() {
        config.stop_words_file = Some(path);
    }
    if cli.no_default_stop_words {
        config.use_default_stop_words = false;
    }

    let session = Session::new(config)?;
    let corpus = InputSpec {
        path: cli.input.clone(),
        column: cli.column.clone(),
        skip_empty: cli.skip_empty,
    }
    .load()?;
    info!(posts = corpus.len(), "corpus ready");

    let output = match cli.command {
        Commands::Stats {} => render(&session.stats(&corpus)?, cli.format)?,
        Commands::Normalize {} => render(&session.normalize(&corpus), cli.format)?,
        Commands::Frequent {
            top_k,
            ascending,
            descending,
        } => {
            let order = match (ascending, descending) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            render(&session.frequent(&corpus, top_k, order), cli.format)?
        }
        Commands::Tfidf { top_k } => render(&session.tfidf(&corpus, top_k), cli.format)?,
        Commands::Export {
            name,
            what,
            html_only,
        } => {
            session.export(&corpus, what, &name, html_only)?;
            return Ok(());
        }
        // handled before the corpus is loaded
        Commands::InitConfig { .. } => return Ok(()),
    };

    print!("{output}");
    Ok(())
}

fn init_observability(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,tahlil_cli=info,tahlil_corpus=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
