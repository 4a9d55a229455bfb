//! Best-effort HTML/PDF export of tabular results.
//!
//! Export never reports failure to the caller: a missing converter, an
//! unwritable path or a failing conversion are logged at debug level and
//! otherwise ignored. Callers must not rely on the files existing.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tahlil_corpus::Tabular;
use thiserror::Error;
use tracing::debug;

/// Converter invoked as `<converter> <input.html> <output.pdf>`.
pub const DEFAULT_CONVERTER: &str = "wkhtmltopdf";

#[derive(Debug, Error)]
pub(crate) enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("converter {converter:?} exited with {status}")]
    Converter { converter: String, status: String },
}

/// Render a table as a standalone UTF-8 HTML document.
pub fn render_html(table: &dyn Tabular) -> String {
    let mut html = String::from("<meta charset=\"UTF-8\">\n<table border=\"1\">\n");

    html.push_str("  <thead>\n    <tr>\n");
    for header in table.headers() {
        html.push_str(&format!("      <th>{}</th>\n", escape(&header)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in table.rows() {
        html.push_str("    <tr>\n");
        for cell in row {
            html.push_str(&format!("      <td>{}</td>\n", escape(&cell)));
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>\n");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = stem.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Writes `<stem>.html` and converts it to `<stem>.pdf`.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    converter: String,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER)
    }
}

impl PdfExporter {
    pub fn new(converter: impl Into<String>) -> Self {
        Self {
            converter: converter.into(),
        }
    }

    /// Export `table` to `<stem>.pdf`. Failures are swallowed.
    pub fn export(&self, table: &dyn Tabular, stem: impl AsRef<Path>) {
        let stem = stem.as_ref();
        match self.try_export(table, stem) {
            Ok(pdf) => debug!(path = %pdf.display(), "exported pdf"),
            Err(err) => debug!(stem = %stem.display(), error = %err, "pdf export skipped"),
        }
    }

    pub(crate) fn try_export(&self, table: &dyn Tabular, stem: &Path) -> Result<PathBuf, ExportError> {
        let html_path = with_suffix(stem, ".html");
        let pdf_path = with_suffix(stem, ".pdf");

        fs::write(&html_path, render_html(table))?;
        let converted = self.convert(&html_path, &pdf_path);
        // the intermediate html goes away whether or not conversion worked
        let removed = fs::remove_file(&html_path);

        converted?;
        removed?;
        Ok(pdf_path)
    }

    fn convert(&self, html: &Path, pdf: &Path) -> Result<(), ExportError> {
        let status = Command::new(&self.converter).arg(html).arg(pdf).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(ExportError::Converter {
                converter: self.converter.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Write `<stem>.html` only. Failures are swallowed.
pub fn export_html(table: &dyn Tabular, stem: impl AsRef<Path>) {
    let path = with_suffix(stem.as_ref(), ".html");
    if let Err(err) = fs::write(&path, render_html(table)) {
        debug!(path = %path.display(), error = %err, "html export skipped");
    }
}

/// Export with the default converter. Failures are swallowed.
pub fn export_pdf(table: &dyn Tabular, stem: impl AsRef<Path>) {
    PdfExporter::default().export(table, stem)
}
