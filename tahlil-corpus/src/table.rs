/// Anything that can be laid out as a header row plus string cells.
pub trait Tabular {
    fn headers(&self) -> Vec<String>;

    fn rows(&self) -> Vec<Vec<String>>;
}

/// Fixed-precision rendering shared by the numeric columns.
pub(crate) fn format_float(value: f64) -> String {
    format!("{value:.6}")
}
