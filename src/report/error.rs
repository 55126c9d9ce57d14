/// Errors that can occur while reading back a structured report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The text is not a JSON array of violation records
    #[error("Structured report parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
