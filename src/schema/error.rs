/// Structural problems in a schema table that prevent compiling a [`SchemaTree`](super::SchemaTree)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaParseError {
    /// Two rows normalize to the same field path
    #[error("Duplicate field path '{path}' (rows {first_row} and {second_row})")]
    DuplicatePath {
        /// Normalized path shared by both rows
        path: String,
        /// Row that declared the path first
        first_row: usize,
        /// Row that declared it again
        second_row: usize,
    },

    /// A row whose path cell cannot be turned into a field path
    #[error("Malformed row {row}: {reason}")]
    MalformedRow {
        /// 1-based row number in the table
        row: usize,
        /// What is wrong with the row
        reason: String,
    },
}

/// Errors that can occur while reading a schema table from delimited text
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading the table file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
}
