use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use super::TableError;

/// First-cell labels of a column-header row
const PATH_HEADERS: [&str; 4] = ["parameter", "path", "field", "name"];

/// Second-cell labels of a column-header row
const DESCRIPTION_HEADERS: [&str; 2] = ["explanation", "description"];

/// One row of a schema table: path, description, type, requirement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    /// Dotted/slashed field path, e.g. `positive/latitude_d`
    pub path: String,
    /// Free-text explanation
    pub description: String,
    /// Declared type cell
    pub declared_type: String,
    /// Requirement cell (compulsory/optional)
    pub requirement: String,
}

impl TableRow {
    /// Create a row from its four cells
    pub fn new(
        path: impl Into<String>,
        description: impl Into<String>,
        declared_type: impl Into<String>,
        requirement: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            declared_type: declared_type.into(),
            requirement: requirement.into(),
        }
    }

    /// Create a row from up to four cells; missing cells are empty and extra cells are ignored
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let cell = |i: usize| cells.get(i).map(|c| c.as_ref().to_string()).unwrap_or_default();
        Self::new(cell(0), cell(1), cell(2), cell(3))
    }

    /// A title row spans the table and has no type or requirement
    pub fn is_title(&self) -> bool {
        self.declared_type.trim().is_empty() && self.requirement.trim().is_empty()
    }

    /// A column-header row names the columns instead of declaring a field
    pub fn is_column_header(&self) -> bool {
        let first = self.path.trim().to_lowercase();
        let second = self.description.trim().to_lowercase();
        PATH_HEADERS.contains(&first.as_str()) && DESCRIPTION_HEADERS.contains(&second.as_str())
    }

    fn is_blank(&self) -> bool {
        [&self.path, &self.description, &self.declared_type, &self.requirement]
            .iter()
            .all(|c| c.trim().is_empty())
    }
}

/// Pick a delimiter from the file extension: tab for `.tsv`/`.tab`, comma otherwise
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}

/// Read schema table rows from delimited text.
///
/// Records may have any length. Blank records and a leading column-header row
/// (`Parameter, Explanation, ...`) are dropped; a title row is kept so the
/// loader can apply its own title detection.
pub fn read_csv<R: Read>(reader: R, delimiter: u8) -> Result<Vec<TableRow>, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut header_seen = false;

    for record in csv_reader.records() {
        let record = record?;
        let cells: Vec<&str> = record.iter().collect();
        let row = TableRow::from_cells(&cells);

        if row.is_blank() {
            continue;
        }

        // The header can follow a title row, so it may be the first or second record
        if !header_seen && rows.len() <= 1 && row.is_column_header() {
            debug!("Skipping column header row: {:?}", cells);
            header_seen = true;
            continue;
        }

        rows.push(row);
    }

    Ok(rows)
}

/// Read schema table rows from a CSV/TSV file, choosing the delimiter from the extension
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> Result<Vec<TableRow>, TableError> {
    let path = path.as_ref();
    read_csv_file_with_delimiter(path, delimiter_for_path(path))
}

/// Read schema table rows from a file with an explicit delimiter
pub fn read_csv_file_with_delimiter<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
) -> Result<Vec<TableRow>, TableError> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file), delimiter)
}
