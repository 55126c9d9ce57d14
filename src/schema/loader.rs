use log::{debug, warn};
use std::fmt;

use crate::coercion::{BracketParser, DescriptionParser, TypeSuffix};
use crate::path::{self, SuffixConvention};

use super::tree::SchemaNode;
use super::{Requirement, SchemaField, SchemaParseError, SchemaTree, TableRow};

/// Compiles schema table rows into a [`SchemaTree`]
pub struct SchemaLoader {
    convention: SuffixConvention,
    parser: Box<dyn DescriptionParser>,
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaLoader")
            .field("convention", &self.convention)
            .finish_non_exhaustive()
    }
}

impl SchemaLoader {
    /// Loader with the default suffix convention and [`BracketParser`]
    pub fn new() -> Self {
        Self {
            convention: SuffixConvention::default(),
            parser: Box::new(BracketParser),
        }
    }

    /// Set the suffix convention for match keys
    pub fn with_convention(mut self, convention: SuffixConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Replace the heuristic that compiles description constraints
    pub fn with_description_parser(mut self, parser: impl DescriptionParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Compile table rows into a schema tree.
    ///
    /// A first row without type and requirement cells is a title and is
    /// skipped. Every other row becomes exactly one field.
    pub fn load(&self, rows: &[TableRow]) -> Result<SchemaTree, SchemaParseError> {
        let mut root = SchemaNode::default();
        let mut len = 0;

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;

            if index == 0 && row.is_title() {
                debug!("Skipping title row: '{}'", row.path.trim());
                continue;
            }

            let field = self.compile_row(row, row_number)?;
            root.insert(field).map_err(|(first_row, field)| {
                SchemaParseError::DuplicatePath {
                    path: field.display_path(),
                    first_row,
                    second_row: row_number,
                }
            })?;
            len += 1;
        }

        debug!("Compiled schema with {} fields", len);
        Ok(SchemaTree::new(root, self.convention, len))
    }

    fn compile_row(&self, row: &TableRow, row_number: usize) -> Result<SchemaField, SchemaParseError> {
        let raw_path = row.path.trim();
        if raw_path.is_empty() {
            return Err(SchemaParseError::MalformedRow {
                row: row_number,
                reason: "empty path cell".to_string(),
            });
        }

        let mut segments = path::split(raw_path);
        if segments.iter().any(|s| s.is_empty()) {
            return Err(SchemaParseError::MalformedRow {
                row: row_number,
                reason: format!("empty segment in path '{}'", raw_path),
            });
        }

        let Some(terminal) = segments.last_mut() else {
            return Err(SchemaParseError::MalformedRow {
                row: row_number,
                reason: "empty path cell".to_string(),
            });
        };
        let (stem, suffix) = path::strip_suffix(terminal);
        let stem = stem.to_string();
        if self.convention == SuffixConvention::Strip {
            *terminal = stem;
        }

        let declared_type = normalize_whitespace(&row.declared_type);
        let description = normalize_whitespace(&row.description);

        Ok(SchemaField {
            type_suffix: resolve_type(raw_path, suffix, &declared_type),
            constraints: self.parser.constraints(&description),
            requirement: Requirement::parse(&row.requirement),
            path: segments,
            raw_path: raw_path.to_string(),
            declared_type,
            description,
            row: row_number,
        })
    }
}

/// Compile rows with the default loader
pub fn load(rows: &[TableRow]) -> Result<SchemaTree, SchemaParseError> {
    SchemaLoader::default().load(rows)
}

/// The path suffix wins over the type cell; the cell is the fallback.
fn resolve_type(raw_path: &str, suffix: Option<TypeSuffix>, declared_type: &str) -> TypeSuffix {
    let declared = TypeSuffix::from_declared(declared_type);
    match (suffix, declared) {
        (Some(suffix), Some(declared)) if suffix != declared => {
            warn!(
                "Field '{}' has suffix type {} but declares '{}'; using {}",
                raw_path, suffix, declared_type, suffix
            );
            suffix
        }
        (Some(suffix), _) => suffix,
        (None, Some(declared)) => declared,
        (None, None) => TypeSuffix::String,
    }
}

fn normalize_whitespace(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}
