use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mtschema::path::SuffixConvention;

use super::load_schema;

/// Write the path -> description dictionary of a schema table
pub fn run(schema: PathBuf, output: Option<PathBuf>, delimiter: Option<char>) -> Result<()> {
    // Dictionary keys are the raw paths, so the convention does not matter here
    let tree = load_schema(&schema, delimiter, SuffixConvention::default())?;
    let json = tree
        .to_json()
        .context("Failed to serialize description dictionary")?;

    match output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} descriptions to {}", tree.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
