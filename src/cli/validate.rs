use anyhow::{Context, Result};
use log::info;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use mtschema::instance;
use mtschema::path::SuffixConvention;
use mtschema::report::{self, ReportStyle, ValidationReport};
use mtschema::schema::SchemaTree;
use mtschema::validator::{validate_with, ValidationOptions, ValidationViolation};

use super::{load_schema, Config, FormatArg};

/// Validate instance documents against a schema table
#[allow(clippy::too_many_arguments)]
pub fn run(
    schema: PathBuf,
    instances: Vec<PathBuf>,
    format: Option<FormatArg>,
    flat: bool,
    keep_suffix: bool,
    no_time_check: bool,
    config: Option<PathBuf>,
    delimiter: Option<char>,
) -> Result<()> {
    let config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    // Flags override the config file
    let convention = if keep_suffix {
        SuffixConvention::Keep
    } else {
        config.schema.suffix_convention.unwrap_or_default()
    };
    let delimiter = delimiter.or(config.schema.delimiter);
    let flat = flat || config.validation.flat.unwrap_or(false);
    let options = ValidationOptions {
        time_consistency: !no_time_check && config.validation.time_consistency.unwrap_or(true),
    };
    let format = format.or(config.report.format).unwrap_or_default();

    info!("Metadata Validator");
    info!("==================");
    info!("Schema: {}", schema.display());

    let tree = load_schema(&schema, delimiter, convention)?;

    let mut results = Vec::with_capacity(instances.len());
    for path in &instances {
        let violations = validate_file(&tree, path, flat, &options)?;
        info!("{}: {} violations", path.display(), violations.len());
        results.push(ValidationReport::new(path.display().to_string(), violations));
    }

    print_reports(&results, format)?;

    // Exit with error code if any instance is non-compliant
    if results.iter().any(|report| !report.is_compliant()) {
        std::process::exit(1);
    }

    Ok(())
}

fn validate_file(
    tree: &SchemaTree,
    path: &Path,
    flat: bool,
    options: &ValidationOptions,
) -> Result<Vec<ValidationViolation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read instance: {}", path.display()))?;

    let is_toml = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

    let violations = if is_toml {
        let document = instance::from_toml_str(&content)
            .with_context(|| format!("Failed to parse instance: {}", path.display()))?;
        validate_with(tree, &document, options)
    } else {
        let parsed = if flat {
            instance::from_flat_json_str(&content)
        } else {
            instance::from_json_str(&content)
        };
        let document =
            parsed.with_context(|| format!("Failed to parse instance: {}", path.display()))?;
        validate_with(tree, &document, options)
    };

    Ok(violations)
}

fn print_reports(results: &[ValidationReport], format: FormatArg) -> Result<()> {
    match format {
        FormatArg::Human => {
            for result in results {
                if results.len() > 1 {
                    println!("# {}", result.source);
                }
                print!("{}", report::format(&result.violations, ReportStyle::Human));
            }
        }
        FormatArg::Structured => {
            if let [result] = results {
                println!("{}", report::format(&result.violations, ReportStyle::Structured));
            } else {
                let mut by_source = Map::new();
                for result in results {
                    by_source.insert(
                        result.source.clone(),
                        serde_json::to_value(&result.violations)?,
                    );
                }
                println!("{:#}", Value::Object(by_source));
            }
        }
        FormatArg::Summary => {
            for result in results {
                // Use colorized output if available
                #[cfg(feature = "colorized_output")]
                {
                    println!("{}", result.format_colored());
                }

                #[cfg(not(feature = "colorized_output"))]
                {
                    println!("{}", result);
                }
            }
        }
    }

    Ok(())
}
