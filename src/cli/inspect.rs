use anyhow::Result;
use std::path::PathBuf;

use mtschema::path::SuffixConvention;
use mtschema::schema::SchemaField;

use super::load_schema;

/// Print the compiled fields of a schema table
pub fn run(
    schema: PathBuf,
    json: bool,
    convention: SuffixConvention,
    delimiter: Option<char>,
) -> Result<()> {
    let tree = load_schema(&schema, delimiter, convention)?;

    if json {
        let fields: Vec<&SchemaField> = tree.fields().collect();
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    println!("Schema Table");
    println!("============");
    println!("File: {}", schema.display());
    println!("Fields: {}", tree.len());
    println!();

    for field in tree.fields() {
        println!(
            "  {:4}. {} ({}, {})",
            field.row,
            field.raw_path,
            field.type_suffix,
            field.requirement
        );

        let constraints = &field.constraints;
        if let Some(enumeration) = &constraints.enumeration {
            println!("        values: {}", enumeration);
        }
        if let Some(range) = &constraints.range {
            println!("        range: {}", range);
        }
        if let Some(unit) = &constraints.unit {
            println!("        unit: {}", unit);
        }
    }

    Ok(())
}
