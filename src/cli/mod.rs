use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use mtschema::path::SuffixConvention;
use mtschema::schema::{self, SchemaLoader, SchemaTree};

mod config;
mod export;
mod inspect;
mod validate;

pub use config::Config;

/// mtschema - validate metadata records against table-driven schemas
#[derive(Parser)]
#[command(name = "mtschema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output format of the validate command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    /// One line per violation
    #[default]
    Human,
    /// JSON violation records
    Structured,
    /// Per-instance report with counts and verdict
    Summary,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate instance documents (JSON or TOML) against a schema table
    Validate {
        /// Schema table (CSV or TSV)
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Instance documents; `.toml` files are read as TOML, anything else as JSON
        #[arg(value_name = "INSTANCE", required = true)]
        instances: Vec<PathBuf>,

        /// Output format (human, structured, summary)
        #[arg(short = 'f', long, value_enum)]
        format: Option<FormatArg>,

        /// JSON instances are flat records keyed by full path
        #[arg(long)]
        flat: bool,

        /// Match keys verbatim instead of stripping type suffixes
        #[arg(long)]
        keep_suffix: bool,

        /// Skip the ascii/epoch time consistency check
        #[arg(long)]
        no_time_check: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Field delimiter of the schema table (default: from extension)
        #[arg(short = 'd', long)]
        delimiter: Option<char>,
    },

    /// Print the compiled fields of a schema table
    Inspect {
        /// Schema table (CSV or TSV)
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Print the fields as JSON
        #[arg(long)]
        json: bool,

        /// Keep type suffixes in field paths
        #[arg(long)]
        keep_suffix: bool,

        /// Field delimiter of the schema table (default: from extension)
        #[arg(short = 'd', long)]
        delimiter: Option<char>,
    },

    /// Export the path -> description dictionary of a schema table as JSON
    Export {
        /// Schema table (CSV or TSV)
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Output JSON file (defaults to stdout)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Field delimiter of the schema table (default: from extension)
        #[arg(short = 'd', long)]
        delimiter: Option<char>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate {
            schema,
            instances,
            format,
            flat,
            keep_suffix,
            no_time_check,
            config,
            delimiter,
        } => validate::run(
            schema,
            instances,
            format,
            flat,
            keep_suffix,
            no_time_check,
            config,
            delimiter,
        ),
        Commands::Inspect {
            schema,
            json,
            keep_suffix,
            delimiter,
        } => inspect::run(schema, json, convention(keep_suffix), delimiter),
        Commands::Export {
            schema,
            output,
            delimiter,
        } => export::run(schema, output, delimiter),
    }
}

fn convention(keep_suffix: bool) -> SuffixConvention {
    if keep_suffix {
        SuffixConvention::Keep
    } else {
        SuffixConvention::Strip
    }
}

/// Read and compile a schema table
fn load_schema(
    path: &Path,
    delimiter: Option<char>,
    convention: SuffixConvention,
) -> Result<SchemaTree> {
    if !path.exists() {
        bail!("Schema table does not exist: {}", path.display());
    }

    let delimiter = match delimiter {
        Some(c) if c.is_ascii() => c as u8,
        Some(c) => bail!("Delimiter must be a single ASCII character, got '{}'", c),
        None => schema::delimiter_for_path(path),
    };

    let rows = schema::read_csv_file_with_delimiter(path, delimiter)
        .with_context(|| format!("Failed to read schema table: {}", path.display()))?;
    let tree = SchemaLoader::new()
        .with_convention(convention)
        .load(&rows)
        .with_context(|| format!("Failed to compile schema table: {}", path.display()))?;

    info!("Loaded {} fields from {}", tree.len(), path.display());
    Ok(tree)
}
