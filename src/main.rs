//! # mtschema
//!
//! Command-line front end for validating metadata records against
//! table-driven schemas.
//!
//! ## Usage
//!
//! ```bash
//! # Validate station records against the electric-field table
//! mtschema validate electrics.csv station01.json station02.toml
//!
//! # Show the compiled fields of a table
//! mtschema inspect electrics.csv
//!
//! # Write the path -> description dictionary
//! mtschema export electrics.csv electrics.json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
