//! bpost-rates CLI - Command-line interface
//!
//! Commands:
//!   quote      - Price a weight for a destination
//!   validate   - Check a rate config
//!   countries  - List enabled countries and their tiers
//!   schema     - Print the rate config JSON Schema

mod cli;

use bpost_rates::logger;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Price a shipment for a destination
    Quote {
        /// Rate config file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,
        /// Weight, e.g. "400", "400 g", "1.5kg"
        #[arg(short, long)]
        weight: String,
        /// Destination country code or name
        #[arg(long)]
        country: String,
    },
    /// Validate a rate config
    Validate {
        /// Rate config file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List enabled countries and their tiers
    Countries {
        /// Rate config file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the rate config JSON Schema
    Schema,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(e) = logger::init(&args.log_level) {
        eprintln!("Error: {}", e);
        return ExitCode::from(1);
    }

    let result = match &args.command {
        Commands::Quote {
            config,
            weight,
            country,
        } => cli::cmd_quote(config, weight, country, args.json),
        Commands::Validate { config } => cli::cmd_validate(config, args.json),
        Commands::Countries { config } => cli::cmd_countries(config, args.json),
        Commands::Schema => cli::cmd_schema(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
