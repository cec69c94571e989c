//! Command line argument parsing for Typeahead CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::spelling::catalog::Category;

/// Typeahead - typo correction and related keywords for storefront search
#[derive(Parser, Debug, Clone)]
#[command(name = "typeahead")]
#[command(about = "Typo correction and related keywords for storefront search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TypeaheadArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "TYPEAHEAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keyword catalog file (text, or JSON when the extension is .json)
    #[arg(long, value_name = "CATALOG_FILE")]
    pub catalog: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TypeaheadArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the effective verbosity.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Suggest a correction for each query
    Correct(CorrectArgs),

    /// List keywords related to a partial query
    Related(RelatedArgs),

    /// Correct a query and list related keywords for the result
    Assist(AssistArgs),

    /// Show the edit distance between two strings
    Distance(DistanceArgs),

    /// List the keyword catalog
    Catalog(CatalogArgs),

    /// Derive a keyword catalog from product names
    #[command(name = "build-catalog")]
    BuildCatalog(BuildCatalogArgs),
}

/// Arguments for query correction
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Queries to correct
    #[arg(value_name = "QUERY", required = true)]
    pub queries: Vec<String>,
}

/// Arguments for related keywords
#[derive(Parser, Debug, Clone)]
pub struct RelatedArgs {
    /// Partial query (empty when omitted)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Only suggest keywords from this category
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
}

impl RelatedArgs {
    /// The query, treating an absent one as empty.
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

/// Arguments for search assistance
#[derive(Parser, Debug, Clone)]
pub struct AssistArgs {
    /// Submitted query
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Arguments for distance calculation
#[derive(Parser, Debug, Clone)]
pub struct DistanceArgs {
    /// First string
    #[arg(value_name = "A")]
    pub a: String,

    /// Second string
    #[arg(value_name = "B")]
    pub b: String,
}

/// Arguments for listing the catalog
#[derive(Parser, Debug, Clone)]
pub struct CatalogArgs {
    /// Only list keywords from this category
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
}

/// Arguments for deriving a catalog
#[derive(Parser, Debug, Clone)]
pub struct BuildCatalogArgs {
    /// File with one product name per line
    #[arg(value_name = "PRODUCT_NAMES_FILE")]
    pub product_names: PathBuf,

    /// Write the catalog here instead of printing it
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

fn parse_category(value: &str) -> std::result::Result<Category, String> {
    value.parse::<Category>().map_err(|e| e.to_string())
}
