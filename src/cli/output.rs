//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TypeaheadArgs};
use crate::error::Result;
use crate::spelling::assist::SearchAssist;
use crate::spelling::catalog::{CatalogEntry, Category};
use crate::spelling::corrector::CorrectionResult;

/// Result structure for query correction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub results: Vec<CorrectionResult>,
}

/// Result structure for related keywords.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelatedReport {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub related: Vec<String>,
}

/// Result structure for distance calculation.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceReport {
    pub a: String,
    pub b: String,
    pub distance: usize,
    pub similarity: f64,
}

/// Result structure for catalog listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogListing {
    pub total: usize,
    pub entries: Vec<CatalogEntry>,
}

/// Result structure for catalog derivation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogBuildResult {
    pub products_read: usize,
    pub keywords: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Types that know how to print themselves for a terminal.
pub trait HumanOutput {
    /// Write in human-readable form.
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &TypeaheadArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.write_human(&mut io::stdout().lock())?;
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TypeaheadArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanOutput for CorrectionReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for result in &self.results {
            match (&result.corrected, result.distance) {
                (Some(corrected), Some(distance)) => writeln!(
                    out,
                    "{} -> {corrected} (distance {distance})",
                    result.original
                )?,
                (Some(corrected), None) => writeln!(out, "{} -> {corrected}", result.original)?,
                (None, _) => writeln!(out, "{} (no correction)", result.original)?,
            }
        }
        Ok(())
    }
}

impl HumanOutput for RelatedReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.related.is_empty() {
            return writeln!(out, "No related keywords for '{}'", self.query);
        }

        writeln!(out, "Related keywords:")?;
        for (i, keyword) in self.related.iter().enumerate() {
            writeln!(out, "  {}. {keyword}", i + 1)?;
        }
        Ok(())
    }
}

impl HumanOutput for SearchAssist {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        match self.notice() {
            Some(notice) => writeln!(out, "{notice}")?,
            None => writeln!(out, "Search: {}", self.query)?,
        }

        if !self.related.is_empty() {
            writeln!(out, "Related keywords: {}", self.related.join(", "))?;
        }
        Ok(())
    }
}

impl HumanOutput for DistanceReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Distance:   {}", self.distance)?;
        writeln!(out, "Similarity: {:.3}", self.similarity)
    }
}

impl HumanOutput for CatalogListing {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for entry in &self.entries {
            match entry.category {
                Some(category) => {
                    writeln!(out, "{}\t{}", entry.keyword, category.display_name())?
                }
                None => writeln!(out, "{}", entry.keyword)?,
            }
        }
        writeln!(out)?;
        writeln!(out, "Total keywords: {}", self.total)
    }
}

impl HumanOutput for CatalogBuildResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Product names read: {}", self.products_read)?;
        writeln!(out, "Keywords derived:   {}", self.keywords)?;
        if let Some(output) = &self.output {
            writeln!(out, "Written to:         {output}")?;
        }
        Ok(())
    }
}
