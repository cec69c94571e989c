//! Command implementations for Typeahead CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::spelling::*;

/// Execute a CLI command.
pub fn execute_command(args: TypeaheadArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Correct(correct_args) => correct(correct_args, &config, &args),
        Command::Related(related_args) => related(related_args, &config, &args),
        Command::Assist(assist_args) => assist(assist_args, &config, &args),
        Command::Distance(distance_args) => distance(distance_args, &args),
        Command::Catalog(catalog_args) => list_catalog(catalog_args, &config, &args),
        Command::BuildCatalog(build_args) => build_catalog(build_args, &args),
    }
}

/// Load the configuration file if one was given, else defaults.
fn load_config(args: &TypeaheadArgs) -> Result<TypeaheadConfig> {
    let mut config = match &args.config {
        Some(path) => TypeaheadConfig::load_from_file(path)?,
        None => TypeaheadConfig::default(),
    };

    if let Some(catalog) = &args.catalog {
        config.catalog_path = Some(catalog.clone());
    }

    Ok(config)
}

/// Load the configured catalog, falling back to the built-in keywords.
fn load_catalog(config: &TypeaheadConfig) -> Result<Arc<KeywordCatalog>> {
    let catalog = match &config.catalog_path {
        Some(path) if is_json(path) => KeywordCatalog::load_from_json_file(path)?,
        Some(path) => KeywordCatalog::load_from_file(path)?,
        None => BuiltinCatalog::storefront(),
    };

    info!("catalog ready with {} keywords", catalog.len());
    Ok(Arc::new(catalog))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Correct one or more queries.
fn correct(args: &CorrectArgs, config: &TypeaheadConfig, cli_args: &TypeaheadArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let corrector = QueryCorrector::with_config(catalog, config.corrector.clone());

    debug!("correcting {} queries", args.queries.len());
    let report = CorrectionReport {
        results: corrector.correct_batch(&args.queries),
    };

    output_result("Corrections:", &report, cli_args)
}

/// Show keywords related to a partial query.
fn related(args: &RelatedArgs, config: &TypeaheadConfig, cli_args: &TypeaheadArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let suggester = KeywordSuggester::with_config(catalog, config.suggestion.clone());

    let related = match args.category {
        Some(category) => suggester.related_in_category(args.query(), category),
        None => suggester.related_keywords(args.query()),
    };

    let report = RelatedReport {
        query: args.query().to_string(),
        category: args.category,
        related,
    };

    output_result("Related keywords:", &report, cli_args)
}

/// Correct a submitted query and show related keywords for the result.
fn assist(args: &AssistArgs, config: &TypeaheadConfig, cli_args: &TypeaheadArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let assistant = SearchAssistant::new(catalog, config);

    output_result("Search assist:", &assistant.assist(&args.query), cli_args)
}

/// Show the edit distance between two strings.
fn distance(args: &DistanceArgs, cli_args: &TypeaheadArgs) -> Result<()> {
    let report = DistanceReport {
        a: args.a.clone(),
        b: args.b.clone(),
        distance: levenshtein_distance(&args.a, &args.b),
        similarity: levenshtein_ratio(&args.a, &args.b),
    };

    output_result("Edit distance:", &report, cli_args)
}

/// List the catalog, optionally one category only.
fn list_catalog(
    args: &CatalogArgs,
    config: &TypeaheadConfig,
    cli_args: &TypeaheadArgs,
) -> Result<()> {
    let catalog = load_catalog(config)?;

    let entries: Vec<CatalogEntry> = catalog
        .entries()
        .iter()
        .filter(|entry| args.category.is_none() || entry.category == args.category)
        .cloned()
        .collect();

    let listing = CatalogListing {
        total: entries.len(),
        entries,
    };

    output_result("Keyword catalog:", &listing, cli_args)
}

/// Derive a catalog from a file of product names.
fn build_catalog(args: &BuildCatalogArgs, cli_args: &TypeaheadArgs) -> Result<()> {
    let reader = BufReader::new(File::open(&args.product_names)?);
    let names = reader
        .lines()
        .filter(|line| !matches!(line, Ok(name) if name.trim().is_empty()))
        .collect::<io::Result<Vec<String>>>()?;

    let catalog = KeywordCatalog::from_product_names(&names);

    match &args.output {
        Some(path) => {
            catalog.save_to_file(path)?;
            info!("wrote {} keywords to {}", catalog.len(), path.display());
        }
        None => {
            if cli_args.output_format == OutputFormat::Human {
                catalog.write_to(&mut io::stdout().lock())?;
                return Ok(());
            }
        }
    }

    let result = CatalogBuildResult {
        products_read: names.len(),
        keywords: catalog.len(),
        output: args
            .output
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
    };

    output_result("Catalog built:", &result, cli_args)
}
