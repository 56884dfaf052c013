use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use relmodel_builder::{ModelDefinition, OverridesView};
use relmodel_core::{Config, OutputFormat, StoreObjectIdentifier, StoreObjectType};
use relmodel_runtime::{RuntimeEntityTypeOverrides, RuntimeModel};

mod report;

use report::ModelReport;

/// relmodel - Inspect relational entity type mappings and their overrides
#[derive(Parser)]
#[command(name = "relmodel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: relmodel.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List entity types and their per-store-object overrides
    Inspect {
        /// Model definition file
        definition: PathBuf,

        /// Only show this entity type
        #[arg(short, long)]
        entity: Option<String>,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Check whether an entity type has overrides for a store object
    Find {
        /// Model definition file
        definition: PathBuf,

        /// Entity type name
        entity: String,

        /// Store object name
        store_object: String,

        /// Store object schema (defaults to the configured default schema)
        #[arg(short, long)]
        schema: Option<String>,

        /// Store object kind
        #[arg(short, long, default_value = "table")]
        kind: StoreObjectType,
    },

    /// Write a default config file
    Init {
        /// Where to write the config
        #[arg(default_value = "relmodel.toml")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "relmodel=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    // Load config if specified
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("relmodel.toml").exists() {
        Config::from_file(Path::new("relmodel.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    if cli.verbose {
        eprintln!(
            "{} default schema: {}",
            "Using".cyan(),
            config.default_schema.as_deref().unwrap_or("<none>")
        );
    }

    match cli.command {
        Commands::Inspect { definition, entity, format } => {
            let format = format.map(OutputFormat::from).unwrap_or(config.output);
            inspect_command(&config, &definition, entity.as_deref(), format, cli.verbose)
        }
        Commands::Find { definition, entity, store_object, schema, kind } => {
            let store_object = StoreObjectIdentifier::new(kind, store_object, schema)
                .with_default_schema(config.default_schema.as_deref());
            find_command(&config, &definition, &entity, &store_object, cli.verbose)
        }
        Commands::Init { path } => init_command(&path),
    }
}

/// Load, build and finalize a model definition
///
/// `definition` comes from the command line and is used as given, relative
/// to the working directory rather than the config file.
fn load_model(config: &Config, definition: &Path, verbose: bool) -> Result<RuntimeModel> {
    if verbose {
        eprintln!("{} {}", "Loading model definition from:".cyan(), definition.display());
    }

    let model = ModelDefinition::from_file(definition)?.build(config.clone())?;
    tracing::info!(path = %definition.display(), "model finalized");
    Ok(model)
}

/// Build the report for `inspect`, rejecting an unknown `--entity`
fn inspect_report(model: &RuntimeModel, entity: Option<&str>) -> Result<ModelReport> {
    if let Some(name) = entity {
        if model.entity_type_by_name(name).is_none() {
            return Err(anyhow::anyhow!("Entity type '{}' not found in model", name));
        }
    }

    Ok(ModelReport::from_model(model, entity))
}

/// Overrides of the named entity type for `store_object`, if any
fn lookup_overrides<'a>(
    model: &'a RuntimeModel,
    entity: &str,
    store_object: &StoreObjectIdentifier,
) -> Result<Option<&'a RuntimeEntityTypeOverrides>> {
    let entity_type = model
        .entity_type_by_name(entity)
        .ok_or_else(|| anyhow::anyhow!("Entity type '{}' not found in model", entity))?;

    Ok(model.find_overrides(entity_type.id(), store_object))
}

/// Inspect command - print entity types and overrides
fn inspect_command(
    config: &Config,
    definition: &Path,
    entity: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let model = load_model(config, definition, verbose)?;
    let report = inspect_report(&model, entity)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Entity Type Overrides".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());

    for entity_type in &report.entity_types {
        println!();
        println!("{} {}", "Entity type:".bold(), entity_type.name.green());
        for (name, value) in &entity_type.annotations {
            println!("  {} = {}", name, value);
        }

        if entity_type.overrides.is_empty() {
            println!("  {}", "no overrides".dimmed());
            continue;
        }

        for overrides in &entity_type.overrides {
            println!("  {} {}", "→".yellow(), overrides.store_object.to_string().yellow());
            for (name, value) in &overrides.annotations {
                println!("      {} = {}", name, value);
            }
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());

    Ok(())
}

/// Find command - exit non-zero when the pair has no overrides
fn find_command(
    config: &Config,
    definition: &Path,
    entity: &str,
    store_object: &StoreObjectIdentifier,
    verbose: bool,
) -> Result<()> {
    let model = load_model(config, definition, verbose)?;

    match lookup_overrides(&model, entity, store_object)? {
        Some(overrides) => {
            println!(
                "{} {} has overrides for {}",
                "✓".green(),
                entity.bold(),
                store_object
            );
            for annotation in overrides.annotations().iter() {
                println!("  {} = {} ({})", annotation.name, annotation.value, annotation.source);
            }
            Ok(())
        }
        None => {
            println!(
                "{} {} has no overrides for {}",
                "✗".red(),
                entity.bold(),
                store_object
            );
            std::process::exit(1);
        }
    }
}

/// Init command - write a default config file
fn init_command(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(anyhow::anyhow!("{} already exists", path.display()));
    }

    Config::default().save_to_file(path)?;
    eprintln!("{} {}", "Config written to:".green(), path.display());
    Ok(())
}
