use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use schemanote_core::{Config, Dialect, Model};
use schemanote_engine::{
    render_all, CommentProjector, GenerationOutcome, Generator, MigrationWriter, ProjectionOptions,
    SnapshotStore,
};
use schemanote_schema::{Datamodel, ModelNormalizer};

/// SchemaNote - Database comments from schema documentation
#[derive(Parser)]
#[command(name = "schemanote")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: schemanote.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SchemaArgs {
    /// Path to the datamodel JSON exported by the schema loader
    #[arg(short, long)]
    schema: PathBuf,

    /// Directory holding comments-latest.json (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Database provider: postgresql or mysql (overrides config)
    #[arg(short, long)]
    provider: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a migration with the comment changes since the last snapshot
    Generate {
        #[command(flatten)]
        args: SchemaArgs,

        /// Print the statements instead of writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Exit with status 1 if comment changes are not yet recorded
    Check {
        #[command(flatten)]
        args: SchemaArgs,
    },

    /// Print the current comment snapshot
    Snapshot {
        #[command(flatten)]
        args: SchemaArgs,

        /// Print statements for every comment instead of JSON
        #[arg(long)]
        sql: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    // Load config if specified
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("schemanote.toml").exists() {
        Config::from_file(Path::new("schemanote.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    tracing::debug!(
        provider = %config.provider,
        targets = ?config.targets,
        output_dir = %config.resolved_output_dir().display(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Generate { args, dry_run } => {
            let config = apply_overrides(config, &args);
            generate_command(&config, &args.schema, dry_run, cli.verbose)
        }
        Commands::Check { args } => {
            let config = apply_overrides(config, &args);
            check_command(&config, &args.schema)
        }
        Commands::Snapshot { args, sql } => {
            let config = apply_overrides(config, &args);
            snapshot_command(&config, &args.schema, sql)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn apply_overrides(mut config: Config, args: &SchemaArgs) -> Config {
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
        config.output_dir_env = None;
    }
    if let Some(provider) = &args.provider {
        config.provider = Dialect::from_provider(provider);
    }
    config
}

fn load_models(schema: &Path, verbose: bool) -> Result<Vec<Model>> {
    if verbose {
        eprintln!("{} {}", "Loading datamodel from:".cyan(), schema.display());
    }

    let datamodel = Datamodel::from_file(schema)
        .with_context(|| format!("Failed to load datamodel {}", schema.display()))?;

    Ok(ModelNormalizer::normalize(&datamodel))
}

fn generator_for(config: &Config, schema: &Path) -> Generator {
    Generator::new(
        SnapshotStore::new(&config.resolved_output_dir()),
        MigrationWriter::for_schema(schema),
    )
}

/// Generate command - write the comment migration
fn generate_command(config: &Config, schema: &Path, dry_run: bool, verbose: bool) -> Result<()> {
    let models = load_models(schema, verbose)?;
    let generator = generator_for(config, schema);

    if verbose {
        eprintln!(
            "{} {} ({} dialect)",
            "Comparing against:".cyan(),
            generator.snapshot().path().display(),
            config.provider
        );
    }

    if dry_run {
        let plan = generator.plan(&models, config)?;
        if !plan.has_changes() {
            println!("{}", "No changes detected".green());
        } else {
            println!("{}", plan.statements.join("\n"));
        }
        return Ok(());
    }

    match generator.run(&models, config, Utc::now())? {
        GenerationOutcome::NoChanges => {
            println!(
                "{}",
                "No changes detected, skipping creating a fresh comments migration...".green()
            );
        }
        GenerationOutcome::Written(migration) => {
            println!(
                "{} {}",
                "Comments generation completed:".green().bold(),
                migration.name
            );
            if verbose {
                eprintln!("{} {}", "Migration saved to:".green(), migration.path.display());
            }
        }
    }

    Ok(())
}

/// Check command - fail when the snapshot is behind the schema
fn check_command(config: &Config, schema: &Path) -> Result<()> {
    let models = load_models(schema, false)?;
    let plan = generator_for(config, schema).plan(&models, config)?;

    if !plan.has_changes() {
        println!("{}", "✓ Comments are up to date".green());
        return Ok(());
    }

    println!("{}", "✗ Pending comment changes:".red().bold());
    for (key, table) in plan.diff.iter() {
        let columns = table.columns.as_ref().map_or(0, |c| c.len());
        let table_changed = if table.table.is_some() { "table + " } else { "" };
        println!("  {} ({}{} columns)", key.yellow(), table_changed, columns);
    }

    std::process::exit(1);
}

/// Snapshot command - print the current comment state
fn snapshot_command(config: &Config, schema: &Path, sql: bool) -> Result<()> {
    let models = load_models(schema, false)?;
    let comments = CommentProjector::project(&models, &ProjectionOptions::from_config(config));

    if sql {
        println!("{}", render_all(&comments, config.provider).join("\n"));
    } else {
        println!("{}", serde_json::to_string_pretty(&comments)?);
    }

    Ok(())
}
