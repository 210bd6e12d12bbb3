//! Command-line interface definitions and command runners.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use record_generator::{FieldStrategy, PlanKind, Populator, PopulatorBuilder, PopulatorConfig};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "record-populator")]
#[command(about = "Populate record types described in YAML with random values")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Populate instances of a type and print them as JSON
    Populate(PopulateArgs),

    /// Validate a configuration and print the field plan of every type
    Check(CheckArgs),
}

#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Path to configuration YAML file
    #[arg(long, short = 'c', env = "RECORD_POPULATOR_CONFIG")]
    pub config: PathBuf,

    /// Name of the type to populate
    #[arg(long = "type", short = 't')]
    pub type_name: String,

    /// Number of instances (a random count between 0 and 128 with --batch)
    #[arg(long, conflicts_with = "batch", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Populate a randomly sized batch
    #[arg(long)]
    pub batch: bool,

    /// Random seed for built-in generators (defaults to the config seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Path to configuration YAML file
    #[arg(long, short = 'c', env = "RECORD_POPULATOR_CONFIG")]
    pub config: PathBuf,
}

/// Run a parsed command, writing its output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    match cli.command {
        Commands::Populate(args) => run_populate(args, out),
        Commands::Check(args) => run_check(args, out),
    }
}

fn load(path: &Path) -> anyhow::Result<(PopulatorConfig, Populator)> {
    let config = PopulatorConfig::from_file(path)
        .with_context(|| format!("Failed to load config from {path:?}"))?;
    let populator = PopulatorBuilder::from_config(&config)
        .and_then(PopulatorBuilder::build)
        .with_context(|| format!("Invalid populator config in {path:?}"))?;
    Ok((config, populator))
}

fn run_populate<W: Write>(args: PopulateArgs, out: &mut W) -> anyhow::Result<()> {
    let (config, populator) = load(&args.config)?;
    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match (args.count, args.batch) {
        (Some(count), _) => {
            let beans = populator.populate_beans_sized_with(&args.type_name, count, &mut rng)?;
            info!("Populated {} instances of '{}'", beans.len(), args.type_name);
            write_json(out, &beans, args.pretty)?;
        }
        (None, true) => {
            let beans = populator.populate_beans_with(&args.type_name, &mut rng)?;
            info!("Populated {} instances of '{}'", beans.len(), args.type_name);
            write_json(out, &beans, args.pretty)?;
        }
        (None, false) => {
            let bean = populator.populate_bean_with(&args.type_name, &mut rng)?;
            write_json(out, &bean, args.pretty)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    Ok(())
}

fn run_check<W: Write>(args: CheckArgs, out: &mut W) -> anyhow::Result<()> {
    let (_, populator) = load(&args.config)?;

    let mut names = populator.schema().type_names();
    names.sort_unstable();
    for name in names {
        let Some(plan) = populator.plan(name) else {
            continue;
        };
        match &plan.kind {
            PlanKind::Enum { variants } => {
                writeln!(out, "{name}: enum [{}]", variants.join(", "))?;
            }
            PlanKind::NotInstantiable => writeln!(out, "{name}: not instantiable")?,
            PlanKind::Record { fields } => {
                writeln!(out, "{name}:")?;
                for field in fields {
                    let strategy = match &field.strategy {
                        FieldStrategy::Custom(_) => "custom".to_string(),
                        FieldStrategy::Container(_) => "empty".to_string(),
                        FieldStrategy::Scalar(_) => "random".to_string(),
                        FieldStrategy::Nested(target) => format!("nested {target}"),
                    };
                    writeln!(out, "  {}: {} ({strategy})", field.name, field.field_type)?;
                }
            }
        }
    }
    Ok(())
}
