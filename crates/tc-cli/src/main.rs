use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tc_cli::input::load_config;
use tc_cli::tracing_init::init_tracing;
use tc_cli::{
    cmd_compile, cmd_decompile, cmd_filters, cmd_normalize, cmd_predicate, cmd_query,
};

#[derive(Parser)]
#[command(
    name = "trigger-compose",
    about = "Trigger condition compiler and histogram preview normalizer"
)]
struct Cli {
    /// Path to trigger.toml (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a bucket-selector JSON into its editable condition form
    Decompile {
        /// Bucket-selector JSON file, or - for stdin
        input: PathBuf,
    },

    /// Compile a condition clause list into a bucket-selector JSON
    Compile {
        /// Clause-list JSON file, or - for stdin
        input: PathBuf,
    },

    /// Convert between filter maps and filter-clause lists
    Filters {
        #[command(subcommand)]
        action: FiltersAction,
    },

    /// Parse a single query predicate fragment
    Predicate {
        /// Fragment such as "status":"500" or bytes>=1024
        fragment: String,

        /// Print the canonical fragment instead of JSON
        #[arg(long)]
        render: bool,
    },

    /// Build a histogram preview query from a base query
    Query {
        /// Base query text
        base: String,

        /// Timestamp field to bucket on (detected when omitted)
        #[arg(short, long)]
        timestamp_field: Option<String>,
    },

    /// Normalize a tabular query result into a histogram series
    Normalize {
        /// Query-result JSON file, or - for stdin
        input: PathBuf,

        /// Reference time for synthesized buckets, epoch milliseconds
        #[arg(long)]
        now: Option<i64>,

        /// Return the parsed series without synthesizing sparse results
        #[arg(long)]
        no_synthesize: bool,
    },
}

#[derive(Subcommand)]
enum FiltersAction {
    /// Flatten a filter map into a filter-clause list
    Decompile {
        /// Filter-map JSON file, or - for stdin
        input: PathBuf,
    },

    /// Group a filter-clause list into a filter map
    Compile {
        /// Filter-clause JSON file, or - for stdin
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, base_dir) = load_config(cli.config.as_deref())?;
    let _guard = init_tracing(&config.logging, &base_dir)?;
    if let Some(path) = &cli.config {
        tracing::debug!(domain = "conf", path = %path.display(), "configuration loaded");
    }

    match cli.command {
        Commands::Decompile { input } => {
            cmd_decompile::run(&input, &config)?;
        }

        Commands::Compile { input } => {
            cmd_compile::run(&input, &config)?;
        }

        Commands::Filters { action } => match action {
            FiltersAction::Decompile { input } => cmd_filters::run_decompile(&input)?,
            FiltersAction::Compile { input } => cmd_filters::run_compile(&input)?,
        },

        Commands::Predicate { fragment, render } => {
            cmd_predicate::run(&fragment, render)?;
        }

        Commands::Query {
            base,
            timestamp_field,
        } => {
            cmd_query::run(&base, timestamp_field.as_deref(), &config)?;
        }

        Commands::Normalize {
            input,
            now,
            no_synthesize,
        } => {
            cmd_normalize::run(&input, &config, now, !no_synthesize)?;
        }
    }

    Ok(())
}
