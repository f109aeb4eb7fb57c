//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, conformance::ConformanceArgs, list::ListArgs, seed::SeedArgs,
    show::ShowArgs,
};

#[derive(Parser)]
#[command(name = "traceline")]
#[command(author, version, about = "Manufacturing traceability data core")]
#[command(long_about = "Seed, inspect and check traceability records: units, kits, process steps, CTQs, executions and measurements.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Database file, or `:memory:` (default: config, then traceline.db)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clear the store and load the demo dataset
    Seed(SeedArgs),

    /// List records of one kind
    List(ListArgs),

    /// Show a single record by id
    Show(ShowArgs),

    /// Judge every measurement against its CTQ limits
    Conformance(ConformanceArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Use the configured default, falling back to a table
    #[default]
    Auto,
    /// Human-readable table
    Table,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Just IDs, one per line
    Id,
}
