//! `traceline seed` command - Reset the store to the demo dataset

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{database_target, open_store, resolve_format};
use crate::cli::table::RowTable;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::identity::EntityKind;
use crate::core::seed;
use crate::core::store::KindCounts;

#[derive(clap::Args, Debug)]
pub struct SeedArgs {
    /// Only clear existing records, do not load the dataset
    #[arg(long)]
    pub clear_only: bool,
}

pub fn run(args: SeedArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let store = open_store(global, config)?;
    let format = resolve_format(global.format, config);

    if args.clear_only {
        let cleared = seed::clear(&store)?;
        let total: usize = cleared.values().sum();
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&cleared).into_diagnostic()?)
            }
            OutputFormat::Yaml => print!("{}", serde_yml::to_string(&cleared).into_diagnostic()?),
            _ if global.quiet => {}
            _ => println!(
                "{} Cleared {} record(s) from {}",
                style("✓").green(),
                total,
                style(database_target(global, config)).cyan()
            ),
        }
        return Ok(());
    }

    let report = seed::reset(&store)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&report).into_diagnostic()?);
        }
        OutputFormat::Id => {
            println!("{}", report.torque_execution);
        }
        OutputFormat::Csv => {
            counts_table(&report.counts).print(format, "kind", global.quiet)?;
        }
        _ => {
            if global.quiet {
                return Ok(());
            }
            println!(
                "{} Seeded {}",
                style("✓").green(),
                style(database_target(global, config)).cyan()
            );
            println!(
                "   Units: {}  Kits: {}",
                style(report.units.join(", ")).yellow(),
                style(report.kits.join(", ")).yellow()
            );
            println!(
                "   Torque execution: {}",
                style(report.torque_execution.to_string()).cyan()
            );
            println!();
            println!("{}", counts_table(&report.counts).to_text());
        }
    }

    Ok(())
}

fn counts_table(counts: &KindCounts) -> RowTable {
    let mut table = RowTable::new(&["KIND", "COUNT"]);
    for kind in EntityKind::all() {
        let count = counts.get(kind).copied().unwrap_or(0);
        table.push(vec![kind.label().to_string(), count.to_string()]);
    }
    table
}
