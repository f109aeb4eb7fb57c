//! `traceline conformance` command - Judge measurements against CTQ limits

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_limit, format_short_id, open_store, resolve_format};
use crate::cli::table::RowTable;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::conformance;

#[derive(clap::Args, Debug)]
pub struct ConformanceArgs {
    /// Show only failing measurements
    #[arg(long)]
    pub failures: bool,
}

pub fn run(args: ConformanceArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let store = open_store(global, config)?;
    let mut rows = conformance::report(&store)?;
    let total = rows.len();
    if args.failures {
        rows.retain(|r| !r.verdict.is_pass());
    }

    let format = resolve_format(global.format, config);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&rows).into_diagnostic()?);
        }
        _ => {
            let mut table = RowTable::new(&[
                "EXECUTION", "OPERATOR", "STEP", "CTQ", "VALUE", "LOWER", "UPPER", "RESULT",
            ]);
            for row in &rows {
                let execution = if format == OutputFormat::Table {
                    format_short_id(&row.execution)
                } else {
                    row.execution.to_string()
                };
                table.push(vec![
                    execution,
                    row.operator.clone(),
                    row.step.clone(),
                    row.ctq.clone(),
                    format!("{} {}", row.value, row.unit),
                    format_limit(row.lower_limit),
                    format_limit(row.upper_limit),
                    row.verdict.to_string(),
                ]);
            }
            table.print(format, "measurement", global.quiet)?;

            if format == OutputFormat::Table && !global.quiet && total > 0 {
                let failing = rows.iter().filter(|r| !r.verdict.is_pass()).count();
                if failing == 0 {
                    println!("{} All {} measurement(s) in spec", style("✓").green(), total);
                } else {
                    println!(
                        "{} {} of {} measurement(s) out of spec",
                        style("✗").red(),
                        failing,
                        total
                    );
                }
            }
        }
    }

    Ok(())
}
