//! `traceline show` command - Show a single record

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::error::TraceError;
use crate::core::identity::EntityId;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Record ID (e.g. UNIT-01J...)
    pub id: String,
}

pub fn run(args: ShowArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let id = EntityId::parse(&args.id).map_err(TraceError::from)?;
    let store = open_store(global, config)?;
    let record = store.find(&id)?;

    match resolve_format(global.format, config) {
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&record).into_diagnostic()?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record).into_diagnostic()?);
        }
        OutputFormat::Id => {
            println!("{}", record.id());
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("ID").bold(),
                style(record.id().to_string()).cyan()
            );
            println!("{}: {}", style("Kind").bold(), record.kind());
            println!("{}: {}", style("Name").bold(), style(record.label()).yellow());

            let fields = serde_json::to_value(&record).into_diagnostic()?;
            if let Some(map) = fields.as_object() {
                for (key, value) in map {
                    if matches!(key.as_str(), "kind" | "id" | "created") {
                        continue;
                    }
                    let shown = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    println!("{}: {}", style(key).bold(), shown);
                }
            }

            let references = record.references();
            if !references.is_empty() {
                println!();
                println!("{}", style("Links:").bold());
                for reference in references {
                    let target = store
                        .find(&reference.id)
                        .map(|r| r.label())
                        .unwrap_or_else(|_| style("(missing)").red().to_string());
                    println!(
                        "  {} → {} ({})",
                        reference.field,
                        style(reference.id.to_string()).cyan(),
                        target
                    );
                }
            }

            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("Created").dim(),
                record.created().format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
    }

    Ok(())
}
