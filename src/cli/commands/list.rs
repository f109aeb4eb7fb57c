//! `traceline list` command - List records of one kind

use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_short_id, open_store, resolve_format, truncate_str};
use crate::cli::table::RowTable;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::entity::Record;
use crate::core::error::TraceError;
use crate::core::identity::EntityKind;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Record kind (unit, kit, fixture, lot, episode, step, ctq, execution, measurement)
    pub kind: String,

    /// Limit output to N records
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn run(args: ListArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let kind: EntityKind = args.kind.parse().map_err(TraceError::from)?;
    let store = open_store(global, config)?;

    let mut records = store.list_records(kind)?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    match resolve_format(global.format, config) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&records).into_diagnostic()?);
        }
        format => {
            let mut table = RowTable::new(&["ID", "NAME", "KEY", "DETAIL", "CREATED"]);
            for record in &records {
                let id = if format == OutputFormat::Table {
                    format_short_id(record.id())
                } else {
                    record.id().to_string()
                };
                table.push(vec![
                    id,
                    truncate_str(&record.label(), 30),
                    record
                        .natural_key()
                        .map(|(_, value)| value)
                        .unwrap_or_else(|| "-".to_string()),
                    detail(record),
                    record.created().format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }
            table.print(format, kind.label(), global.quiet)?;
        }
    }

    Ok(())
}

/// Kind-specific summary column
fn detail(record: &Record) -> String {
    match record {
        Record::Unit(u) => u.description.clone().unwrap_or_default(),
        Record::Kit(k) => format!("unit {}", format_short_id(&k.unit)),
        Record::Fixture(f) => format!("kit {}", format_short_id(&f.kit)),
        Record::ComponentLot(l) => format!("qty {}", l.quantity),
        Record::Episode(e) => format!("unit {}", format_short_id(&e.unit)),
        Record::ProcessStep(s) => s.description.clone().unwrap_or_default(),
        Record::Ctq(c) => format!("{} {}", c.range_display(), c.measurement_unit),
        Record::Execution(e) => format!("step {}", format_short_id(&e.step)),
        Record::Measurement(m) => format!("{} {}", m.value, m.unit_label),
    }
}
