//! Table formatting for CLI list commands
//!
//! A `RowTable` holds plain string cells. The first column is always the
//! record id so `--format id` can print it alone.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;

/// Header plus string rows, rendered per output format
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl RowTable {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a markdown-style text table
    pub fn to_text(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().map(|h| h.to_string()));
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }
        builder.build().with(Style::markdown()).to_string()
    }

    /// Write as CSV with a header row
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            writer.write_record(row).into_diagnostic()?;
        }
        writer.flush().into_diagnostic()?;
        Ok(())
    }

    /// Print in a tabular format; `noun` names the rows in the summary line
    pub fn print(&self, format: OutputFormat, noun: &str, quiet: bool) -> Result<()> {
        match format {
            OutputFormat::Csv => self.write_csv(io::stdout().lock()),
            OutputFormat::Id => {
                for row in &self.rows {
                    if let Some(id) = row.first() {
                        println!("{}", id);
                    }
                }
                Ok(())
            }
            _ => {
                if self.is_empty() {
                    if !quiet {
                        println!("No {} found.", noun);
                    }
                    return Ok(());
                }
                println!("{}", self.to_text());
                if !quiet {
                    println!();
                    println!("{}", style(format!("{} {}(s) found", self.len(), noun)).dim());
                }
                Ok(())
            }
        }
    }
}
