//! Rifas command implementation.
//!
//! This module implements the `rifas` command, which lists registered
//! raffles with their sales progress.

use crate::commands::boletos::{effective_format, OutputFormat};
use crate::error::CliError;
use crate::utils::{
    csv_error, format_cents, format_timestamp, json_error, load_configuration, open_database,
    GlobalOptions,
};
use clap::Args;
use rifa::Raffle;
use std::io::Write;

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 7] = [
    "id",
    "nombre",
    "slug",
    "precio",
    "vendidos",
    "total",
    "estado",
];

/// List registered raffles.
#[derive(Args)]
pub struct RifasCommand {
    /// Output format (defaults to the configured format)
    #[arg(long, value_enum, env = "RIFA_OUTPUT_FORMAT", ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl RifasCommand {
    /// Execute the rifas command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let raffles = db.list_raffles().map_err(CliError::from)?;

        match effective_format(self.format, &config) {
            OutputFormat::Table => format_as_table(&raffles)?,
            OutputFormat::Json => format_as_json(&raffles)?,
            OutputFormat::Csv => format_as_csv(&raffles)?,
        }

        Ok(())
    }
}

/// Format raffles as a human-readable table.
fn format_as_table(raffles: &[Raffle]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for raffle in raffles {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            raffle.id(),
            raffle.name(),
            raffle.slug(),
            format_cents(raffle.price_cents()),
            raffle.sold(),
            raffle.capacity(),
            raffle.state(),
        )?;
    }

    Ok(())
}

/// Format raffles as JSON.
fn format_as_json(raffles: &[Raffle]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = raffles
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id(),
                "nombre": r.name(),
                "slug": r.slug(),
                "precio_centavos": r.price_cents(),
                "vendidos": r.sold(),
                "total": r.capacity(),
                "estado": r.state().as_str(),
                "created_at": format_timestamp(r.created_at()),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data).map_err(json_error)?;
    writeln!(handle)?;

    Ok(())
}

/// Format raffles as CSV.
fn format_as_csv(raffles: &[Raffle]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::Writer::from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for raffle in raffles {
        writer
            .write_record(&[
                raffle.id().to_string(),
                raffle.name().to_string(),
                raffle.slug().to_string(),
                raffle.price_cents().to_string(),
                raffle.sold().to_string(),
                raffle.capacity().to_string(),
                raffle.state().to_string(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
