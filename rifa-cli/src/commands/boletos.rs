//! Boletos command implementation.
//!
//! This module implements the `boletos` command, which lists reservations
//! in table, JSON, or CSV form, optionally filtered by raffle and state.

use crate::error::CliError;
use crate::utils::{
    csv_error, format_cents, format_timestamp, json_error, load_configuration, open_database,
    GlobalOptions,
};
use clap::{Args, ValueEnum};
use rifa::{Reservation, ReservationState};
use std::io::Write;

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 8] = [
    "folio",
    "comprador",
    "telefono",
    "numeros",
    "estado",
    "monto",
    "referencia",
    "created_at",
];

/// List reservations for a raffle.
#[derive(Args)]
pub struct BoletosCommand {
    /// Filter by raffle slug
    #[arg(long, value_name = "SLUG")]
    pub rifa: Option<String>,

    /// Filter by reservation state (pendiente, pagado, vencido)
    #[arg(long, value_name = "ESTADO")]
    pub estado: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum, env = "RIFA_OUTPUT_FORMAT", ignore_case = true)]
    pub format: Option<OutputFormat>,
}

/// Output format for list commands.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl From<rifa::OutputFormat> for OutputFormat {
    fn from(format: rifa::OutputFormat) -> Self {
        match format {
            rifa::OutputFormat::Table => Self::Table,
            rifa::OutputFormat::Json => Self::Json,
            rifa::OutputFormat::Csv => Self::Csv,
        }
    }
}

/// Pick the effective format: flag first, then config, then table.
pub fn effective_format(
    flag: Option<OutputFormat>,
    config: &rifa::Config,
) -> OutputFormat {
    flag.unwrap_or_else(|| {
        config
            .output_format
            .map_or(OutputFormat::Table, OutputFormat::from)
    })
}

/// Render a reservation's numbers with buyer-facing 4-digit padding.
pub fn padded_numbers(reservation: &Reservation) -> String {
    reservation
        .numbers()
        .iter()
        .map(std::string::ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl BoletosCommand {
    /// Execute the boletos command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let raffle_id = match self.rifa {
            Some(ref slug) => Some(
                db.get_raffle_by_slug(slug)
                    .map_err(|e| {
                        if e.is_not_found() {
                            CliError::SemanticFailure(format!("No raffle with slug '{slug}'"))
                        } else {
                            CliError::from(e)
                        }
                    })?
                    .id(),
            ),
            None => None,
        };

        let state_filter = self
            .estado
            .as_deref()
            .map(ReservationState::parse)
            .transpose()
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let mut reservations = db.list_reservations(raffle_id).map_err(CliError::from)?;
        if let Some(state) = state_filter {
            reservations.retain(|r| r.state() == state);
        }

        match effective_format(self.format, &config) {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => format_as_json(&reservations)?,
            OutputFormat::Csv => format_as_csv(&reservations)?,
        }

        Ok(())
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            res.folio().as_str(),
            res.buyer_name(),
            res.buyer_contact(),
            padded_numbers(res),
            res.state(),
            format_cents(res.amount_cents()),
            res.payment_reference_display(),
            format_timestamp(res.created_at()),
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations
        .iter()
        .map(|r| {
            serde_json::json!({
                "folio": r.folio().as_str(),
                "comprador": r.buyer_name(),
                "telefono": r.buyer_contact(),
                "numeros": r.numbers().iter().map(|n| n.value()).collect::<Vec<_>>(),
                "estado": r.state().as_str(),
                "monto_centavos": r.amount_cents(),
                "referencia": r.payment_reference(),
                "created_at": format_timestamp(r.created_at()),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data).map_err(json_error)?;
    writeln!(handle)?;

    Ok(())
}

/// Format reservations as CSV.
fn format_as_csv(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::Writer::from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for res in reservations {
        writer
            .write_record(&[
                res.folio().as_str().to_string(),
                res.buyer_name().to_string(),
                res.buyer_contact().to_string(),
                res.numbers_display(),
                res.state().to_string(),
                res.amount_cents().to_string(),
                res.payment_reference_display().to_string(),
                format_timestamp(res.created_at()),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
