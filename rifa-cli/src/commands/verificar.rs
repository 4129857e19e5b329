//! Verificar command implementation.
//!
//! This module implements the `verificar` command, the buyer-facing status
//! lookup by contact phone or by folio.

use crate::commands::boletos::padded_numbers;
use crate::error::CliError;
use crate::utils::{format_cents, load_configuration, open_database, GlobalOptions};
use clap::Args;
use rifa::{status_by_contact, status_by_folio, ReservationStatus};

/// Look up reservations by phone or folio.
#[derive(Args)]
#[command(group = clap::ArgGroup::new("lookup").required(true).multiple(false))]
pub struct VerificarCommand {
    /// Buyer's contact phone
    #[arg(long, value_name = "PHONE", group = "lookup")]
    pub telefono: Option<String>,

    /// Reservation folio
    #[arg(long, value_name = "FOLIO", group = "lookup")]
    pub folio: Option<String>,

    /// Restrict a phone lookup to one raffle slug
    #[arg(long, value_name = "SLUG", requires = "telefono")]
    pub rifa: Option<String>,
}

impl VerificarCommand {
    /// Execute the verificar command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        if let Some(folio) = self.folio {
            let status = status_by_folio(&db, &folio).map_err(|e| {
                if e.is_not_found() {
                    CliError::SemanticFailure(format!(
                        "No reservation found for folio '{}'",
                        folio.trim()
                    ))
                } else {
                    CliError::from(e)
                }
            })?;
            print_entry(&status);
            return Ok(());
        }

        // clap guarantees exactly one of the two lookups is present
        let telefono = self.telefono.unwrap_or_default();

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

        let report = status_by_contact(&db, &telefono, raffle_id).map_err(CliError::from)?;

        if report.is_empty() {
            println!("Sin reservas para {}", telefono.trim());
            return Ok(());
        }

        for entry in &report.entries {
            print_entry(entry);
            println!();
        }
        println!("Pendiente: {}", format_cents(report.pending_cents));
        println!("Pagado:    {}", format_cents(report.paid_cents));

        Ok(())
    }
}

/// Print one reservation with its raffle name.
fn print_entry(status: &ReservationStatus) {
    let reservation = &status.reservation;
    println!("Folio: {}", reservation.folio().as_str());
    println!("  rifa:       {}", status.raffle_name);
    println!("  comprador:  {}", reservation.buyer_name());
    println!("  boletos:    {}", padded_numbers(reservation));
    println!("  estado:     {}", reservation.state());
    println!("  monto:      {}", format_cents(reservation.amount_cents()));
    println!("  referencia: {}", reservation.payment_reference_display());
}
