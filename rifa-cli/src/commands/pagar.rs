//! Pagar command implementation.
//!
//! This module implements the `pagar` command, the administrative
//! confirmation that a reservation's payment arrived.

use crate::error::CliError;
use crate::utils::{
    format_cents, load_configuration, open_database, reservation_by_folio, GlobalOptions,
};
use clap::Args;
use rifa::mark_paid;

/// Confirm payment of a reservation.
#[derive(Args)]
pub struct PagarCommand {
    /// Reservation folio
    #[arg(value_name = "FOLIO")]
    pub folio: String,

    /// Payment reference to record, if the buyer has not submitted one
    #[arg(long, value_name = "REFERENCIA")]
    pub referencia: Option<String>,
}

impl PagarCommand {
    /// Execute the pagar command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = reservation_by_folio(&db, &self.folio)?;
        let outcome = mark_paid(&mut db, reservation.id(), self.referencia.as_deref())
            .map_err(CliError::from)?;

        if outcome.already_paid {
            println!(
                "Folio {} ya estaba pagado ({})",
                outcome.reservation.folio().as_str(),
                format_cents(outcome.reservation.amount_cents())
            );
        } else {
            println!(
                "Pago confirmado: folio {} por {}",
                outcome.reservation.folio().as_str(),
                format_cents(outcome.reservation.amount_cents())
            );
        }

        Ok(())
    }
}
