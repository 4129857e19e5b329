//! Referencia command implementation.
//!
//! This module implements the `referencia` command, which records a buyer's
//! transfer or deposit reference against a pending reservation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, reservation_by_folio, GlobalOptions};
use clap::Args;
use rifa::submit_payment_reference;

/// Attach a buyer's payment reference to a reservation.
#[derive(Args)]
pub struct ReferenciaCommand {
    /// Reservation folio
    #[arg(value_name = "FOLIO")]
    pub folio: String,

    /// The payment reference supplied by the buyer
    #[arg(value_name = "REFERENCIA")]
    pub referencia: String,
}

impl ReferenciaCommand {
    /// Execute the referencia command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = reservation_by_folio(&db, &self.folio)?;
        let updated = submit_payment_reference(&mut db, reservation.id(), &self.referencia)
            .map_err(CliError::from)?;

        println!(
            "Referencia registrada para folio {}: {}",
            updated.folio().as_str(),
            updated.payment_reference_display()
        );

        Ok(())
    }
}
