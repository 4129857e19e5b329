//! Vencer command implementation.
//!
//! This module implements the `vencer` command, which expires a pending
//! reservation and returns its numbers to the sellable pool.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, reservation_by_folio, GlobalOptions};
use clap::Args;
use rifa::expire;

/// Expire a pending reservation and release its numbers.
#[derive(Args)]
pub struct VencerCommand {
    /// Reservation folio
    #[arg(value_name = "FOLIO")]
    pub folio: String,
}

impl VencerCommand {
    /// Execute the vencer command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = reservation_by_folio(&db, &self.folio)?;
        let outcome = expire(&mut db, reservation.id()).map_err(CliError::from)?;

        println!(
            "Reserva vencida: folio {} ({} boletos liberados)",
            outcome.reservation.folio().as_str(),
            outcome.released
        );

        if !global.quiet && outcome.counter.clamped {
            eprintln!("Warning: sold counter was out of sync and has been clamped");
        }

        Ok(())
    }
}
