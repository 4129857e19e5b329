//! Apartar command implementation.
//!
//! This module implements the `apartar` command, the purchase entry point:
//! it draws random ticket numbers for a buyer and prints the receipt.

use crate::commands::boletos::padded_numbers;
use crate::error::CliError;
use crate::utils::{format_cents, load_configuration, open_database, GlobalOptions};
use clap::Args;
use rifa::{ReservationManager, ReserveRequest};

/// Reserve random ticket numbers for a buyer.
#[derive(Args)]
pub struct ApartarCommand {
    /// Raffle slug
    #[arg(long, value_name = "SLUG")]
    pub rifa: String,

    /// Number of tickets to reserve
    #[arg(long, value_name = "COUNT")]
    pub cantidad: u32,

    /// Buyer's display name
    #[arg(long, value_name = "NAME")]
    pub nombre: String,

    /// Buyer's contact phone (WhatsApp)
    #[arg(long, value_name = "PHONE")]
    pub telefono: String,
}

impl ApartarCommand {
    /// Execute the apartar command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.cantidad == 0 {
            return Err(CliError::InvalidArguments(
                "cantidad must be at least 1".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let raffle = db.get_raffle_by_slug(&self.rifa).map_err(|e| {
            if e.is_not_found() {
                CliError::SemanticFailure(format!("No raffle with slug '{}'", self.rifa))
            } else {
                CliError::from(e)
            }
        })?;

        let request = ReserveRequest {
            raffle_id: raffle.id(),
            quantity: self.cantidad,
            buyer_name: self.nombre,
            buyer_contact: self.telefono,
        };

        let outcome = ReservationManager::new(&mut db, &config)
            .reserve(&request, &mut rand::thread_rng())
            .map_err(CliError::from)?;

        let reservation = &outcome.reservation;
        println!("Folio: {}", reservation.folio().as_str());
        println!("Boletos: {}", padded_numbers(reservation));
        println!("Total: {}", format_cents(reservation.amount_cents()));

        // Payment instructions go to stderr so stdout stays machine-friendly
        if !global.quiet {
            for method in config.payment_methods() {
                match method {
                    rifa::PaymentMethod::Transferencia { banco, clabe, .. } => {
                        eprintln!("Pago por transferencia: {banco} CLABE {clabe}");
                    }
                    rifa::PaymentMethod::Deposito { banco, tarjeta, .. } => {
                        eprintln!("Pago por deposito: {banco} tarjeta {tarjeta}");
                    }
                }
            }
            if outcome.attempts > 1 {
                eprintln!(
                    "Warning: allocation succeeded after {} attempts (contended raffle)",
                    outcome.attempts
                );
            }
        }

        Ok(())
    }
}
