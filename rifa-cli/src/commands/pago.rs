//! Pago command implementation.
//!
//! This module implements the `pago` command, which prints the payment
//! methods configured for buyer-facing display.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use rifa::PaymentMethod;

/// Show configured payment methods.
#[derive(Args)]
pub struct PagoCommand {}

impl PagoCommand {
    /// Execute the pago command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        if config.payment_methods().is_empty() {
            println!("Sin metodos de pago configurados");
            println!("Agrega payment_methods a config.yaml en el data dir");
            return Ok(());
        }

        for method in config.payment_methods() {
            match method {
                PaymentMethod::Transferencia {
                    banco,
                    clabe,
                    titular,
                } => {
                    println!("Transferencia");
                    println!("  banco:   {banco}");
                    println!("  clabe:   {clabe}");
                    println!("  titular: {titular}");
                }
                PaymentMethod::Deposito {
                    banco,
                    tarjeta,
                    titular,
                } => {
                    println!("Deposito");
                    println!("  banco:   {banco}");
                    println!("  tarjeta: {tarjeta}");
                    println!("  titular: {titular}");
                }
            }
        }

        Ok(())
    }
}
