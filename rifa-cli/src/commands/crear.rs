//! Crear command implementation.
//!
//! This module implements the `crear` command, which registers a new raffle
//! with a name, slug, ticket price, and capacity.

use crate::error::CliError;
use crate::utils::{format_cents, load_configuration, open_database, GlobalOptions};
use clap::Args;
use rifa::Raffle;

/// Register a new raffle.
#[derive(Args)]
pub struct CrearCommand {
    /// Display name of the raffle
    #[arg(long, value_name = "NAME")]
    pub nombre: String,

    /// Unique URL-friendly identifier
    #[arg(long, value_name = "SLUG")]
    pub slug: String,

    /// Ticket price in centavos
    #[arg(long, value_name = "CENTAVOS")]
    pub precio: i64,

    /// Total number of tickets
    #[arg(long, value_name = "COUNT")]
    pub boletos: u32,
}

impl CrearCommand {
    /// Execute the crear command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let raffle = Raffle::builder(self.nombre, self.slug, self.precio, self.boletos)
            .build()
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let stored = db.create_raffle(&raffle).map_err(CliError::from)?;

        println!("Rifa creada: {} (id {})", stored.name(), stored.id());
        println!("  slug:    {}", stored.slug());
        println!("  precio:  {}", format_cents(stored.price_cents()));
        println!("  boletos: {}", stored.capacity());

        Ok(())
    }
}
