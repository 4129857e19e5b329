//! Estado command implementation.
//!
//! This module implements the `estado` command, which moves a raffle
//! between its lifecycle states (activa, pausada, finalizada).

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use rifa::RaffleState;

/// Change a raffle's lifecycle state.
#[derive(Args)]
pub struct EstadoCommand {
    /// Raffle slug
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// New state (activa, pausada, finalizada)
    #[arg(value_name = "ESTADO")]
    pub estado: String,
}

impl EstadoCommand {
    /// Execute the estado command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let state = RaffleState::parse(&self.estado)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let raffle = db.get_raffle_by_slug(&self.slug).map_err(|e| {
            if e.is_not_found() {
                CliError::SemanticFailure(format!("No raffle with slug '{}'", self.slug))
            } else {
                CliError::from(e)
            }
        })?;

        db.set_raffle_state(raffle.id(), state)
            .map_err(CliError::from)?;

        println!("Rifa '{}' ahora esta {}", raffle.name(), state);

        Ok(())
    }
}
