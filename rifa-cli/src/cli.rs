//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ActividadCommand, ApartarCommand, BoletosCommand, CrearCommand, EstadoCommand, InitCommand,
    PagarCommand, PagoCommand, ReferenciaCommand, RifasCommand, VencerCommand, VerificarCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for selling raffle tickets.
#[derive(Parser)]
#[command(name = "rifa")]
#[command(version, about = "Manage raffle ticket reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "RIFA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "RIFA_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "RIFA_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the rifa data directory and database
    Init(InitCommand),

    /// Register a new raffle
    Crear(CrearCommand),

    /// List registered raffles
    Rifas(RifasCommand),

    /// Change a raffle's lifecycle state
    Estado(EstadoCommand),

    /// Reserve random ticket numbers for a buyer
    Apartar(ApartarCommand),

    /// Attach a buyer's payment reference to a reservation
    Referencia(ReferenciaCommand),

    /// Confirm payment of a reservation
    Pagar(PagarCommand),

    /// Expire a pending reservation and release its numbers
    Vencer(VencerCommand),

    /// Look up reservations by phone or folio
    Verificar(VerificarCommand),

    /// List reservations for a raffle
    Boletos(BoletosCommand),

    /// Show the recent activity log
    Actividad(ActividadCommand),

    /// Show configured payment methods
    Pago(PagoCommand),
}
