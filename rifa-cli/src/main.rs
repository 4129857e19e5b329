//! Main entry point for the rifa CLI.
//!
//! This is the command-line interface for the rifa ticket reservation
//! system. It provides commands for running a raffle end to end:
//! - `crear`: Register a new raffle
//! - `apartar`: Reserve random ticket numbers for a buyer
//! - `pagar` / `vencer`: Resolve a pending reservation
//! - `verificar`: Look up a buyer's tickets

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = rifa::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Crear(cmd) => cmd.execute(&global),
        cli::Command::Rifas(cmd) => cmd.execute(&global),
        cli::Command::Estado(cmd) => cmd.execute(&global),
        cli::Command::Apartar(cmd) => cmd.execute(&global),
        cli::Command::Referencia(cmd) => cmd.execute(&global),
        cli::Command::Pagar(cmd) => cmd.execute(&global),
        cli::Command::Vencer(cmd) => cmd.execute(&global),
        cli::Command::Verificar(cmd) => cmd.execute(&global),
        cli::Command::Boletos(cmd) => cmd.execute(&global),
        cli::Command::Actividad(cmd) => cmd.execute(&global),
        cli::Command::Pago(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
