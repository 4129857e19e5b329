//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the rifa data directory and database.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use rifa::{Database, DatabaseConfig};
use std::fs;
use std::path::PathBuf;

/// Sample configuration written by `init --with-config`.
const SAMPLE_CONFIG: &str = "\
# rifa configuration
#
# folio:
#   prefix: RIFA-2026
# purchase:
#   min_purchase_cents: 30000
#   quantity_presets: [3, 5, 10]
# allocation:
#   max_attempts: 5
# payment_methods:
#   - tipo: transferencia
#     banco: BBVA
#     clabe: \"012345678901234567\"
#     titular: Maria Lopez
";

/// Initialize the rifa data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Overwrite an existing database
    #[arg(long)]
    overwrite: bool,

    /// Create a commented sample configuration file
    #[arg(long)]
    with_config: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// The --data-dir flag here means where to create, not where to find;
    /// it takes precedence over the global flag.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => resolve_data_dir(global)?,
        };

        let created_dir = !data_dir.exists();
        if created_dir {
            fs::create_dir_all(&data_dir)?;
        }

        let db_path = data_dir.join("rifa.db");
        if db_path.exists() {
            if self.overwrite {
                fs::remove_file(&db_path)?;
            } else {
                return Err(CliError::SemanticFailure(format!(
                    "Database already exists (use --overwrite to replace): {}",
                    db_path.display()
                )));
            }
        }

        // Opening creates the file and installs the schema
        let _db = Database::open(DatabaseConfig::new(&db_path)).map_err(CliError::from)?;

        println!("Initialized rifa in: {}", data_dir.display());
        if created_dir {
            println!("  - Created data directory");
        }
        if self.overwrite {
            println!("  - Recreated database");
        } else {
            println!("  - Created database");
        }

        if self.with_config {
            let config_path = data_dir.join("config.yaml");
            if config_path.exists() {
                println!("  - Configuration file already exists (not overwritten)");
            } else {
                fs::write(&config_path, SAMPLE_CONFIG)?;
                println!("  - Created default configuration file");
            }
        }

        Ok(())
    }
}
