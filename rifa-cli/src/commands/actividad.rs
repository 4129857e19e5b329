//! Actividad command implementation.
//!
//! This module implements the `actividad` command, which shows the most
//! recent entries of the append-only audit log.

use crate::error::CliError;
use crate::utils::{format_cents, format_timestamp, load_configuration, open_database, GlobalOptions};
use clap::Args;
use std::io::Write;

/// Show the recent activity log.
#[derive(Args)]
pub struct ActividadCommand {
    /// Maximum number of entries to show
    #[arg(long, value_name = "COUNT", default_value = "20")]
    pub limit: u32,
}

impl ActividadCommand {
    /// Execute the actividad command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let activities = db.list_activities(self.limit).map_err(CliError::from)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "FECHA\tTIPO\tDESCRIPCION\tMONTO")?;
        for activity in &activities {
            writeln!(
                handle,
                "{}\t{}\t{}\t{}",
                format_timestamp(activity.created_at()),
                activity.kind(),
                activity.description(),
                format_cents(activity.amount_cents()),
            )?;
        }

        Ok(())
    }
}
