//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing:
//! - Test environment setup with an isolated data directory
//! - Command builder helpers for common patterns
//! - Fixtures for raffles and reservations

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the rifa data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with no minimum purchase, so tests can
    /// reserve single cheap tickets without tripping the default threshold.
    pub fn new() -> Self {
        let env = Self::bare();
        env.write_config("purchase:\n  min_purchase_cents: 0\n");
        env
    }

    /// Create a test environment without a config file.
    pub fn bare() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("rifa-data");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self { temp_dir, data_dir }
    }

    /// Write (or replace) the config file in the data directory.
    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.data_dir.join("config.yaml"), yaml)
            .expect("Failed to write config.yaml");
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("rifa").expect("Failed to find rifa binary");
        // Keep host configuration out of the tests
        cmd.env_remove("RIFA_DATA_DIR")
            .env_remove("RIFA_OUTPUT_FORMAT")
            .env_remove("RIFA_MIN_PURCHASE_CENTS")
            .env_remove("RIFA_FOLIO_PREFIX")
            .env_remove("RIFA_MAX_ATTEMPTS");
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Register a raffle with the given slug, price (centavos), and capacity.
    pub fn crear_rifa(&self, slug: &str, precio: i64, boletos: u32) {
        let output = self
            .command()
            .arg("crear")
            .arg("--nombre")
            .arg(format!("Rifa {slug}"))
            .arg("--slug")
            .arg(slug)
            .arg("--precio")
            .arg(precio.to_string())
            .arg("--boletos")
            .arg(boletos.to_string())
            .output()
            .expect("Failed to run crear command");
        assert!(
            output.status.success(),
            "crear failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Reserve tickets and return the printed folio.
    pub fn apartar(&self, slug: &str, cantidad: u32, telefono: &str) -> String {
        let output = self
            .command()
            .arg("apartar")
            .arg("--rifa")
            .arg(slug)
            .arg("--cantidad")
            .arg(cantidad.to_string())
            .arg("--nombre")
            .arg("Ana Torres")
            .arg("--telefono")
            .arg(telefono)
            .output()
            .expect("Failed to run apartar command");
        assert!(
            output.status.success(),
            "apartar failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_folio(&String::from_utf8(output.stdout).expect("Invalid UTF-8 in output"))
    }
}

/// Extract the folio from `apartar` output.
pub fn parse_folio(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Folio: "))
        .expect("apartar output has no folio line")
        .trim()
        .to_string()
}
