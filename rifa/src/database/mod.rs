//! Database layer for persistent storage of raffles and reservations.
//!
//! This module provides a SQLite-based storage layer for raffle ticket
//! reservations, including connection management, schema versioning, and
//! CRUD operations.
//!
//! Per-number ownership lives in its own table keyed on (raffle, number), so
//! the schema itself rules out two reservations holding the same number.
//!
//! # Examples
//!
//! ```no_run
//! use rifa::database::{Database, DatabaseConfig};
//! use rifa::Raffle;
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/rifa.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Create a raffle
//! let raffle = Raffle::builder("Rifa Moto 2026", "rifa-moto", 30_000, 1000)
//!     .build()
//!     .unwrap();
//! let stored = db.create_raffle(&raffle).unwrap();
//!
//! // List all raffles
//! for raffle in db.list_raffles().unwrap() {
//!     println!("{} ({} / {})", raffle.name(), raffle.sold(), raffle.capacity());
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

pub(crate) use operations::{
    fetch_held_numbers, fetch_raffle, fetch_reservation, folio_exists, insert_activity,
    insert_reservation, release_reservation_numbers, update_payment_reference,
    update_raffle_sold, update_reservation_state,
};
