#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # rifa
//!
//! A library for running raffle ticket sales.
//!
//! This library provides core types and functionality for allocating random
//! ticket numbers, tracking reservations through their payment lifecycle,
//! and keeping the per-raffle sold counter honest under concurrency.
//!
//! ## Core Types
//!
//! - [`TicketNumber`] and [`Folio`]: validated ticket numbers and receipts
//! - [`Raffle`] and [`Reservation`]: the sellable pool and a buyer's claim
//! - [`Activity`]: append-only audit records
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use rifa::{Raffle, TicketNumber};
//!
//! // Ticket numbers are 1-based and render zero-padded
//! let number = TicketNumber::try_from(7).unwrap();
//! assert_eq!(format!("{number}"), "0007");
//!
//! // A raffle with 1000 tickets at MXN $100.00 each
//! let raffle = Raffle::builder("Rifa Moto 2026", "rifa-moto", 10_000, 1000)
//!     .build()
//!     .unwrap();
//! assert_eq!(raffle.remaining(), 1000);
//! ```

pub mod activity;
pub mod allocator;
pub mod config;
pub mod database;
pub mod error;
pub mod folio;
pub mod logging;
pub mod operations;
pub mod raffle;
pub mod reservation;
pub mod ticket;

// Re-export key types at crate root for convenience
pub use activity::{Activity, ActivityKind, ActivityMetadata};
pub use config::{Config, ConfigBuilder, OutputFormat, PaymentMethod};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use folio::Folio;
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    expire, mark_paid, status_by_contact, status_by_folio, submit_payment_reference,
    CounterAdjustment, ExpireOutcome, PaymentOutcome, ReservationManager, ReservationStatus,
    ReserveOutcome, ReserveRequest, StatusReport,
};
pub use raffle::{Raffle, RaffleState};
pub use reservation::{Reservation, ReservationState, PAYMENT_REFERENCE_PENDING};
pub use ticket::TicketNumber;
