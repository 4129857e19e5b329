//! High-level raffle lifecycle operations.
//!
//! This module ties the allocator, database, and configuration together:
//!
//! - [`reserve`](crate::operations::ReservationManager::reserve): draw random
//!   numbers and create a pending reservation
//! - [`mark_paid`]: confirm a payment (idempotent)
//! - [`expire`]: lapse a pending reservation and release its numbers
//! - [`submit_payment_reference`]: attach the buyer's transfer reference
//! - [`status_by_contact`] / [`status_by_folio`]: buyer-facing lookups
//!
//! Each mutating operation runs in a single immediate transaction and writes
//! its audit record best-effort after commit.

pub mod counter;
pub mod recorder;
pub mod reserve;
pub mod status;
pub mod transition;

// Re-export key types at module root
pub use counter::{adjust_sold, CounterAdjustment};
pub use recorder::{record, RecordOutcome};
pub use reserve::{ReservationManager, ReserveOutcome, ReserveRequest};
pub use status::{status_by_contact, status_by_folio, ReservationStatus, StatusReport};
pub use transition::{expire, mark_paid, submit_payment_reference, ExpireOutcome, PaymentOutcome};
