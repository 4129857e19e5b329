//! Sold-counter reconciliation.
//!
//! The `boletos_vendidos` counter on a raffle is denormalized: it covers
//! pending and paid reservations and is adjusted in the same transaction as
//! the reservation change that caused it. This module applies deltas and
//! clamps the result into `[0, total_boletos]`, reporting (rather than
//! failing on) any drift it corrects.

use rusqlite::Connection;

use crate::database;
use crate::error::Result;

/// The outcome of a counter adjustment.
///
/// When `clamped` is true the requested delta would have pushed the counter
/// out of range; the counter was set to the nearest bound and the drift was
/// logged. The operation that requested the adjustment still succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAdjustment {
    /// The counter value before the adjustment.
    pub previous: u32,
    /// The counter value after the adjustment.
    pub current: u32,
    /// The delta that was requested.
    pub requested_delta: i64,
    /// Whether the result had to be clamped into range.
    pub clamped: bool,
}

/// Applies a delta to a raffle's sold counter, clamping into range.
///
/// Must be called inside the same transaction as the reservation change it
/// accounts for.
///
/// # Errors
///
/// Returns an error if the raffle does not exist or the update fails.
pub fn adjust_sold(conn: &Connection, raffle_id: i64, delta: i64) -> Result<CounterAdjustment> {
    let raffle = database::fetch_raffle(conn, raffle_id)?;
    let previous = raffle.sold();
    let capacity = i64::from(raffle.capacity());

    let target = i64::from(previous) + delta;
    let clamped_target = target.clamp(0, capacity);
    let clamped = clamped_target != target;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let current = clamped_target as u32;

    database::update_raffle_sold(conn, raffle_id, current)?;

    if clamped {
        log::error!(
            "sold counter drift on rifa {raffle_id}: {previous} + {delta} out of [0, {capacity}], clamped to {current}"
        );
    } else {
        log::debug!("sold counter on rifa {raffle_id}: {previous} -> {current}");
    }

    Ok(CounterAdjustment {
        previous,
        current,
        requested_delta: delta,
        clamped,
    })
}
