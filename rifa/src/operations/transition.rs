//! Reservation state transitions.
//!
//! The state machine is `pendiente → pagado` and `pendiente → vencido`; both
//! end states are terminal. Every transition runs in an immediate
//! transaction together with its counter adjustment, then writes its audit
//! record best-effort after commit.

use rusqlite::TransactionBehavior;

use crate::activity::Activity;
use crate::database::{self, Database};
use crate::error::{Error, Result};
use crate::operations::counter::{adjust_sold, CounterAdjustment};
use crate::operations::recorder;
use crate::reservation::{Reservation, ReservationState};

/// The outcome of a payment confirmation.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// The reservation after the operation.
    pub reservation: Reservation,
    /// True if the reservation was already paid and nothing changed.
    pub already_paid: bool,
    /// Whether the audit record was written (false when `already_paid`).
    pub activity_recorded: bool,
}

/// The outcome of expiring a reservation.
#[derive(Debug, Clone)]
pub struct ExpireOutcome {
    /// The reservation after the operation.
    pub reservation: Reservation,
    /// How many numbers were returned to the pool.
    pub released: u32,
    /// The sold-counter adjustment, including any drift correction.
    pub counter: CounterAdjustment,
    /// Whether the audit record was written.
    pub activity_recorded: bool,
}

/// Marks a pending reservation as paid.
///
/// Confirming an already-paid reservation is a no-op reported through
/// `already_paid`; no second payment activity is recorded. An optional
/// payment reference replaces the stored one when provided.
///
/// # Errors
///
/// - [`Error::NotFound`] if the reservation does not exist.
/// - [`Error::InvalidStateTransition`] if the reservation has expired.
pub fn mark_paid(
    db: &mut Database,
    reservation_id: i64,
    reference: Option<&str>,
) -> Result<PaymentOutcome> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    let reservation = database::fetch_reservation(&tx, reservation_id)?;
    match reservation.state() {
        ReservationState::Paid => {
            log::debug!("folio {} already paid, no-op", reservation.folio());
            return Ok(PaymentOutcome {
                reservation,
                already_paid: true,
                activity_recorded: false,
            });
        }
        ReservationState::Expired => {
            return Err(Error::InvalidStateTransition {
                from: ReservationState::Expired,
                action: "mark paid".to_string(),
            });
        }
        ReservationState::Pending => {}
    }

    database::update_reservation_state(&tx, reservation_id, ReservationState::Paid)?;
    if let Some(reference) = reference {
        database::update_payment_reference(&tx, reservation_id, reference)?;
    }

    let raffle = database::fetch_raffle(&tx, reservation.raffle_id())?;
    let raffle_name = raffle.name().to_string();
    tx.commit()?;

    let reservation = db.get_reservation(reservation_id)?;
    let activity = Activity::payment_confirmed(
        reservation.folio(),
        reservation.buyer_name(),
        &raffle_name,
        reservation.amount_cents(),
        reservation.id(),
    );
    let outcome = recorder::record(db.connection(), &activity);

    Ok(PaymentOutcome {
        reservation,
        already_paid: false,
        activity_recorded: outcome.recorded(),
    })
}

/// Expires a pending reservation, releasing its numbers.
///
/// The sold counter is decremented by the reservation's quantity, clamped at
/// zero; any drift is reported in the outcome rather than failing the
/// operation.
///
/// # Errors
///
/// - [`Error::NotFound`] if the reservation does not exist.
/// - [`Error::InvalidStateTransition`] if the reservation is paid or already
///   expired.
pub fn expire(db: &mut Database, reservation_id: i64) -> Result<ExpireOutcome> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    let reservation = database::fetch_reservation(&tx, reservation_id)?;
    if reservation.state() != ReservationState::Pending {
        return Err(Error::InvalidStateTransition {
            from: reservation.state(),
            action: "expire".to_string(),
        });
    }

    database::update_reservation_state(&tx, reservation_id, ReservationState::Expired)?;
    let released = database::release_reservation_numbers(&tx, reservation_id)?;
    let counter = adjust_sold(
        &tx,
        reservation.raffle_id(),
        -i64::from(reservation.quantity()),
    )?;
    tx.commit()?;

    let reservation = db.get_reservation(reservation_id)?;
    let activity = Activity::reservation_expired(
        reservation.folio(),
        reservation.buyer_name(),
        reservation.quantity(),
        reservation.id(),
    );
    let outcome = recorder::record(db.connection(), &activity);

    #[allow(clippy::cast_possible_truncation)]
    Ok(ExpireOutcome {
        reservation,
        released: released as u32,
        counter,
        activity_recorded: outcome.recorded(),
    })
}

/// Stores the buyer's payment reference on a pending reservation.
///
/// This is the buyer's "I transferred, here is my receipt number" step; it
/// does not change the reservation state. Terminal reservations reject it.
///
/// # Errors
///
/// - [`Error::NotFound`] if the reservation does not exist.
/// - [`Error::InvalidStateTransition`] if the reservation is paid or expired.
/// - [`Error::Validation`] if the reference is blank.
pub fn submit_payment_reference(
    db: &mut Database,
    reservation_id: i64,
    reference: &str,
) -> Result<Reservation> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(Error::Validation {
            field: "referencia_pago".into(),
            message: "payment reference must be non-empty".into(),
        });
    }

    let tx = db
        .connection_mut()
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    let reservation = database::fetch_reservation(&tx, reservation_id)?;
    if reservation.state() != ReservationState::Pending {
        return Err(Error::InvalidStateTransition {
            from: reservation.state(),
            action: "submit payment reference".to_string(),
        });
    }

    database::update_payment_reference(&tx, reservation_id, reference)?;
    tx.commit()?;

    db.get_reservation(reservation_id)
}
