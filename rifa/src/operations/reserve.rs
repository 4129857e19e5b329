//! Reservation creation.
//!
//! This module implements the purchase path: draw random unused numbers,
//! generate a unique folio, insert the reservation with its per-number
//! ownership rows, and bump the sold counter, all in one immediate
//! transaction per attempt.
//!
//! Two concurrent buyers can draw overlapping numbers; the loser's insert
//! hits the (rifa, numero) primary key, the transaction rolls back, and the
//! attempt repeats with a fresh draw against the updated held set. Attempts
//! are bounded by `allocation.max_attempts`.

use rand::Rng;
use rusqlite::TransactionBehavior;

use crate::activity::Activity;
use crate::allocator::select_numbers;
use crate::config::Config;
use crate::database::{self, Database};
use crate::error::{Error, Result};
use crate::folio::Folio;
use crate::operations::counter::adjust_sold;
use crate::operations::recorder;
use crate::reservation::Reservation;

/// Bound on folio draws within a single reservation attempt.
const FOLIO_DRAW_LIMIT: u32 = 16;

/// A request to reserve tickets.
#[derive(Debug, Clone)]
pub struct ReserveRequest {
    /// The raffle to buy into.
    pub raffle_id: i64,
    /// How many tickets to reserve.
    pub quantity: u32,
    /// Buyer display name.
    pub buyer_name: String,
    /// Buyer contact phone (used for status lookup).
    pub buyer_contact: String,
}

/// The outcome of a successful reservation.
#[derive(Debug, Clone)]
pub struct ReserveOutcome {
    /// The stored reservation.
    pub reservation: Reservation,
    /// How many attempts the allocation took.
    pub attempts: u32,
    /// Whether the audit record was written.
    pub activity_recorded: bool,
}

/// Creates reservations against a database using configured limits.
///
/// # Examples
///
/// ```no_run
/// use rifa::config::ConfigBuilder;
/// use rifa::database::{Database, DatabaseConfig};
/// use rifa::operations::{ReservationManager, ReserveRequest};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/rifa.db")).unwrap();
/// let config = ConfigBuilder::new().build().unwrap();
/// let mut manager = ReservationManager::new(&mut db, &config);
///
/// let outcome = manager
///     .reserve(
///         &ReserveRequest {
///             raffle_id: 1,
///             quantity: 3,
///             buyer_name: "Ana Torres".to_string(),
///             buyer_contact: "5512345678".to_string(),
///         },
///         &mut rand::thread_rng(),
///     )
///     .unwrap();
/// println!("folio: {}", outcome.reservation.folio());
/// ```
pub struct ReservationManager<'a> {
    db: &'a mut Database,
    config: &'a Config,
}

impl<'a> ReservationManager<'a> {
    /// Creates a manager over the given database and configuration.
    pub fn new(db: &'a mut Database, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Reserves `quantity` random tickets for a buyer.
    ///
    /// On success the reservation is pending, its numbers are held, the sold
    /// counter has been incremented, and an activity record has been written
    /// (best-effort).
    ///
    /// # Errors
    ///
    /// - [`Error::RaffleInactive`] if the raffle is paused or finished.
    /// - [`Error::InsufficientInventory`] if fewer numbers remain than requested.
    /// - [`Error::Validation`] if the request is malformed or below the
    ///   minimum purchase amount.
    /// - [`Error::AllocationFailed`] if every attempt lost a number race.
    pub fn reserve(
        &mut self,
        request: &ReserveRequest,
        rng: &mut impl Rng,
    ) -> Result<ReserveOutcome> {
        let max_attempts = self.config.max_attempts();

        for attempt in 1..=max_attempts {
            match self.try_reserve_once(request, rng) {
                Ok(Some((reservation_id, raffle_name))) => {
                    let reservation = self.db.get_reservation(reservation_id)?;
                    let activity = Activity::reservation_created(
                        reservation.folio(),
                        reservation.buyer_name(),
                        &raffle_name,
                        reservation.quantity(),
                        reservation.id(),
                    );
                    let outcome = recorder::record(self.db.connection(), &activity);

                    log::debug!(
                        "reserved {} number(s) on attempt {attempt} (folio {})",
                        reservation.quantity(),
                        reservation.folio()
                    );
                    return Ok(ReserveOutcome {
                        reservation,
                        attempts: attempt,
                        activity_recorded: outcome.recorded(),
                    });
                }
                // Lost a race; redraw against the updated held set
                Ok(None) => {
                    log::debug!("allocation attempt {attempt} collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::AllocationFailed {
            attempts: max_attempts,
        })
    }

    /// Runs one allocation attempt in its own transaction.
    ///
    /// Returns `Ok(None)` when the attempt lost a uniqueness race and should
    /// be retried.
    fn try_reserve_once(
        &mut self,
        request: &ReserveRequest,
        rng: &mut impl Rng,
    ) -> Result<Option<(i64, String)>> {
        let tx = self
            .db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let raffle = database::fetch_raffle(&tx, request.raffle_id)?;
        if !raffle.state().is_selling() {
            return Err(Error::RaffleInactive {
                state: raffle.state(),
            });
        }

        let amount_cents = i64::from(request.quantity) * raffle.price_cents();
        let min_purchase = self.config.min_purchase_cents();
        if amount_cents < min_purchase {
            return Err(Error::Validation {
                field: "cantidad".into(),
                message: format!(
                    "purchase of {amount_cents} centavos is below the minimum of {min_purchase}"
                ),
            });
        }

        let held = database::fetch_held_numbers(&tx, request.raffle_id)?;
        let numbers = select_numbers(raffle.capacity(), &held, request.quantity, rng)?;

        let Some(folio) = draw_unique_folio(&tx, self.config.folio_prefix(), rng)? else {
            // Every folio draw collided; treat as contention and retry
            return Ok(None);
        };

        let reservation = Reservation::builder(request.raffle_id, numbers, folio)
            .buyer(request.buyer_name.clone(), request.buyer_contact.clone())
            .amount_cents(amount_cents)
            .build()?;

        let reservation_id = match database::insert_reservation(&tx, &reservation) {
            Ok(id) => id,
            Err(e) if is_constraint_violation(&e) => return Ok(None),
            Err(e) => return Err(e),
        };

        adjust_sold(&tx, request.raffle_id, i64::from(request.quantity))?;

        let raffle_name = raffle.name().to_string();
        tx.commit()?;
        Ok(Some((reservation_id, raffle_name)))
    }
}

/// Draws a folio that is not yet present in the database.
///
/// Returns `Ok(None)` if every draw within the limit collided.
fn draw_unique_folio(
    conn: &rusqlite::Connection,
    prefix: &str,
    rng: &mut impl Rng,
) -> Result<Option<Folio>> {
    for _ in 0..FOLIO_DRAW_LIMIT {
        let folio = Folio::generate(prefix, rng);
        if !database::folio_exists(conn, folio.as_str())? {
            return Ok(Some(folio));
        }
    }
    Ok(None)
}

fn is_constraint_violation(err: &Error) -> bool {
    matches!(
        err,
        Error::Database(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
