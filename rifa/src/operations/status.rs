//! Buyer-facing status lookup.
//!
//! Buyers check on their tickets with the phone number they reserved under,
//! or with a single folio. The report pairs each reservation with its
//! raffle's display name so output needs no further queries.

use serde::Serialize;

use crate::database::Database;
use crate::error::Result;
use crate::reservation::{Reservation, ReservationState};

/// One reservation in a status report.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationStatus {
    /// The raffle's display name.
    pub raffle_name: String,
    /// The underlying reservation.
    #[serde(flatten)]
    pub reservation: Reservation,
}

/// A buyer's status report.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// The reservations found, oldest first.
    pub entries: Vec<ReservationStatus>,
    /// Total owed across pending reservations, in centavos.
    pub pending_cents: i64,
    /// Total confirmed across paid reservations, in centavos.
    pub paid_cents: i64,
}

impl StatusReport {
    fn from_reservations(db: &Database, reservations: Vec<Reservation>) -> Result<Self> {
        let mut entries = Vec::with_capacity(reservations.len());
        let mut pending_cents = 0;
        let mut paid_cents = 0;

        for reservation in reservations {
            match reservation.state() {
                ReservationState::Pending => pending_cents += reservation.amount_cents(),
                ReservationState::Paid => paid_cents += reservation.amount_cents(),
                ReservationState::Expired => {}
            }
            let raffle_name = db.get_raffle(reservation.raffle_id())?.name().to_string();
            entries.push(ReservationStatus {
                raffle_name,
                reservation,
            });
        }

        Ok(Self {
            entries,
            pending_cents,
            paid_cents,
        })
    }

    /// Returns true if no reservations were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Looks up a buyer's reservations by contact phone, optionally scoped to
/// one raffle.
///
/// An unknown phone yields an empty report, not an error.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn status_by_contact(
    db: &Database,
    contact: &str,
    raffle_id: Option<i64>,
) -> Result<StatusReport> {
    let reservations = db.list_reservations_by_contact(contact.trim(), raffle_id)?;
    StatusReport::from_reservations(db, reservations)
}

/// Looks up a single reservation by folio.
///
/// # Errors
///
/// Returns [`crate::Error::NotFound`] if the folio is unknown.
pub fn status_by_folio(db: &Database, folio: &str) -> Result<ReservationStatus> {
    let reservation = db.get_reservation_by_folio(folio.trim())?;
    let raffle_name = db.get_raffle(reservation.raffle_id())?.name().to_string();
    Ok(ReservationStatus {
        raffle_name,
        reservation,
    })
}
