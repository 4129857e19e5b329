//! Database CRUD operations for raffles, reservations, and activities.
//!
//! This module implements row mapping and all read/write operations used by
//! the higher-level lifecycle operations. Functions taking a plain
//! [`Connection`] are meant to run inside a caller-managed transaction;
//! methods on [`Database`] manage their own.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::activity::{Activity, ActivityKind, ActivityMetadata};
use crate::error::{Error, Result};
use crate::folio::Folio;
use crate::raffle::{Raffle, RaffleState};
use crate::reservation::{Reservation, ReservationState};
use crate::ticket::{parse_numbers, TicketNumber};

use super::connection::Database;
use super::schema::{DELETE_RESERVATION_NUMBERS, INSERT_NUMBER, INSERT_RESERVATION};

/// Converts a `DateTime<Utc>` to Unix epoch seconds for database storage.
pub(crate) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts Unix epoch seconds from the database to a `DateTime<Utc>`.
pub(crate) fn unix_secs_to_datetime(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).single().unwrap_or_default())
}

fn to_sql_err(e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

/// Deserializes a raffle from a database row.
///
/// Expects row fields in this order: id, nombre, slug, `precio_boleto`,
/// `total_boletos`, `boletos_vendidos`, estado, `created_at`.
fn row_to_raffle(row: &rusqlite::Row<'_>) -> rusqlite::Result<Raffle> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let slug: String = row.get(2)?;
    let price_cents: i64 = row.get(3)?;
    let capacity: u32 = row.get(4)?;
    let sold: u32 = row.get(5)?;
    let state: String = row.get(6)?;
    let created_secs: i64 = row.get(7)?;

    let state = RaffleState::parse(&state).map_err(to_sql_err)?;

    Raffle::builder(name, slug, price_cents, capacity)
        .id(id)
        .sold(sold)
        .state(state)
        .created_at(unix_secs_to_datetime(created_secs))
        .build()
        .map_err(to_sql_err)
}

/// Deserializes a reservation from a database row.
///
/// Expects row fields in this order: id, `rifa_id`, `numero_boleto`, folio,
/// `comprador_nombre`, `comprador_telefono`, estado, `monto_pagado`,
/// `referencia_pago`, `created_at`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let raffle_id: i64 = row.get(1)?;
    let numbers_text: String = row.get(2)?;
    let folio_text: String = row.get(3)?;
    let buyer_name: String = row.get(4)?;
    let buyer_contact: String = row.get(5)?;
    let state: String = row.get(6)?;
    let amount_cents: i64 = row.get(7)?;
    let payment_reference: String = row.get(8)?;
    let created_secs: i64 = row.get(9)?;

    let numbers = parse_numbers(&numbers_text).map_err(to_sql_err)?;
    let folio = Folio::new(folio_text).map_err(to_sql_err)?;
    let state = ReservationState::parse(&state).map_err(to_sql_err)?;

    Reservation::builder(raffle_id, numbers, folio)
        .id(id)
        .buyer(buyer_name, buyer_contact)
        .state(state)
        .amount_cents(amount_cents)
        .payment_reference(Some(payment_reference))
        .created_at(unix_secs_to_datetime(created_secs))
        .build()
        .map_err(to_sql_err)
}

/// Deserializes an activity from a database row.
///
/// Expects row fields in this order: id, tipo, descripcion, monto, metadata,
/// `created_at`.
fn row_to_activity(row: &rusqlite::Row<'_>) -> rusqlite::Result<Activity> {
    let id: i64 = row.get(0)?;
    let kind_text: String = row.get(1)?;
    let description: String = row.get(2)?;
    let amount_cents: i64 = row.get(3)?;
    let metadata_json: String = row.get(4)?;
    let created_secs: i64 = row.get(5)?;

    let kind = ActivityKind::parse(&kind_text).map_err(to_sql_err)?;
    let metadata: ActivityMetadata =
        serde_json::from_str(&metadata_json).map_err(to_sql_err)?;

    Ok(Activity::new(kind, description)
        .with_id(id)
        .with_amount_cents(amount_cents)
        .with_metadata(metadata)
        .with_created_at(unix_secs_to_datetime(created_secs)))
}

// SQL statements for read operations
const SELECT_RAFFLE_COLUMNS: &str = r"
    SELECT id, nombre, slug, precio_boleto, total_boletos, boletos_vendidos,
           estado, created_at
    FROM rifas
";

const SELECT_RESERVATION_COLUMNS: &str = r"
    SELECT id, rifa_id, numero_boleto, folio, comprador_nombre,
           comprador_telefono, estado, monto_pagado, referencia_pago, created_at
    FROM boletos
";

const SELECT_HELD_NUMBERS: &str = r"
    SELECT numero FROM boleto_numeros WHERE rifa_id = ?
";

const SELECT_ACTIVITY_COLUMNS: &str = r"
    SELECT id, tipo, descripcion, monto, metadata, created_at
    FROM actividades
";

/// Fetches a raffle by id within a caller-managed transaction.
pub(crate) fn fetch_raffle(conn: &Connection, raffle_id: i64) -> Result<Raffle> {
    let sql = format!("{SELECT_RAFFLE_COLUMNS} WHERE id = ?");
    conn.query_row(&sql, [raffle_id], row_to_raffle)
        .optional()?
        .ok_or_else(|| Error::NotFound {
            resource: format!("rifa {raffle_id}"),
        })
}

/// Fetches a raffle by slug within a caller-managed transaction.
pub(crate) fn fetch_raffle_by_slug(conn: &Connection, slug: &str) -> Result<Raffle> {
    let sql = format!("{SELECT_RAFFLE_COLUMNS} WHERE slug = ?");
    conn.query_row(&sql, [slug], row_to_raffle)
        .optional()?
        .ok_or_else(|| Error::NotFound {
            resource: format!("rifa '{slug}'"),
        })
}

/// Fetches a reservation by id within a caller-managed transaction.
pub(crate) fn fetch_reservation(conn: &Connection, reservation_id: i64) -> Result<Reservation> {
    let sql = format!("{SELECT_RESERVATION_COLUMNS} WHERE id = ?");
    conn.query_row(&sql, [reservation_id], row_to_reservation)
        .optional()?
        .ok_or_else(|| Error::NotFound {
            resource: format!("boleto {reservation_id}"),
        })
}

/// Fetches a reservation by folio within a caller-managed transaction.
pub(crate) fn fetch_reservation_by_folio(conn: &Connection, folio: &str) -> Result<Reservation> {
    let sql = format!("{SELECT_RESERVATION_COLUMNS} WHERE folio = ?");
    conn.query_row(&sql, [folio], row_to_reservation)
        .optional()?
        .ok_or_else(|| Error::NotFound {
            resource: format!("folio '{folio}'"),
        })
}

/// Returns the set of numbers currently held by active reservations of a
/// raffle.
pub(crate) fn fetch_held_numbers(
    conn: &Connection,
    raffle_id: i64,
) -> Result<HashSet<TicketNumber>> {
    let mut stmt = conn.prepare(SELECT_HELD_NUMBERS)?;
    let rows = stmt.query_map([raffle_id], |row| {
        let value: u32 = row.get(0)?;
        TicketNumber::try_from(value).map_err(to_sql_err)
    })?;

    let mut numbers = HashSet::new();
    for number in rows {
        numbers.insert(number?);
    }
    Ok(numbers)
}

/// Checks whether a folio is already taken.
pub(crate) fn folio_exists(conn: &Connection, folio: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM boletos WHERE folio = ?",
        [folio],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Inserts a reservation row plus one ownership row per number.
///
/// Returns the new reservation id. A primary key violation on
/// `boleto_numeros` means another transaction won one of the numbers; the
/// caller is expected to roll back and redraw.
pub(crate) fn insert_reservation(conn: &Connection, reservation: &Reservation) -> Result<i64> {
    conn.execute(
        INSERT_RESERVATION,
        params![
            reservation.raffle_id(),
            reservation.numbers_display(),
            reservation.folio().as_str(),
            reservation.buyer_name(),
            reservation.buyer_contact(),
            reservation.state().as_str(),
            reservation.amount_cents(),
            reservation.payment_reference_display(),
            datetime_to_unix_secs(reservation.created_at()),
        ],
    )?;
    let reservation_id = conn.last_insert_rowid();

    let mut stmt = conn.prepare(INSERT_NUMBER)?;
    for number in reservation.numbers() {
        stmt.execute(params![
            reservation.raffle_id(),
            number.value(),
            reservation_id
        ])?;
    }

    Ok(reservation_id)
}

/// Updates a reservation's state.
pub(crate) fn update_reservation_state(
    conn: &Connection,
    reservation_id: i64,
    state: ReservationState,
) -> Result<()> {
    conn.execute(
        "UPDATE boletos SET estado = ? WHERE id = ?",
        params![state.as_str(), reservation_id],
    )?;
    Ok(())
}

/// Updates a reservation's payment reference.
pub(crate) fn update_payment_reference(
    conn: &Connection,
    reservation_id: i64,
    reference: &str,
) -> Result<()> {
    conn.execute(
        "UPDATE boletos SET referencia_pago = ? WHERE id = ?",
        params![reference, reservation_id],
    )?;
    Ok(())
}

/// Writes a raffle's sold counter.
pub(crate) fn update_raffle_sold(conn: &Connection, raffle_id: i64, sold: u32) -> Result<()> {
    conn.execute(
        "UPDATE rifas SET boletos_vendidos = ? WHERE id = ?",
        params![sold, raffle_id],
    )?;
    Ok(())
}

/// Deletes a reservation's ownership rows, returning its numbers to the pool.
pub(crate) fn release_reservation_numbers(conn: &Connection, reservation_id: i64) -> Result<usize> {
    let deleted = conn.execute(DELETE_RESERVATION_NUMBERS, [reservation_id])?;
    Ok(deleted)
}

/// Appends an activity record, returning its id.
pub(crate) fn insert_activity(conn: &Connection, activity: &Activity) -> Result<i64> {
    let metadata_json = serde_json::to_string(activity.metadata()).map_err(|e| {
        Error::Validation {
            field: "metadata".into(),
            message: format!("cannot serialize activity metadata: {e}"),
        }
    })?;
    conn.execute(
        "INSERT INTO actividades (tipo, descripcion, monto, metadata, created_at)
         VALUES (?, ?, ?, ?, ?)",
        params![
            activity.kind().as_str(),
            activity.description(),
            activity.amount_cents(),
            metadata_json,
            datetime_to_unix_secs(activity.created_at()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl Database {
    /// Creates a new raffle and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is already taken or the insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rifa::database::{Database, DatabaseConfig};
    /// use rifa::Raffle;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/rifa.db")).unwrap();
    /// let raffle = Raffle::builder("Rifa Moto 2026", "rifa-moto", 30_000, 1000)
    ///     .build()
    ///     .unwrap();
    /// let stored = db.create_raffle(&raffle).unwrap();
    /// assert!(stored.id() > 0);
    /// ```
    pub fn create_raffle(&mut self, raffle: &Raffle) -> Result<Raffle> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO rifas (nombre, slug, precio_boleto, total_boletos,
                                boletos_vendidos, estado, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                raffle.name(),
                raffle.slug(),
                raffle.price_cents(),
                raffle.capacity(),
                raffle.sold(),
                raffle.state().as_str(),
                datetime_to_unix_secs(raffle.created_at()),
            ],
        )?;
        let id = tx.last_insert_rowid();
        let stored = fetch_raffle(&tx, id)?;
        tx.commit()?;
        Ok(stored)
    }

    /// Fetches a raffle by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no raffle has this id.
    pub fn get_raffle(&self, raffle_id: i64) -> Result<Raffle> {
        fetch_raffle(&self.conn, raffle_id)
    }

    /// Fetches a raffle by slug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no raffle has this slug.
    pub fn get_raffle_by_slug(&self, slug: &str) -> Result<Raffle> {
        fetch_raffle_by_slug(&self.conn, slug)
    }

    /// Lists all raffles ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_raffles(&self) -> Result<Vec<Raffle>> {
        let sql = format!("{SELECT_RAFFLE_COLUMNS} ORDER BY created_at, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_raffle)?;
        let mut raffles = Vec::new();
        for raffle in rows {
            raffles.push(raffle?);
        }
        Ok(raffles)
    }

    /// Updates a raffle's lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no raffle has this id.
    pub fn set_raffle_state(&mut self, raffle_id: i64, state: RaffleState) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE rifas SET estado = ? WHERE id = ?",
            params![state.as_str(), raffle_id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound {
                resource: format!("rifa {raffle_id}"),
            });
        }
        Ok(())
    }

    /// Returns the numbers currently held by active reservations of a raffle.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn held_numbers(&self, raffle_id: i64) -> Result<HashSet<TicketNumber>> {
        fetch_held_numbers(&self.conn, raffle_id)
    }

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no reservation has this id.
    pub fn get_reservation(&self, reservation_id: i64) -> Result<Reservation> {
        fetch_reservation(&self.conn, reservation_id)
    }

    /// Fetches a reservation by folio.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no reservation has this folio.
    pub fn get_reservation_by_folio(&self, folio: &str) -> Result<Reservation> {
        fetch_reservation_by_folio(&self.conn, folio)
    }

    /// Lists reservations, optionally filtered by raffle.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(&self, raffle_id: Option<i64>) -> Result<Vec<Reservation>> {
        match raffle_id {
            Some(id) => {
                let sql =
                    format!("{SELECT_RESERVATION_COLUMNS} WHERE rifa_id = ? ORDER BY created_at, id");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([id], row_to_reservation)?;
                rows.map(|r| r.map_err(Error::from)).collect()
            }
            None => {
                let sql = format!("{SELECT_RESERVATION_COLUMNS} ORDER BY created_at, id");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], row_to_reservation)?;
                rows.map(|r| r.map_err(Error::from)).collect()
            }
        }
    }

    /// Lists a buyer's reservations by contact phone, optionally scoped to
    /// one raffle.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_by_contact(
        &self,
        contact: &str,
        raffle_id: Option<i64>,
    ) -> Result<Vec<Reservation>> {
        match raffle_id {
            Some(id) => {
                let sql = format!(
                    "{SELECT_RESERVATION_COLUMNS} WHERE comprador_telefono = ? AND rifa_id = ?
                     ORDER BY created_at, id"
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![contact, id], row_to_reservation)?;
                rows.map(|r| r.map_err(Error::from)).collect()
            }
            None => {
                let sql = format!(
                    "{SELECT_RESERVATION_COLUMNS} WHERE comprador_telefono = ?
                     ORDER BY created_at, id"
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([contact], row_to_reservation)?;
                rows.map(|r| r.map_err(Error::from)).collect()
            }
        }
    }

    /// Lists the most recent activity records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_activities(&self, limit: u32) -> Result<Vec<Activity>> {
        let sql = format!("{SELECT_ACTIVITY_COLUMNS} ORDER BY created_at DESC, id DESC LIMIT ?");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([limit], row_to_activity)?;
        rows.map(|r| r.map_err(Error::from)).collect()
    }
}
