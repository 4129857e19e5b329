//! Immutable activity records.
//!
//! Every reservation state transition appends an entry to the activity log.
//! Entries are append-only: they are never updated or deleted, and recording
//! them is best-effort (see `operations::recorder`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::folio::Folio;
use crate::reservation::ValidationError;

/// Kind of activity being recorded.
///
/// The database stores the canonical Spanish value (`reserva`, `pago`,
/// `vencimiento`, `ajuste`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    /// A reservation was created.
    ReservationCreated,
    /// A payment was confirmed by an administrator.
    PaymentConfirmed,
    /// A pending reservation expired.
    ReservationExpired,
    /// Display/settings configuration changed.
    SettingsChanged,
}

impl ActivityKind {
    /// Returns the canonical database value for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReservationCreated => "reserva",
            Self::PaymentConfirmed => "pago",
            Self::ReservationExpired => "vencimiento",
            Self::SettingsChanged => "ajuste",
        }
    }

    /// Parses a canonical database value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a recognized kind.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "reserva" => Ok(Self::ReservationCreated),
            "pago" => Ok(Self::PaymentConfirmed),
            "vencimiento" => Ok(Self::ReservationExpired),
            "ajuste" => Ok(Self::SettingsChanged),
            other => Err(ValidationError {
                field: "tipo".into(),
                message: format!("unknown activity kind '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured metadata attached to an activity record.
///
/// Serialized as JSON into the `metadata` column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityMetadata {
    /// The reservation folio, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folio: Option<String>,
    /// The buyer's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comprador: Option<String>,
    /// The raffle's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rifa_nombre: Option<String>,
    /// The number of tickets involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<u32>,
    /// The reservation's database id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boleto_id: Option<i64>,
}

/// An immutable audit log entry.
///
/// # Examples
///
/// ```
/// use rifa::{Activity, ActivityKind};
///
/// let activity = Activity::new(
///     ActivityKind::ReservationCreated,
///     "Nueva reserva: Ana Torres (3 boletos)",
/// );
/// assert_eq!(activity.amount_cents(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: i64,
    kind: ActivityKind,
    description: String,
    amount_cents: i64,
    metadata: ActivityMetadata,
    created_at: DateTime<Utc>,
}

impl Activity {
    /// Creates a new activity entry with zero amount and empty metadata.
    ///
    /// Only payment confirmations carry a monetary amount; reservations do
    /// not count as revenue until paid.
    #[must_use]
    pub fn new(kind: ActivityKind, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind,
            description: description.into(),
            amount_cents: 0,
            metadata: ActivityMetadata::default(),
            created_at: Utc::now(),
        }
    }

    /// Sets the persisted identifier (used when loading from the database).
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets the monetary amount in centavos.
    #[must_use]
    pub const fn with_amount_cents(mut self, amount_cents: i64) -> Self {
        self.amount_cents = amount_cents;
        self
    }

    /// Sets the structured metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ActivityMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the creation timestamp (used when loading from the database).
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns the persisted identifier (0 if not yet stored).
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the activity kind.
    #[must_use]
    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    /// Returns the free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the monetary amount in centavos.
    #[must_use]
    pub const fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Returns the structured metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ActivityMetadata {
        &self.metadata
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Builds the standard entry for a newly created reservation.
    #[must_use]
    pub fn reservation_created(
        folio: &Folio,
        buyer_name: &str,
        raffle_name: &str,
        quantity: u32,
        reservation_id: i64,
    ) -> Self {
        Self::new(
            ActivityKind::ReservationCreated,
            format!("Nueva reserva: {buyer_name} ({quantity} boletos)"),
        )
        .with_metadata(ActivityMetadata {
            folio: Some(folio.as_str().to_string()),
            comprador: Some(buyer_name.to_string()),
            rifa_nombre: Some(raffle_name.to_string()),
            cantidad: Some(quantity),
            boleto_id: Some(reservation_id),
        })
    }

    /// Builds the standard entry for a confirmed payment.
    #[must_use]
    pub fn payment_confirmed(
        folio: &Folio,
        buyer_name: &str,
        raffle_name: &str,
        amount_cents: i64,
        reservation_id: i64,
    ) -> Self {
        Self::new(
            ActivityKind::PaymentConfirmed,
            format!("Pago confirmado: {buyer_name} (Folio {folio})"),
        )
        .with_amount_cents(amount_cents)
        .with_metadata(ActivityMetadata {
            folio: Some(folio.as_str().to_string()),
            comprador: Some(buyer_name.to_string()),
            rifa_nombre: Some(raffle_name.to_string()),
            cantidad: None,
            boleto_id: Some(reservation_id),
        })
    }

    /// Builds the standard entry for an expired reservation.
    #[must_use]
    pub fn reservation_expired(
        folio: &Folio,
        buyer_name: &str,
        quantity: u32,
        reservation_id: i64,
    ) -> Self {
        Self::new(
            ActivityKind::ReservationExpired,
            format!("Reserva vencida: {buyer_name} (Folio {folio})"),
        )
        .with_metadata(ActivityMetadata {
            folio: Some(folio.as_str().to_string()),
            comprador: Some(buyer_name.to_string()),
            rifa_nombre: None,
            cantidad: Some(quantity),
            boleto_id: Some(reservation_id),
        })
    }
}
