//! Reservation types for tracking ticket claims.
//!
//! This module provides the `Reservation` type (a "boleto"), its lifecycle
//! state machine, and a builder for validated construction. A reservation's
//! number set is immutable after creation; only the state and the buyer's
//! payment reference may change, and only through the operations layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::folio::Folio;
use crate::ticket::TicketNumber;

/// Sentinel stored in `referencia_pago` until the buyer submits a reference.
pub const PAYMENT_REFERENCE_PENDING: &str = "PENDIENTE";

/// Lifecycle state of a reservation.
///
/// The state machine is `pending → paid` and `pending → expired`; both
/// `paid` and `expired` are terminal.
///
/// # Examples
///
/// ```
/// use rifa::ReservationState;
///
/// assert!(ReservationState::Pending.can_transition_to(ReservationState::Paid));
/// assert!(!ReservationState::Paid.can_transition_to(ReservationState::Expired));
/// assert!(ReservationState::Expired.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationState {
    /// Awaiting payment confirmation. Numbers are held.
    Pending,
    /// Payment confirmed. Numbers are held permanently.
    Paid,
    /// The reservation lapsed. Numbers are released.
    Expired,
}

impl ReservationState {
    /// Returns the canonical database value for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Paid => "pagado",
            Self::Expired => "vencido",
        }
    }

    /// Parses a canonical database value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a recognized state.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pendiente" => Ok(Self::Pending),
            "pagado" => Ok(Self::Paid),
            "vencido" => Ok(Self::Expired),
            other => Err(ValidationError {
                field: "estado".into(),
                message: format!("unknown reservation state '{other}'"),
            }),
        }
    }

    /// Returns true for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Expired)
    }

    /// Returns true if the state machine permits the given transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid) | (Self::Pending, Self::Expired)
        )
    }

    /// Returns true if reservations in this state hold their numbers against
    /// new allocation.
    #[must_use]
    pub const fn holds_numbers(self) -> bool {
        matches!(self, Self::Pending | Self::Paid)
    }
}

impl std::fmt::Display for ReservationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A buyer's claim on one or more ticket numbers.
///
/// # Examples
///
/// ```
/// use rifa::{Folio, Reservation, TicketNumber};
///
/// let numbers = vec![TicketNumber::try_from(7).unwrap()];
/// let reservation = Reservation::builder(1, numbers, Folio::new("RIFA-AB12").unwrap())
///     .buyer("Ana Torres", "5512345678")
///     .amount_cents(30_000)
///     .build()
///     .unwrap();
///
/// assert_eq!(reservation.quantity(), 1);
/// assert!(reservation.payment_reference().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: i64,
    raffle_id: i64,
    numbers: Vec<TicketNumber>,
    folio: Folio,
    buyer_name: String,
    buyer_contact: String,
    state: ReservationState,
    amount_cents: i64,
    payment_reference: Option<String>,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// New reservations start in `Pending` with no payment reference; the
    /// database stores the sentinel until the buyer submits one.
    #[must_use]
    pub fn builder(raffle_id: i64, numbers: Vec<TicketNumber>, folio: Folio) -> ReservationBuilder {
        ReservationBuilder {
            id: 0,
            raffle_id,
            numbers,
            folio,
            buyer_name: String::new(),
            buyer_contact: String::new(),
            state: ReservationState::Pending,
            amount_cents: 0,
            payment_reference: None,
            created_at: None,
        }
    }

    /// Returns the reservation identifier (0 if not yet persisted).
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the owning raffle identifier.
    #[must_use]
    pub const fn raffle_id(&self) -> i64 {
        self.raffle_id
    }

    /// Returns the assigned ticket numbers, in draw order.
    #[must_use]
    pub fn numbers(&self) -> &[TicketNumber] {
        &self.numbers
    }

    /// Returns the number of tickets in this reservation.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.numbers.len() as u32
    }

    /// Returns the folio.
    #[must_use]
    pub const fn folio(&self) -> &Folio {
        &self.folio
    }

    /// Returns the buyer's display name.
    #[must_use]
    pub fn buyer_name(&self) -> &str {
        &self.buyer_name
    }

    /// Returns the buyer's contact handle (phone/WhatsApp).
    #[must_use]
    pub fn buyer_contact(&self) -> &str {
        &self.buyer_contact
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ReservationState {
        self.state
    }

    /// Returns the amount in centavos (quantity × ticket price at creation).
    #[must_use]
    pub const fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Returns the buyer-supplied payment reference, if submitted.
    ///
    /// The database sentinel `PENDIENTE` maps to `None`.
    #[must_use]
    pub fn payment_reference(&self) -> Option<&str> {
        self.payment_reference.as_deref()
    }

    /// Returns the canonical `numero_boleto` rendering of the numbers.
    #[must_use]
    pub fn numbers_display(&self) -> String {
        crate::ticket::join_numbers(&self.numbers)
    }

    /// Returns the payment reference as stored in the database, using the
    /// sentinel when none has been submitted.
    #[must_use]
    pub fn payment_reference_display(&self) -> &str {
        self.payment_reference
            .as_deref()
            .unwrap_or(PAYMENT_REFERENCE_PENDING)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: i64,
    raffle_id: i64,
    numbers: Vec<TicketNumber>,
    folio: Folio,
    buyer_name: String,
    buyer_contact: String,
    state: ReservationState,
    amount_cents: i64,
    payment_reference: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the persisted identifier.
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets the buyer name and contact handle. Both are trimmed.
    #[must_use]
    pub fn buyer(mut self, name: impl Into<String>, contact: impl Into<String>) -> Self {
        self.buyer_name = name.into().trim().to_string();
        self.buyer_contact = contact.into().trim().to_string();
        self
    }

    /// Sets the lifecycle state (used when loading from the database).
    #[must_use]
    pub const fn state(mut self, state: ReservationState) -> Self {
        self.state = state;
        self
    }

    /// Sets the monetary amount in centavos.
    #[must_use]
    pub const fn amount_cents(mut self, amount_cents: i64) -> Self {
        self.amount_cents = amount_cents;
        self
    }

    /// Sets the buyer-supplied payment reference.
    ///
    /// The sentinel `PENDIENTE` and blank strings normalize to `None`.
    #[must_use]
    pub fn payment_reference(mut self, reference: Option<String>) -> Self {
        self.payment_reference = reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty() && r != PAYMENT_REFERENCE_PENDING);
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The number set is empty or contains duplicates
    /// - The buyer name or contact is empty after trimming
    /// - The amount is negative
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.numbers.is_empty() {
            return Err(ValidationError {
                field: "numero_boleto".into(),
                message: "a reservation must hold at least one ticket number".into(),
            });
        }

        let mut seen = std::collections::HashSet::with_capacity(self.numbers.len());
        for number in &self.numbers {
            if !seen.insert(*number) {
                return Err(ValidationError {
                    field: "numero_boleto".into(),
                    message: format!("duplicate ticket number {}", number.value()),
                });
            }
        }

        if self.buyer_name.is_empty() {
            return Err(ValidationError {
                field: "comprador_nombre".into(),
                message: "buyer name must be non-empty".into(),
            });
        }

        if self.buyer_contact.is_empty() {
            return Err(ValidationError {
                field: "comprador_telefono".into(),
                message: "buyer contact must be non-empty".into(),
            });
        }

        if self.amount_cents < 0 {
            return Err(ValidationError {
                field: "monto_pagado".into(),
                message: "amount must not be negative".into(),
            });
        }

        Ok(Reservation {
            id: self.id,
            raffle_id: self.raffle_id,
            numbers: self.numbers,
            folio: self.folio,
            buyer_name: self.buyer_name,
            buyer_contact: self.buyer_contact,
            state: self.state,
            amount_cents: self.amount_cents,
            payment_reference: self.payment_reference,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[u32]) -> Vec<TicketNumber> {
        values
            .iter()
            .map(|v| TicketNumber::try_from(*v).unwrap())
            .collect()
    }

    fn folio() -> Folio {
        Folio::new("RIFA-AB12").unwrap()
    }

    #[test]
    fn test_builder_basic() {
        let reservation = Reservation::builder(1, numbers(&[3, 41, 998]), folio())
            .buyer("Ana Torres", "5512345678")
            .amount_cents(90_000)
            .build()
            .unwrap();

        assert_eq!(reservation.raffle_id(), 1);
        assert_eq!(reservation.quantity(), 3);
        assert_eq!(reservation.state(), ReservationState::Pending);
        assert_eq!(reservation.amount_cents(), 90_000);
        assert!(reservation.payment_reference().is_none());
    }

    #[test]
    fn test_builder_empty_numbers() {
        let result = Reservation::builder(1, vec![], folio())
            .buyer("Ana", "555")
            .build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "numero_boleto");
    }

    #[test]
    fn test_builder_duplicate_numbers() {
        let result = Reservation::builder(1, numbers(&[7, 7]), folio())
            .buyer("Ana", "555")
            .build();
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.field, "numero_boleto");
        assert!(err.message.contains("duplicate"));
    }

    #[test]
    fn test_builder_empty_buyer_name() {
        let result = Reservation::builder(1, numbers(&[7]), folio())
            .buyer("  ", "555")
            .build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "comprador_nombre");
    }

    #[test]
    fn test_builder_empty_contact() {
        let result = Reservation::builder(1, numbers(&[7]), folio())
            .buyer("Ana", "")
            .build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "comprador_telefono");
    }

    #[test]
    fn test_builder_negative_amount() {
        let result = Reservation::builder(1, numbers(&[7]), folio())
            .buyer("Ana", "555")
            .amount_cents(-1)
            .build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "monto_pagado");
    }

    #[test]
    fn test_builder_trims_buyer_fields() {
        let reservation = Reservation::builder(1, numbers(&[7]), folio())
            .buyer("  Ana  ", "  555  ")
            .build()
            .unwrap();
        assert_eq!(reservation.buyer_name(), "Ana");
        assert_eq!(reservation.buyer_contact(), "555");
    }

    #[test]
    fn test_payment_reference_sentinel_normalizes_to_none() {
        let reservation = Reservation::builder(1, numbers(&[7]), folio())
            .buyer("Ana", "555")
            .payment_reference(Some(PAYMENT_REFERENCE_PENDING.to_string()))
            .build()
            .unwrap();
        assert!(reservation.payment_reference().is_none());
    }

    #[test]
    fn test_display_helpers() {
        let reservation = Reservation::builder(1, numbers(&[3, 41, 998]), folio())
            .buyer("Ana", "555")
            .build()
            .unwrap();
        assert_eq!(reservation.numbers_display(), "3, 41, 998");
        assert_eq!(
            reservation.payment_reference_display(),
            PAYMENT_REFERENCE_PENDING
        );
    }

    #[test]
    fn test_payment_reference_kept() {
        let reservation = Reservation::builder(1, numbers(&[7]), folio())
            .buyer("Ana", "555")
            .payment_reference(Some("BBVA-00123".to_string()))
            .build()
            .unwrap();
        assert_eq!(reservation.payment_reference(), Some("BBVA-00123"));
    }

    #[test]
    fn test_state_machine_transitions() {
        use ReservationState::{Expired, Paid, Pending};

        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Expired));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Paid.can_transition_to(Expired));
        assert!(!Paid.can_transition_to(Pending));
        assert!(!Expired.can_transition_to(Paid));
        assert!(!Expired.can_transition_to(Pending));
    }

    #[test]
    fn test_state_terminal() {
        assert!(!ReservationState::Pending.is_terminal());
        assert!(ReservationState::Paid.is_terminal());
        assert!(ReservationState::Expired.is_terminal());
    }

    #[test]
    fn test_state_holds_numbers() {
        assert!(ReservationState::Pending.holds_numbers());
        assert!(ReservationState::Paid.holds_numbers());
        assert!(!ReservationState::Expired.holds_numbers());
    }

    #[test]
    fn test_state_round_trip() {
        for state in [
            ReservationState::Pending,
            ReservationState::Paid,
            ReservationState::Expired,
        ] {
            assert_eq!(ReservationState::parse(state.as_str()).unwrap(), state);
        }
    }

    #[test]
    fn test_state_parse_unknown() {
        assert!(ReservationState::parse("apartado").is_err());
    }

    #[test]
    fn test_reservation_serde() {
        let reservation = Reservation::builder(1, numbers(&[3, 41]), folio())
            .id(9)
            .buyer("Ana", "555")
            .amount_cents(60_000)
            .build()
            .unwrap();
        let json = serde_json::to_string(&reservation).unwrap();
        let back: Reservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reservation);
    }
}
