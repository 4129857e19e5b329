//! Raffle types for tracking sellable ticket pools.
//!
//! This module provides the `Raffle` type and its lifecycle state. A raffle
//! is a pool of uniquely numbered tickets with a price and a capacity; its
//! denormalized sold counter must always equal the number of ticket numbers
//! held by non-expired reservations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Lifecycle state of a raffle.
///
/// The database stores the canonical Spanish value (`activa`, `pausada`,
/// `finalizada`).
///
/// # Examples
///
/// ```
/// use rifa::RaffleState;
///
/// assert_eq!(RaffleState::Active.as_str(), "activa");
/// assert_eq!(RaffleState::parse("finalizada").unwrap(), RaffleState::Finished);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaffleState {
    /// The raffle is selling tickets.
    Active,
    /// Sales are temporarily suspended.
    Paused,
    /// The raffle has concluded.
    Finished,
}

impl RaffleState {
    /// Returns the canonical database value for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "activa",
            Self::Paused => "pausada",
            Self::Finished => "finalizada",
        }
    }

    /// Parses a canonical database value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a recognized state.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "activa" => Ok(Self::Active),
            "pausada" => Ok(Self::Paused),
            "finalizada" => Ok(Self::Finished),
            other => Err(ValidationError {
                field: "estado".into(),
                message: format!("unknown raffle state '{other}'"),
            }),
        }
    }

    /// Returns true if the raffle accepts new reservations.
    #[must_use]
    pub const fn is_selling(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for RaffleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raffle: a sellable pool of uniquely numbered tickets.
///
/// Monetary values are integer centavos. The `sold` counter is denormalized
/// and maintained by the reservation operations; administrative edits of
/// price or capacity are outside this library's scope.
///
/// # Examples
///
/// ```
/// use rifa::Raffle;
///
/// let raffle = Raffle::builder("Rifa Moto 2026", "rifa-moto-2026", 30_000, 1000)
///     .build()
///     .unwrap();
///
/// assert_eq!(raffle.capacity(), 1000);
/// assert_eq!(raffle.remaining(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raffle {
    id: i64,
    name: String,
    slug: String,
    price_cents: i64,
    capacity: u32,
    sold: u32,
    state: RaffleState,
    created_at: DateTime<Utc>,
}

impl Raffle {
    /// Creates a new raffle builder.
    ///
    /// The id defaults to 0 until the raffle is persisted; the database
    /// assigns the real identifier on insert.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        slug: impl Into<String>,
        price_cents: i64,
        capacity: u32,
    ) -> RaffleBuilder {
        RaffleBuilder {
            id: 0,
            name: name.into(),
            slug: slug.into(),
            price_cents,
            capacity,
            sold: 0,
            state: RaffleState::Active,
            created_at: None,
        }
    }

    /// Returns the raffle identifier (0 if not yet persisted).
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unique slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the ticket price in centavos.
    #[must_use]
    pub const fn price_cents(&self) -> i64 {
        self.price_cents
    }

    /// Returns the total ticket capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the denormalized sold counter.
    #[must_use]
    pub const fn sold(&self) -> u32 {
        self.sold
    }

    /// Returns the number of tickets not currently held.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.sold)
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RaffleState {
        self.state
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Builder for creating `Raffle` instances.
#[derive(Debug)]
pub struct RaffleBuilder {
    id: i64,
    name: String,
    slug: String,
    price_cents: i64,
    capacity: u32,
    sold: u32,
    state: RaffleState,
    created_at: Option<DateTime<Utc>>,
}

impl RaffleBuilder {
    /// Sets the persisted identifier.
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets the sold counter (used when loading from the database).
    #[must_use]
    pub const fn sold(mut self, sold: u32) -> Self {
        self.sold = sold;
        self
    }

    /// Sets the lifecycle state.
    #[must_use]
    pub const fn state(mut self, state: RaffleState) -> Self {
        self.state = state;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the raffle.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name or slug is empty after trimming
    /// - The price is negative
    /// - The capacity is zero
    /// - The sold counter exceeds the capacity
    ///
    /// # Examples
    ///
    /// ```
    /// use rifa::Raffle;
    ///
    /// // Zero capacity is rejected
    /// let result = Raffle::builder("Rifa", "rifa", 30_000, 0).build();
    /// assert!(result.is_err());
    /// ```
    pub fn build(self) -> Result<Raffle, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError {
                field: "nombre".into(),
                message: "raffle name must be non-empty".into(),
            });
        }

        let slug = self.slug.trim().to_string();
        if slug.is_empty() {
            return Err(ValidationError {
                field: "slug".into(),
                message: "slug must be non-empty".into(),
            });
        }

        if self.price_cents < 0 {
            return Err(ValidationError {
                field: "precio_boleto".into(),
                message: "ticket price must not be negative".into(),
            });
        }

        if self.capacity == 0 {
            return Err(ValidationError {
                field: "total_boletos".into(),
                message: "capacity must be at least 1".into(),
            });
        }

        if self.sold > self.capacity {
            return Err(ValidationError {
                field: "boletos_vendidos".into(),
                message: format!(
                    "sold counter {} exceeds capacity {}",
                    self.sold, self.capacity
                ),
            });
        }

        Ok(Raffle {
            id: self.id,
            name,
            slug,
            price_cents: self.price_cents,
            capacity: self.capacity,
            sold: self.sold,
            state: self.state,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raffle_builder_basic() {
        let raffle = Raffle::builder("Rifa Moto", "rifa-moto", 30_000, 1000)
            .build()
            .unwrap();

        assert_eq!(raffle.id(), 0);
        assert_eq!(raffle.name(), "Rifa Moto");
        assert_eq!(raffle.slug(), "rifa-moto");
        assert_eq!(raffle.price_cents(), 30_000);
        assert_eq!(raffle.capacity(), 1000);
        assert_eq!(raffle.sold(), 0);
        assert_eq!(raffle.state(), RaffleState::Active);
    }

    #[test]
    fn test_raffle_builder_trims_name_and_slug() {
        let raffle = Raffle::builder("  Rifa  ", " rifa-moto ", 30_000, 100)
            .build()
            .unwrap();
        assert_eq!(raffle.name(), "Rifa");
        assert_eq!(raffle.slug(), "rifa-moto");
    }

    #[test]
    fn test_raffle_builder_empty_name() {
        let result = Raffle::builder("   ", "rifa", 30_000, 100).build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "nombre");
    }

    #[test]
    fn test_raffle_builder_empty_slug() {
        let result = Raffle::builder("Rifa", "", 30_000, 100).build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "slug");
    }

    #[test]
    fn test_raffle_builder_negative_price() {
        let result = Raffle::builder("Rifa", "rifa", -1, 100).build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "precio_boleto");
    }

    #[test]
    fn test_raffle_builder_zero_capacity() {
        let result = Raffle::builder("Rifa", "rifa", 30_000, 0).build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "total_boletos");
    }

    #[test]
    fn test_raffle_builder_sold_exceeds_capacity() {
        let result = Raffle::builder("Rifa", "rifa", 30_000, 10).sold(11).build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "boletos_vendidos");
    }

    #[test]
    fn test_raffle_remaining() {
        let raffle = Raffle::builder("Rifa", "rifa", 30_000, 10)
            .sold(3)
            .build()
            .unwrap();
        assert_eq!(raffle.remaining(), 7);

        let full = Raffle::builder("Rifa", "rifa", 30_000, 10)
            .sold(10)
            .build()
            .unwrap();
        assert_eq!(full.remaining(), 0);
    }

    #[test]
    fn test_raffle_state_round_trip() {
        for state in [RaffleState::Active, RaffleState::Paused, RaffleState::Finished] {
            assert_eq!(RaffleState::parse(state.as_str()).unwrap(), state);
        }
    }

    #[test]
    fn test_raffle_state_parse_unknown() {
        let result = RaffleState::parse("cerrada");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "estado");
    }

    #[test]
    fn test_raffle_state_is_selling() {
        assert!(RaffleState::Active.is_selling());
        assert!(!RaffleState::Paused.is_selling());
        assert!(!RaffleState::Finished.is_selling());
    }

    #[test]
    fn test_raffle_state_display() {
        assert_eq!(format!("{}", RaffleState::Active), "activa");
        assert_eq!(format!("{}", RaffleState::Paused), "pausada");
        assert_eq!(format!("{}", RaffleState::Finished), "finalizada");
    }

    #[test]
    fn test_raffle_serde() {
        let raffle = Raffle::builder("Rifa", "rifa", 30_000, 100)
            .id(5)
            .sold(2)
            .build()
            .unwrap();
        let json = serde_json::to_string(&raffle).unwrap();
        let back: Raffle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, raffle);
    }
}
