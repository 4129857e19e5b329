//! Ticket number types with validation.
//!
//! This module provides the `TicketNumber` type, a validated raffle ticket
//! number. Ticket numbers are 1-based; the upper bound is a property of each
//! raffle (its capacity) and is enforced where raffle context is available.

use serde::{Deserialize, Serialize};

/// A raffle ticket number.
///
/// Ticket numbers start at 1. Buyer-facing output renders them zero-padded
/// to four digits, but the stored value is always the plain integer.
///
/// # Examples
///
/// ```
/// use rifa::TicketNumber;
///
/// let number = TicketNumber::try_from(7).unwrap();
/// assert_eq!(number.value(), 7);
/// assert_eq!(format!("{number}"), "0007");
///
/// // Zero is not a valid ticket number
/// assert!(TicketNumber::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(u32);

impl TicketNumber {
    /// Returns the raw ticket number.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Checks whether this number falls within a raffle of the given capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use rifa::TicketNumber;
    ///
    /// let number = TicketNumber::try_from(10).unwrap();
    /// assert!(number.within_capacity(10));
    /// assert!(!number.within_capacity(9));
    /// ```
    #[must_use]
    pub const fn within_capacity(self, capacity: u32) -> bool {
        self.0 <= capacity
    }
}

impl TryFrom<u32> for TicketNumber {
    type Error = InvalidTicketNumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(InvalidTicketNumberError {
                value,
                reason: "ticket numbers start at 1".to_string(),
            });
        }
        Ok(Self(value))
    }
}

impl std::fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Error type for invalid ticket numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTicketNumberError {
    /// The invalid value.
    pub value: u32,
    /// The reason the value is invalid.
    pub reason: String,
}

impl std::fmt::Display for InvalidTicketNumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid ticket number {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidTicketNumberError {}

/// Renders a set of ticket numbers as the canonical comma-separated string
/// stored in the `numero_boleto` column.
///
/// # Examples
///
/// ```
/// use rifa::TicketNumber;
/// use rifa::ticket::join_numbers;
///
/// let numbers = vec![
///     TicketNumber::try_from(3).unwrap(),
///     TicketNumber::try_from(41).unwrap(),
/// ];
/// assert_eq!(join_numbers(&numbers), "3, 41");
/// ```
#[must_use]
pub fn join_numbers(numbers: &[TicketNumber]) -> String {
    numbers
        .iter()
        .map(|n| n.value().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses the canonical comma-separated `numero_boleto` rendering back into
/// ticket numbers.
///
/// # Errors
///
/// Returns an error if any element is not a valid ticket number.
///
/// # Examples
///
/// ```
/// use rifa::ticket::parse_numbers;
///
/// let numbers = parse_numbers("3, 41").unwrap();
/// assert_eq!(numbers.len(), 2);
/// assert_eq!(numbers[1].value(), 41);
/// ```
pub fn parse_numbers(raw: &str) -> Result<Vec<TicketNumber>, InvalidTicketNumberError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let value: u32 = part.parse().map_err(|_| InvalidTicketNumberError {
                value: 0,
                reason: format!("'{part}' is not a number"),
            })?;
            TicketNumber::try_from(value)
        })
        .collect()
}
