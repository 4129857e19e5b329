//! Error types for the rifa library.
//!
//! This module provides the error hierarchy for all operations in the rifa
//! library, using `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::raffle::RaffleState;
use crate::reservation::ReservationState;

/// Result type alias for operations that may fail with a rifa error.
///
/// # Examples
///
/// ```
/// use rifa::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the rifa library.
///
/// This enum encompasses all error conditions that can occur during ticket
/// allocation and reservation lifecycle operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Not enough unused ticket numbers to satisfy the request.
    ///
    /// User-correctable: shown to the buyer as "sold out" / "not enough
    /// tickets". Produces no state change.
    #[error("insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory {
        /// How many tickets were requested.
        requested: u32,
        /// How many tickets remain unallocated.
        available: u32,
    },

    /// Allocation retries were exhausted on uniqueness collisions.
    ///
    /// Transient: the caller may retry as a new request.
    #[error("allocation failed after {attempts} attempt(s); concurrent contention on the raffle")]
    AllocationFailed {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// A state transition was attempted from a terminal or wrong state.
    #[error("invalid state transition: cannot {action} a reservation in state '{from}'")]
    InvalidStateTransition {
        /// The reservation's current state.
        from: ReservationState,
        /// The attempted action (e.g. "mark paid", "expire").
        action: String,
    },

    /// A purchase was attempted against a raffle that is not selling.
    #[error("raffle is not active (state '{state}')")]
    RaffleInactive {
        /// The raffle's current lifecycle state.
        state: RaffleState,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An invalid ticket number was provided.
    #[error("invalid ticket number {value}: {reason}")]
    InvalidTicketNumber {
        /// The invalid value.
        value: u32,
        /// The reason the value is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::ticket::InvalidTicketNumberError> for Error {
    fn from(err: crate::ticket::InvalidTicketNumberError) -> Self {
        Self::InvalidTicketNumber {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error indicates a missing raffle or reservation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rifa::Error;
    ///
    /// let err = Error::NotFound { resource: "rifa 7".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is buyer-correctable (sold out / bad input), as
    /// opposed to an internal failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use rifa::Error;
    ///
    /// let err = Error::InsufficientInventory { requested: 3, available: 0 };
    /// assert!(err.is_user_error());
    /// ```
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientInventory { .. }
                | Self::Validation { .. }
                | Self::InvalidTicketNumber { .. }
                | Self::RaffleInactive { .. }
        )
    }
}
