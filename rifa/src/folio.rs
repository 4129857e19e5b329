//! Folio generation and validation.
//!
//! A folio is the short human-readable identifier a buyer uses to reference
//! their reservation in support conversations. Folios are opaque and globally
//! unique; uniqueness is enforced by the database, and generation is retried
//! on collision rather than failing the reservation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Number of random characters appended after the prefix.
pub const FOLIO_SUFFIX_LEN: usize = 4;

/// Alphabet for folio suffixes. Uppercase alphanumerics, matching the
/// original buyer-facing format.
const FOLIO_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A human-readable reservation identifier.
///
/// # Examples
///
/// ```
/// use rifa::Folio;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let folio = Folio::generate("RIFA-2026", &mut rng);
/// assert!(folio.as_str().starts_with("RIFA-2026-"));
/// assert_eq!(folio.as_str().len(), "RIFA-2026-".len() + 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Folio(String);

impl Folio {
    /// Generates a fresh folio with the given prefix and a random
    /// four-character uppercase alphanumeric suffix.
    ///
    /// Collision resistance comes from the database's unique constraint,
    /// not from the suffix entropy alone; callers regenerate on collision.
    #[must_use]
    pub fn generate(prefix: &str, rng: &mut impl Rng) -> Self {
        let suffix: String = (0..FOLIO_SUFFIX_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..FOLIO_ALPHABET.len());
                FOLIO_ALPHABET[idx] as char
            })
            .collect();
        Self(format!("{prefix}-{suffix}"))
    }

    /// Wraps an existing folio string (used when loading from the database).
    ///
    /// # Errors
    ///
    /// Returns an error if the folio is empty after trimming whitespace.
    pub fn new(folio: impl Into<String>) -> Result<Self, ValidationError> {
        let folio = folio.into();
        let trimmed = folio.trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "folio".into(),
                message: "folio must be non-empty".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the folio as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Folio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
