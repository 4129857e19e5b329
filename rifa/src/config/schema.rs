//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for rifa,
//! including folio generation, purchase rules, allocation retry limits,
//! and the payment methods displayed to buyers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default folio prefix used when none is configured.
pub const DEFAULT_FOLIO_PREFIX: &str = "RIFA-2026";

/// Default minimum purchase amount in centavos (MXN $300.00).
pub const DEFAULT_MIN_PURCHASE_CENTS: i64 = 30_000;

/// Default quantity presets offered to buyers.
pub const DEFAULT_QUANTITY_PRESETS: [u32; 3] = [3, 5, 10];

/// Default number of allocation attempts before giving up on a contended
/// raffle.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default maximum time to wait for the database lock (seconds).
pub const DEFAULT_MAX_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// All fields are optional; unset fields fall back to built-in defaults via
/// the accessor methods. Files with unknown keys are rejected.
///
/// # Examples
///
/// ```
/// use rifa::config::{Config, FolioConfig};
///
/// let config = Config {
///     folio: Some(FolioConfig {
///         prefix: Some("SORTEO-2026".to_string()),
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.folio_prefix(), "SORTEO-2026");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Folio generation settings.
    pub folio: Option<FolioConfig>,

    /// Purchase rules shown to and enforced for buyers.
    pub purchase: Option<PurchaseConfig>,

    /// Allocation retry settings.
    pub allocation: Option<AllocationConfig>,

    /// Payment methods displayed on reservation receipts.
    #[serde(default)]
    pub payment_methods: Option<Vec<PaymentMethod>>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the effective folio prefix.
    #[must_use]
    pub fn folio_prefix(&self) -> &str {
        self.folio
            .as_ref()
            .and_then(|f| f.prefix.as_deref())
            .unwrap_or(DEFAULT_FOLIO_PREFIX)
    }

    /// Returns the effective minimum purchase amount in centavos.
    #[must_use]
    pub fn min_purchase_cents(&self) -> i64 {
        self.purchase
            .as_ref()
            .and_then(|p| p.min_purchase_cents)
            .unwrap_or(DEFAULT_MIN_PURCHASE_CENTS)
    }

    /// Returns the effective quantity presets.
    #[must_use]
    pub fn quantity_presets(&self) -> Vec<u32> {
        self.purchase
            .as_ref()
            .and_then(|p| p.quantity_presets.clone())
            .unwrap_or_else(|| DEFAULT_QUANTITY_PRESETS.to_vec())
    }

    /// Returns the effective maximum allocation attempts.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.allocation
            .as_ref()
            .and_then(|a| a.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Returns the effective maximum lock wait in seconds.
    #[must_use]
    pub fn max_lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_MAX_LOCK_WAIT_SECONDS)
    }

    /// Returns the configured payment methods, if any.
    #[must_use]
    pub fn payment_methods(&self) -> &[PaymentMethod] {
        self.payment_methods.as_deref().unwrap_or(&[])
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any setting is out of range or a
    /// payment method is malformed.
    pub fn validate(&self) -> Result<()> {
        if let Some(purchase) = &self.purchase {
            if let Some(cents) = purchase.min_purchase_cents {
                if cents < 0 {
                    return Err(Error::Validation {
                        field: "purchase.min_purchase_cents".into(),
                        message: "minimum purchase cannot be negative".into(),
                    });
                }
            }
            if let Some(presets) = &purchase.quantity_presets {
                if presets.is_empty() {
                    return Err(Error::Validation {
                        field: "purchase.quantity_presets".into(),
                        message: "at least one preset is required".into(),
                    });
                }
                if presets.contains(&0) {
                    return Err(Error::Validation {
                        field: "purchase.quantity_presets".into(),
                        message: "presets must be at least 1".into(),
                    });
                }
            }
        }

        if let Some(allocation) = &self.allocation {
            if allocation.max_attempts == Some(0) {
                return Err(Error::Validation {
                    field: "allocation.max_attempts".into(),
                    message: "must allow at least one attempt".into(),
                });
            }
        }

        if self.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "must wait at least one second".into(),
            });
        }

        for method in self.payment_methods() {
            method.validate()?;
        }

        Ok(())
    }
}

/// Folio generation settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// Prefix for generated folios (e.g. `RIFA-2026`).
    pub prefix: Option<String>,
}

/// Purchase rules.
///
/// # Examples
///
/// ```
/// use rifa::config::PurchaseConfig;
///
/// let purchase = PurchaseConfig {
///     min_purchase_cents: Some(50_000),
///     quantity_presets: Some(vec![5, 10, 20]),
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PurchaseConfig {
    /// Minimum total purchase amount in centavos.
    pub min_purchase_cents: Option<i64>,

    /// Ticket quantity presets offered to buyers.
    pub quantity_presets: Option<Vec<u32>>,
}

/// Allocation retry settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AllocationConfig {
    /// Maximum reservation attempts before reporting contention failure.
    pub max_attempts: Option<u32>,
}

/// A payment method shown to buyers on receipts and status output.
///
/// # Examples
///
/// ```
/// use rifa::config::PaymentMethod;
///
/// let yaml = r#"
/// tipo: transferencia
/// banco: BBVA
/// clabe: "012345678901234567"
/// titular: Maria Lopez
/// "#;
/// let method: PaymentMethod = serde_yaml::from_str(yaml).unwrap();
/// assert!(method.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "tipo", rename_all = "lowercase", deny_unknown_fields)]
pub enum PaymentMethod {
    /// Bank transfer via CLABE.
    Transferencia {
        /// Bank name.
        banco: String,
        /// 18-digit CLABE account number.
        clabe: String,
        /// Account holder name.
        titular: String,
    },
    /// Cash deposit to a card number.
    Deposito {
        /// Bank name.
        banco: String,
        /// Card number for deposits.
        tarjeta: String,
        /// Account holder name.
        titular: String,
    },
}

impl PaymentMethod {
    /// Returns the bank name.
    #[must_use]
    pub fn bank(&self) -> &str {
        match self {
            Self::Transferencia { banco, .. } | Self::Deposito { banco, .. } => banco,
        }
    }

    /// Returns the account holder name.
    #[must_use]
    pub fn holder(&self) -> &str {
        match self {
            Self::Transferencia { titular, .. } | Self::Deposito { titular, .. } => titular,
        }
    }

    /// Validates the payment method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a required field is empty or the
    /// CLABE is not exactly 18 digits.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Transferencia {
                banco,
                clabe,
                titular,
            } => {
                Self::require_non_empty("banco", banco)?;
                Self::require_non_empty("titular", titular)?;
                if clabe.len() != 18 || !clabe.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::Validation {
                        field: "payment_methods.clabe".into(),
                        message: "CLABE must be exactly 18 digits".into(),
                    });
                }
                Ok(())
            }
            Self::Deposito {
                banco,
                tarjeta,
                titular,
            } => {
                Self::require_non_empty("banco", banco)?;
                Self::require_non_empty("titular", titular)?;
                Self::require_non_empty("tarjeta", tarjeta)?;
                if !tarjeta.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::Validation {
                        field: "payment_methods.tarjeta".into(),
                        message: "card number must contain only digits".into(),
                    });
                }
                Ok(())
            }
        }
    }

    fn require_non_empty(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: format!("payment_methods.{field}"),
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// Output format for list commands.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table (default).
    #[default]
    Table,
    /// JSON array.
    Json,
    /// CSV with a header row.
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
