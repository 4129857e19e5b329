//! Configuration system for rifa.
//!
//! This module provides hierarchical configuration with support for:
//! - A YAML configuration file stored next to the database
//! - Environment variable overrides (`RIFA_*`)
//! - Programmatic configuration via builder pattern
//! - Validation of purchase rules and payment methods
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`RIFA_*`)
//! 3. User config (`{data_dir}/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! Basic usage with defaults:
//!
//! ```
//! use rifa::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .build()
//!     .unwrap();
//!
//! println!("folio prefix: {}", config.folio_prefix());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use rifa::config::{Config, ConfigBuilder, PurchaseConfig};
//!
//! let custom = Config {
//!     purchase: Some(PurchaseConfig {
//!         min_purchase_cents: Some(50_000),
//!         quantity_presets: Some(vec![5, 10, 20]),
//!     }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.min_purchase_cents(), 50_000);
//! ```

pub mod builder;
pub mod loader;
pub mod schema;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use schema::{
    AllocationConfig, Config, FolioConfig, OutputFormat, PaymentMethod, PurchaseConfig,
};
