//! Configuration builder with source merging.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`RIFA_*`)
//! 3. User config (`{data_dir}/config.yaml`)
//! 4. Built-in defaults

use std::env;
use std::path::{Path, PathBuf};

use crate::config::loader::ConfigLoader;
use crate::config::schema::{AllocationConfig, Config, FolioConfig, PurchaseConfig};
use crate::error::{Error, Result};

/// Builds a validated [`Config`] from files, environment, and overrides.
///
/// # Examples
///
/// ```
/// use rifa::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .build()
///     .unwrap();
/// assert_eq!(config.max_attempts(), 5);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a new builder with no sources configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data directory to load `config.yaml` from.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        self.data_dir = Some(data_dir.to_path_buf());
        self
    }

    /// Skips loading configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips reading `RIFA_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merges all sources and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is malformed, an environment
    /// variable cannot be parsed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut merged = Config::default();

        if !self.skip_files {
            if let Some(file_config) = ConfigLoader::load_user_config(self.data_dir.as_deref())? {
                merge_into(&mut merged, file_config);
            }
        }

        if !self.skip_env {
            merge_into(&mut merged, environment_config()?);
        }

        if let Some(overrides) = self.overrides {
            merge_into(&mut merged, overrides);
        }

        merged.validate()?;
        Ok(merged)
    }
}

/// Merges `overlay` into `base`, field by field. Set fields in `overlay` win.
fn merge_into(base: &mut Config, overlay: Config) {
    if let Some(folio) = overlay.folio {
        let target = base.folio.get_or_insert_with(FolioConfig::default);
        if folio.prefix.is_some() {
            target.prefix = folio.prefix;
        }
    }
    if let Some(purchase) = overlay.purchase {
        let target = base.purchase.get_or_insert_with(PurchaseConfig::default);
        if purchase.min_purchase_cents.is_some() {
            target.min_purchase_cents = purchase.min_purchase_cents;
        }
        if purchase.quantity_presets.is_some() {
            target.quantity_presets = purchase.quantity_presets;
        }
    }
    if let Some(allocation) = overlay.allocation {
        let target = base.allocation.get_or_insert_with(AllocationConfig::default);
        if allocation.max_attempts.is_some() {
            target.max_attempts = allocation.max_attempts;
        }
    }
    if overlay.payment_methods.is_some() {
        base.payment_methods = overlay.payment_methods;
    }
    if overlay.maximum_lock_wait_seconds.is_some() {
        base.maximum_lock_wait_seconds = overlay.maximum_lock_wait_seconds;
    }
    if overlay.output_format.is_some() {
        base.output_format = overlay.output_format;
    }
}

/// Reads `RIFA_*` environment variables into a partial configuration.
fn environment_config() -> Result<Config> {
    let mut config = Config::default();

    if let Ok(prefix) = env::var("RIFA_FOLIO_PREFIX") {
        config.folio = Some(FolioConfig {
            prefix: Some(prefix),
        });
    }

    if let Ok(value) = env::var("RIFA_MIN_PURCHASE_CENTS") {
        let cents = value.parse().map_err(|_| Error::Validation {
            field: "RIFA_MIN_PURCHASE_CENTS".into(),
            message: format!("not a valid amount: {value}"),
        })?;
        config.purchase = Some(PurchaseConfig {
            min_purchase_cents: Some(cents),
            quantity_presets: None,
        });
    }

    if let Ok(value) = env::var("RIFA_MAX_ATTEMPTS") {
        let attempts = value.parse().map_err(|_| Error::Validation {
            field: "RIFA_MAX_ATTEMPTS".into(),
            message: format!("not a valid attempt count: {value}"),
        })?;
        config.allocation = Some(AllocationConfig {
            max_attempts: Some(attempts),
        });
    }

    if let Ok(value) = env::var("RIFA_OUTPUT_FORMAT") {
        let format = value.parse().map_err(|e| Error::Validation {
            field: "RIFA_OUTPUT_FORMAT".into(),
            message: e,
        })?;
        config.output_format = Some(format);
    }

    Ok(config)
}
