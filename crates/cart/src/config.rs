//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AQUAFARM_DATA_DIR` - Directory holding snapshot files (default: `.aquafarm`)
//! - `AQUAFARM_CART_KEY` - Storage key for the cart snapshot (default: `aquafarm-cart`)
//! - `AQUAFARM_ORDERS_KEY` - Storage key for the order history (default: `aquafarm-orders`)
//! - `AQUAFARM_CATALOG` - Path to a YAML catalog replacing the built-in one

use std::path::PathBuf;

use thiserror::Error;

use crate::orders::DEFAULT_ORDERS_KEY;
use crate::storage::{FileStorage, is_valid_key};
use crate::store::DEFAULT_CART_KEY;

const DEFAULT_DATA_DIR: &str = ".aquafarm";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the cart and order history live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for file-backed snapshots
    pub data_dir: PathBuf,
    /// Storage key for the cart snapshot
    pub cart_key: String,
    /// Storage key for the order history
    pub orders_key: String,
    /// Catalog file, if not using the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            orders_key: DEFAULT_ORDERS_KEY.to_string(),
            catalog_path: None,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a storage key is empty or contains characters
    /// other than ASCII letters, digits, `-` and `_`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`CartConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("AQUAFARM_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let cart_key = get_key(&lookup, "AQUAFARM_CART_KEY", DEFAULT_CART_KEY)?;
        let orders_key = get_key(&lookup, "AQUAFARM_ORDERS_KEY", DEFAULT_ORDERS_KEY)?;
        let catalog_path = lookup("AQUAFARM_CATALOG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        if cart_key == orders_key {
            return Err(ConfigError::InvalidEnvVar(
                "AQUAFARM_ORDERS_KEY".to_string(),
                format!("must differ from AQUAFARM_CART_KEY ('{cart_key}')"),
            ));
        }

        Ok(Self {
            data_dir,
            cart_key,
            orders_key,
            catalog_path,
        })
    }

    /// File storage rooted at the configured data directory.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a storage key with a default, validating its characters.
fn get_key(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: &str,
) -> Result<String, ConfigError> {
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    if !is_valid_key(&value) {
        return Err(ConfigError::InvalidEnvVar(
            var.to_string(),
            format!("'{value}' must be non-empty and use only letters, digits, '-' or '_'"),
        ));
    }
    Ok(value)
}
