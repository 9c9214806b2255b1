//! JSON configuration selecting the pivoting strategy and the backend
//!
//! ```json
//! {
//!   "pivoting": true,
//!   "backend": { "type": "native", "library": "./libgauss.so" }
//! }
//! ```

use crate::error::LuError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Factorization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuConfig {
    /// Use partial pivoting (`P·A = L·U`) instead of plain `A = L·U`
    #[serde(default = "default_pivoting")]
    pub pivoting: bool,
    /// Execution backend
    #[serde(default)]
    pub backend: BackendConfig,
}

fn default_pivoting() -> bool {
    true
}

impl Default for LuConfig {
    fn default() -> Self {
        Self {
            pivoting: default_pivoting(),
            backend: BackendConfig::default(),
        }
    }
}

/// Backend selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Pure-Rust kernels
    #[default]
    Reference,
    /// External engine loaded from a shared library
    Native {
        /// Path of the shared library exporting `lu_in_place` and `plu`
        library: PathBuf,
    },
}

impl LuConfig {
    /// Configuration using the native engine at `library`
    pub fn native<P: Into<PathBuf>>(library: P, pivoting: bool) -> Self {
        Self {
            pivoting,
            backend: BackendConfig::Native {
                library: library.into(),
            },
        }
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, LuError> {
        serde_json::from_str(json)
            .map_err(|e| LuError::Config(format!("Failed to parse JSON: {}", e)))
    }

    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LuError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LuError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_json_str(&contents)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LuError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LuError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| LuError::Config(format!("Failed to write config file: {}", e)))
    }
}
