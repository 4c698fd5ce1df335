//! Provider configuration.
//!
//! Stored as TOML with kebab-case keys:
//!
//! ```toml
//! namespace = "aarch64"
//! max-known-version = "armv9.0a"
//! targets-file = "microarchitectures.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use variant_targets::TargetTable;

use crate::error::{ProviderError, Result};

/// Namespace every AArch64 property carries.
pub const NAMESPACE: &str = "aarch64";

/// Newest target the feature catalog has data for.
pub const MAX_KNOWN_VERSION: &str = "armv9.0a";

/// Settings for an [`AArch64Provider`](crate::AArch64Provider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfig {
    /// Namespace of the properties this provider owns.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Target name acting as the version ceiling.
    #[serde(default = "default_max_known_version")]
    pub max_known_version: String,
    /// Archspec-format target file replacing the bundled table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets_file: Option<PathBuf>,
}

fn default_namespace() -> String {
    NAMESPACE.to_string()
}

fn default_max_known_version() -> String {
    MAX_KNOWN_VERSION.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            max_known_version: default_max_known_version(),
            targets_file: None,
        }
    }
}

impl ProviderConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProviderError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize the config to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The target table this config selects.
    pub fn target_table(&self) -> Result<TargetTable> {
        let table = match &self.targets_file {
            Some(path) => TargetTable::load(path)?,
            None => TargetTable::builtin()?,
        };
        Ok(table)
    }
}
