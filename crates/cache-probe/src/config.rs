// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Probe configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! os_name = "Linux"
//!
//! [windows]
//! query_l4 = true
//! ```

use crate::ProbeError;
use std::path::Path;

/// Configuration for a [`CacheProbe`](crate::CacheProbe).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProbeConfig {
    /// Overrides the detected OS display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    /// Windows-specific settings.
    #[serde(default)]
    pub windows: WindowsConfig,
}

/// Settings for the Windows plan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WindowsConfig {
    /// Run the supplementary `L4CacheSize` query.
    #[serde(default = "default_true")]
    pub query_l4: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self { query_l4: true }
    }
}

impl ProbeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ProbeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProbeError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ProbeError> {
        toml::from_str(toml_str).map_err(|e| ProbeError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ProbeError> {
        toml::to_string_pretty(self)
            .map_err(|e| ProbeError::Config(format!("TOML serialise error: {e}")))
    }

    /// The OS name to classify: the override if set, the host's otherwise.
    pub fn resolve_os_name(&self) -> String {
        self.os_name.clone().unwrap_or_else(crate::os::host_os_name)
    }
}
