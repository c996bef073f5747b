// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Parser configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! [limits]
//! max_kv_count = 65536
//! max_string_len = 16777216
//! max_array_len = 16777216
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::MetadataError;
use gguf_wire::DecodeLimits;
use std::path::Path;

/// Configuration for a metadata parse.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Caps on counts and lengths read from the file.
    pub limits: DecodeLimits,
}

impl ParserConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MetadataError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, MetadataError> {
        toml::from_str(toml_str)
            .map_err(|e| MetadataError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, MetadataError> {
        toml::to_string_pretty(self)
            .map_err(|e| MetadataError::Config(format!("TOML serialise error: {e}")))
    }

    /// A configuration without any size limits.
    pub fn unlimited() -> Self {
        Self {
            limits: DecodeLimits::unlimited(),
        }
    }
}
