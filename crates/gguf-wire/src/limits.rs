// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Upper bounds applied to counts and lengths read from the file.
//!
//! Every length in a GGUF header is attacker-controlled. The limits stop a
//! corrupted 8-byte length from turning into a multi-gigabyte allocation
//! before the short read that would otherwise catch it.

use crate::WireError;

/// Caps on sizes decoded from a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum number of key/value entries in one header.
    pub max_kv_count: u64,
    /// Maximum byte length of a single string (keys included).
    pub max_string_len: u64,
    /// Maximum element count of a single array.
    pub max_array_len: u64,
}

impl DecodeLimits {
    /// Limits that accept anything representable.
    pub fn unlimited() -> Self {
        Self {
            max_kv_count: u64::MAX,
            max_string_len: u64::MAX,
            max_array_len: u64::MAX,
        }
    }

    /// Fails with [`WireError::LimitExceeded`] if `value > limit`.
    pub(crate) fn check(what: &'static str, value: u64, limit: u64) -> Result<(), WireError> {
        if value > limit {
            return Err(WireError::LimitExceeded { what, value, limit });
        }
        Ok(())
    }

    /// Checks a key/value count against [`Self::max_kv_count`].
    pub fn check_kv_count(&self, count: u64) -> Result<(), WireError> {
        Self::check("kv count", count, self.max_kv_count)
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_kv_count: 1 << 16,
            max_string_len: 16 * 1024 * 1024,
            max_array_len: 16 * 1024 * 1024,
        }
    }
}
