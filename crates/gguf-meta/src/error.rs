// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for header decoding and metadata validation.

use crate::Architecture;
use gguf_wire::WireError;
use std::path::PathBuf;

/// Errors that can occur while parsing GGUF metadata.
///
/// The first error encountered aborts the parse; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The file could not be opened.
    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input ended before a value was complete.
    #[error("short read at offset {offset}: wanted {wanted} bytes, got {got}")]
    ShortRead { offset: u64, wanted: usize, got: usize },

    /// The byte source failed for a reason other than end of input.
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    /// The header does not start with `GGUF`.
    #[error("invalid magic {found:02X?}, expected \"GGUF\"")]
    InvalidMagic { found: [u8; 4] },

    /// The version field is not 1, 2 or 3.
    #[error("unsupported format version {version} (expected 1, 2 or 3)")]
    UnsupportedVersion { version: u32 },

    /// A value-type or array element-type tag is not a known code.
    #[error("unknown {} type tag {tag}", tag_kind(.in_array))]
    UnknownValueType { tag: u32, in_array: bool },

    /// A count or length exceeds the configured decode limits.
    #[error("{what} of {value} exceeds limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    /// `general.architecture` is absent.
    #[error("general.architecture not found")]
    MissingArchitecture,

    /// `general.architecture` names an architecture outside the known set.
    #[error("unknown architecture '{name}'")]
    UnknownArchitecture { name: String },

    /// The document failed the schema of its architecture.
    #[error("invalid {architecture} metadata at '{path}': {reason}")]
    SchemaValidationFailed {
        architecture: Architecture,
        path: String,
        reason: String,
    },

    /// Parser configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<WireError> for MetadataError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::ShortRead {
                offset,
                wanted,
                got,
            } => MetadataError::ShortRead {
                offset,
                wanted,
                got,
            },
            WireError::UnknownValueType { tag, in_array } => {
                MetadataError::UnknownValueType { tag, in_array }
            }
            WireError::LimitExceeded { what, value, limit } => {
                MetadataError::LimitExceeded { what, value, limit }
            }
            WireError::Io(e) => MetadataError::Io(e),
        }
    }
}

fn tag_kind(in_array: &bool) -> &'static str {
    if *in_array {
        "array element"
    } else {
        "value"
    }
}
