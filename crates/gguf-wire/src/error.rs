// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for wire-level decoding.

/// Errors that can occur while reading typed values from a GGUF header.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Fewer bytes were available than the value being read requires.
    #[error("short read at offset {offset}: wanted {wanted} bytes, got {got}")]
    ShortRead { offset: u64, wanted: usize, got: usize },

    /// A value-type or array element-type tag outside the known scalar set.
    #[error("unknown {} type tag {tag}", tag_kind(.in_array))]
    UnknownValueType { tag: u32, in_array: bool },

    /// A count or length read from the file exceeds the configured limit.
    #[error("{what} of {value} exceeds limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    /// The underlying byte source failed for a reason other than end of input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn tag_kind(in_array: &bool) -> &'static str {
    if *in_array {
        "array element"
    } else {
        "value"
    }
}
