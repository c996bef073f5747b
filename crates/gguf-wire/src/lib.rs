// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # gguf-wire
//!
//! Wire-level readers for the header of a GGUF model container.
//!
//! This crate knows how bytes turn into typed values and nothing else:
//!
//! - [`ByteReader`]: fixed-width little-endian scalars with exact-length
//!   reads (a short read never yields a partial value).
//! - [`VersionedReader`]: the same source after the format [`Version`] is
//!   known, adding versioned sizes, strings, arrays and tag dispatch.
//! - [`ValueType`] / [`MetadataValue`]: the 13-entry type catalog and the
//!   decoded value model.
//! - [`DecodeLimits`]: caps on counts and lengths read from untrusted input.
//!
//! The container structure (magic, counts, key/value loop) and everything
//! schema-related lives in `gguf-meta`.
//!
//! # Example
//! ```
//! use gguf_wire::{ByteReader, DecodeLimits, MetadataValue, ValueType, Version};
//!
//! // A version-2 string: 8-byte length followed by the bytes.
//! let mut bytes = 5u64.to_le_bytes().to_vec();
//! bytes.extend_from_slice(b"llama");
//!
//! let mut reader = ByteReader::new(&bytes[..]).with_version(Version::V2, DecodeLimits::default());
//! let value = reader.read_value(ValueType::String).unwrap();
//! assert_eq!(value, MetadataValue::String("llama".into()));
//! ```

mod error;
mod limits;
mod reader;
mod value;

pub use error::WireError;
pub use limits::DecodeLimits;
pub use reader::{ByteReader, VersionedReader};
pub use value::{MetadataValue, ValueType, Version};
