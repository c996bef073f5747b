// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Container decode loop.
//!
//! Walks the fixed preamble (magic, version, tensor count, kv count) and then
//! exactly `kv_count` key/value entries, feeding each one into a
//! [`MetadataDocument`]. Decoding stops at the end of the key/value section;
//! tensor descriptors and tensor data that follow are never touched.

use crate::{MetadataDocument, MetadataError, ParserConfig};
use gguf_wire::{ByteReader, MetadataValue, Version, VersionedReader};
use std::io::Read;
use tracing::{debug, trace};

/// The four magic bytes at offset 0 of every container.
pub const GGUF_MAGIC: [u8; 4] = *b"GGUF";

/// Fixed preamble of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ContainerHeader {
    pub version: Version,
    /// Number of tensor descriptors. Reported, not interpreted.
    pub tensor_count: u64,
    pub kv_count: u64,
}

/// Result of decoding the header and key/value section.
#[derive(Debug, Clone)]
pub struct DecodedHeader {
    pub header: ContainerHeader,
    pub document: MetadataDocument,
    /// Bytes consumed from the start of the container.
    pub header_len: u64,
}

/// Step-by-step decoder over one reader.
///
/// [`Decoder::read_header`] must run before [`Decoder::read_entries`];
/// [`decode_document`] drives both.
pub struct Decoder<R> {
    reader: VersionedReader<R>,
    header: ContainerHeader,
}

impl<R: Read> Decoder<R> {
    /// Reads magic, version and both counts.
    pub fn read_header(reader: R, config: &ParserConfig) -> Result<Self, MetadataError> {
        let mut bytes = ByteReader::new(reader);

        let found = bytes.read_magic()?;
        if found != GGUF_MAGIC {
            return Err(MetadataError::InvalidMagic { found });
        }

        let raw_version = bytes.read_u32()?;
        let version = Version::from_u32(raw_version).ok_or(MetadataError::UnsupportedVersion {
            version: raw_version,
        })?;

        let mut reader = bytes.with_version(version, config.limits);
        let tensor_count = reader.read_size()?;
        let kv_count = reader.read_size()?;
        config.limits.check_kv_count(kv_count)?;

        debug!(%version, tensor_count, kv_count, "container header");

        Ok(Self {
            reader,
            header: ContainerHeader {
                version,
                tensor_count,
                kv_count,
            },
        })
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    /// Reads every key/value entry and assembles the document.
    pub fn read_entries(mut self) -> Result<DecodedHeader, MetadataError> {
        let mut document = MetadataDocument::new();
        for index in 0..self.header.kv_count {
            let (key, value) = self.read_entry()?;
            trace!(index, key = %key, value = %value, "metadata entry");
            document.set(&key, value);
        }

        let header_len = self.reader.offset();
        debug!(entries = self.header.kv_count, header_len, "key/value section decoded");

        Ok(DecodedHeader {
            header: self.header,
            document,
            header_len,
        })
    }

    fn read_entry(&mut self) -> Result<(String, MetadataValue), MetadataError> {
        let key = self.reader.read_string()?;
        let ty = self.reader.read_value_type(false)?;
        let value = self.reader.read_value(ty)?;
        Ok((key, value))
    }
}

/// Decodes a container header into its schema-less document.
pub fn decode_document<R: Read>(
    reader: R,
    config: &ParserConfig,
) -> Result<DecodedHeader, MetadataError> {
    Decoder::read_header(reader, config)?.read_entries()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gguf_wire::{DecodeLimits, ValueType};

    fn preamble(version: u32, tensors: u64, kvs: u64) -> Vec<u8> {
        let mut b = GGUF_MAGIC.to_vec();
        b.extend_from_slice(&version.to_le_bytes());
        if version == 1 {
            b.extend_from_slice(&(tensors as u32).to_le_bytes());
            b.extend_from_slice(&(kvs as u32).to_le_bytes());
        } else {
            b.extend_from_slice(&tensors.to_le_bytes());
            b.extend_from_slice(&kvs.to_le_bytes());
        }
        b
    }

    fn v3_string(b: &mut Vec<u8>, s: &str) {
        b.extend_from_slice(&(s.len() as u64).to_le_bytes());
        b.extend_from_slice(s.as_bytes());
    }

    #[test]
    fn test_empty_section() {
        let bytes = preamble(3, 5, 0);
        let decoded = decode_document(&bytes[..], &ParserConfig::default()).unwrap();
        assert_eq!(decoded.header.version, Version::V3);
        assert_eq!(decoded.header.tensor_count, 5);
        assert!(decoded.document.is_empty());
        assert_eq!(decoded.header_len, 24);
    }

    #[test]
    fn test_v1_counts_are_four_bytes() {
        let bytes = preamble(1, 2, 0);
        assert_eq!(bytes.len(), 16);
        let decoded = decode_document(&bytes[..], &ParserConfig::default()).unwrap();
        assert_eq!(decoded.header.version, Version::V1);
        assert_eq!(decoded.header.tensor_count, 2);
    }

    #[test]
    fn test_single_entry() {
        let mut bytes = preamble(3, 0, 1);
        v3_string(&mut bytes, "general.alignment");
        bytes.extend_from_slice(&ValueType::U32.code().to_le_bytes());
        bytes.extend_from_slice(&64u32.to_le_bytes());
        // Tensor descriptors would follow; they must not be read.
        bytes.extend_from_slice(b"trailing");

        let decoded = decode_document(&bytes[..], &ParserConfig::default()).unwrap();
        assert_eq!(
            decoded.document.get_value("general.alignment"),
            Some(&MetadataValue::U32(64))
        );
        assert_eq!(decoded.header_len, bytes.len() as u64 - 8);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = preamble(3, 0, 0);
        bytes[..4].copy_from_slice(b"GGML");
        let err = decode_document(&bytes[..], &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidMagic { found } if &found == b"GGML"));
    }

    #[test]
    fn test_unsupported_version_before_counts() {
        // Only magic and version: a version error must win over a short read.
        let mut bytes = GGUF_MAGIC.to_vec();
        bytes.extend_from_slice(&4u32.to_le_bytes());
        let err = decode_document(&bytes[..], &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, MetadataError::UnsupportedVersion { version: 4 }));
    }

    #[test]
    fn test_unknown_top_level_tag() {
        let mut bytes = preamble(2, 0, 1);
        v3_string(&mut bytes, "x");
        bytes.extend_from_slice(&13u32.to_le_bytes());
        let err = decode_document(&bytes[..], &ParserConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::UnknownValueType {
                tag: 13,
                in_array: false
            }
        ));
    }

    #[test]
    fn test_kv_count_limit() {
        let bytes = preamble(3, 0, 1_000);
        let config = ParserConfig {
            limits: DecodeLimits {
                max_kv_count: 10,
                ..Default::default()
            },
        };
        let err = decode_document(&bytes[..], &config).unwrap_err();
        assert!(matches!(err, MetadataError::LimitExceeded { value: 1_000, .. }));
    }

    #[test]
    fn test_missing_entries_are_short_read() {
        let bytes = preamble(3, 0, 2);
        let err = decode_document(&bytes[..], &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, MetadataError::ShortRead { offset: 24, .. }));
    }

    #[test]
    fn test_decoder_exposes_header_before_entries() {
        let bytes = preamble(2, 9, 0);
        let decoder = Decoder::read_header(&bytes[..], &ParserConfig::default()).unwrap();
        assert_eq!(decoder.header().tensor_count, 9);
        let decoded = decoder.read_entries().unwrap();
        assert_eq!(decoded.header.kv_count, 0);
    }
}
