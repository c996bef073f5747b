// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sequential readers over a GGUF byte source.
//!
//! # Two-Stage Reader
//!
//! Counts and lengths cannot be decoded until the format version is known,
//! so reading happens in two stages:
//!
//! ```text
//! ByteReader<R>      : fixed-width scalars only (magic, version).
//!       │  .with_version(version, limits)
//!       ▼
//! VersionedReader<R> : versioned sizes, strings, arrays, tag dispatch.
//! ```
//!
//! The transition consumes the byte reader, so a versioned read can never
//! happen before the version has been decoded.

use crate::limits::DecodeLimits;
use crate::{MetadataValue, ValueType, Version, WireError};
use byteorder::{ByteOrder, LittleEndian};
use std::io::{ErrorKind, Read};

/// Upper bound on speculative pre-allocation for arrays.
const MAX_PREALLOC: usize = 4096;

// ── ByteReader ─────────────────────────────────────────────────────

/// Reads fixed-width little-endian scalars, tracking the byte offset.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> ByteReader<R> {
    /// Wraps a byte source positioned at the start of the header.
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Moves to the versioned stage once the format version is known.
    pub fn with_version(self, version: Version, limits: DecodeLimits) -> VersionedReader<R> {
        VersionedReader {
            bytes: self,
            version,
            limits,
        }
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fills `buf` completely or fails with [`WireError::ShortRead`].
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        let start = self.offset;
        let mut got = 0;
        while got < buf.len() {
            match self.inner.read(&mut buf[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(WireError::Io(e)),
            }
        }
        self.offset += got as u64;
        if got < buf.len() {
            return Err(WireError::ShortRead {
                offset: start,
                wanted: buf.len(),
                got,
            });
        }
        Ok(())
    }

    fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Reads exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        let start = self.offset;
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC * 16));
        // `read_to_end` already retries on `Interrupted`.
        let got = (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        self.offset += got as u64;
        if got < len {
            return Err(WireError::ShortRead {
                offset: start,
                wanted: len,
                got,
            });
        }
        Ok(buf)
    }

    /// Reads the 4 raw magic bytes.
    pub fn read_magic(&mut self) -> Result<[u8; 4], WireError> {
        self.read_fixed::<4>()
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_fixed::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, WireError> {
        Ok(self.read_fixed::<1>()?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(LittleEndian::read_u16(&self.read_fixed::<2>()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, WireError> {
        Ok(LittleEndian::read_i16(&self.read_fixed::<2>()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        Ok(LittleEndian::read_u32(&self.read_fixed::<4>()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        Ok(LittleEndian::read_i32(&self.read_fixed::<4>()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, WireError> {
        Ok(LittleEndian::read_u64(&self.read_fixed::<8>()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, WireError> {
        Ok(LittleEndian::read_i64(&self.read_fixed::<8>()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, WireError> {
        Ok(LittleEndian::read_f32(&self.read_fixed::<4>()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, WireError> {
        Ok(LittleEndian::read_f64(&self.read_fixed::<8>()?))
    }

    /// Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.read_u8()? != 0)
    }
}

// ── VersionedReader ────────────────────────────────────────────────

/// A [`ByteReader`] bound to a format version and decode limits.
#[derive(Debug)]
pub struct VersionedReader<R> {
    bytes: ByteReader<R>,
    version: Version,
    limits: DecodeLimits,
}

impl<R: Read> VersionedReader<R> {
    pub fn version(&self) -> Version {
        self.version
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.bytes.offset()
    }

    /// Access to the fixed-width readers.
    pub fn bytes(&mut self) -> &mut ByteReader<R> {
        &mut self.bytes
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.bytes.into_inner()
    }

    /// Reads a count or length: 4 bytes for v1, 8 bytes for v2 and v3.
    pub fn read_size(&mut self) -> Result<u64, WireError> {
        match self.version.size_width() {
            4 => Ok(u64::from(self.bytes.read_u32()?)),
            _ => self.bytes.read_u64(),
        }
    }

    /// Reads a versioned size and checks it against `limit`.
    fn read_len(&mut self, what: &'static str, limit: u64) -> Result<usize, WireError> {
        let len = self.read_size()?;
        DecodeLimits::check(what, len, limit)?;
        usize::try_from(len).map_err(|_| WireError::LimitExceeded {
            what,
            value: len,
            limit: usize::MAX as u64,
        })
    }

    /// Reads a length-prefixed string, dropping embedded NUL characters.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        let len = self.read_len("string length", self.limits.max_string_len)?;
        let raw = self.bytes.read_bytes(len)?;
        let text = String::from_utf8_lossy(&raw);
        if text.contains('\0') {
            Ok(text.replace('\0', ""))
        } else {
            Ok(text.into_owned())
        }
    }

    /// Reads a 4-byte type tag and resolves it against the catalog.
    ///
    /// With `in_array` set, the array tag itself is rejected as well.
    pub fn read_value_type(&mut self, in_array: bool) -> Result<ValueType, WireError> {
        let tag = self.bytes.read_u32()?;
        ValueType::from_u32(tag)
            .filter(|ty| !in_array || ty.is_scalar())
            .ok_or(WireError::UnknownValueType { tag, in_array })
    }

    /// Reads one value of type `ty`.
    ///
    /// This is the single dispatch point for both top-level entries and
    /// array elements.
    pub fn read_value(&mut self, ty: ValueType) -> Result<MetadataValue, WireError> {
        match ty {
            ValueType::Array => self.read_array(),
            scalar => self.read_scalar(scalar),
        }
    }

    /// Reads one array element. Top-level values go through [`Self::read_value`].
    fn read_scalar(&mut self, ty: ValueType) -> Result<MetadataValue, WireError> {
        Ok(match ty {
            ValueType::U8 => MetadataValue::U8(self.bytes.read_u8()?),
            ValueType::I8 => MetadataValue::I8(self.bytes.read_i8()?),
            ValueType::U16 => MetadataValue::U16(self.bytes.read_u16()?),
            ValueType::I16 => MetadataValue::I16(self.bytes.read_i16()?),
            ValueType::U32 => MetadataValue::U32(self.bytes.read_u32()?),
            ValueType::I32 => MetadataValue::I32(self.bytes.read_i32()?),
            ValueType::F32 => MetadataValue::F32(self.bytes.read_f32()?),
            ValueType::Bool => MetadataValue::Bool(self.bytes.read_bool()?),
            ValueType::String => MetadataValue::String(self.read_string()?),
            ValueType::U64 => MetadataValue::U64(self.bytes.read_u64()?),
            ValueType::I64 => MetadataValue::I64(self.bytes.read_i64()?),
            ValueType::F64 => MetadataValue::F64(self.bytes.read_f64()?),
            ValueType::Array => {
                return Err(WireError::UnknownValueType {
                    tag: ValueType::Array.code(),
                    in_array: true,
                })
            }
        })
    }

    /// Reads an element tag, a versioned count and that many scalars.
    pub fn read_array(&mut self) -> Result<MetadataValue, WireError> {
        let element_type = self.read_value_type(true)?;
        let count = self.read_len("array length", self.limits.max_array_len)?;
        tracing::trace!("array of {count} x {element_type} at offset {}", self.offset());

        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            items.push(self.read_scalar(element_type)?);
        }
        Ok(MetadataValue::Array {
            element_type,
            items,
        })
    }
}
