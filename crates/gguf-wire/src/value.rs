// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Format versions, the value-type catalog and the decoded value model.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

// ── Version ────────────────────────────────────────────────────────

/// A supported container format version.
///
/// The version decides the on-disk width of every count and length in the
/// header: 4 bytes for v1, 8 bytes for v2 and v3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Version {
    V1,
    V2,
    V3,
}

impl Version {
    /// Maps the raw 4-byte version field, or `None` if unsupported.
    pub fn from_u32(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Version::V1),
            2 => Some(Version::V2),
            3 => Some(Version::V3),
            _ => None,
        }
    }

    /// The numeric version as stored in the file.
    pub fn as_u32(self) -> u32 {
        match self {
            Version::V1 => 1,
            Version::V2 => 2,
            Version::V3 => 3,
        }
    }

    /// Width in bytes of counts and lengths for this version.
    pub fn size_width(self) -> usize {
        match self {
            Version::V1 => 4,
            Version::V2 | Version::V3 => 8,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_u32())
    }
}

// ── ValueType ──────────────────────────────────────────────────────

/// The 13 value-type tags of the key/value section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u32)]
pub enum ValueType {
    U8 = 0,
    I8 = 1,
    U16 = 2,
    I16 = 3,
    U32 = 4,
    I32 = 5,
    F32 = 6,
    Bool = 7,
    String = 8,
    Array = 9,
    U64 = 10,
    I64 = 11,
    F64 = 12,
}

impl ValueType {
    /// Every tag, indexed by its numeric code.
    pub const ALL: [ValueType; 13] = [
        ValueType::U8,
        ValueType::I8,
        ValueType::U16,
        ValueType::I16,
        ValueType::U32,
        ValueType::I32,
        ValueType::F32,
        ValueType::Bool,
        ValueType::String,
        ValueType::Array,
        ValueType::U64,
        ValueType::I64,
        ValueType::F64,
    ];

    /// Maps a raw tag to its type, or `None` for codes outside 0–12.
    pub fn from_u32(tag: u32) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    /// The numeric tag as stored in the file.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Whether values of this type may appear as array elements.
    pub fn is_scalar(self) -> bool {
        self != ValueType::Array
    }

    /// Lower-case label (`"u32"`, `"string"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::U8 => "u8",
            ValueType::I8 => "i8",
            ValueType::U16 => "u16",
            ValueType::I16 => "i16",
            ValueType::U32 => "u32",
            ValueType::I32 => "i32",
            ValueType::F32 => "f32",
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::U64 => "u64",
            ValueType::I64 => "i64",
            ValueType::F64 => "f64",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MetadataValue ──────────────────────────────────────────────────

/// A decoded metadata value.
///
/// 64-bit integers keep their native width so values beyond 2^53 survive
/// exactly. Arrays are homogeneous and never nest.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    String(String),
    Array {
        element_type: ValueType,
        items: Vec<MetadataValue>,
    },
}

impl MetadataValue {
    /// The wire type this value was decoded from.
    pub fn value_type(&self) -> ValueType {
        match self {
            MetadataValue::U8(_) => ValueType::U8,
            MetadataValue::I8(_) => ValueType::I8,
            MetadataValue::U16(_) => ValueType::U16,
            MetadataValue::I16(_) => ValueType::I16,
            MetadataValue::U32(_) => ValueType::U32,
            MetadataValue::I32(_) => ValueType::I32,
            MetadataValue::U64(_) => ValueType::U64,
            MetadataValue::I64(_) => ValueType::I64,
            MetadataValue::F32(_) => ValueType::F32,
            MetadataValue::F64(_) => ValueType::F64,
            MetadataValue::Bool(_) => ValueType::Bool,
            MetadataValue::String(_) => ValueType::String,
            MetadataValue::Array { .. } => ValueType::Array,
        }
    }

    /// Any integer type with a non-negative value, widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            MetadataValue::U8(v) => Some(v.into()),
            MetadataValue::U16(v) => Some(v.into()),
            MetadataValue::U32(v) => Some(v.into()),
            MetadataValue::U64(v) => Some(v),
            MetadataValue::I8(v) => u64::try_from(v).ok(),
            MetadataValue::I16(v) => u64::try_from(v).ok(),
            MetadataValue::I32(v) => u64::try_from(v).ok(),
            MetadataValue::I64(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Any integer type whose value fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            MetadataValue::I8(v) => Some(v.into()),
            MetadataValue::I16(v) => Some(v.into()),
            MetadataValue::I32(v) => Some(v.into()),
            MetadataValue::I64(v) => Some(v),
            MetadataValue::U8(v) => Some(v.into()),
            MetadataValue::U16(v) => Some(v.into()),
            MetadataValue::U32(v) => Some(v.into()),
            MetadataValue::U64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Any float or integer type as `f64`.
    ///
    /// 64-bit integers above 2^53 lose precision here; use [`Self::as_u64`]
    /// for counts.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            MetadataValue::F32(v) => Some(v.into()),
            MetadataValue::F64(v) => Some(v),
            MetadataValue::U8(v) => Some(v.into()),
            MetadataValue::I8(v) => Some(v.into()),
            MetadataValue::U16(v) => Some(v.into()),
            MetadataValue::I16(v) => Some(v.into()),
            MetadataValue::U32(v) => Some(v.into()),
            MetadataValue::I32(v) => Some(v.into()),
            MetadataValue::U64(v) => Some(v as f64),
            MetadataValue::I64(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            MetadataValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Element slice of an array value.
    pub fn as_array(&self) -> Option<&[MetadataValue]> {
        match self {
            MetadataValue::Array { items, .. } => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::U8(v) => write!(f, "{v}"),
            MetadataValue::I8(v) => write!(f, "{v}"),
            MetadataValue::U16(v) => write!(f, "{v}"),
            MetadataValue::I16(v) => write!(f, "{v}"),
            MetadataValue::U32(v) => write!(f, "{v}"),
            MetadataValue::I32(v) => write!(f, "{v}"),
            MetadataValue::U64(v) => write!(f, "{v}"),
            MetadataValue::I64(v) => write!(f, "{v}"),
            MetadataValue::F32(v) => write!(f, "{v}"),
            MetadataValue::F64(v) => write!(f, "{v}"),
            MetadataValue::Bool(v) => write!(f, "{v}"),
            MetadataValue::String(s) => write!(f, "{s:?}"),
            MetadataValue::Array {
                element_type,
                items,
            } => write!(f, "[{element_type}; {}]", items.len()),
        }
    }
}

/// Serialises as the plain JSON-like value (numbers, strings, sequences),
/// without the type tag.
impl Serialize for MetadataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetadataValue::U8(v) => serializer.serialize_u8(*v),
            MetadataValue::I8(v) => serializer.serialize_i8(*v),
            MetadataValue::U16(v) => serializer.serialize_u16(*v),
            MetadataValue::I16(v) => serializer.serialize_i16(*v),
            MetadataValue::U32(v) => serializer.serialize_u32(*v),
            MetadataValue::I32(v) => serializer.serialize_i32(*v),
            MetadataValue::U64(v) => serializer.serialize_u64(*v),
            MetadataValue::I64(v) => serializer.serialize_i64(*v),
            MetadataValue::F32(v) => serializer.serialize_f32(*v),
            MetadataValue::F64(v) => serializer.serialize_f64(*v),
            MetadataValue::Bool(v) => serializer.serialize_bool(*v),
            MetadataValue::String(s) => serializer.serialize_str(s),
            MetadataValue::Array { items, .. } => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_u32() {
        assert_eq!(Version::from_u32(1), Some(Version::V1));
        assert_eq!(Version::from_u32(3), Some(Version::V3));
        assert_eq!(Version::from_u32(0), None);
        assert_eq!(Version::from_u32(4), None);
    }

    #[test]
    fn test_version_size_width() {
        assert_eq!(Version::V1.size_width(), 4);
        assert_eq!(Version::V2.size_width(), 8);
        assert_eq!(Version::V3.size_width(), 8);
    }

    #[test]
    fn test_value_type_codes_match_table() {
        for (code, ty) in ValueType::ALL.iter().enumerate() {
            assert_eq!(ty.code(), code as u32);
            assert_eq!(ValueType::from_u32(code as u32), Some(*ty));
        }
        assert_eq!(ValueType::from_u32(13), None);
        assert_eq!(ValueType::from_u32(u32::MAX), None);
    }

    #[test]
    fn test_only_array_is_not_scalar() {
        let non_scalar: Vec<_> = ValueType::ALL.iter().filter(|t| !t.is_scalar()).collect();
        assert_eq!(non_scalar, vec![&ValueType::Array]);
    }

    #[test]
    fn test_as_u64_rejects_negative() {
        assert_eq!(MetadataValue::I32(7).as_u64(), Some(7));
        assert_eq!(MetadataValue::I32(-1).as_u64(), None);
        assert_eq!(MetadataValue::U64(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(MetadataValue::F32(1.0).as_u64(), None);
    }

    #[test]
    fn test_as_f64_accepts_integers() {
        assert_eq!(MetadataValue::U32(4096).as_f64(), Some(4096.0));
        assert_eq!(MetadataValue::F32(1e-5).as_f64(), Some(f64::from(1e-5f32)));
        assert_eq!(MetadataValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_serialize_to_json() {
        let v = MetadataValue::Array {
            element_type: ValueType::U64,
            items: vec![MetadataValue::U64(u64::MAX), MetadataValue::U64(1)],
        };
        assert_eq!(serde_json::to_string(&v).unwrap(), "[18446744073709551615,1]");
        assert_eq!(
            serde_json::to_string(&MetadataValue::String("gpt2".into())).unwrap(),
            "\"gpt2\""
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(MetadataValue::String("x".into()).to_string(), "\"x\"");
        let arr = MetadataValue::Array {
            element_type: ValueType::F32,
            items: vec![MetadataValue::F32(0.5); 3],
        };
        assert_eq!(arr.to_string(), "[f32; 3]");
    }
}
