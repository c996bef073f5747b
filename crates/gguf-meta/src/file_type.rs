// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Quantisation catalog for `general.file_type`.

use std::fmt;

/// Dominant tensor encoding of a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum FileType {
    AllF32,
    MostlyF16,
    MostlyQ4_0,
    MostlyQ4_1,
    MostlyQ4_1SomeF16,
    MostlyQ4_2,
    MostlyQ4_3,
    MostlyQ8_0,
    MostlyQ5_0,
    MostlyQ5_1,
    MostlyQ2_K,
    MostlyQ3_K_S,
    MostlyQ3_K_M,
    MostlyQ3_K_L,
    MostlyQ4_K_S,
    MostlyQ4_K_M,
    MostlyQ5_K_S,
    MostlyQ5_K_M,
    MostlyQ6_K,
}

impl FileType {
    /// Every file type, indexed by its numeric code.
    pub const ALL: [FileType; 19] = [
        FileType::AllF32,
        FileType::MostlyF16,
        FileType::MostlyQ4_0,
        FileType::MostlyQ4_1,
        FileType::MostlyQ4_1SomeF16,
        FileType::MostlyQ4_2,
        FileType::MostlyQ4_3,
        FileType::MostlyQ8_0,
        FileType::MostlyQ5_0,
        FileType::MostlyQ5_1,
        FileType::MostlyQ2_K,
        FileType::MostlyQ3_K_S,
        FileType::MostlyQ3_K_M,
        FileType::MostlyQ3_K_L,
        FileType::MostlyQ4_K_S,
        FileType::MostlyQ4_K_M,
        FileType::MostlyQ5_K_S,
        FileType::MostlyQ5_K_M,
        FileType::MostlyQ6_K,
    ];

    /// Maps a stored code, or `None` for codes outside 0–18.
    pub fn from_code(code: u64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Canonical upper-case name, e.g. `MOSTLY_Q4_K_M`.
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::AllF32 => "ALL_F32",
            FileType::MostlyF16 => "MOSTLY_F16",
            FileType::MostlyQ4_0 => "MOSTLY_Q4_0",
            FileType::MostlyQ4_1 => "MOSTLY_Q4_1",
            FileType::MostlyQ4_1SomeF16 => "MOSTLY_Q4_1_SOME_F16",
            FileType::MostlyQ4_2 => "MOSTLY_Q4_2",
            FileType::MostlyQ4_3 => "MOSTLY_Q4_3",
            FileType::MostlyQ8_0 => "MOSTLY_Q8_0",
            FileType::MostlyQ5_0 => "MOSTLY_Q5_0",
            FileType::MostlyQ5_1 => "MOSTLY_Q5_1",
            FileType::MostlyQ2_K => "MOSTLY_Q2_K",
            FileType::MostlyQ3_K_S => "MOSTLY_Q3_K_S",
            FileType::MostlyQ3_K_M => "MOSTLY_Q3_K_M",
            FileType::MostlyQ3_K_L => "MOSTLY_Q3_K_L",
            FileType::MostlyQ4_K_S => "MOSTLY_Q4_K_S",
            FileType::MostlyQ4_K_M => "MOSTLY_Q4_K_M",
            FileType::MostlyQ5_K_S => "MOSTLY_Q5_K_S",
            FileType::MostlyQ5_K_M => "MOSTLY_Q5_K_M",
            FileType::MostlyQ6_K => "MOSTLY_Q6_K",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for FileType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
