// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Hyper-parameter records, one per architecture.
//!
//! Each record is read from the group named after its architecture
//! (`llama.*`, `falcon.*`, ...). Field order in each extractor is the order
//! in which failures are reported.

use super::fields::Fields;
use super::FromFields;
use crate::MetadataError;

// ── Shared groups ──────────────────────────────────────────────────

/// `attention.*` for architectures with plain layer norm.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NormAttention {
    pub head_count: u64,
    pub layer_norm_epsilon: f64,
}

impl FromFields for NormAttention {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        Ok(Self {
            head_count: f.required_u64("head_count")?,
            layer_norm_epsilon: f.required_f64("layer_norm_epsilon")?,
        })
    }
}

/// `rope.*` with an optional scale.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScaledRope {
    pub dimension_count: u64,
    pub scale: Option<f64>,
}

impl FromFields for ScaledRope {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        Ok(Self {
            dimension_count: f.required_u64("dimension_count")?,
            scale: f.optional_f64("scale")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HeadCount {
    pub head_count: u64,
}

impl FromFields for HeadCount {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        Ok(Self {
            head_count: f.required_u64("head_count")?,
        })
    }
}

// ── LLaMA ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LlamaParams {
    pub context_length: u64,
    pub embedding_length: u64,
    pub feed_forward_length: u64,
    pub layer_count: Option<u64>,
    pub attention: LlamaAttention,
    pub rope: LlamaRope,
    pub tensor_data_layout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LlamaAttention {
    pub head_count: u64,
    /// Grouped-query attention; equal to `head_count` when absent.
    pub head_count_kv: Option<u64>,
    pub layer_norm_rms_epsilon: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LlamaRope {
    pub dimension_count: u64,
    pub freq_base: Option<f64>,
    pub scale: Option<f64>,
    pub scale_linear: Option<f64>,
}

impl FromFields for LlamaParams {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let a = f.scoped("attention");
        let attention = LlamaAttention {
            head_count: a.required_u64("head_count")?,
            head_count_kv: a.optional_u64("head_count_kv")?,
            layer_norm_rms_epsilon: a.required_f64("layer_norm_rms_epsilon")?,
        };
        let context_length = f.required_u64("context_length")?;
        let embedding_length = f.required_u64("embedding_length")?;
        let feed_forward_length = f.required_u64("feed_forward_length")?;
        let layer_count = f.optional_u64("layer_count")?;

        let r = f.scoped("rope");
        let rope = LlamaRope {
            dimension_count: r.required_u64("dimension_count")?,
            freq_base: r.optional_f64("freq_base")?,
            scale: r.optional_f64("scale")?,
            scale_linear: r.optional_f64("scale_linear")?,
        };

        Ok(Self {
            context_length,
            embedding_length,
            feed_forward_length,
            layer_count,
            attention,
            rope,
            tensor_data_layout: f.optional_string("tensor_data_layout")?,
        })
    }
}

// ── MPT ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MptParams {
    pub context_length: u64,
    pub embedding_length: u64,
    pub layer_count: u64,
    pub attention: MptAttention,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MptAttention {
    pub alibi_bias_max: f64,
    pub clip_kqv: f64,
    pub head_count: u64,
    pub layer_norm_epsilon: f64,
}

impl FromFields for MptParams {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let a = f.scoped("attention");
        let attention = MptAttention {
            alibi_bias_max: a.required_f64("alibi_bias_max")?,
            clip_kqv: a.required_f64("clip_kqv")?,
            head_count: a.required_u64("head_count")?,
            layer_norm_epsilon: a.required_f64("layer_norm_epsilon")?,
        };
        Ok(Self {
            context_length: f.required_u64("context_length")?,
            embedding_length: f.required_u64("embedding_length")?,
            layer_count: f.required_u64("layer_count")?,
            attention,
        })
    }
}

// ── GPT-NeoX / GPT-J / GPT-2 / BLOOM ───────────────────────────────

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GptNeoXParams {
    pub context_length: u64,
    pub embedding_length: u64,
    pub layer_count: u64,
    pub use_parallel_residual: bool,
    pub attention: NormAttention,
    pub rope: ScaledRope,
}

impl FromFields for GptNeoXParams {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let attention = NormAttention::from_fields(&f.scoped("attention"))?;
        Ok(Self {
            context_length: f.required_u64("context_length")?,
            embedding_length: f.required_u64("embedding_length")?,
            layer_count: f.required_u64("layer_count")?,
            rope: ScaledRope::from_fields(&f.scoped("rope"))?,
            use_parallel_residual: f.required_bool("use_parallel_residual")?,
            attention,
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GptJParams {
    pub context_length: u64,
    pub embedding_length: u64,
    pub layer_count: u64,
    pub attention: NormAttention,
    pub rope: ScaledRope,
}

impl FromFields for GptJParams {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let attention = NormAttention::from_fields(&f.scoped("attention"))?;
        Ok(Self {
            context_length: f.required_u64("context_length")?,
            embedding_length: f.required_u64("embedding_length")?,
            layer_count: f.required_u64("layer_count")?,
            rope: ScaledRope::from_fields(&f.scoped("rope"))?,
            attention,
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Gpt2Params {
    pub context_length: u64,
    pub embedding_length: u64,
    pub layer_count: u64,
    pub attention: NormAttention,
}

impl FromFields for Gpt2Params {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let attention = NormAttention::from_fields(&f.scoped("attention"))?;
        Ok(Self {
            context_length: f.required_u64("context_length")?,
            embedding_length: f.required_u64("embedding_length")?,
            layer_count: f.required_u64("layer_count")?,
            attention,
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BloomParams {
    pub context_length: u64,
    pub embedding_length: u64,
    pub feed_forward_length: u64,
    pub layer_count: u64,
    pub attention: NormAttention,
}

impl FromFields for BloomParams {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let attention = NormAttention::from_fields(&f.scoped("attention"))?;
        Ok(Self {
            context_length: f.required_u64("context_length")?,
            embedding_length: f.required_u64("embedding_length")?,
            feed_forward_length: f.required_u64("feed_forward_length")?,
            layer_count: f.required_u64("layer_count")?,
            attention,
        })
    }
}

// ── Falcon ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FalconParams {
    pub context_length: u64,
    pub embedding_length: u64,
    pub layer_count: u64,
    pub attention: FalconAttention,
    pub tensor_data_layout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FalconAttention {
    pub head_count: u64,
    pub head_count_kv: u64,
    pub layer_norm_epsilon: f64,
    pub use_norm: bool,
}

impl FromFields for FalconParams {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let a = f.scoped("attention");
        let attention = FalconAttention {
            head_count: a.required_u64("head_count")?,
            head_count_kv: a.required_u64("head_count_kv")?,
            layer_norm_epsilon: a.required_f64("layer_norm_epsilon")?,
            use_norm: a.required_bool("use_norm")?,
        };
        Ok(Self {
            context_length: f.required_u64("context_length")?,
            embedding_length: f.required_u64("embedding_length")?,
            layer_count: f.required_u64("layer_count")?,
            attention,
            tensor_data_layout: f.optional_string("tensor_data_layout")?,
        })
    }
}

// ── RWKV ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RwkvParams {
    pub architecture_version: u64,
    pub context_length: u64,
    pub embedding_length: u64,
    pub feed_forward_length: u64,
    pub layer_count: u64,
}

impl FromFields for RwkvParams {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        Ok(Self {
            architecture_version: f.required_u64("architecture_version")?,
            context_length: f.required_u64("context_length")?,
            embedding_length: f.required_u64("embedding_length")?,
            feed_forward_length: f.required_u64("feed_forward_length")?,
            layer_count: f.required_u64("layer_count")?,
        })
    }
}

// ── Whisper ────────────────────────────────────────────────────────

/// Whisper is an encoder/decoder model; each half has its own group.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WhisperParams {
    pub decoder: WhisperDecoder,
    pub encoder: WhisperEncoder,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WhisperDecoder {
    pub attention: HeadCount,
    pub context_length: u64,
    pub embedding_length: u64,
    pub layer_count: u64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WhisperEncoder {
    pub attention: HeadCount,
    pub context_length: u64,
    pub embedding_length: u64,
    pub layer_count: u64,
    pub mels_count: u64,
}

impl FromFields for WhisperParams {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let d = f.scoped("decoder");
        let decoder = WhisperDecoder {
            attention: HeadCount::from_fields(&d.scoped("attention"))?,
            context_length: d.required_u64("context_length")?,
            embedding_length: d.required_u64("embedding_length")?,
            layer_count: d.required_u64("layer_count")?,
        };
        let e = f.scoped("encoder");
        let encoder = WhisperEncoder {
            attention: HeadCount::from_fields(&e.scoped("attention"))?,
            context_length: e.required_u64("context_length")?,
            embedding_length: e.required_u64("embedding_length")?,
            layer_count: e.required_u64("layer_count")?,
            mels_count: e.required_u64("mels_count")?,
        };
        Ok(Self { decoder, encoder })
    }
}
