// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Architecture schema validation.
//!
//! [`validate`] turns a schema-less [`MetadataDocument`] into a typed
//! [`ModelMetadata`]: it reads `general.architecture`, then dispatches to the
//! extractor for that architecture. The set of architectures is closed, so
//! every dispatch is an exhaustive `match`.

mod arch;
mod fields;
mod general;

pub use arch::{
    BloomParams, FalconAttention, FalconParams, Gpt2Params, GptJParams, GptNeoXParams, HeadCount,
    LlamaAttention, LlamaParams, LlamaRope, MptAttention, MptParams, NormAttention, RwkvParams,
    ScaledRope, WhisperDecoder, WhisperEncoder, WhisperParams,
};
pub use general::{GeneralMetadata, HuggingFaceSource, SourceMetadata, DEFAULT_ALIGNMENT};

use crate::document::Node;
use crate::{MetadataDocument, MetadataError};
use fields::Fields;
use gguf_wire::MetadataValue;
use std::fmt;
use tracing::debug;

/// Builds a typed record from a document subtree.
pub(crate) trait FromFields: Sized {
    fn from_fields(fields: &Fields<'_>) -> Result<Self, MetadataError>;
}

// ── Architecture ───────────────────────────────────────────────────

/// Model architectures with a known metadata schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Llama,
    Mpt,
    GptNeoX,
    GptJ,
    Gpt2,
    Bloom,
    Falcon,
    Rwkv,
    Whisper,
}

impl Architecture {
    pub const ALL: [Architecture; 9] = [
        Architecture::Llama,
        Architecture::Mpt,
        Architecture::GptNeoX,
        Architecture::GptJ,
        Architecture::Gpt2,
        Architecture::Bloom,
        Architecture::Falcon,
        Architecture::Rwkv,
        Architecture::Whisper,
    ];

    /// Looks up the identifier stored in `general.architecture`.
    ///
    /// Matching is exact: `LLaMA` is not `llama`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// The identifier, which is also the key prefix of its parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::Llama => "llama",
            Architecture::Mpt => "mpt",
            Architecture::GptNeoX => "gptneox",
            Architecture::GptJ => "gptj",
            Architecture::Gpt2 => "gpt2",
            Architecture::Bloom => "bloom",
            Architecture::Falcon => "falcon",
            Architecture::Rwkv => "rwkv",
            Architecture::Whisper => "whisper",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Architecture {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ── Validated metadata ─────────────────────────────────────────────

/// Architecture-specific hyper-parameters.
///
/// Serialises under the architecture's own key, mirroring the file layout.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureParams {
    Llama(LlamaParams),
    Mpt(MptParams),
    GptNeoX(GptNeoXParams),
    GptJ(GptJParams),
    Gpt2(Gpt2Params),
    Bloom(BloomParams),
    Falcon(FalconParams),
    Rwkv(RwkvParams),
    Whisper(WhisperParams),
}

impl ArchitectureParams {
    pub fn architecture(&self) -> Architecture {
        match self {
            ArchitectureParams::Llama(_) => Architecture::Llama,
            ArchitectureParams::Mpt(_) => Architecture::Mpt,
            ArchitectureParams::GptNeoX(_) => Architecture::GptNeoX,
            ArchitectureParams::GptJ(_) => Architecture::GptJ,
            ArchitectureParams::Gpt2(_) => Architecture::Gpt2,
            ArchitectureParams::Bloom(_) => Architecture::Bloom,
            ArchitectureParams::Falcon(_) => Architecture::Falcon,
            ArchitectureParams::Rwkv(_) => Architecture::Rwkv,
            ArchitectureParams::Whisper(_) => Architecture::Whisper,
        }
    }

    pub fn as_llama(&self) -> Option<&LlamaParams> {
        match self {
            ArchitectureParams::Llama(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_mpt(&self) -> Option<&MptParams> {
        match self {
            ArchitectureParams::Mpt(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_gptneox(&self) -> Option<&GptNeoXParams> {
        match self {
            ArchitectureParams::GptNeoX(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_gptj(&self) -> Option<&GptJParams> {
        match self {
            ArchitectureParams::GptJ(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_gpt2(&self) -> Option<&Gpt2Params> {
        match self {
            ArchitectureParams::Gpt2(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_bloom(&self) -> Option<&BloomParams> {
        match self {
            ArchitectureParams::Bloom(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_falcon(&self) -> Option<&FalconParams> {
        match self {
            ArchitectureParams::Falcon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_rwkv(&self) -> Option<&RwkvParams> {
        match self {
            ArchitectureParams::Rwkv(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_whisper(&self) -> Option<&WhisperParams> {
        match self {
            ArchitectureParams::Whisper(p) => Some(p),
            _ => None,
        }
    }

    /// Maximum sequence length. For Whisper this is the decoder's.
    pub fn context_length(&self) -> u64 {
        match self {
            ArchitectureParams::Llama(p) => p.context_length,
            ArchitectureParams::Mpt(p) => p.context_length,
            ArchitectureParams::GptNeoX(p) => p.context_length,
            ArchitectureParams::GptJ(p) => p.context_length,
            ArchitectureParams::Gpt2(p) => p.context_length,
            ArchitectureParams::Bloom(p) => p.context_length,
            ArchitectureParams::Falcon(p) => p.context_length,
            ArchitectureParams::Rwkv(p) => p.context_length,
            ArchitectureParams::Whisper(p) => p.decoder.context_length,
        }
    }

    /// Hidden size. For Whisper this is the decoder's.
    pub fn embedding_length(&self) -> u64 {
        match self {
            ArchitectureParams::Llama(p) => p.embedding_length,
            ArchitectureParams::Mpt(p) => p.embedding_length,
            ArchitectureParams::GptNeoX(p) => p.embedding_length,
            ArchitectureParams::GptJ(p) => p.embedding_length,
            ArchitectureParams::Gpt2(p) => p.embedding_length,
            ArchitectureParams::Bloom(p) => p.embedding_length,
            ArchitectureParams::Falcon(p) => p.embedding_length,
            ArchitectureParams::Rwkv(p) => p.embedding_length,
            ArchitectureParams::Whisper(p) => p.decoder.embedding_length,
        }
    }

    /// Block count, if the file declares one. For Whisper, encoder plus decoder.
    pub fn layer_count(&self) -> Option<u64> {
        match self {
            ArchitectureParams::Llama(p) => p.layer_count,
            ArchitectureParams::Mpt(p) => Some(p.layer_count),
            ArchitectureParams::GptNeoX(p) => Some(p.layer_count),
            ArchitectureParams::GptJ(p) => Some(p.layer_count),
            ArchitectureParams::Gpt2(p) => Some(p.layer_count),
            ArchitectureParams::Bloom(p) => Some(p.layer_count),
            ArchitectureParams::Falcon(p) => Some(p.layer_count),
            ArchitectureParams::Rwkv(p) => Some(p.layer_count),
            ArchitectureParams::Whisper(p) => p
                .encoder
                .layer_count
                .checked_add(p.decoder.layer_count),
        }
    }

    /// Attention heads. RWKV has none.
    pub fn head_count(&self) -> Option<u64> {
        match self {
            ArchitectureParams::Llama(p) => Some(p.attention.head_count),
            ArchitectureParams::Mpt(p) => Some(p.attention.head_count),
            ArchitectureParams::GptNeoX(p) => Some(p.attention.head_count),
            ArchitectureParams::GptJ(p) => Some(p.attention.head_count),
            ArchitectureParams::Gpt2(p) => Some(p.attention.head_count),
            ArchitectureParams::Bloom(p) => Some(p.attention.head_count),
            ArchitectureParams::Falcon(p) => Some(p.attention.head_count),
            ArchitectureParams::Rwkv(_) => None,
            ArchitectureParams::Whisper(p) => Some(p.decoder.attention.head_count),
        }
    }
}

/// Validated, architecture-tagged model metadata.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ModelMetadata {
    pub general: GeneralMetadata,
    #[serde(flatten)]
    pub params: ArchitectureParams,
}

impl ModelMetadata {
    pub fn architecture(&self) -> Architecture {
        self.params.architecture()
    }

    pub fn context_length(&self) -> u64 {
        self.params.context_length()
    }

    pub fn embedding_length(&self) -> u64 {
        self.params.embedding_length()
    }

    pub fn layer_count(&self) -> Option<u64> {
        self.params.layer_count()
    }

    pub fn head_count(&self) -> Option<u64> {
        self.params.head_count()
    }
}

// ── Validation ─────────────────────────────────────────────────────

fn read_architecture(doc: &MetadataDocument) -> Result<Architecture, MetadataError> {
    match doc.get("general.architecture") {
        None | Some(Node::Branch(_)) => Err(MetadataError::MissingArchitecture),
        Some(Node::Leaf(MetadataValue::String(name))) => Architecture::from_name(name)
            .ok_or_else(|| MetadataError::UnknownArchitecture { name: name.clone() }),
        Some(Node::Leaf(other)) => Err(MetadataError::UnknownArchitecture {
            name: other.to_string(),
        }),
    }
}

/// Checks a document against the schema of its declared architecture.
///
/// Required fields must be present with a compatible type; absent optional
/// fields become `None`. The first failing field is reported.
pub fn validate(doc: &MetadataDocument) -> Result<ModelMetadata, MetadataError> {
    let architecture = read_architecture(doc)?;
    let general = GeneralMetadata::from_fields(&Fields::new(doc, architecture, "general"))?;

    let f = Fields::new(doc, architecture, architecture.as_str());
    let params = match architecture {
        Architecture::Llama => ArchitectureParams::Llama(LlamaParams::from_fields(&f)?),
        Architecture::Mpt => ArchitectureParams::Mpt(MptParams::from_fields(&f)?),
        Architecture::GptNeoX => ArchitectureParams::GptNeoX(GptNeoXParams::from_fields(&f)?),
        Architecture::GptJ => ArchitectureParams::GptJ(GptJParams::from_fields(&f)?),
        Architecture::Gpt2 => ArchitectureParams::Gpt2(Gpt2Params::from_fields(&f)?),
        Architecture::Bloom => ArchitectureParams::Bloom(BloomParams::from_fields(&f)?),
        Architecture::Falcon => ArchitectureParams::Falcon(FalconParams::from_fields(&f)?),
        Architecture::Rwkv => ArchitectureParams::Rwkv(RwkvParams::from_fields(&f)?),
        Architecture::Whisper => ArchitectureParams::Whisper(WhisperParams::from_fields(&f)?),
    };

    debug!(%architecture, "metadata validated");
    Ok(ModelMetadata { general, params })
}
