// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! In-memory GGUF header builder for tests.

#![allow(dead_code)]

use gguf_meta::{MetadataValue, ValueType};

/// Writes a container preamble followed by key/value entries.
pub struct GgufBuilder {
    version: u32,
    tensor_count: u64,
    entries: Vec<(String, MetadataValue)>,
    raw: Vec<Vec<u8>>,
}

impl GgufBuilder {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            tensor_count: 0,
            entries: Vec::new(),
            raw: Vec::new(),
        }
    }

    pub fn tensor_count(mut self, n: u64) -> Self {
        self.tensor_count = n;
        self
    }

    pub fn kv(mut self, key: &str, value: MetadataValue) -> Self {
        self.entries.push((key.to_owned(), value));
        self
    }

    pub fn string(self, key: &str, value: &str) -> Self {
        self.kv(key, MetadataValue::String(value.to_owned()))
    }

    pub fn u32(self, key: &str, value: u32) -> Self {
        self.kv(key, MetadataValue::U32(value))
    }

    pub fn f32(self, key: &str, value: f32) -> Self {
        self.kv(key, MetadataValue::F32(value))
    }

    pub fn bool(self, key: &str, value: bool) -> Self {
        self.kv(key, MetadataValue::Bool(value))
    }

    /// Appends an already-encoded entry; it counts toward `kv_count`.
    pub fn raw_entry(mut self, bytes: Vec<u8>) -> Self {
        self.raw.push(bytes);
        self
    }

    fn size(&self, out: &mut Vec<u8>, n: u64) {
        if self.version == 1 {
            out.extend_from_slice(&(n as u32).to_le_bytes());
        } else {
            out.extend_from_slice(&n.to_le_bytes());
        }
    }

    pub fn encode_string(&self, out: &mut Vec<u8>, s: &str) {
        self.size(out, s.len() as u64);
        out.extend_from_slice(s.as_bytes());
    }

    fn encode_scalar(&self, out: &mut Vec<u8>, value: &MetadataValue) {
        match value {
            MetadataValue::U8(v) => out.push(*v),
            MetadataValue::I8(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::I16(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::I32(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::U64(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::I64(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::F32(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::F64(v) => out.extend_from_slice(&v.to_le_bytes()),
            MetadataValue::Bool(v) => out.push(u8::from(*v)),
            MetadataValue::String(s) => self.encode_string(out, s),
            MetadataValue::Array {
                element_type,
                items,
            } => {
                out.extend_from_slice(&element_type.code().to_le_bytes());
                self.size(out, items.len() as u64);
                for item in items {
                    self.encode_scalar(out, item);
                }
            }
        }
    }

    /// Encodes one key/value entry.
    pub fn encode_entry(&self, key: &str, value: &MetadataValue) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_string(&mut out, key);
        out.extend_from_slice(&value.value_type().code().to_le_bytes());
        self.encode_scalar(&mut out, value);
        out
    }

    /// Length of magic, version and both counts.
    pub fn preamble_len(&self) -> usize {
        if self.version == 1 {
            16
        } else {
            24
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = b"GGUF".to_vec();
        out.extend_from_slice(&self.version.to_le_bytes());
        self.size(&mut out, self.tensor_count);
        self.size(&mut out, (self.entries.len() + self.raw.len()) as u64);
        for (key, value) in &self.entries {
            out.extend(self.encode_entry(key, value));
        }
        for raw in &self.raw {
            out.extend_from_slice(raw);
        }
        out
    }
}

pub fn array(element_type: ValueType, items: Vec<MetadataValue>) -> MetadataValue {
    MetadataValue::Array {
        element_type,
        items,
    }
}

/// A complete, valid LLaMA header.
pub fn llama(version: u32) -> GgufBuilder {
    GgufBuilder::new(version)
        .tensor_count(291)
        .string("general.architecture", "llama")
        .string("general.name", "tiny-llama")
        .u32("general.file_type", 15)
        .u32("general.quantization_version", 2)
        .u32("llama.context_length", 4096)
        .u32("llama.embedding_length", 4096)
        .u32("llama.feed_forward_length", 11008)
        .u32("llama.block_count", 32)
        .u32("llama.layer_count", 32)
        .u32("llama.attention.head_count", 32)
        .u32("llama.attention.head_count_kv", 8)
        .f32("llama.attention.layer_norm_rms_epsilon", 1e-5)
        .u32("llama.rope.dimension_count", 128)
        .f32("llama.rope.freq_base", 10000.0)
        .kv(
            "tokenizer.ggml.tokens",
            array(
                ValueType::String,
                vec![
                    MetadataValue::String("<s>".into()),
                    MetadataValue::String("</s>".into()),
                ],
            ),
        )
}

/// Minimal valid headers for every architecture, keyed by identifier.
pub fn minimal(arch: &str) -> GgufBuilder {
    let b = GgufBuilder::new(3)
        .string("general.architecture", arch)
        .u32("general.quantization_version", 2);
    let p = |k: &str| format!("{arch}.{k}");
    match arch {
        "llama" => b
            .u32(&p("attention.head_count"), 32)
            .f32(&p("attention.layer_norm_rms_epsilon"), 1e-6)
            .u32(&p("context_length"), 2048)
            .u32(&p("embedding_length"), 4096)
            .u32(&p("feed_forward_length"), 11008)
            .u32(&p("rope.dimension_count"), 128),
        "mpt" => b
            .f32(&p("attention.alibi_bias_max"), 8.0)
            .f32(&p("attention.clip_kqv"), 0.0)
            .u32(&p("attention.head_count"), 32)
            .f32(&p("attention.layer_norm_epsilon"), 1e-5)
            .u32(&p("context_length"), 2048)
            .u32(&p("embedding_length"), 4096)
            .u32(&p("layer_count"), 32),
        "gptneox" => b
            .u32(&p("attention.head_count"), 32)
            .f32(&p("attention.layer_norm_epsilon"), 1e-5)
            .u32(&p("context_length"), 2048)
            .u32(&p("embedding_length"), 2560)
            .u32(&p("layer_count"), 32)
            .u32(&p("rope.dimension_count"), 20)
            .bool(&p("use_parallel_residual"), true),
        "gptj" => b
            .u32(&p("attention.head_count"), 16)
            .f32(&p("attention.layer_norm_epsilon"), 1e-5)
            .u32(&p("context_length"), 2048)
            .u32(&p("embedding_length"), 4096)
            .u32(&p("layer_count"), 28)
            .u32(&p("rope.dimension_count"), 64),
        "gpt2" => b
            .u32(&p("attention.head_count"), 12)
            .f32(&p("attention.layer_norm_epsilon"), 1e-5)
            .u32(&p("context_length"), 1024)
            .u32(&p("embedding_length"), 768)
            .u32(&p("layer_count"), 12),
        "bloom" => b
            .u32(&p("attention.head_count"), 16)
            .f32(&p("attention.layer_norm_epsilon"), 1e-5)
            .u32(&p("context_length"), 2048)
            .u32(&p("embedding_length"), 1024)
            .u32(&p("feed_forward_length"), 4096)
            .u32(&p("layer_count"), 24),
        "falcon" => b
            .u32(&p("attention.head_count"), 71)
            .u32(&p("attention.head_count_kv"), 1)
            .f32(&p("attention.layer_norm_epsilon"), 1e-5)
            .bool(&p("attention.use_norm"), true)
            .u32(&p("context_length"), 2048)
            .u32(&p("embedding_length"), 4544)
            .u32(&p("layer_count"), 32),
        "rwkv" => b
            .u32(&p("architecture_version"), 4)
            .u32(&p("context_length"), 1024)
            .u32(&p("embedding_length"), 768)
            .u32(&p("feed_forward_length"), 3072)
            .u32(&p("layer_count"), 12),
        "whisper" => b
            .u32(&p("decoder.attention.head_count"), 6)
            .u32(&p("decoder.context_length"), 448)
            .u32(&p("decoder.embedding_length"), 384)
            .u32(&p("decoder.layer_count"), 4)
            .u32(&p("encoder.attention.head_count"), 6)
            .u32(&p("encoder.context_length"), 1500)
            .u32(&p("encoder.embedding_length"), 384)
            .u32(&p("encoder.layer_count"), 4)
            .u32(&p("encoder.mels_count"), 80),
        other => panic!("no fixture for architecture '{other}'"),
    }
}
