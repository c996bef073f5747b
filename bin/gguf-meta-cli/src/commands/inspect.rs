// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `gguf-meta inspect` command: human-readable summary of one model file.

use anyhow::Context;
use gguf_meta::{GgufLoader, ParserConfig};
use serde_json::Value;
use std::path::PathBuf;

pub async fn execute(file: PathBuf, config: ParserConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             gguf-meta · Model Inspector             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let parsed = GgufLoader::new(config)
        .load(&file)
        .with_context(|| format!("failed to parse '{}'", file.display()))?;
    let header = &parsed.header;
    let meta = &parsed.metadata;
    let general = &meta.general;

    // ── Container ──────────────────────────────────────────────
    println!("  File:          {}", file.display());
    println!("  Version:       {}", header.version);
    println!("  Tensors:       {}", header.tensor_count);
    println!("  Entries:       {}", header.kv_count);
    println!();

    // ── General ────────────────────────────────────────────────
    println!("  Architecture:  {}", meta.architecture());
    println!("  Name:          {}", general.name.as_deref().unwrap_or("-"));
    if let Some(author) = &general.author {
        println!("  Author:        {author}");
    }
    if let Some(license) = &general.license {
        println!("  License:       {license}");
    }
    match general.file_type {
        Some(ft) => println!("  File type:     {ft}"),
        None => println!("  File type:     -"),
    }
    println!("  Quantization:  v{}", general.quantization_version);
    println!("  Alignment:     {}", general.alignment_or_default());
    if let Some(repo) = general
        .source
        .as_ref()
        .and_then(|s| s.huggingface.as_ref())
        .and_then(|hf| hf.repository.as_deref())
    {
        println!("  Source:        {repo}");
    }
    println!();

    // ── Shape ──────────────────────────────────────────────────
    println!("  Context:       {}", meta.context_length());
    println!("  Embedding:     {}", meta.embedding_length());
    println!("  Layers:        {}", opt(meta.layer_count()));
    println!("  Heads:         {}", opt(meta.head_count()));
    println!();

    // ── Parameters ─────────────────────────────────────────────
    println!("  {} parameters:", meta.architecture());
    println!("  {}", "-".repeat(52));
    let params = serde_json::to_value(&meta.params)?;
    let mut rows = Vec::new();
    flatten("", &params, &mut rows);
    for (key, value) in rows {
        // Drop the leading "<arch>." added by the enum tag.
        let key = key.split_once('.').map_or(key.as_str(), |(_, rest)| rest);
        println!("   {key:<36} {value}");
    }
    println!();
    Ok(())
}

fn opt(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Flattens nested JSON objects into dotted `(path, value)` rows.
fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::Null => out.push((prefix.to_string(), "-".to_string())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}
