// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `gguf-meta dump` command: print metadata as pretty JSON on stdout.
//!
//! With `--raw` the schema-less key tree is printed, which also works for
//! architectures without a known schema.

use anyhow::Context;
use gguf_meta::{GgufLoader, ParserConfig};
use std::path::PathBuf;

pub async fn execute(file: PathBuf, raw: bool, config: ParserConfig) -> anyhow::Result<()> {
    let loader = GgufLoader::new(config);
    let json = if raw {
        let decoded = loader
            .load_document(&file)
            .with_context(|| format!("failed to decode '{}'", file.display()))?;
        serde_json::to_string_pretty(&decoded.document)?
    } else {
        let parsed = loader
            .load(&file)
            .with_context(|| format!("failed to parse '{}'", file.display()))?;
        serde_json::to_string_pretty(&parsed)?
    };
    println!("{json}");
    Ok(())
}
