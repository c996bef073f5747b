// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `gguf-meta check` command: validate many files concurrently.
//!
//! Each file is parsed on tokio's blocking pool. Results are printed in
//! argument order, one line per file.

use gguf_meta::{GgufLoader, MetadataError, ParsedModel, ParserConfig};
use std::path::PathBuf;
use tokio::task::JoinSet;
use tracing::debug;

/// Outcome of checking one file.
struct Checked {
    index: usize,
    path: PathBuf,
    result: Result<ParsedModel, MetadataError>,
}

async fn check_all(files: Vec<PathBuf>, config: ParserConfig) -> anyhow::Result<Vec<Checked>> {
    let loader = GgufLoader::new(config);
    let mut set = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let loader = loader.clone();
        set.spawn_blocking(move || {
            let result = loader.load(&path);
            Checked {
                index,
                path,
                result,
            }
        });
    }

    let mut checked = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        checked.push(joined?);
    }
    checked.sort_by_key(|c| c.index);
    Ok(checked)
}

pub async fn execute(files: Vec<PathBuf>, config: ParserConfig) -> anyhow::Result<()> {
    let total = files.len();
    let checked = check_all(files, config).await?;

    let mut failed = 0usize;
    for c in &checked {
        match &c.result {
            Ok(parsed) => println!(
                "  ok    {}  ({}, {}, {} tensors)",
                c.path.display(),
                parsed.metadata.architecture(),
                parsed.header.version,
                parsed.header.tensor_count,
            ),
            Err(e) => {
                failed += 1;
                println!("  FAIL  {}  {e}", c.path.display());
            }
        }
    }
    debug!(total, failed, "check finished");

    if failed > 0 {
        anyhow::bail!("{failed} of {total} files failed validation");
    }
    Ok(())
}
