// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # gguf-meta
//!
//! Command-line inspector for GGUF model metadata.
//!
//! ## Usage
//! ```bash
//! # Summarise a model's header and hyper-parameters
//! gguf-meta inspect ./models/tiny-llama.gguf
//!
//! # Validated metadata as JSON, or the raw key tree with --raw
//! gguf-meta dump ./models/tiny-llama.gguf --raw
//!
//! # Validate many files at once (non-zero exit if any fail)
//! gguf-meta check ./models/*.gguf
//! ```

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gguf_meta::ParserConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gguf-meta",
    about = "Read and validate GGUF model metadata",
    version,
    author
)]
struct Cli {
    /// Path to a TOML file with decode limits.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the container header, base record and architecture parameters.
    Inspect {
        /// Path to the .gguf file.
        file: PathBuf,
    },

    /// Print metadata as JSON.
    Dump {
        /// Path to the .gguf file.
        file: PathBuf,

        /// Dump the schema-less key tree instead of validated metadata.
        #[arg(long)]
        raw: bool,
    },

    /// Validate one or more files concurrently.
    Check {
        /// Paths to .gguf files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ParserConfig::from_file(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => ParserConfig::default(),
    };

    match cli.command {
        Commands::Inspect { file } => commands::inspect::execute(file, config).await,
        Commands::Dump { file, raw } => commands::dump::execute(file, raw, config).await,
        Commands::Check { files } => commands::check::execute(files, config).await,
    }
}
