// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # gguf-meta
//!
//! Reads the header of a GGUF model container and validates its metadata
//! against the schema of the declared architecture.
//!
//! Parsing happens in two stages:
//!
//! 1. [`decode_document`] walks the preamble and the key/value section and
//!    folds the dotted keys into a schema-less [`MetadataDocument`].
//! 2. [`validate`] reads `general.architecture` and checks the document
//!    against one of the known schemas, producing a typed [`ModelMetadata`].
//!
//! [`parse_file`] runs both stages on a path; [`GgufLoader`] does the same
//! with an explicit [`ParserConfig`].
//!
//! # Example
//! ```no_run
//! use gguf_meta::parse_file;
//!
//! let meta = parse_file("./models/tiny-llama.gguf").unwrap();
//! println!("{} with context {}", meta.architecture(), meta.context_length());
//! if let Some(llama) = meta.params.as_llama() {
//!     println!("rope dims: {}", llama.rope.dimension_count);
//! }
//! ```

mod config;
mod decoder;
pub mod document;
mod error;
mod file_type;
mod loader;
pub mod schema;

pub use config::ParserConfig;
pub use decoder::{decode_document, ContainerHeader, DecodedHeader, Decoder, GGUF_MAGIC};
pub use document::MetadataDocument;
pub use error::MetadataError;
pub use file_type::FileType;
pub use loader::{parse_file, parse_file_with, parse_reader, GgufLoader, ParsedModel};
pub use schema::{validate, Architecture, ArchitectureParams, GeneralMetadata, ModelMetadata};

pub use gguf_wire::{DecodeLimits, MetadataValue, ValueType, Version};
