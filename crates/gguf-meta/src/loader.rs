// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Public entry points: open a file, decode its header, validate it.
//!
//! Only the header and key/value section are read. Tensor descriptors and
//! tensor data are never touched, so parsing a multi-gigabyte model costs a
//! few kilobytes of I/O.

use crate::{decode_document, validate, ContainerHeader, DecodedHeader, ModelMetadata};
use crate::{MetadataError, ParserConfig};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// A validated model together with its container header.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ParsedModel {
    pub header: ContainerHeader,
    pub metadata: ModelMetadata,
}

/// Loads GGUF metadata with a fixed configuration.
///
/// # Example
/// ```no_run
/// use gguf_meta::{GgufLoader, ParserConfig};
/// use std::path::Path;
///
/// let loader = GgufLoader::new(ParserConfig::default());
/// let model = loader.load(Path::new("./models/tiny-llama.gguf")).unwrap();
/// println!("{} ({} tensors)", model.metadata.architecture(), model.header.tensor_count);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GgufLoader {
    config: ParserConfig,
}

impl GgufLoader {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Opens, decodes and validates the file at `path`.
    ///
    /// The file handle is closed before this returns, on success or error.
    pub fn load(&self, path: &Path) -> Result<ParsedModel, MetadataError> {
        let decoded = self.load_document(path)?;
        let metadata = validate(&decoded.document)?;
        info!(
            path = %path.display(),
            architecture = %metadata.architecture(),
            version = %decoded.header.version,
            "loaded model metadata"
        );
        Ok(ParsedModel {
            header: decoded.header,
            metadata,
        })
    }

    /// Opens and decodes the file at `path` without schema validation.
    pub fn load_document(&self, path: &Path) -> Result<DecodedHeader, MetadataError> {
        let file = File::open(path).map_err(|source| MetadataError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        decode_document(BufReader::new(file), &self.config)
    }

    /// Decodes and validates from any byte source.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<ParsedModel, MetadataError> {
        let decoded = decode_document(reader, &self.config)?;
        let metadata = validate(&decoded.document)?;
        Ok(ParsedModel {
            header: decoded.header,
            metadata,
        })
    }
}

/// Parses the metadata of the file at `path` with default limits.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ModelMetadata, MetadataError> {
    Ok(GgufLoader::default().load(path.as_ref())?.metadata)
}

/// Parses the file at `path` with an explicit configuration.
pub fn parse_file_with(
    path: impl AsRef<Path>,
    config: &ParserConfig,
) -> Result<ParsedModel, MetadataError> {
    GgufLoader::new(config.clone()).load(path.as_ref())
}

/// Parses from an arbitrary reader positioned at the start of the container.
pub fn parse_reader<R: Read>(reader: R, config: &ParserConfig) -> Result<ParsedModel, MetadataError> {
    GgufLoader::new(config.clone()).read_from(reader)
}
