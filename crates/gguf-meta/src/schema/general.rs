// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The `general.*` base record shared by every architecture.

use super::fields::Fields;
use super::FromFields;
use crate::{Architecture, FileType, MetadataError};
use tracing::warn;

/// Tensor data alignment assumed when `general.alignment` is absent.
pub const DEFAULT_ALIGNMENT: u64 = 32;

/// Fields every model carries regardless of architecture.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GeneralMetadata {
    pub architecture: Architecture,
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub url: Option<String>,
    /// `None` when absent, not an integer, or outside the known codes.
    pub file_type: Option<FileType>,
    pub alignment: Option<u64>,
    pub quantization_version: u64,
    pub source: Option<SourceMetadata>,
}

impl GeneralMetadata {
    /// Declared alignment, or [`DEFAULT_ALIGNMENT`].
    pub fn alignment_or_default(&self) -> u64 {
        self.alignment.unwrap_or(DEFAULT_ALIGNMENT)
    }
}

/// Provenance under `general.source`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SourceMetadata {
    pub url: Option<String>,
    pub huggingface: Option<HuggingFaceSource>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HuggingFaceSource {
    pub repository: Option<String>,
}

fn file_type(fields: &Fields<'_>) -> Result<Option<FileType>, MetadataError> {
    let Some(value) = fields.value("file_type")? else {
        return Ok(None);
    };
    let mapped = value.as_u64().and_then(FileType::from_code);
    if mapped.is_none() {
        warn!(value = %value, "unrecognised general.file_type, ignoring");
    }
    Ok(mapped)
}

impl FromFields for GeneralMetadata {
    fn from_fields(f: &Fields<'_>) -> Result<Self, MetadataError> {
        let source = f.scoped("source");
        let huggingface = source.scoped("huggingface");

        let huggingface = huggingface
            .optional_string("repository")?
            .map(|repository| HuggingFaceSource {
                repository: Some(repository),
            });
        let source_url = source.optional_string("url")?;
        let source = if source_url.is_some() || huggingface.is_some() {
            Some(SourceMetadata {
                url: source_url,
                huggingface,
            })
        } else {
            None
        };

        Ok(Self {
            architecture: f.architecture(),
            name: f.optional_string("name")?,
            author: f.optional_string("author")?,
            description: f.optional_string("description")?,
            license: f.optional_string("license")?,
            url: f.optional_string("url")?,
            file_type: file_type(f)?,
            alignment: f.optional_u64("alignment")?,
            quantization_version: f.required_u64("quantization_version")?,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataDocument;
    use gguf_wire::MetadataValue;

    fn extract(doc: &MetadataDocument) -> Result<GeneralMetadata, MetadataError> {
        GeneralMetadata::from_fields(&Fields::new(doc, Architecture::Gpt2, "general"))
    }

    fn base() -> MetadataDocument {
        let mut doc = MetadataDocument::new();
        doc.set("general.quantization_version", MetadataValue::U32(2));
        doc
    }

    #[test]
    fn test_minimal_record() {
        let doc = base();
        let g = extract(&doc).unwrap();
        assert_eq!(g.quantization_version, 2);
        assert_eq!(g.architecture, Architecture::Gpt2);
        assert_eq!(g.name, None);
        assert_eq!(g.source, None);
        assert_eq!(g.alignment_or_default(), 32);
    }

    #[test]
    fn test_quantization_version_required() {
        let err = extract(&MetadataDocument::new()).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::SchemaValidationFailed { ref path, ref reason, .. }
                if path == "general.quantization_version" && reason == "missing required field"
        ));
    }

    #[test]
    fn test_full_record() {
        let mut doc = MetadataDocument::new();
        doc.set("general.name", MetadataValue::String("tiny".into()));
        doc.set("general.license", MetadataValue::String("mit".into()));
        doc.set("general.file_type", MetadataValue::U32(7));
        doc.set("general.alignment", MetadataValue::U32(64));
        doc.set("general.quantization_version", MetadataValue::U32(2));
        doc.set(
            "general.source.huggingface.repository",
            MetadataValue::String("org/tiny".into()),
        );

        let g = extract(&doc).unwrap();
        assert_eq!(g.name.as_deref(), Some("tiny"));
        assert_eq!(g.file_type, Some(FileType::MostlyQ8_0));
        assert_eq!(g.alignment_or_default(), 64);
        assert_eq!(g.quantization_version, 2);
        let source = g.source.unwrap();
        assert_eq!(source.url, None);
        assert_eq!(
            source.huggingface.unwrap().repository.as_deref(),
            Some("org/tiny")
        );
    }

    #[test]
    fn test_unmapped_file_type_is_absent() {
        let mut doc = base();
        doc.set("general.file_type", MetadataValue::U32(99));
        assert_eq!(extract(&doc).unwrap().file_type, None);

        doc.set("general.file_type", MetadataValue::String("q4".into()));
        assert_eq!(extract(&doc).unwrap().file_type, None);
    }

    #[test]
    fn test_wrong_type_for_name() {
        let mut doc = base();
        doc.set("general.name", MetadataValue::U8(1));
        let err = extract(&doc).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::SchemaValidationFailed { ref path, .. } if path == "general.name"
        ));
    }
}
