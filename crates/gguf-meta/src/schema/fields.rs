// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Typed field access over a [`MetadataDocument`] subtree.

use crate::document::Node;
use crate::{Architecture, MetadataDocument, MetadataError};
use gguf_wire::MetadataValue;

/// A view of the document rooted at a dotted prefix, e.g. `llama.attention`.
///
/// Every failure is reported as [`MetadataError::SchemaValidationFailed`]
/// carrying the full dotted path of the offending field.
#[derive(Debug, Clone)]
pub(crate) struct Fields<'a> {
    doc: &'a MetadataDocument,
    architecture: Architecture,
    prefix: String,
}

impl<'a> Fields<'a> {
    pub fn new(doc: &'a MetadataDocument, architecture: Architecture, prefix: &str) -> Self {
        Self {
            doc,
            architecture,
            prefix: prefix.to_owned(),
        }
    }

    /// A view one group deeper.
    pub fn scoped(&self, group: &str) -> Fields<'a> {
        Fields {
            doc: self.doc,
            architecture: self.architecture,
            prefix: self.path(group),
        }
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{name}", self.prefix)
        }
    }

    fn fail(&self, name: &str, reason: impl Into<String>) -> MetadataError {
        MetadataError::SchemaValidationFailed {
            architecture: self.architecture,
            path: self.path(name),
            reason: reason.into(),
        }
    }

    /// The raw value at `name`, if any. A group where a value belongs is an error.
    pub fn value(&self, name: &str) -> Result<Option<&'a MetadataValue>, MetadataError> {
        match self.doc.get(&self.path(name)) {
            None => Ok(None),
            Some(Node::Leaf(v)) => Ok(Some(v)),
            Some(Node::Branch(_)) => Err(self.fail(name, "expected a value, found a group")),
        }
    }

    fn required<T>(
        &self,
        name: &str,
        convert: impl Fn(&Self, &str, &MetadataValue) -> Result<T, MetadataError>,
    ) -> Result<T, MetadataError> {
        match self.value(name)? {
            Some(v) => convert(self, name, v),
            None => Err(self.fail(name, "missing required field")),
        }
    }

    fn optional<T>(
        &self,
        name: &str,
        convert: impl Fn(&Self, &str, &MetadataValue) -> Result<T, MetadataError>,
    ) -> Result<Option<T>, MetadataError> {
        self.value(name)?
            .map(|v| convert(self, name, v))
            .transpose()
    }

    fn to_u64(&self, name: &str, v: &MetadataValue) -> Result<u64, MetadataError> {
        if let Some(n) = v.as_u64() {
            return Ok(n);
        }
        match v.as_i64() {
            Some(n) => Err(self.fail(name, format!("expected unsigned integer, found {n}"))),
            None => Err(self.fail(
                name,
                format!("expected unsigned integer, found {}", v.value_type()),
            )),
        }
    }

    fn to_f64(&self, name: &str, v: &MetadataValue) -> Result<f64, MetadataError> {
        v.as_f64()
            .ok_or_else(|| self.fail(name, format!("expected number, found {}", v.value_type())))
    }

    fn to_bool(&self, name: &str, v: &MetadataValue) -> Result<bool, MetadataError> {
        v.as_bool()
            .ok_or_else(|| self.fail(name, format!("expected bool, found {}", v.value_type())))
    }

    fn to_text(&self, name: &str, v: &MetadataValue) -> Result<String, MetadataError> {
        v.as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.fail(name, format!("expected string, found {}", v.value_type())))
    }

    pub fn required_u64(&self, name: &str) -> Result<u64, MetadataError> {
        self.required(name, Self::to_u64)
    }

    pub fn optional_u64(&self, name: &str) -> Result<Option<u64>, MetadataError> {
        self.optional(name, Self::to_u64)
    }

    pub fn required_f64(&self, name: &str) -> Result<f64, MetadataError> {
        self.required(name, Self::to_f64)
    }

    pub fn optional_f64(&self, name: &str) -> Result<Option<f64>, MetadataError> {
        self.optional(name, Self::to_f64)
    }

    pub fn required_bool(&self, name: &str) -> Result<bool, MetadataError> {
        self.required(name, Self::to_bool)
    }

    pub fn optional_string(&self, name: &str) -> Result<Option<String>, MetadataError> {
        self.optional(name, Self::to_text)
    }
}
