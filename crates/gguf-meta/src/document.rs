// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The schema-less staging document.
//!
//! Header entries arrive as flat `(dotted.key, value)` pairs. The document
//! folds them into a tree of maps so that `llama.attention.head_count` ends
//! up under `llama` → `attention` → `head_count`. Nothing here knows about
//! architectures; shape checking happens later in [`crate::validate`].

use gguf_wire::MetadataValue;
use std::collections::BTreeMap;

/// Maximum number of path segments. Deeper keys keep the remainder,
/// dots included, in the last segment.
pub const MAX_DEPTH: usize = 5;

/// A node of the staging tree.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(MetadataValue),
    Branch(BTreeMap<String, Node>),
}

impl Node {
    fn branch() -> Self {
        Node::Branch(BTreeMap::new())
    }

    pub fn as_value(&self) -> Option<&MetadataValue> {
        match self {
            Node::Leaf(v) => Some(v),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Branch(children) => Some(children),
            Node::Leaf(_) => None,
        }
    }
}

/// Nested mapping built from dotted header keys.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct MetadataDocument {
    root: BTreeMap<String, Node>,
}

fn segments(path: &str) -> Vec<&str> {
    path.splitn(MAX_DEPTH, '.').collect()
}

fn insert(map: &mut BTreeMap<String, Node>, path: &[&str], value: MetadataValue) {
    match path {
        [] => {}
        [leaf] => {
            map.insert((*leaf).to_owned(), Node::Leaf(value));
        }
        [head, rest @ ..] => {
            let node = map.entry((*head).to_owned()).or_insert_with(Node::branch);
            match node {
                Node::Branch(children) => insert(children, rest, value),
                // A later key walks through an earlier leaf: the group wins.
                Node::Leaf(_) => {
                    let mut children = BTreeMap::new();
                    insert(&mut children, rest, value);
                    *node = Node::Branch(children);
                }
            }
        }
    }
}

fn collect_leaves<'a>(
    map: &'a BTreeMap<String, Node>,
    prefix: &str,
    out: &mut Vec<(String, &'a MetadataValue)>,
) {
    for (key, node) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            Node::Leaf(v) => out.push((path, v)),
            Node::Branch(children) => collect_leaves(children, &path, out),
        }
    }
}

impl MetadataDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at the dotted `path`, creating groups on demand.
    ///
    /// Never fails: an odd key simply produces an odd tree, which the
    /// validator rejects if it matters. The last write to a position wins.
    pub fn set(&mut self, path: &str, value: MetadataValue) {
        insert(&mut self.root, &segments(path), value);
    }

    /// Looks up the node at a dotted path.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut parts = segments(path).into_iter();
        let mut node = self.root.get(parts.next()?)?;
        for part in parts {
            node = node.as_branch()?.get(part)?;
        }
        Some(node)
    }

    /// Looks up a leaf value at a dotted path.
    pub fn get_value(&self, path: &str) -> Option<&MetadataValue> {
        self.get(path)?.as_value()
    }

    /// Top-level groups and values.
    pub fn root(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Every leaf with its dotted path, in key order.
    pub fn leaves(&self) -> Vec<(String, &MetadataValue)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, "", &mut out);
        out
    }

    /// Number of leaf values.
    pub fn len(&self) -> usize {
        self.leaves().len()
    }
}
