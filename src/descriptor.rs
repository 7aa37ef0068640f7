//! In-memory interface descriptions.
//!
//! The generator receives descriptor sets that have already been decoded by a
//! descriptor library and dumped as JSON. This module owns that shape and the
//! naming rules shared by the index builder and the resolver.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DalgenError, Result};

/// A complete set of files handed to one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorSet {
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
}

/// One interface-description file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path of the file as the compiler saw it, e.g. `library/v1/book.proto`.
    pub name: String,
    /// Dotted package, empty when the file declares none.
    #[serde(default)]
    pub package: String,
    /// `true` when the file was requested for generation, `false` when it is
    /// only present because another file imports it.
    #[serde(default)]
    pub generate: bool,
    /// Imported file names. Not consulted during resolution, which looks
    /// names up across the whole set; carried through for emission.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub messages: Vec<MessageDescriptor>,
}

/// A message definition with its fields, options and nested messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// Short name, without package or enclosing messages.
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub options: MessageOptions,
    #[serde(default)]
    pub nested: Vec<MessageDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub number: i32,
    /// Referenced message or enum for non-scalar fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub label: FieldLabel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLabel {
    #[default]
    Optional,
    Required,
    Repeated,
}

/// Declared message options, keyed by annotation identifier.
///
/// Payloads are kept undecoded; each backend decodes only its own key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageOptions(pub BTreeMap<String, serde_json::Value>);

impl MessageOptions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw payload declared under `annotation`, if any.
    pub fn get(&self, annotation: &str) -> Option<&serde_json::Value> {
        self.0.get(annotation)
    }

    pub fn insert(&mut self, annotation: impl Into<String>, payload: serde_json::Value) {
        self.0.insert(annotation.into(), payload);
    }
}

/// A message paired with its fully-qualified name.
#[derive(Debug, Clone)]
pub struct QualifiedMessage<'a> {
    pub full_name: String,
    pub message: &'a MessageDescriptor,
}

impl FileDescriptor {
    /// Walks every message in the file, nested ones included.
    ///
    /// Order is pre-order in declaration order: a message comes before its
    /// nested messages, which come before the next sibling.
    pub fn walk_messages(&self) -> Vec<QualifiedMessage<'_>> {
        let mut out = Vec::new();
        for message in &self.messages {
            walk(&self.package, message, &mut out);
        }
        out
    }
}

fn walk<'a>(scope: &str, message: &'a MessageDescriptor, out: &mut Vec<QualifiedMessage<'a>>) {
    let full_name = qualified_name(scope, &message.name);
    out.push(QualifiedMessage {
        full_name: full_name.clone(),
        message,
    });
    for nested in &message.nested {
        walk(&full_name, nested, out);
    }
}

/// Joins a dotted scope and a short name, skipping an empty scope.
pub fn qualified_name(scope: &str, name: &str) -> String {
    let scope = normalize_type_name(scope);
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", scope, name)
    }
}

/// Strips the leading `.` that marks an absolute protoc type reference.
pub fn normalize_type_name(name: &str) -> &str {
    name.strip_prefix('.').unwrap_or(name)
}

impl DescriptorSet {
    /// Parses a descriptor set from its JSON dump.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DalgenError::Descriptor {
            message: format!("failed to parse descriptor set: {}", e),
            path: "<inline>".to_string(),
        })
    }

    /// Files that were requested for generation.
    pub fn generated_files(&self) -> impl Iterator<Item = &FileDescriptor> {
        self.files.iter().filter(|f| f.generate)
    }
}

/// Loads a JSON descriptor set from disk.
pub fn load_descriptor_set(path: &Path) -> Result<DescriptorSet> {
    let contents = fs::read_to_string(path).map_err(|e| DalgenError::Descriptor {
        message: format!("failed to read descriptor set: {}", e),
        path: path.display().to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| DalgenError::Descriptor {
        message: format!("failed to parse descriptor set: {}", e),
        path: path.display().to_string(),
    })
}
