use std::collections::HashMap;

use tracing::debug;

use crate::descriptor::{normalize_type_name, FileDescriptor, MessageDescriptor};

/// Mapping from fully-qualified message name to its definition.
///
/// Read-only once built; messages are borrowed from the files it was built
/// over.
#[derive(Debug, Default)]
pub struct SymbolIndex<'a> {
    messages: HashMap<String, &'a MessageDescriptor>,
}

/// Indexes every message, nested ones included, of every file.
///
/// Generation eligibility is ignored. When two messages share a name the
/// later one wins.
pub fn build_index(files: &[FileDescriptor]) -> SymbolIndex<'_> {
    let mut messages: HashMap<String, &MessageDescriptor> = HashMap::new();

    for file in files {
        for entry in file.walk_messages() {
            if messages.insert(entry.full_name.clone(), entry.message).is_some() {
                debug!(
                    name = %entry.full_name,
                    file = %file.name,
                    "duplicate message name; keeping the later definition"
                );
            }
        }
    }

    debug!(symbols = messages.len(), files = files.len(), "built symbol index");
    SymbolIndex { messages }
}

impl<'a> SymbolIndex<'a> {
    /// Looks up a message by fully-qualified name. A leading `.` is ignored.
    pub fn get(&self, name: &str) -> Option<&'a MessageDescriptor> {
        self.messages.get(normalize_type_name(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.messages.contains_key(normalize_type_name(name))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All indexed names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.messages.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}
