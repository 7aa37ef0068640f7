use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{LinkExtras, SchemaLink, Target};

/// Owned, serializable view of a resolved link, handed to the emission stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub target: Target,
    pub file: String,
    /// Fully-qualified name of the schema message.
    pub message: String,
    pub source: String,
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub extras: LinkExtras,
}

impl From<&SchemaLink<'_>> for LinkRecord {
    fn from(link: &SchemaLink<'_>) -> Self {
        Self {
            target: link.target,
            file: link.file.clone(),
            message: link.target_name.clone(),
            source: link.source_name.clone(),
            table_name: link.table_name.clone(),
            schema_name: link.schema_name.clone(),
            extras: link.extras,
        }
    }
}

pub fn to_records(links: &[SchemaLink<'_>]) -> Vec<LinkRecord> {
    links.iter().map(LinkRecord::from).collect()
}

/// SHA-256 hex digest of the records in output order.
///
/// Identical link lists, order included, always produce the same digest.
pub fn links_digest(links: &[SchemaLink<'_>]) -> String {
    let mut hasher = Sha256::new();
    for record in to_records(links) {
        // Serializing a plain struct of strings cannot fail.
        let line = serde_json::to_string(&record).unwrap_or_default();
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
