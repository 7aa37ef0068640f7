use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::descriptor::MessageDescriptor;
use crate::errors::DalgenError;

/// Storage backends the generator can emit a data access layer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Postgres,
    Gorm,
    Firestore,
    #[serde(rename = "mongodb")]
    MongoDb,
    Datastore,
}

#[allow(clippy::should_implement_trait)]
impl Target {
    pub const ALL: [Target; 5] = [
        Target::Postgres,
        Target::Gorm,
        Target::Firestore,
        Target::MongoDb,
        Target::Datastore,
    ];

    /// Returns the string representation of this target.
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Postgres => "postgres",
            Target::Gorm => "gorm",
            Target::Firestore => "firestore",
            Target::MongoDb => "mongodb",
            Target::Datastore => "datastore",
        }
    }

    /// Parses a string into a `Target`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<Target> {
        match s {
            "postgres" => Some(Target::Postgres),
            "gorm" => Some(Target::Gorm),
            "firestore" => Some(Target::Firestore),
            "mongodb" => Some(Target::MongoDb),
            "datastore" => Some(Target::Datastore),
            _ => None,
        }
    }

    /// Message option key that marks a schema message for this target.
    pub fn annotation_name(&self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for Target {
    type Err = DalgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::from_str(s).ok_or_else(|| DalgenError::Config {
            message: format!(
                "unknown target '{}'; expected one of: {}",
                s,
                Target::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Annotation shapes
//
// Every field is optional and unknown fields are ignored, matching how the
// option messages decode on the wire. Only a payload of the wrong type fails.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresAnnotation {
    pub source: String,
    pub table: String,
    pub schema: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GormAnnotation {
    pub source: String,
    pub table: String,
    /// Emit `Scan`/`Value` adapter methods on the generated model.
    #[serde(alias = "implementScanner")]
    pub implement_scanner: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirestoreAnnotation {
    pub source: String,
    pub collection: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoDbAnnotation {
    pub source: String,
    pub collection: String,
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatastoreAnnotation {
    pub source: String,
    pub kind: String,
    pub namespace: Option<String>,
}

/// A decoded persistence annotation, one variant per target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Postgres(PostgresAnnotation),
    Gorm(GormAnnotation),
    Firestore(FirestoreAnnotation),
    MongoDb(MongoDbAnnotation),
    Datastore(DatastoreAnnotation),
}

impl Annotation {
    pub fn target(&self) -> Target {
        match self {
            Annotation::Postgres(_) => Target::Postgres,
            Annotation::Gorm(_) => Target::Gorm,
            Annotation::Firestore(_) => Target::Firestore,
            Annotation::MongoDb(_) => Target::MongoDb,
            Annotation::Datastore(_) => Target::Datastore,
        }
    }

    /// Fully-qualified name of the domain message, as written.
    pub fn source(&self) -> &str {
        match self {
            Annotation::Postgres(a) => &a.source,
            Annotation::Gorm(a) => &a.source,
            Annotation::Firestore(a) => &a.source,
            Annotation::MongoDb(a) => &a.source,
            Annotation::Datastore(a) => &a.source,
        }
    }

    /// Primary storage identifier: table, collection or kind.
    pub fn table_name(&self) -> &str {
        match self {
            Annotation::Postgres(a) => &a.table,
            Annotation::Gorm(a) => &a.table,
            Annotation::Firestore(a) => &a.collection,
            Annotation::MongoDb(a) => &a.collection,
            Annotation::Datastore(a) => &a.kind,
        }
    }

    /// Secondary namespace: schema, database or namespace.
    pub fn schema_name(&self) -> Option<&str> {
        match self {
            Annotation::Postgres(a) => a.schema.as_deref(),
            Annotation::Gorm(_) | Annotation::Firestore(_) => None,
            Annotation::MongoDb(a) => a.database.as_deref(),
            Annotation::Datastore(a) => a.namespace.as_deref(),
        }
    }

    pub fn extras(&self) -> LinkExtras {
        match self {
            Annotation::Gorm(a) => LinkExtras::Gorm {
                implement_scanner: a.implement_scanner,
            },
            _ => LinkExtras::None,
        }
    }
}

/// Backend-specific flags carried on a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum LinkExtras {
    #[default]
    None,
    Gorm { implement_scanner: bool },
}

// ---------------------------------------------------------------------------
// Resolved output
// ---------------------------------------------------------------------------

/// A schema message linked to the domain message it was derived from.
///
/// Messages are borrowed from the descriptor set the index was built over.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaLink<'a> {
    pub target: Target,
    pub source_message: &'a MessageDescriptor,
    pub target_message: &'a MessageDescriptor,
    /// Fully-qualified name of `target_message`.
    pub target_name: String,
    /// Source name as declared in the annotation.
    pub source_name: String,
    /// File that declares `target_message`.
    pub file: String,
    pub table_name: String,
    pub schema_name: Option<String>,
    pub extras: LinkExtras,
}

impl SchemaLink<'_> {
    /// Whether GORM scanner adapters should be emitted for this link.
    pub fn implements_scanner(&self) -> bool {
        matches!(
            self.extras,
            LinkExtras::Gorm {
                implement_scanner: true
            }
        )
    }
}
