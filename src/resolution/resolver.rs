use glob::Pattern;
use tracing::{debug, info, warn};

use crate::descriptor::{FileDescriptor, QualifiedMessage};
use crate::errors::{DalgenError, ResolutionError, Result};
use crate::index::{build_index, SymbolIndex};
use crate::resolution::extract_annotation;
use crate::types::{SchemaLink, Target};

/// Outcome of one resolver pass.
///
/// Errors are accumulated rather than returned on first failure, so a single
/// run reports every broken reference.
#[derive(Debug, Default)]
pub struct Resolution<'a> {
    pub links: Vec<SchemaLink<'a>>,
    pub errors: Vec<ResolutionError>,
}

impl<'a> Resolution<'a> {
    /// Returns the links only when every annotation resolved.
    ///
    /// Any error fails the whole batch; no partial link list is returned.
    pub fn into_result(self) -> Result<Vec<SchemaLink<'a>>> {
        if self.errors.is_empty() {
            Ok(self.links)
        } else {
            Err(DalgenError::Resolution(self.errors))
        }
    }
}

/// Links annotated schema messages to their source messages for one target.
pub struct SchemaResolver<'i, 'a> {
    index: &'i SymbolIndex<'a>,
    target: Target,
    /// Optional glob filter over generated file names.
    generate_only: Vec<Pattern>,
}

impl<'i, 'a> SchemaResolver<'i, 'a> {
    pub fn new(index: &'i SymbolIndex<'a>, target: Target) -> Self {
        Self {
            index,
            target,
            generate_only: Vec::new(),
        }
    }

    /// Restricts resolution to generated files whose name matches one of
    /// `patterns`. An empty list keeps every generated file.
    pub fn with_generate_only(mut self, patterns: &[String]) -> Result<Self> {
        self.generate_only = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| DalgenError::Config {
                    message: format!("invalid generate_only pattern '{}': {}", p, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// Resolves every eligible file, in input order.
    ///
    /// Links come out in file order, then in message declaration order
    /// (nested messages directly after their parent).
    pub fn collect(&self, files: &'a [FileDescriptor]) -> Resolution<'a> {
        let mut resolution = Resolution::default();

        for file in files {
            if !self.is_eligible(file) {
                continue;
            }

            for entry in file.walk_messages() {
                match self.resolve_message(file, &entry) {
                    Some(Ok(link)) => resolution.links.push(link),
                    Some(Err(err)) => resolution.errors.push(err),
                    None => {}
                }
            }
        }

        info!(
            target_backend = %self.target,
            links = resolution.links.len(),
            errors = resolution.errors.len(),
            "resolved schema messages"
        );
        resolution
    }

    /// Resolves a single message.
    ///
    /// Returns `None` when the message is not a schema message for this
    /// target, or when its annotation payload has the wrong type. Missing or
    /// unknown annotation fields are not decode failures.
    pub fn resolve_message(
        &self,
        file: &FileDescriptor,
        entry: &QualifiedMessage<'a>,
    ) -> Option<std::result::Result<SchemaLink<'a>, ResolutionError>> {
        if entry.message.options.is_empty() {
            return None;
        }

        let annotation = match extract_annotation(entry.message, self.target) {
            Ok(Some(annotation)) => annotation,
            Ok(None) => return None,
            Err(err) => {
                warn!(
                    schema = %entry.full_name,
                    file = %file.name,
                    error = %err,
                    "ignoring annotation"
                );
                return None;
            }
        };

        let Some(source_message) = self.index.get(annotation.source()) else {
            return Some(Err(ResolutionError::BrokenSourceReference {
                message: entry.full_name.clone(),
                source_name: annotation.source().to_string(),
                file: file.name.clone(),
                target: self.target.annotation_name().to_string(),
            }));
        };

        debug!(
            schema = %entry.full_name,
            source = annotation.source(),
            table = annotation.table_name(),
            "linked schema message"
        );

        Some(Ok(SchemaLink {
            target: self.target,
            source_message,
            target_message: entry.message,
            target_name: entry.full_name.clone(),
            source_name: annotation.source().to_string(),
            file: file.name.clone(),
            table_name: annotation.table_name().to_string(),
            schema_name: annotation.schema_name().map(str::to_string),
            extras: annotation.extras(),
        }))
    }

    fn is_eligible(&self, file: &FileDescriptor) -> bool {
        if !file.generate {
            return false;
        }
        self.generate_only.is_empty() || self.generate_only.iter().any(|p| p.matches(&file.name))
    }
}

/// Builds the index over `files` and resolves them for `target`.
pub fn resolve(files: &[FileDescriptor], target: Target) -> Result<Vec<SchemaLink<'_>>> {
    let index = build_index(files);
    SchemaResolver::new(&index, target).collect(files).into_result()
}
