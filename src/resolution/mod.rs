/// Annotation resolution module.
///
/// Finds the schema messages annotated for a target backend in the files
/// selected for generation and links each one to its source message through
/// the symbol index.
mod extract;
mod resolver;

pub use extract::extract_annotation;
pub use resolver::{resolve, Resolution, SchemaResolver};
