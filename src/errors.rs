use thiserror::Error;

/// Errors that can occur while loading descriptors or resolving schemas.
#[derive(Error, Debug)]
pub enum DalgenError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("descriptor error: {message} (path: {path})")]
    Descriptor { message: String, path: String },

    #[error("{}", format_resolution_errors(.0))]
    Resolution(Vec<ResolutionError>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single schema message whose annotation could not be linked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(
        "broken source reference: message '{message}' (file: {file}) declares {target} source '{source_name}', which is not defined in any provided file"
    )]
    BrokenSourceReference {
        /// Fully-qualified name of the annotated schema message.
        message: String,
        /// The source name exactly as written in the annotation.
        source_name: String,
        /// File that declares the schema message.
        file: String,
        /// Annotation identifier of the backend being resolved.
        target: String,
    },
}

/// Failure to decode an annotation payload into its backend shape.
#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("malformed '{annotation}' annotation: {reason}")]
    Malformed { annotation: String, reason: String },
}

fn format_resolution_errors(errors: &[ResolutionError]) -> String {
    let mut out = format!("{} schema resolution error(s):", errors.len());
    for err in errors {
        out.push_str("\n  - ");
        out.push_str(&err.to_string());
    }
    out
}

/// Convenience alias for results using `DalgenError`.
pub type Result<T> = std::result::Result<T, DalgenError>;
