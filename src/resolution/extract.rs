use serde::de::DeserializeOwned;

use crate::descriptor::MessageDescriptor;
use crate::errors::AnnotationError;
use crate::types::{Annotation, Target};

/// Reads the annotation `target` defines from a message's options.
///
/// Returns `Ok(None)` when the message carries no annotation for this target,
/// including when it is annotated for a different one.
pub fn extract_annotation(
    message: &MessageDescriptor,
    target: Target,
) -> Result<Option<Annotation>, AnnotationError> {
    let annotation = match target {
        Target::Postgres => decode(message, target)?.map(Annotation::Postgres),
        Target::Gorm => decode(message, target)?.map(Annotation::Gorm),
        Target::Firestore => decode(message, target)?.map(Annotation::Firestore),
        Target::MongoDb => decode(message, target)?.map(Annotation::MongoDb),
        Target::Datastore => decode(message, target)?.map(Annotation::Datastore),
    };
    Ok(annotation)
}

fn decode<T: DeserializeOwned>(
    message: &MessageDescriptor,
    target: Target,
) -> Result<Option<T>, AnnotationError> {
    let name = target.annotation_name();
    let Some(payload) = message.options.get(name) else {
        return Ok(None);
    };

    serde_json::from_value(payload.clone())
        .map(Some)
        .map_err(|e| AnnotationError::Malformed {
            annotation: name.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn annotated(key: &str, payload: serde_json::Value) -> MessageDescriptor {
        let mut message = MessageDescriptor {
            name: "BookRow".to_string(),
            ..Default::default()
        };
        message.options.insert(key, payload);
        message
    }

    #[test]
    fn other_backend_yields_none() {
        let message = annotated(
            "firestore",
            json!({"source": "library.v1.Book", "collection": "books"}),
        );
        assert!(extract_annotation(&message, Target::Postgres)
            .unwrap()
            .is_none());
        assert!(extract_annotation(&message, Target::Firestore)
            .unwrap()
            .is_some());
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let message = annotated("postgres", json!({"source": 7}));
        let err = extract_annotation(&message, Target::Postgres).unwrap_err();
        assert!(err.to_string().contains("malformed 'postgres' annotation"));
    }

    #[test]
    fn gorm_accepts_camel_case_scanner_flag() {
        let message = annotated(
            "gorm",
            json!({"source": "a.B", "table": "bs", "implementScanner": true}),
        );
        let annotation = extract_annotation(&message, Target::Gorm).unwrap().unwrap();
        assert_eq!(
            annotation.extras(),
            crate::types::LinkExtras::Gorm {
                implement_scanner: true
            }
        );
    }
}
