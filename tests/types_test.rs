use dalgen::errors::DalgenError;
use dalgen::types::*;

#[test]
fn target_as_str_roundtrip() {
    for target in Target::ALL {
        let s = target.as_str();
        let parsed = Target::from_str(s).unwrap_or_else(|| panic!("failed to parse Target from '{}'", s));
        assert_eq!(target, parsed, "roundtrip failed for Target::{}", s);
    }
}

#[test]
fn target_from_str_unknown_returns_none() {
    assert!(Target::from_str("postgresql").is_none());
    assert!(Target::from_str("").is_none());
}

#[test]
fn target_parse_unknown_is_config_error() {
    let err = "cassandra".parse::<Target>().unwrap_err();
    match err {
        DalgenError::Config { message } => {
            assert!(message.contains("cassandra"));
            assert!(message.contains("postgres, gorm, firestore, mongodb, datastore"));
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn target_serde_uses_annotation_names() {
    assert_eq!(serde_json::to_string(&Target::MongoDb).unwrap(), "\"mongodb\"");
    let parsed: Target = serde_json::from_str("\"datastore\"").unwrap();
    assert_eq!(parsed, Target::Datastore);
}

#[test]
fn annotation_canonical_fields() {
    let mongo = Annotation::MongoDb(MongoDbAnnotation {
        source: "shop.Item".to_string(),
        collection: "items".to_string(),
        database: Some("shop".to_string()),
    });
    assert_eq!(mongo.target(), Target::MongoDb);
    assert_eq!(mongo.source(), "shop.Item");
    assert_eq!(mongo.table_name(), "items");
    assert_eq!(mongo.schema_name(), Some("shop"));
    assert_eq!(mongo.extras(), LinkExtras::None);

    let gorm = Annotation::Gorm(GormAnnotation {
        source: "shop.Item".to_string(),
        table: "items".to_string(),
        implement_scanner: false,
    });
    assert_eq!(gorm.schema_name(), None);
    assert_eq!(
        gorm.extras(),
        LinkExtras::Gorm {
            implement_scanner: false
        }
    );
}

#[test]
fn annotation_ignores_unknown_fields() {
    let parsed: FirestoreAnnotation = serde_json::from_value(serde_json::json!({
        "source": "shop.Item",
        "collection": "items",
        "database": "shop"
    }))
    .unwrap();
    assert_eq!(parsed.source, "shop.Item");
    assert_eq!(parsed.collection, "items");
}

#[test]
fn annotation_missing_fields_decode_empty() {
    let parsed: DatastoreAnnotation =
        serde_json::from_value(serde_json::json!({"source": "shop.Item"})).unwrap();
    assert_eq!(parsed.kind, "");
    assert_eq!(parsed.namespace, None);

    let empty: PostgresAnnotation = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(empty, PostgresAnnotation::default());
}

#[test]
fn annotation_wrong_types_fail_to_decode() {
    let result: Result<PostgresAnnotation, _> =
        serde_json::from_value(serde_json::json!({"source": 7, "table": "books"}));
    assert!(result.is_err());

    let result: Result<GormAnnotation, _> = serde_json::from_value(serde_json::json!(["a.B"]));
    assert!(result.is_err());
}
