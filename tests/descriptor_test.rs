use dalgen::descriptor::*;
use dalgen::errors::DalgenError;
use tempfile::TempDir;

const LIBRARY_JSON: &str = r#"{
  "files": [
    {
      "name": "library/v1/book.proto",
      "package": "library.v1",
      "messages": [
        {
          "name": "Book",
          "fields": [
            {"name": "id", "number": 1},
            {"name": "author", "number": 2, "type_name": ".library.v1.Author"},
            {"name": "tags", "number": 3, "label": "repeated"}
          ]
        },
        {"name": "Author"}
      ]
    },
    {
      "name": "library/v1/dal/book_postgres.proto",
      "package": "library.v1.dal",
      "generate": true,
      "dependencies": ["library/v1/book.proto"],
      "messages": [
        {
          "name": "BookPostgres",
          "options": {
            "postgres": {"source": "library.v1.Book", "table": "books", "schema": "library"}
          },
          "nested": [{"name": "Row"}]
        }
      ]
    }
  ]
}"#;

#[test]
fn test_from_json_reads_files_and_defaults() {
    let set = DescriptorSet::from_json(LIBRARY_JSON).unwrap();
    assert_eq!(set.files.len(), 2);

    let book_file = &set.files[0];
    assert!(!book_file.generate);
    assert!(book_file.dependencies.is_empty());

    let book = &book_file.messages[0];
    assert!(book.options.is_empty());
    assert_eq!(book.fields[0].label, FieldLabel::Optional);
    assert_eq!(book.fields[1].type_name.as_deref(), Some(".library.v1.Author"));
    assert_eq!(book.fields[2].label, FieldLabel::Repeated);

    let generated: Vec<&str> = set.generated_files().map(|f| f.name.as_str()).collect();
    assert_eq!(generated, vec!["library/v1/dal/book_postgres.proto"]);
    assert!(set.files[1].messages[0].options.get("postgres").is_some());
}

#[test]
fn test_walk_messages_is_preorder() {
    let set = DescriptorSet::from_json(LIBRARY_JSON).unwrap();
    let names: Vec<String> = set.files[1]
        .walk_messages()
        .into_iter()
        .map(|m| m.full_name)
        .collect();
    assert_eq!(
        names,
        vec!["library.v1.dal.BookPostgres", "library.v1.dal.BookPostgres.Row"]
    );
}

#[test]
fn test_load_descriptor_set_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("set.json");
    std::fs::write(&path, LIBRARY_JSON).unwrap();
    let set = load_descriptor_set(&path).unwrap();
    assert_eq!(set, DescriptorSet::from_json(LIBRARY_JSON).unwrap());
}

#[test]
fn test_load_missing_descriptor_set_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    match load_descriptor_set(&path) {
        Err(DalgenError::Descriptor { path: p, .. }) => assert!(p.ends_with("absent.json")),
        other => panic!("expected descriptor error, got {:?}", other),
    }
}

#[test]
fn test_invalid_json_is_descriptor_error() {
    assert!(matches!(
        DescriptorSet::from_json("{\"files\": 3}"),
        Err(DalgenError::Descriptor { .. })
    ));
}
