use std::path::PathBuf;

use apidex_core::{ApiCatalog, DocumentLoader, IndexBuilder, ServiceDescriptor};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn sample_descriptors() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor::from_file("Sample API", fixture_path("sample-api.yaml")),
        ServiceDescriptor::from_file("Missing API", fixture_path("does-not-exist.yaml")),
        ServiceDescriptor::from_file("Orders API", fixture_path("sample-api.json")),
    ]
}

#[tokio::test]
async fn builds_records_for_every_method_in_every_path() {
    let builder = IndexBuilder::new(DocumentLoader::default());
    let descriptors = vec![ServiceDescriptor::from_file(
        "Sample API",
        fixture_path("sample-api.yaml"),
    )];

    let index = builder.build(&descriptors).await;

    // 2 + 2 + 1 methods across the three fixture paths.
    assert_eq!(index.len(), 5);
    assert!(index.records().iter().all(|record| record.service == "Sample API"));
    assert!(
        index
            .records()
            .iter()
            .all(|record| record.method.chars().all(char::is_uppercase)),
        "methods should be upper-cased"
    );

    let first = &index.records()[0];
    assert_eq!(first.path, "/users");
    assert_eq!(first.method, "GET");
    assert_eq!(first.description, "Retrieve a list of users");

    // The POST /users fixture only carries a description.
    assert_eq!(index.records()[1].description, "Create a new user account");
}

#[tokio::test]
async fn failing_service_never_blocks_its_siblings() {
    let builder = IndexBuilder::new(DocumentLoader::default());
    let index = builder.build(&sample_descriptors()).await;

    assert!(!index.is_empty(), "two descriptors succeed, so records exist");
    assert!(
        index.records().iter().any(|record| record.service == "Sample API"),
        "yaml service should contribute"
    );
    assert!(
        index.records().iter().any(|record| record.service == "Orders API"),
        "json service should contribute"
    );
    assert!(
        !index.records().iter().any(|record| record.service == "Missing API"),
        "failed service should contribute zero records"
    );

    let schemas: Vec<&str> = index
        .schemas()
        .iter()
        .map(|schema| schema.service.as_str())
        .collect();
    assert_eq!(schemas, ["Sample API", "Orders API"]);
}

#[tokio::test]
async fn records_keep_descriptor_then_document_order() {
    let builder = IndexBuilder::new(DocumentLoader::default());
    let index = builder.build(&sample_descriptors()).await;

    let paths: Vec<&str> = index
        .records()
        .iter()
        .map(|record| record.path.as_str())
        .collect();
    assert_eq!(
        paths,
        [
            "/users",
            "/users",
            "/users/{userId}",
            "/users/{userId}",
            "/products",
            "/orders",
            "/orders",
            "/orders/{orderId}",
        ]
    );
}

#[tokio::test]
async fn unparseable_document_contributes_zero_records() {
    let builder = IndexBuilder::new(DocumentLoader::default());
    let descriptors = vec![
        ServiceDescriptor::from_file("Broken API", fixture_path("malformed.txt")),
        ServiceDescriptor::from_file("Orders API", fixture_path("sample-api.json")),
    ];

    let index = builder.build(&descriptors).await;

    assert_eq!(index.schemas().len(), 1);
    assert!(index.records().iter().all(|record| record.service == "Orders API"));
}

#[tokio::test]
async fn rebuild_is_idempotent_over_stable_sources() {
    let builder = IndexBuilder::new(DocumentLoader::default());
    let descriptors = sample_descriptors();

    let first = builder.build(&descriptors).await;
    let second = builder.build(&descriptors).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn catalog_publishes_rebuilt_index_atomically() {
    let catalog = ApiCatalog::new(sample_descriptors(), DocumentLoader::default());
    assert!(catalog.index().await.is_empty());

    let rebuilt = catalog.rebuild().await;
    assert!(!rebuilt.is_empty());

    let snapshot = catalog.index().await;
    assert_eq!(*snapshot, *rebuilt);

    let matches = snapshot
        .suggest("order")
        .expect("orders fixture mentions order");
    assert!(matches.iter().all(|record| record.service == "Orders API"));
}
