//! Catalog sources against real files and a mock HTTP endpoint

use std::io::Write;
use std::time::Duration;

use d3e_dismantle::{
    catalog::{
        load_or_empty, source_from_config, CatalogError, CatalogSource, FileCatalogSource,
        HttpCatalogSource,
    },
    config::CatalogConfig,
};

const BUNDLED_CATALOG: &str = include_str!("../data/dismantling_catalog.json");

const SMALL_CATALOG: &str = r#"[
    {
        "label": "Mobilier",
        "subCategories": [
            {
                "label": "Mobilier de bureau",
                "dismantlingConfig": {
                    "subassemblies": ["plateau", "piètement"],
                    "valuableMaterials": ["acier"],
                    "hazardousMaterials": []
                }
            },
            { "label": "Luminaires" }
        ]
    }
]"#;

#[tokio::test]
async fn test_bundled_catalog_parses() {
    let source = FileCatalogSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/dismantling_catalog.json"));
    let catalog = source.load().await.unwrap();

    assert!(!catalog.is_empty());
    assert_eq!(catalog, d3e_dismantle::catalog::DismantlingCatalog::from_json(BUNDLED_CATALOG).unwrap());
    assert!(catalog
        .configured_subcategories()
        .any(|(_, sub, _)| sub.label == "Ordinateurs Portables"));
}

#[tokio::test]
async fn test_file_source_reads_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SMALL_CATALOG.as_bytes()).unwrap();

    let catalog = FileCatalogSource::new(file.path()).load().await.unwrap();
    assert_eq!(catalog.category_count(), 1);
    assert_eq!(catalog.configured_count(), 1);
}

#[tokio::test]
async fn test_missing_file_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileCatalogSource::new(dir.path().join("absent.json"));

    assert!(matches!(source.load().await, Err(CatalogError::Io { .. })));
    assert!(load_or_empty(&source).await.is_empty());
}

#[tokio::test]
async fn test_malformed_file_fails_closed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not a catalog").unwrap();

    let source = FileCatalogSource::new(file.path());
    assert!(matches!(source.load().await, Err(CatalogError::Parse(_))));
    assert!(load_or_empty(&source).await.is_empty());
}

#[tokio::test]
async fn test_http_source_fetches_catalog() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/catalog.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SMALL_CATALOG)
        .create_async()
        .await;

    let source =
        HttpCatalogSource::new(format!("{}/catalog.json", server.url()), Duration::from_secs(5)).unwrap();
    let catalog = load_or_empty(&source).await;

    mock.assert_async().await;
    assert_eq!(catalog.configured_count(), 1);
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/catalog.json")
        .with_status(503)
        .create_async()
        .await;

    let source =
        HttpCatalogSource::new(format!("{}/catalog.json", server.url()), Duration::from_secs(5)).unwrap();

    assert!(matches!(source.load().await, Err(CatalogError::Status(503))));
    assert!(load_or_empty(&source).await.is_empty());
}

#[tokio::test]
async fn test_source_from_config_uses_url() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/d3e.json")
        .with_status(200)
        .with_body(SMALL_CATALOG)
        .create_async()
        .await;

    let config = CatalogConfig {
        source: format!("{}/d3e.json", server.url()),
        timeout_ms: 2000,
    };
    let source = source_from_config(&config).unwrap();
    assert!(source.describe().starts_with("http://"));
    assert_eq!(source.load().await.unwrap().category_count(), 1);
}
