use std::time::Duration;

use httpmock::prelude::*;
use riverboard::{CatalogProvider, FileCatalogProvider, HttpCatalogProvider};

fn catalog_body() -> serde_json::Value {
    serde_json::json!({
        "products": [
            {
                "id": 1,
                "name": "River Haze",
                "price": 35.0,
                "category": "Flower",
                "unitWeight": 3.5,
                "image_url": "https://cdn.example.com/river-haze.png",
                "strainType": "Sativa",
                "vendor": "Lotus Farms"
            },
            {
                "id": 2,
                "name": "Lotus Kush",
                "price": 42.0,
                "discounted_price": 36.5,
                "category": "Flower",
                "unitWeight": 3.5,
                "image_url": "https://cdn.example.com/lotus-kush.png"
            }
        ]
    })
}

#[tokio::test]
async fn test_http_catalog_load_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/products.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(catalog_body());
    });

    let provider =
        HttpCatalogProvider::new(server.url("/products.json"), Duration::from_secs(5)).unwrap();
    let catalog = provider.load_catalog().await.unwrap();

    mock.assert();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].name, "River Haze");
    assert_eq!(catalog[0].strain_type.as_deref(), Some("Sativa"));
    assert_eq!(catalog[1].discounted_price, Some(36.5));
    // optional fields fall back to their defaults
    assert_eq!(catalog[1].vendor, None);
}

#[tokio::test]
async fn test_http_catalog_server_error_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/products.json");
        then.status(500);
    });

    let provider =
        HttpCatalogProvider::new(server.url("/products.json"), Duration::from_secs(5)).unwrap();
    assert!(provider.load_catalog().await.is_err());
}

#[tokio::test]
async fn test_http_catalog_malformed_body_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/products.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("not json at all");
    });

    let provider =
        HttpCatalogProvider::new(server.url("/products.json"), Duration::from_secs(5)).unwrap();
    assert!(provider.load_catalog().await.is_err());
}

#[tokio::test]
async fn test_http_catalog_missing_products_key_reads_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/products.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "version": 2 }));
    });

    let provider =
        HttpCatalogProvider::new(server.url("/products.json"), Duration::from_secs(5)).unwrap();
    let catalog = provider.load_catalog().await.unwrap();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_file_catalog_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, serde_json::to_vec(&catalog_body()).unwrap()).unwrap();

    let provider = FileCatalogProvider::new(&path);
    let catalog = provider.load_catalog().await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[1].name, "Lotus Kush");
}

#[tokio::test]
async fn test_file_catalog_missing_file_is_an_error() {
    let provider = FileCatalogProvider::new("/nonexistent/products.json");
    assert!(provider.load_catalog().await.is_err());
}
