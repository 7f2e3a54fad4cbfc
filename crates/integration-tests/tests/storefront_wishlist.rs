//! Integration tests for the wishlist API and its file persistence.

use deskfront_integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::json;

fn ids(items: &serde_json::Value) -> Vec<&str> {
    items
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect()
}

#[tokio::test]
async fn test_wishlist_survives_restart() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let first = TestServer::start(dir.path(), false).await.expect("start");
    first.post("/wishlist/add", &json!({"id": "4"})).await.expect("add");
    first.post("/wishlist/add", &json!({"id": "7"})).await.expect("add");
    drop(first);

    assert!(dir.path().join("wishlist.json").exists());

    let second = TestServer::start(dir.path(), false).await.expect("start");
    let (_, body) = second.get("/wishlist").await.expect("wishlist");
    assert_eq!(ids(&body["items"]), ["4", "7"]);

    let (_, body) = second.get("/wishlist/contains/7").await.expect("contains");
    assert_eq!(body["in_wishlist"], true);
}

#[tokio::test]
async fn test_duplicate_add_keeps_one_entry() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let server = TestServer::start(dir.path(), false).await.expect("start");

    let (_, body) = server
        .post("/wishlist/add", &json!({"id": "1"}))
        .await
        .expect("add");
    assert_eq!(body["outcome"]["status"], "added");

    let (_, body) = server
        .post("/wishlist/add", &json!({"id": "1"}))
        .await
        .expect("add");
    assert_eq!(body["outcome"]["status"], "already_present");
    assert_eq!(ids(&body["items"]), ["1"]);
}

#[tokio::test]
async fn test_corrupt_wishlist_file_starts_empty() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("wishlist.json"), "{not json").expect("write");

    let server = TestServer::start(dir.path(), false).await.expect("start");
    let (status, body) = server.get("/wishlist").await.expect("wishlist");
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body["items"]).is_empty());

    server.post("/wishlist/add", &json!({"id": "2"})).await.expect("add");
    let stored = std::fs::read_to_string(dir.path().join("wishlist.json")).expect("read");
    assert!(stored.contains("Nebula Gaming Pad XL"));
}

#[tokio::test]
async fn test_move_to_cart() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let server = TestServer::start(dir.path(), false).await.expect("start");
    server.post("/wishlist/add", &json!({"id": "5"})).await.expect("add");

    let (_, body) = server
        .post("/wishlist/move-to-cart", &json!({"id": "5"}))
        .await
        .expect("move");
    assert_eq!(body["status"], "moved");
    assert_eq!(body["cart"]["status"], "added");

    let (_, body) = server.get("/cart").await.expect("cart");
    assert_eq!(body["items"][0]["id"], "5");
    assert_eq!(body["items"][0]["quantity"], 1);

    let (_, body) = server
        .post("/wishlist/move-to-cart", &json!({"id": "5"}))
        .await
        .expect("move");
    assert_eq!(body["status"], "not_found");
}

#[tokio::test]
async fn test_clear_persists_empty_list() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let server = TestServer::start(dir.path(), false).await.expect("start");
    server.post("/wishlist/add", &json!({"id": "3"})).await.expect("add");

    let (_, body) = server
        .post("/wishlist/clear", &json!({}))
        .await
        .expect("clear");
    assert_eq!(body["outcome"]["removed"], 1);

    let stored = std::fs::read_to_string(dir.path().join("wishlist.json")).expect("read");
    assert_eq!(stored, "[]");
}

#[tokio::test]
async fn test_product_listing_filters() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let server = TestServer::start(dir.path(), false).await.expect("start");

    let (_, body) = server
        .get("/products?category=mousepads&sort=price-high")
        .await
        .expect("products");
    assert_eq!(ids(&body["products"]), ["2", "5", "8", "1"]);

    let (_, body) = server.get("/products?search=poster").await.expect("products");
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn test_running_service_owns_data_directory() {
    use deskfront_storefront::storage::{FileStorage, StorageError};

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let server = TestServer::start(dir.path(), false).await.expect("start");
    server.post("/wishlist/add", &json!({"id": "3"})).await.expect("add");

    assert!(matches!(
        FileStorage::open(dir.path()),
        Err(StorageError::Locked { .. })
    ));

    let (_, body) = server.get("/wishlist").await.expect("wishlist");
    assert_eq!(ids(&body["items"]), ["3"]);
}
