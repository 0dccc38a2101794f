//! Integration tests for sale record CRUD and the review lifecycle.
//!
//! These tests require:
//! - A running MongoDB instance
//! - The API server running (cargo run -p supply-store-api)
//!
//! Run with: cargo test -p supply-store-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the sales API (configurable via environment).
fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::new()
}

/// A full, valid sale creation payload.
fn sale_payload() -> Value {
    json!({
        "items": [{ "name": "notepad", "tags": ["school", "work"], "price": 1.0, "quantity": 2 }],
        "storeLocation": "Singapore",
        "customer": { "gender": "M", "age": 40, "email": "roger@roger.com", "satisfaction": 5 },
        "couponUsed": true,
        "purchaseMethod": "Online",
    })
}

/// Test helper: create a sale and return its id.
async fn create_sale(client: &Client) -> String {
    let resp = client
        .post(format!("{}/new", base_url()))
        .json(&sale_payload())
        .send()
        .await
        .expect("Failed to create sale");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to read response");
    body["id"].as_str().expect("missing id").to_string()
}

/// Test helper: delete a sale, ignoring the outcome.
async fn delete_sale(client: &Client, id: &str) {
    let _ = client
        .delete(format!("{}/sales/{id}", base_url()))
        .send()
        .await;
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn test_create_then_get_by_id() {
    let client = client();
    let id = create_sale(&client).await;

    let resp = client
        .get(format!("{}/sale/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get sale");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");

    assert_eq!(body["storeLocation"], "Singapore");
    assert_eq!(body["purchaseMethod"], "Online");
    assert_eq!(body["couponUsed"], true);
    assert_eq!(body["customer"]["email"], "roger@roger.com");
    // Line items are projected out of get-by-id
    assert!(body.get("items").is_none());

    delete_sale(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn test_create_rejects_missing_field() {
    let client = client();

    let mut payload = sale_payload();
    payload.as_object_mut().expect("object").remove("storeLocation");

    let resp = client
        .post(format!("{}/new", base_url()))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn test_unknown_id_is_not_found_everywhere() {
    let client = client();
    // Valid ObjectId shape, but no such record
    let ghost = "000000000000000000000000";

    let resp = client
        .get(format!("{}/sale/{ghost}", base_url()))
        .send()
        .await
        .expect("get failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let mut replace = sale_payload();
    replace.as_object_mut().expect("object").insert(
        "saleDate".to_string(),
        json!("2024-12-07T02:13:51.893+00:00"),
    );
    let resp = client
        .put(format!("{}/{ghost}", base_url()))
        .json(&replace)
        .send()
        .await
        .expect("put failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{}/sales/{ghost}", base_url()))
        .send()
        .await
        .expect("delete failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn test_malformed_id_is_bad_request() {
    let client = client();

    let resp = client
        .get(format!("{}/sale/not-an-id", base_url()))
        .send()
        .await
        .expect("get failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn test_replace_preserves_reviews() {
    let client = client();
    let id = create_sale(&client).await;

    // Attach a review
    let resp = client
        .post(format!("{}/sales/{id}/reviews", base_url()))
        .json(&json!({ "user": "roger", "rating": 5, "comment": "great" }))
        .send()
        .await
        .expect("Failed to add review");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Replace every top-level field
    let mut replace = sale_payload();
    let object = replace.as_object_mut().expect("object");
    object.insert(
        "saleDate".to_string(),
        json!("2024-12-07T02:13:51.893+00:00"),
    );
    object.insert("storeLocation".to_string(), json!("London"));

    let resp = client
        .put(format!("{}/{id}", base_url()))
        .json(&replace)
        .send()
        .await
        .expect("Failed to replace sale");
    assert_eq!(resp.status(), StatusCode::OK);

    // The review survived the replace
    let body: Value = client
        .get(format!("{}/sale/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get sale")
        .json()
        .await
        .expect("Failed to read response");

    assert_eq!(body["storeLocation"], "London");
    assert_eq!(body["reviews"].as_array().map(Vec::len), Some(1));

    delete_sale(&client, &id).await;
}

/// The full lifecycle: create sale, add review, update it, delete it,
/// delete the sale, and confirm the sale is gone.
#[tokio::test]
#[ignore = "Requires running API server and MongoDB"]
async fn test_end_to_end_scenario() {
    let client = client();
    let base = base_url();

    // Create sale
    let sale_id = create_sale(&client).await;

    // Add review
    let resp = client
        .post(format!("{base}/sales/{sale_id}/reviews"))
        .json(&json!({ "user": "roger", "rating": 5, "comment": "great" }))
        .send()
        .await
        .expect("Failed to add review");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to read response");
    let review_id = body["review_id"].as_str().expect("missing review_id").to_string();

    // Update review
    let resp = client
        .put(format!("{base}/sales/{sale_id}/reviews/{review_id}"))
        .json(&json!({ "user": "roger", "rating": 4, "comment": "good" }))
        .send()
        .await
        .expect("Failed to update review");
    assert_eq!(resp.status(), StatusCode::OK);

    // The updated review is visible with the same id
    let body: Value = client
        .get(format!("{base}/sale/{sale_id}"))
        .send()
        .await
        .expect("Failed to get sale")
        .json()
        .await
        .expect("Failed to read response");
    let reviews = body["reviews"].as_array().expect("reviews present");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["review_id"], review_id.as_str());
    assert_eq!(reviews[0]["comment"], "good");

    // Delete review
    let resp = client
        .delete(format!("{base}/sales/{sale_id}/reviews/{review_id}"))
        .send()
        .await
        .expect("Failed to delete review");
    assert_eq!(resp.status(), StatusCode::OK);

    // Delete sale
    let resp = client
        .delete(format!("{base}/sales/{sale_id}"))
        .send()
        .await
        .expect("Failed to delete sale");
    assert_eq!(resp.status(), StatusCode::OK);

    // Gone
    let resp = client
        .get(format!("{base}/sale/{sale_id}"))
        .send()
        .await
        .expect("Failed to get sale");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
