//! Profile read and partial-update behavior.

use axum::http::StatusCode;
use integration_tests::TestApp;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn profile_body_never_leaks_credentials() {
    let app = TestApp::new();
    let sophie = app.register("Sophie", "single").await;

    let (status, body) = app.get(&format!("/profiles/{sophie}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Sophie"));
    assert!(body.get("email").is_none());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn patch_updates_only_the_named_fields() {
    let app = TestApp::new();
    let milan = app.register("Milan", "single").await;

    let (status, body) = app
        .put(
            &format!("/profiles/{milan}"),
            json!({ "bio": "Builder, reader, weekend cyclist.", "age": 29 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bio"], json!("Builder, reader, weekend cyclist."));
    assert_eq!(body["age"], json!(29));
    // Untouched fields survive the patch.
    assert_eq!(body["name"], json!("Milan"));
    assert_eq!(body["relationshipStatus"], json!("single"));

    // The update persists across reads.
    let (_, body) = app.get(&format!("/profiles/{milan}")).await;
    assert_eq!(body["age"], json!(29));
}

#[tokio::test]
async fn unknown_profile_is_not_found() {
    let app = TestApp::new();
    let ghost = Uuid::now_v7();

    let (status, body) = app.get(&format!("/profiles/{ghost}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("profile"));

    let (status, _) = app
        .put(&format!("/profiles/{ghost}"), json!({ "bio": "hi" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_validation_mirrors_registration_limits() {
    let app = TestApp::new();
    let nora = app.register("Nora", "not-single").await;
    let path = format!("/profiles/{nora}");

    let (status, _) = app.put(&path, json!({ "bio": "x".repeat(501) })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.put(&path, json!({ "age": 17 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.put(&path, json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.put(&path, json!({ "photo": "ftp://nope" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was changed by the rejected patches.
    let (_, body) = app.get(&path).await;
    assert_eq!(body["name"], json!("Nora"));
    assert!(body.get("bio").is_none());
}
