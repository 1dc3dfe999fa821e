//! Discovery feed exclusion rules.

use axum::http::StatusCode;
use integration_tests::TestApp;
use serde_json::Value;
use uuid::Uuid;

async fn discovered_names(app: &TestApp, viewer: Uuid) -> Vec<String> {
    let (status, body) = app.get(&format!("/discovery/{viewer}")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let mut names: Vec<String> = body["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|profile| profile["name"].as_str().expect("name").to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn feed_shows_single_strangers_only() {
    let app = TestApp::new();
    let emma = app.register("Emma", "single").await;
    app.register("Noah", "single").await;
    app.register("Mia", "single").await;
    // Not single, so never discoverable.
    app.register("Nora", "not-single").await;

    assert_eq!(discovered_names(&app, emma).await, ["Mia", "Noah"]);
}

#[tokio::test]
async fn feed_never_contains_the_viewer() {
    let app = TestApp::new();
    let emma = app.register("Emma", "single").await;
    assert_eq!(discovered_names(&app, emma).await, Vec::<String>::new());
}

#[tokio::test]
async fn a_swipe_in_either_direction_hides_the_pair() {
    let app = TestApp::new();
    let emma = app.register("Emma", "single").await;
    let noah = app.register("Noah", "single").await;
    let mia = app.register("Mia", "single").await;

    // Emma passed on Noah; Mia liked Emma. Both disappear from
    // Emma's feed, whoever initiated.
    assert_eq!(app.swipe(emma, noah, "pass").await, Value::Null);
    assert_eq!(app.swipe(mia, emma, "like").await, Value::Null);

    assert_eq!(discovered_names(&app, emma).await, Vec::<String>::new());
    // Noah's own feed still shows Mia, whom he has no history with.
    assert_eq!(discovered_names(&app, noah).await, ["Mia"]);
}

#[tokio::test]
async fn unknown_viewer_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app.get(&format!("/discovery/{}", Uuid::now_v7())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
