//! Chat messages scoped to a match.

use axum::http::StatusCode;
use integration_tests::TestApp;
use serde_json::json;
use uuid::Uuid;

async fn matched_pair(app: &TestApp) -> (Uuid, Uuid, String) {
    let emma = app.register("Emma", "single").await;
    let noah = app.register("Noah", "single").await;
    app.swipe(emma, noah, "like").await;
    let formed = app.swipe(noah, emma, "like").await;
    let match_id = formed["id"].as_str().expect("match id").to_string();
    (emma, noah, match_id)
}

#[tokio::test]
async fn a_new_match_starts_with_an_empty_thread() {
    let app = TestApp::new();
    let (_, _, match_id) = matched_pair(&app).await;

    let (status, body) = app.get(&format!("/chats/{match_id}/messages")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn messages_come_back_in_send_order() {
    let app = TestApp::new();
    let (emma, noah, match_id) = matched_pair(&app).await;
    let path = format!("/chats/{match_id}/messages");

    for (sender, text) in [(emma, "hey!"), (noah, "hi :)"), (emma, "coffee sometime?")] {
        let (status, body) = app
            .post(&path, json!({ "senderId": sender, "text": text }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["text"], json!(text));
        assert_eq!(body["matchId"], json!(match_id));
    }

    let (_, body) = app.get(&path).await;
    let texts: Vec<&str> = body["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|message| message["text"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, ["hey!", "hi :)", "coffee sometime?"]);
}

#[tokio::test]
async fn an_unknown_match_has_no_thread() {
    let app = TestApp::new();
    let emma = app.register("Emma", "single").await;
    let ghost = Uuid::now_v7();

    let (status, _) = app.get(&format!("/chats/{ghost}/messages")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            &format!("/chats/{ghost}/messages"),
            json!({ "senderId": emma, "text": "anyone there?" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn message_text_is_bounded() {
    let app = TestApp::new();
    let (emma, _, match_id) = matched_pair(&app).await;
    let path = format!("/chats/{match_id}/messages");

    let (status, _) = app
        .post(&path, json!({ "senderId": emma, "text": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(&path, json!({ "senderId": emma, "text": "x".repeat(1001) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
