//! Contact form submissions.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::spawn_app;

#[tokio::test]
async fn test_contact_persists_message() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/contact")
        .json(&json!({
            "name": "Alice",
            "email": "alice@example.com",
            "subject": "Viewing request",
            "message": "Is the Sunset Villa still available?"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let (email, message): (String, String) =
        sqlx::query_as("SELECT email, message FROM contacts WHERE name = ?")
            .bind("Alice")
            .fetch_one(app.db.pool())
            .await
            .unwrap();
    assert_eq!(email, "alice@example.com");
    assert_eq!(message, "Is the Sunset Villa still available?");
}

#[tokio::test]
async fn test_contact_requires_all_fields() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/contact")
        .json(&json!({ "name": "Alice", "email": "alice@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_contact_rejects_invalid_email() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/contact")
        .json(&json!({
            "name": "Alice",
            "email": "not-an-email",
            "subject": "Hi",
            "message": "Hello"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_contact_needs_no_session() {
    let app = spawn_app().await;

    // No login has happened on this client at all
    let response = app
        .server
        .post("/contact")
        .json(&json!({
            "name": "Bob",
            "email": "bob@example.com",
            "subject": "Question",
            "message": "What are your opening hours?"
        }))
        .await;
    response.assert_status_ok();
}
