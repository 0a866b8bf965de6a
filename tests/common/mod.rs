//! Shared fixtures for the HTTP integration tests.
#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use axum_test::{TestResponse, TestServer, TestServerConfig};
use serde_json::json;
use tempfile::TempDir;

use villadesk::auth::{bootstrap_admin, hash_password};
use villadesk::config::Config;
use villadesk::db::{NewUser, UserRepository};
use villadesk::web::create_router;
use villadesk::web::handlers::AppState;
use villadesk::Database;

/// A running test application over an in-memory database and a temp
/// directory for site assets and uploads.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub placeholder: String,
    pub uploads_dir: std::path::PathBuf,
    _dir: TempDir,
}

/// Spawn a test app with cookie persistence enabled, admin seeded with
/// the default `admin`/`admin123` pair.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(true).await
}

/// Spawn a test app, choosing whether the test client persists cookies
/// between requests.
pub async fn spawn_app_with(save_cookies: bool) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let admin_dir = dir.path().join("site").join("admin");
    fs::create_dir_all(&admin_dir).unwrap();
    fs::write(admin_dir.join("login.html"), "<html>login form</html>").unwrap();
    fs::write(admin_dir.join("dashboard.html"), "<html>dashboard</html>").unwrap();

    let mut config = Config::default();
    config.static_files.site_path = dir.path().join("site").to_string_lossy().into_owned();
    config.static_files.admin_path = admin_dir.to_string_lossy().into_owned();
    config.static_files.uploads_path = dir.path().join("uploads").to_string_lossy().into_owned();

    let db = Database::open_in_memory().await.unwrap();
    bootstrap_admin(db.pool(), "admin123").await.unwrap();

    let state = Arc::new(AppState::new(&config, db.clone()).unwrap());
    let router = create_router(state);

    let server_config = TestServerConfig {
        save_cookies,
        ..TestServerConfig::default()
    };
    let server = TestServer::new_with_config(router, server_config).unwrap();

    TestApp {
        server,
        db,
        placeholder: config.static_files.placeholder_image.clone(),
        uploads_dir: dir.path().join("uploads"),
        _dir: dir,
    }
}

/// Create a regular (non-admin) user directly in the store.
pub async fn create_member(db: &Database, username: &str, password: &str) {
    let hash = hash_password(password).unwrap();
    UserRepository::new(db.pool())
        .create(&NewUser::new(username, hash))
        .await
        .unwrap();
}

/// POST /api/login with the given pair.
pub async fn login(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/api/login")
        .json(&json!({ "username": username, "password": password }))
        .await
}

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "villadesk-test-boundary";

/// Content type header value matching [`multipart_body`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Build a raw multipart/form-data body from text fields and an optional
/// `imageFile` upload.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"imageFile\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
