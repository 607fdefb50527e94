#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use mural_server::{connect_pool, routes, run_migrations, sqlite_url_for_path, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Database SQLite usa e getta: la TempDir va tenuta viva per tutta la durata del test.
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub async fn test_db() -> TestDb {
    let dir = TempDir::new().expect("create temp dir");
    let url = sqlite_url_for_path(&dir.path().join("mural.db")).expect("build sqlite url");
    let pool = connect_pool(&url, 2).await.expect("connect to sqlite");
    run_migrations(&pool).await.expect("run migrations");
    TestDb { pool, _dir: dir }
}

pub fn app(db: &TestDb) -> Router {
    routes::router(Arc::new(AppState::new(db.pool.clone())))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|err| panic!("router request failed: {err}"))
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read response body");
    String::from_utf8(bytes.to_vec()).expect("response body is UTF-8")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = body_text(response).await;
    serde_json::from_str(&body).unwrap_or_else(|err| panic!("body is not JSON: {err}; body={body}"))
}

/// Registra un messaggio via HTTP e restituisce il JSON creato.
pub async fn create(app: &Router, author: &str, content: &str) -> Value {
    let resp = send(
        app,
        json_request("POST", "/messages", &serde_json::json!({"author": author, "content": content})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}
