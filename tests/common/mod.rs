//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use catalog_client::api::{ApiClient, Product, User};
use catalog_client::config::ApiConfig;
use catalog_client::session::CredentialStore;
use catalog_client::store::{Effects, Store, StoreEvent};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

use mock_backend::MockBackend;

/// JWT-shaped token with the given `exp` (seconds).
pub fn token_with_exp(exp: i64) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(json!({ "sub": "u1", "exp": exp }).to_string())
    )
}

/// Valid for another hour.
pub fn live_token() -> String {
    token_with_exp(chrono::Utc::now().timestamp() + 3600)
}

pub fn expired_token() -> String {
    token_with_exp(chrono::Utc::now().timestamp() - 60)
}

pub fn user() -> User {
    User {
        id: "u1".to_string(),
        email: "ana@example.com".to_string(),
        name: "Ana".to_string(),
    }
}

pub fn user_json() -> Value {
    json!({ "id": "u1", "email": "ana@example.com", "nombre": "Ana" })
}

pub fn auth_json(token: &str) -> Value {
    json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": 3600,
        "user": user_json(),
    })
}

pub fn product(id: &str) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: Some(format!("Description {id}")),
        price: 10.0,
        category: "General".to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub fn product_json(id: &str) -> Value {
    json!({
        "_id": id,
        "nombre": format!("Product {id}"),
        "descripcion": format!("Description {id}"),
        "precio": 10.0,
        "categoria": "General",
        "createdAt": "2024-01-15T10:30:00.000Z",
        "updatedAt": "2024-01-15T10:30:00.000Z",
    })
}

/// One page of `ids` out of `total`.
pub fn page_json(ids: &[&str], total: u64, page: u32, total_pages: u32) -> Value {
    json!({
        "productos": ids.iter().map(|id| product_json(id)).collect::<Vec<_>>(),
        "total": total,
        "page": page,
        "totalPages": total_pages,
    })
}

pub fn api_for(backend: &MockBackend) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: backend.base_url(),
        ..ApiConfig::default()
    })
    .unwrap()
}

/// Store wired to the mock backend with in-memory credentials.
pub fn connect(
    backend: &MockBackend,
) -> (Store, UnboundedReceiver<StoreEvent>, CredentialStore) {
    let credentials = CredentialStore::in_memory();
    let (store, events) = Store::new(Effects::new(api_for(backend), credentials.clone()));
    (store, events, credentials)
}

/// Store wired to the mock backend, already signed in with a live token.
pub fn connect_signed_in(
    backend: &MockBackend,
) -> (Store, UnboundedReceiver<StoreEvent>, CredentialStore) {
    let (store, events, credentials) = connect(backend);
    credentials.persist(&live_token(), &user()).unwrap();
    store.dispatch(catalog_client::store::auth::AuthIntent::Initialize);
    (store, events, credentials)
}

pub fn drain(events: &mut UnboundedReceiver<StoreEvent>) -> Vec<StoreEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

/// Create a temporary config file pointing at `base_url`.
pub fn temp_config(base_url: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    let content = format!(
        r#"[api]
base_url = "{base_url}"
connect_timeout_seconds = 2

[session]
storage_dir = "{}"
"#,
        temp_dir.path().join("session").display()
    );
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
