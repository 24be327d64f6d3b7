//! Auth effects against a mock backend.

mod common;

use std::sync::Arc;

use catalog_client::api::{LoginRequest, RegisterRequest};
use catalog_client::router::Route;
use catalog_client::store::auth::{selectors, AuthIntent};
use catalog_client::session::{CredentialStore, MemoryStorage, Storage, TOKEN_KEY};
use catalog_client::store::{Effects, Notification, NotificationLevel, Store, StoreEvent};
use common::mock_backend::{MockBackend, MockResponse};
use common::{auth_json, connect, drain, expired_token, live_token, user};

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
    }
}

#[tokio::test]
async fn login_success_persists_and_navigates() {
    let backend = MockBackend::start().await;
    let token = live_token();
    backend
        .on("POST", "/auth/login", MockResponse::value(auth_json(&token)))
        .await;
    let (store, mut events, session) = connect(&backend);

    store.dispatch(AuthIntent::Login {
        credentials: credentials(),
    });
    assert!(store.select(selectors::auth_loading));
    store.settled().await;

    let state = store.state();
    assert!(state.auth.is_authenticated);
    assert!(!state.auth.loading);
    assert_eq!(state.auth.token.as_deref(), Some(token.as_str()));
    assert_eq!(store.select(|s| selectors::user_name(s).to_string()), "Ana");

    assert_eq!(session.token().unwrap().expose(), token);
    assert_eq!(session.user(), Some(user()));

    assert_eq!(
        drain(&mut events),
        vec![
            StoreEvent::Navigate(Route::products()),
            StoreEvent::Notify(Notification::success("Welcome!")),
        ]
    );

    let requests = backend.requests_to("POST", "/auth/login").await;
    assert_eq!(requests.len(), 1);
    let body = requests[0].json();
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["password"], "secret1");
    assert!(requests[0].header("authorization").is_none());
}

#[tokio::test]
async fn login_failure_uses_server_message() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "POST",
            "/auth/login",
            MockResponse::error(401, "Invalid credentials"),
        )
        .await;
    let (store, mut events, session) = connect(&backend);

    store.dispatch(AuthIntent::Login {
        credentials: credentials(),
    });
    store.settled().await;

    let state = store.state();
    assert!(!state.auth.is_authenticated);
    assert!(!state.auth.loading);
    assert_eq!(state.auth.error.as_deref(), Some("Invalid credentials"));
    assert!(session.token().is_none());

    let events = drain(&mut events);
    assert_eq!(events.len(), 1);
    match &events[0] {
        StoreEvent::Notify(n) => {
            assert_eq!(n.level, NotificationLevel::Error);
            assert_eq!(n.message, "Invalid credentials");
            assert_eq!(n.duration, std::time::Duration::from_secs(5));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn login_failure_without_message_uses_fallback() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "POST",
            "/auth/login",
            MockResponse::json("Internal Server Error").with_status(500),
        )
        .await;
    let (store, _events, _session) = connect(&backend);

    store.dispatch(AuthIntent::Login {
        credentials: credentials(),
    });
    store.settled().await;

    assert_eq!(
        store.select(|s| selectors::auth_error(s).map(str::to_string)),
        Some("Login failed".to_string())
    );
}

#[tokio::test]
async fn register_joins_validation_messages() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "POST",
            "/auth/register",
            MockResponse::value(serde_json::json!({
                "statusCode": 400,
                "message": ["email must be an email", "password too short"],
            }))
            .with_status(400),
        )
        .await;
    let (store, _events, _session) = connect(&backend);

    store.dispatch(AuthIntent::Register {
        user_data: RegisterRequest {
            email: "bad".to_string(),
            password: "x".to_string(),
            name: "Ana".to_string(),
        },
    });
    store.settled().await;

    assert_eq!(
        store.select(|s| selectors::auth_error(s).map(str::to_string)),
        Some("email must be an email, password too short".to_string())
    );
}

#[tokio::test]
async fn register_success_signs_in() {
    let backend = MockBackend::start().await;
    backend
        .on("POST", "/auth/register", MockResponse::value(auth_json(&live_token())).with_status(201))
        .await;
    let (store, mut events, session) = connect(&backend);

    store.dispatch(AuthIntent::Register {
        user_data: RegisterRequest {
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            name: "Ana".to_string(),
        },
    });
    store.settled().await;

    assert!(store.select(selectors::is_authenticated));
    assert!(session.is_authenticated());
    let body = backend.requests_to("POST", "/auth/register").await[0].json();
    assert_eq!(body["nombre"], "Ana");
    assert!(drain(&mut events).contains(&StoreEvent::Navigate(Route::products())));
}

#[tokio::test]
async fn second_login_while_in_flight_is_dropped() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "POST",
            "/auth/login",
            MockResponse::value(auth_json(&live_token())).with_delay(100),
        )
        .await;
    let (store, _events, _session) = connect(&backend);

    store.dispatch(AuthIntent::Login {
        credentials: credentials(),
    });
    store.dispatch(AuthIntent::Login {
        credentials: credentials(),
    });
    store.settled().await;

    assert_eq!(backend.requests_to("POST", "/auth/login").await.len(), 1);
    assert!(store.select(selectors::is_authenticated));
}

#[tokio::test]
async fn logout_clears_storage_and_notifies() {
    let backend = MockBackend::start().await;
    let (store, mut events, session) = common::connect_signed_in(&backend);
    assert!(store.select(selectors::is_authenticated));

    store.dispatch(AuthIntent::Logout);
    store.settled().await;

    assert!(!store.select(selectors::is_authenticated));
    assert!(session.token().is_none());
    assert!(session.user().is_none());
    assert_eq!(
        drain(&mut events),
        vec![
            StoreEvent::Navigate(Route::Login),
            StoreEvent::Notify(Notification::success("Session closed")),
        ]
    );
}

#[tokio::test]
async fn initialize_restores_live_session() {
    let backend = MockBackend::start().await;
    let (store, mut events, session) = connect(&backend);
    let token = live_token();
    session.persist(&token, &user()).unwrap();

    store.dispatch(AuthIntent::Initialize);

    let state = store.state();
    assert!(state.auth.is_authenticated);
    assert_eq!(state.auth.user, Some(user()));
    assert_eq!(state.auth.token, Some(token));
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn initialize_with_expired_token_invalidates_silently() {
    let backend = MockBackend::start().await;
    let (store, mut events, session) = connect(&backend);
    session.persist(&expired_token(), &user()).unwrap();

    store.dispatch(AuthIntent::Initialize);

    assert!(!store.select(selectors::is_authenticated));
    assert!(session.token().is_none());
    assert!(session.user().is_none());
    assert_eq!(drain(&mut events), vec![StoreEvent::Navigate(Route::Login)]);
}

#[tokio::test]
async fn initialize_with_token_but_no_user_invalidates() {
    let backend = MockBackend::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, &live_token()).unwrap();
    let credentials = CredentialStore::new(storage);
    assert!(credentials.is_authenticated());

    let (store, _events) = Store::new(Effects::new(common::api_for(&backend), credentials.clone()));
    store.dispatch(AuthIntent::Initialize);

    assert!(!store.select(selectors::is_authenticated));
    assert!(credentials.token().is_none());
}
