// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::TimeZone;
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use ontime_tracker::config::Config;
use ontime_tracker::db::{DocumentStore, FirestoreDb, MemoryStore};
use ontime_tracker::models::TaskLogRecord;
use ontime_tracker::routes::create_router;
use ontime_tracker::services::FirebaseTokenVerifier;
use ontime_tracker::time_utils::ReferenceClock;
use ontime_tracker::AppState;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Key ID the static test verifier accepts.
#[allow(dead_code)]
pub const TEST_KID: &str = "test-kid";

const TEST_PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/firebase_test_key.pem");
const TEST_PUBLIC_KEY: &[u8] = include_bytes!("../fixtures/firebase_test_key.pub.pem");

/// "Today" for every test app: 2024-05-01 10:00 AM in Dhaka.
#[allow(dead_code)]
pub const TEST_TODAY: &str = "2024-05-01";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

#[allow(dead_code)]
pub fn test_clock() -> ReferenceClock {
    let instant = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 4, 0, 0).unwrap();
    ReferenceClock::fixed(chrono_tz::Asia::Dhaka, instant)
}

#[allow(dead_code)]
pub fn test_verifier(config: &Config) -> FirebaseTokenVerifier {
    let key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY).expect("test public key");
    FirebaseTokenVerifier::new_with_static_key(config, TEST_KID, key)
        .expect("Failed to build static verifier")
}

/// Create a test app over an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let (app, state, _) = create_test_app_with_store();
    (app, state)
}

/// Like [`create_test_app`], also returning the store for seeding and
/// failure injection.
#[allow(dead_code)]
pub fn create_test_app_with_store() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    create_test_app_with_config(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(
    config: Config,
) -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(test_verifier(&config));
    let state = Arc::new(AppState::new(config, store.clone(), verifier, test_clock()));

    (create_router(state.clone()), state, store)
}

/// Create a session JWT the way sign-in does.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, user_name: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        name: &'a str,
        exp: usize,
        iat: usize,
    }

    let now = now_secs();
    encode(
        &Header::new(Algorithm::HS256),
        &Claims {
            sub: user_id,
            name: user_name,
            exp: now + 86400,
            iat: now,
        },
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Claims of a Firebase ID token, signed with the fixture key.
#[allow(dead_code)]
#[derive(Serialize, Clone)]
pub struct IdTokenClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl IdTokenClaims {
    #[allow(dead_code)]
    pub fn new(project_id: &str, uid: &str) -> Self {
        let now = now_secs();
        Self {
            iss: format!("https://securetoken.google.com/{project_id}"),
            aud: project_id.to_string(),
            sub: uid.to_string(),
            iat: now,
            exp: now + 3600,
            name: None,
            email: None,
            picture: None,
        }
    }
}

#[allow(dead_code)]
pub fn sign_id_token(claims: &IdTokenClaims, kid: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    let key = EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY).expect("test private key");
    encode(&header, claims, &key).unwrap()
}

/// Insert a task log directly into the store.
#[allow(dead_code)]
pub async fn seed_task(
    store: &MemoryStore,
    user_id: &str,
    title: &str,
    date: &str,
    time: &str,
) -> TaskLogRecord {
    let mut record = TaskLogRecord {
        id: String::new(),
        user_id: user_id.to_string(),
        user_name: user_id.to_uppercase(),
        task_title: title.to_string(),
        description: format!("{title} work"),
        date: date.to_string(),
        time: time.to_string(),
    };
    record.id = store.insert_task(&record).await.unwrap();
    record
}

#[allow(dead_code)]
pub fn authed(method: &str, uri: &str, token: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    authed(method, uri, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn now_secs() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}
