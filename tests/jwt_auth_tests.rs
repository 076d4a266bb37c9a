// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session JWT compatibility tests.
//!
//! These tests verify that tokens minted at sign-in decode with the same
//! claim layout the middleware expects, catching drift between the two early.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use ontime_tracker::middleware::auth::{create_jwt, verify_jwt, Claims, SESSION_TTL_SECS};
use serde::Deserialize;

const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

/// Claim layout as seen by an independent decoder.
#[derive(Debug, Deserialize)]
struct WireClaims {
    sub: String,
    name: String,
    exp: usize,
    iat: usize,
}

#[test]
fn test_jwt_roundtrip() {
    let token = create_jwt("firebase-uid-123", "Ayesha Rahman", KEY).unwrap();

    let key = DecodingKey::from_secret(KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<WireClaims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "firebase-uid-123");
    assert_eq!(token_data.claims.name, "Ayesha Rahman");
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_verify_accepts_own_tokens() {
    let token = create_jwt("uid-1", "Rafi", KEY).unwrap();
    let claims: Claims = verify_jwt(&token, KEY).unwrap();

    assert_eq!(claims.sub, "uid-1");
    assert_eq!(claims.name, "Rafi");
}

#[test]
fn test_verify_rejects_foreign_key() {
    let token = create_jwt("uid-1", "Rafi", b"another_signing_key_32_bytes!!!!").unwrap();
    assert!(verify_jwt(&token, KEY).is_err());
}

#[test]
fn test_token_without_name_still_decodes() {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    // Sessions issued before the name claim existed
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let token = encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "sub": "uid-2", "iat": now, "exp": now + 60 }),
        &EncodingKey::from_secret(KEY),
    )
    .unwrap();

    let claims = verify_jwt(&token, KEY).unwrap();
    assert_eq!(claims.sub, "uid-2");
    assert_eq!(claims.name, "");
}

#[test]
fn test_jwt_expiration_is_future() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let token = create_jwt("uid-1", "Rafi", KEY).unwrap();

    let key = DecodingKey::from_secret(KEY);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually

    let token_data = decode::<WireClaims>(&token, &key, &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    assert!(
        token_data.claims.exp > now + SESSION_TTL_SECS - 86400,
        "Token expiration should be ~30 days in the future"
    );
}
