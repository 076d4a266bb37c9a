// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::{body::Body, http::StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn status_of(uri: &str) -> StatusCode {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", "Ayesha", &state.config.jwt_signing_key);

    app.oneshot(common::authed("GET", uri, &token).body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_invalid_date_format() {
    assert_eq!(
        status_of("/api/team/logs?date_to=invalid-date").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of("/api/team/logs/export?date_from=01/05/2024").await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_non_numeric_paging() {
    assert_eq!(
        status_of("/api/team/logs?page=first").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of("/api/team/logs?per_page=-10").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of("/api/bucket?page=abc").await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_missing_json_field_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", "Ayesha", &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/bucket",
            &token,
            json!({ "project_name": "Refactor" }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
