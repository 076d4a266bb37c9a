// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in and sign-out routes.
//!
//! The browser signs in with Google through Firebase and posts the ID token
//! here; the response sets a session cookie used by every `/api` route.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser, SESSION_COOKIE, SESSION_TTL_SECS};
use crate::services::{Identity, TokenError};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/session", post(create_session))
}

/// Routes that need an existing session.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/logout", post(logout))
}

#[derive(Deserialize)]
pub struct SessionRequest {
    id_token: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub token: String,
    pub user: Identity,
}

/// Exchange a Firebase ID token for a session.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<SessionRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let verified = state
        .token_verifier
        .verify_id_token(&body.id_token)
        .await
        .map_err(|err| match err {
            TokenError::Rejected(reason) => {
                tracing::warn!(reason = %reason, "Rejected Firebase ID token");
                AppError::InvalidToken
            }
            TokenError::Transient(reason) => {
                AppError::Internal(anyhow::anyhow!("ID token verification failed: {reason}"))
            }
        })?;

    let profile = state.users.record_sign_in(&verified).await?;
    let token = create_jwt(&profile.user_id, &profile.user_name, &state.config.jwt_signing_key)?;

    let identity = Identity::from(&verified);
    state.identity_hub.signed_in(identity.clone());

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.config.secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64));

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            token,
            user: identity,
        }),
    ))
}

/// End the session and notify the user's open screens.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    state.identity_hub.signed_out(&user.user_id);
    tracing::info!(user_id = %user.user_id, "User signed out");

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}
