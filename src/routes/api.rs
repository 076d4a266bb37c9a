// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the signed-in user and the user directory.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::UserProfile;
use crate::services::{Identity, IdentitySubscription};
use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Extension, Json, Router,
};
use futures_util::stream::{self, Stream};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/users", get(list_users))
        .route("/api/session/events", get(session_events))
}

// ─── Current User ────────────────────────────────────────────

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Identity>> {
    let profile = state
        .users
        .get(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(Identity::from(profile)))
}

// ─── User Directory ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UsersResponse {
    pub users: Vec<UserProfile>,
}

/// Everyone who has signed in, for the team view's user filter.
async fn list_users(State(state): State<Arc<AppState>>) -> Json<UsersResponse> {
    Json(UsersResponse {
        users: state.users.list().await,
    })
}

// ─── Identity Events ─────────────────────────────────────────

/// Stream identity changes for the lifetime of the connection.
///
/// The first event carries the current identity. The stream ends after a
/// sign-out event; closing the connection drops the subscription.
async fn session_events(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let initial = match state.users.get(&user.user_id).await {
        Ok(profile) => profile.map(Identity::from),
        Err(e) => {
            tracing::warn!(error = %e, user_id = %user.user_id, "Failed to load profile for events");
            None
        }
    };
    let subscription = state.identity_hub.subscribe(&user.user_id, initial);

    Sse::new(identity_stream(subscription)).keep_alive(KeepAlive::default())
}

enum StreamState {
    Initial(IdentitySubscription),
    Watching(IdentitySubscription),
    Done,
}

fn identity_stream(
    subscription: IdentitySubscription,
) -> impl Stream<Item = std::result::Result<Event, Infallible>> {
    stream::unfold(StreamState::Initial(subscription), |state| async move {
        let (identity, subscription) = match state {
            StreamState::Initial(subscription) => (subscription.current(), subscription),
            StreamState::Watching(mut subscription) => {
                let identity = subscription.changed().await?;
                (identity, subscription)
            }
            StreamState::Done => return None,
        };

        let event = identity_event(identity.as_ref());
        let next = if identity.is_some() {
            StreamState::Watching(subscription)
        } else {
            StreamState::Done
        };
        Some((Ok(event), next))
    })
}

fn identity_event(identity: Option<&Identity>) -> Event {
    match identity {
        Some(identity) => Event::default()
            .event("identity")
            .json_data(identity)
            .unwrap_or_else(|_| Event::default().event("identity")),
        None => Event::default().event("signed_out").data("null"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::IdentityHub;
    use futures_util::StreamExt;

    fn identity(name: &str) -> Identity {
        Identity {
            uid: "u1".to_string(),
            display_name: name.to_string(),
            email: None,
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_stream_ends_after_sign_out() {
        let hub = Arc::new(IdentityHub::new());
        let subscription = hub.subscribe("u1", Some(identity("Ayesha")));
        let mut events = Box::pin(identity_stream(subscription));

        assert!(events.next().await.is_some());

        hub.signed_in(identity("Ayesha R."));
        assert!(events.next().await.is_some());

        hub.signed_out("u1");
        assert!(events.next().await.is_some());
        assert!(events.next().await.is_none());

        drop(events);
        assert_eq!(hub.tracked_users(), 0);
    }

    #[tokio::test]
    async fn test_signed_out_user_gets_single_event() {
        let hub = Arc::new(IdentityHub::new());
        let mut events = Box::pin(identity_stream(hub.subscribe("u1", None)));

        assert!(events.next().await.is_some());
        assert!(events.next().await.is_none());
    }
}
