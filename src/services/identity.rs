// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scoped identity subscriptions.
//!
//! Each signed-in user gets a `watch` channel holding their latest identity
//! (`None` once signed out). Screens hold an [`IdentitySubscription`] for as
//! long as they are open; the channel is pruned when the last one drops.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::UserProfile;
use crate::services::firebase_auth::VerifiedIdentity;

/// Current user as seen by a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Identity {
    pub uid: String,
    pub display_name: String,
    pub email: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

impl From<&VerifiedIdentity> for Identity {
    fn from(verified: &VerifiedIdentity) -> Self {
        Self {
            uid: verified.uid.clone(),
            display_name: verified.user_name(),
            email: verified.email.clone(),
            photo_url: verified.photo_url.clone(),
        }
    }
}

impl From<UserProfile> for Identity {
    fn from(profile: UserProfile) -> Self {
        Self {
            uid: profile.user_id,
            display_name: profile.user_name,
            email: profile.email,
            photo_url: profile.photo_url,
        }
    }
}

/// Registry of per-user identity channels.
#[derive(Default)]
pub struct IdentityHub {
    channels: DashMap<String, watch::Sender<Option<Identity>>>,
}

impl IdentityHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to identity changes for `uid`.
    ///
    /// `initial` seeds the channel only when no other screen is watching;
    /// an existing channel already holds a value at least as fresh.
    pub fn subscribe(self: &Arc<Self>, uid: &str, initial: Option<Identity>) -> IdentitySubscription {
        let receiver = self
            .channels
            .entry(uid.to_string())
            .or_insert_with(|| watch::channel(initial).0)
            .subscribe();

        tracing::debug!(uid = %uid, "Identity subscription opened");

        IdentitySubscription {
            hub: Arc::clone(self),
            uid: uid.to_string(),
            receiver: Some(receiver),
        }
    }

    /// Publish a new identity value to every open subscription for `uid`.
    ///
    /// With no subscribers there is nobody to notify and nothing is retained.
    pub fn publish(&self, uid: &str, identity: Option<Identity>) {
        if let Some(sender) = self.channels.get(uid) {
            sender.send_replace(identity);
            tracing::debug!(
                uid = %uid,
                subscribers = sender.receiver_count(),
                "Identity change published"
            );
        }
    }

    pub fn signed_in(&self, identity: Identity) {
        let uid = identity.uid.clone();
        self.publish(&uid, Some(identity));
    }

    pub fn signed_out(&self, uid: &str) {
        self.publish(uid, None);
    }

    /// Number of users with at least one open subscription.
    pub fn tracked_users(&self) -> usize {
        self.channels.len()
    }

    pub fn subscriber_count(&self, uid: &str) -> usize {
        self.channels
            .get(uid)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

/// One screen's view of the current identity.
pub struct IdentitySubscription {
    hub: Arc<IdentityHub>,
    uid: String,
    // Only `None` while dropping.
    receiver: Option<watch::Receiver<Option<Identity>>>,
}

impl IdentitySubscription {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Latest identity, `None` after sign-out.
    pub fn current(&self) -> Option<Identity> {
        self.receiver
            .as_ref()
            .and_then(|receiver| receiver.borrow().clone())
    }

    /// Wait for the next change and return the new value.
    ///
    /// Returns `None` if the channel is gone.
    pub async fn changed(&mut self) -> Option<Option<Identity>> {
        let receiver = self.receiver.as_mut()?;
        receiver.changed().await.ok()?;
        Some(receiver.borrow_and_update().clone())
    }
}

impl Drop for IdentitySubscription {
    fn drop(&mut self) {
        drop(self.receiver.take());
        // Serialized with `subscribe` on the shard lock, so a concurrent
        // subscriber either keeps the channel alive or gets a fresh one.
        self.hub
            .channels
            .remove_if(&self.uid, |_, sender| sender.receiver_count() == 0);
        tracing::debug!(uid = %self.uid, "Identity subscription closed");
    }
}
