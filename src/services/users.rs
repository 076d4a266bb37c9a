// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User directory backing the team view's user filter.

use std::sync::Arc;

use crate::db::DocumentStore;
use crate::error::Result;
use crate::models::UserProfile;
use crate::services::firebase_auth::VerifiedIdentity;

pub struct UserDirectory {
    store: Arc<dyn DocumentStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All known users sorted by name.
    ///
    /// The directory only feeds a dropdown, so a failed fetch yields an
    /// empty list instead of an error.
    pub async fn list(&self) -> Vec<UserProfile> {
        match self.store.list_users().await {
            Ok(mut users) => {
                users.sort_by(|a, b| {
                    a.user_name
                        .to_lowercase()
                        .cmp(&b.user_name.to_lowercase())
                        .then_with(|| a.user_id.cmp(&b.user_id))
                });
                users
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch user directory");
                Vec::new()
            }
        }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.store.get_user(user_id).await
    }

    /// Record a sign-in, merging into any existing profile.
    pub async fn record_sign_in(&self, identity: &VerifiedIdentity) -> Result<UserProfile> {
        let profile = UserProfile {
            user_id: identity.uid.clone(),
            user_name: identity.user_name(),
            email: identity.email.clone(),
            photo_url: identity.photo_url.clone(),
        };
        self.store.upsert_user(&profile).await?;

        tracing::info!(user_id = %profile.user_id, "User signed in");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{FailureMode, MemoryStore};

    fn identity(uid: &str, name: Option<&str>, email: Option<&str>) -> VerifiedIdentity {
        VerifiedIdentity {
            uid: uid.to_string(),
            display_name: name.map(str::to_string),
            email: email.map(str::to_string),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let store = Arc::new(MemoryStore::new());
        let directory = UserDirectory::new(store);
        directory
            .record_sign_in(&identity("u1", Some("rafi"), None))
            .await
            .unwrap();
        directory
            .record_sign_in(&identity("u2", Some("Ayesha"), None))
            .await
            .unwrap();

        let names: Vec<_> = directory
            .list()
            .await
            .into_iter()
            .map(|u| u.user_name)
            .collect();
        assert_eq!(names, ["Ayesha", "rafi"]);
    }

    #[tokio::test]
    async fn test_sign_in_keeps_existing_email() {
        let store = Arc::new(MemoryStore::new());
        let directory = UserDirectory::new(store);
        directory
            .record_sign_in(&identity("u1", Some("Ayesha"), Some("a@example.com")))
            .await
            .unwrap();
        directory
            .record_sign_in(&identity("u1", Some("Ayesha R."), None))
            .await
            .unwrap();

        let stored = directory.get("u1").await.unwrap().unwrap();
        assert_eq!(stored.user_name, "Ayesha R.");
        assert_eq!(stored.email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_empty_directory() {
        let store = Arc::new(MemoryStore::new());
        let directory = UserDirectory::new(store.clone());
        directory
            .record_sign_in(&identity("u1", Some("Ayesha"), None))
            .await
            .unwrap();

        store.set_failure_mode(FailureMode::Reads).await;
        assert!(directory.list().await.is_empty());
    }
}
