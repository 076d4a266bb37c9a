//! User directory model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Directory entry stored in the `users` collection, keyed by Firebase UID.
///
/// Upserted with merge semantics on every sign-in, so `None` fields are
/// never written over existing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// Firebase UID (also used as document ID)
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Display name, falling back to email
    #[serde(rename = "userName", default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl UserProfile {
    /// Document fields present on this profile, for a merge update mask.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = vec!["userId", "userName"];
        if self.email.is_some() {
            fields.push("email");
        }
        if self.photo_url.is_some() {
            fields.push("photoURL");
        }
        fields
    }

    /// Merge `update` into `self`, leaving fields absent from `update` untouched.
    pub fn merge(&mut self, update: &UserProfile) {
        self.user_id.clone_from(&update.user_id);
        self.user_name.clone_from(&update.user_name);
        if update.email.is_some() {
            self.email.clone_from(&update.email);
        }
        if update.photo_url.is_some() {
            self.photo_url.clone_from(&update.photo_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut stored = UserProfile {
            user_id: "u1".to_string(),
            user_name: "Ada".to_string(),
            email: Some("ada@example.com".to_string()),
            photo_url: Some("https://example.com/ada.png".to_string()),
        };
        let update = UserProfile {
            user_id: "u1".to_string(),
            user_name: "Ada L.".to_string(),
            email: None,
            photo_url: None,
        };

        stored.merge(&update);

        assert_eq!(stored.user_name, "Ada L.");
        assert_eq!(stored.email.as_deref(), Some("ada@example.com"));
        assert_eq!(stored.photo_url.as_deref(), Some("https://example.com/ada.png"));
        assert_eq!(update.present_fields(), vec!["userId", "userName"]);
    }

    #[test]
    fn test_serializes_client_field_names() {
        let profile = UserProfile {
            user_id: "u1".to_string(),
            user_name: "Ada".to_string(),
            email: None,
            photo_url: Some("p".to_string()),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["photoURL"], "p");
        assert_eq!(value["userName"], "Ada");
        assert!(value.get("email").is_none());
    }
}
