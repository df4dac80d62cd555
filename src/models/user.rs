//! User profile model.

use serde::{Deserialize, Serialize};

/// User profile stored in `users/{uid}`.
///
/// Field names stay camelCase on the wire so documents remain compatible
/// with the original web client's collection layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name shown in the UI
    #[serde(default)]
    pub display_name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Free-text dietary preferences ("vegetarian, no peanuts, ...")
    #[serde(default)]
    pub dietary_preferences: String,
    /// When the profile document was first created (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last profile update (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl UserProfile {
    /// Merge non-empty incoming fields into this profile, preserving
    /// everything the request left out.
    pub fn merge(&mut self, update: ProfileUpdate, now: &str) {
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(dietary_preferences) = update.dietary_preferences {
            self.dietary_preferences = dietary_preferences;
        }
        if self.created_at.is_none() {
            self.created_at = Some(now.to_string());
        }
        self.updated_at = Some(now.to_string());
    }
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub dietary_preferences: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_preserves_unspecified_fields() {
        let mut profile = UserProfile {
            display_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            dietary_preferences: "vegetarian".to_string(),
            created_at: Some("2026-01-01T00:00:00Z".to_string()),
            updated_at: None,
        };

        profile.merge(
            ProfileUpdate {
                dietary_preferences: Some("vegan".to_string()),
                ..Default::default()
            },
            "2026-02-01T00:00:00Z",
        );

        assert_eq!(profile.display_name, "Ada");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.dietary_preferences, "vegan");
        assert_eq!(profile.created_at.as_deref(), Some("2026-01-01T00:00:00Z"));
        assert_eq!(profile.updated_at.as_deref(), Some("2026-02-01T00:00:00Z"));
    }

    #[test]
    fn merge_sets_created_at_on_first_write() {
        let mut profile = UserProfile::default();
        profile.merge(
            ProfileUpdate {
                display_name: Some("Grace".to_string()),
                ..Default::default()
            },
            "2026-02-01T00:00:00Z",
        );

        assert_eq!(profile.created_at.as_deref(), Some("2026-02-01T00:00:00Z"));
    }
}
