//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::models::quote::normalize_tags;

/// User profile as stored.
///
/// Serializes with the stored field names, including the password hash
/// and the `__v` revision counter; run the record through
/// [`crate::sanitize::sanitize_user`] before sending it anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Unique, stored lowercase
    pub email: String,
    /// Password hash (never the plain password)
    #[serde(rename = "password")]
    pub password_hash: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub favorite_categories: Vec<String>,
    /// Favorite quote IDs, oldest first, no repeats
    #[serde(default)]
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    /// Bumped on every stored update
    #[serde(rename = "__v", default)]
    pub version: u32,
}

impl User {
    /// Plain JSON record of the stored user.
    pub fn to_record(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "user serialized to non-object: {}",
                other
            ))),
        }
    }

    /// Returns `false` if the quote was already a favorite.
    pub fn add_favorite(&mut self, quote_id: Uuid) -> bool {
        if self.favorites.contains(&quote_id) {
            return false;
        }
        self.favorites.push(quote_id);
        true
    }

    /// Returns `false` if the quote was not a favorite.
    pub fn remove_favorite(&mut self, quote_id: Uuid) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|id| *id != quote_id);
        self.favorites.len() != before
    }
}

/// Fields needed to create a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub favorite_categories: Vec<String>,
}

/// Profile fields a user may change about themselves.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: Option<String>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,
    #[validate(length(max = 20, message = "At most 20 favorite categories are allowed"))]
    pub favorite_categories: Option<Vec<String>>,
}

impl UpdateProfileInput {
    /// Trim text fields and tidy categories. Call before validating.
    pub fn normalized(self) -> Self {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        Self {
            display_name: trim(self.display_name),
            bio: trim(self.bio),
            location: trim(self.location),
            favorite_categories: self.favorite_categories.map(normalize_tags),
        }
    }

    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.display_name {
            user.display_name = name;
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = self.location {
            user.location = Some(location);
        }
        if let Some(categories) = self.favorite_categories {
            user.favorite_categories = categories;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            display_name: "Ada".to_string(),
            bio: None,
            location: None,
            favorite_categories: vec![],
            favorites: vec![],
            created_at: Utc::now(),
            version: 0,
        }
    }

    #[test]
    fn test_record_uses_stored_field_names() {
        let record = make_user().to_record().unwrap();
        assert_eq!(record["password"], "hash");
        assert_eq!(record["__v"], 0);
        assert_eq!(record["displayName"], "Ada");
        assert!(!record.contains_key("passwordHash"));
    }

    #[test]
    fn test_favorites_stay_distinct() {
        let mut user = make_user();
        let quote = Uuid::new_v4();

        assert!(user.add_favorite(quote));
        assert!(!user.add_favorite(quote));
        assert_eq!(user.favorites, vec![quote]);

        assert!(user.remove_favorite(quote));
        assert!(!user.remove_favorite(quote));
        assert!(user.favorites.is_empty());
    }

    #[test]
    fn test_profile_update_only_touches_given_fields() {
        let mut user = make_user();
        UpdateProfileInput {
            bio: Some("Reads a lot".to_string()),
            favorite_categories: Some(vec!["wisdom".into(), "wisdom".into(), "grit".into()]),
            ..Default::default()
        }
        .normalized()
        .apply(&mut user);

        assert_eq!(user.display_name, "Ada");
        assert_eq!(user.bio.as_deref(), Some("Reads a lot"));
        assert_eq!(user.favorite_categories, vec!["wisdom", "grit"]);
    }

    #[test]
    fn test_blank_display_name_fails_after_normalizing() {
        let input = UpdateProfileInput {
            display_name: Some("   ".to_string()),
            location: Some("  Lisbon ".to_string()),
            ..Default::default()
        }
        .normalized();

        assert_eq!(input.location.as_deref(), Some("Lisbon"));
        assert!(input.validate().is_err());
    }
}
