use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub profile_image: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn create_default(username: &str, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            profile_image: default_profile_image(username),
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Avatar assigned until the user uploads a profile picture
pub fn default_profile_image(username: &str) -> String {
    format!("{}{username}", consts::DEFAULT_AVATAR_URL)
}

/// Public slice of a [User] embedded in admin appointment listings
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPhoto {
    pub id: i64,
    #[serde(skip)]
    pub user_app_id: i64,
    pub image_url: String,
    pub uploaded_at: DateTime<Utc>,
}
