use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string. Never serialized into responses or the identity
    /// cookie.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub push_token: Option<String>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn can_access_service(&self) -> bool {
        self.is_enabled
    }

    pub fn create_from_credentials(email: &str, password_hash: String) -> Self {
        Self {
            id: 0,
            email: email.to_string(),
            password_hash,
            push_token: None,
            is_enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
