use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account.
///
/// `password_hash` holds the bcrypt representation and is never serialised, so a
/// `User` can be returned to clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier, assigned at signup and immutable afterwards.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login key; unique across all users, stored normalised.
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new account record with a fresh identifier.
    ///
    /// `email` is expected to be normalised already and `password_hash` must come from
    /// the password service, never a plaintext.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Canonical form of an email used for lookups and uniqueness.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "$2b$04$abcdefghijklmnopqrstuv".to_string(),
        );
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["name"], "Ada");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("$2b$"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.com "), "a@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }
}
