//! User model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// User entity, one row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub email: String,
}

/// User update payload
///
/// Only `name` and `email` are mutable. Any other field in the request body
/// (`id`, timestamps) is ignored; the id always comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub email: String,
}

/// `name` may be absent or `null`; both mean an empty name.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_rfc3339_timestamps() {
        let created_at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let user = User {
            id: 7,
            name: "name".to_string(),
            email: "hoge@example.com".to_string(),
            created_at,
            updated_at: created_at,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "name");
        assert_eq!(value["email"], "hoge@example.com");
        assert_eq!(value["created_at"], "2024-01-02T03:04:05Z");
        assert_eq!(value["updated_at"], "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_update_user_ignores_record_fields() {
        let body = r#"{
            "id": 99,
            "name": "name2",
            "email": "hoge2@example.com",
            "created_at": "2024-01-02T03:04:05Z"
        }"#;

        let changes: UpdateUser = serde_json::from_str(body).unwrap();
        assert_eq!(changes.name, "name2");
        assert_eq!(changes.email, "hoge2@example.com");
    }

    #[test]
    fn test_new_user_name_defaults_to_empty() {
        let new_user: NewUser = serde_json::from_str(r#"{"email":"hoge@example.com"}"#).unwrap();
        assert_eq!(new_user.name, "");
    }

    #[test]
    fn test_null_name_is_empty() {
        let new_user: NewUser =
            serde_json::from_str(r#"{"name":null,"email":"hoge@example.com"}"#).unwrap();
        assert_eq!(new_user.name, "");

        let changes: UpdateUser =
            serde_json::from_str(r#"{"name":null,"email":"hoge@example.com"}"#).unwrap();
        assert_eq!(changes.name, "");
    }
}
