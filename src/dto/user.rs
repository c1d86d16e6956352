use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prefix prepended to the identifier to build a user's display name.
pub const USER_NAME_PREFIX: &str = "User";

/// Synthetic user record returned by `GET /api/user/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Caller-supplied identifier, echoed back unchanged.
    pub id: i64,
    /// Display name derived from the identifier.
    pub name: String,
}

impl User {
    /// Build the record for `id`; the name is always `User{id}`.
    pub fn from_id(id: i64) -> Self {
        Self {
            id,
            name: format!("{USER_NAME_PREFIX}{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_prefix_and_id() {
        assert_eq!(User::from_id(1).name, "User1");
        assert_eq!(User::from_id(0).name, "User0");
        assert_eq!(User::from_id(-7).name, "User-7");
        assert_eq!(User::from_id(i64::MAX).name, format!("User{}", i64::MAX));
    }

    #[test]
    fn serializes_as_flat_object() {
        let json = serde_json::to_value(User::from_id(42)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 42, "name": "User42"}));
    }
}
