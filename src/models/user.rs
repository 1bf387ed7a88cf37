use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The public view of a user. This is the only user shape that is ever
/// serialized into a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// A stored user together with its password hash, as needed by login.
///
/// Deliberately not `Serialize`.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserRecord {
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Data required to insert a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_has_no_password_hash() {
        let record = UserRecord {
            id: 7,
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
        };

        let json = serde_json::to_value(record.into_public()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 7, "name": "Ann", "email": "ann@x.com" })
        );
    }
}
