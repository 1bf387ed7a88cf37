pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::User;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, spend_verification_time, verify_password};
pub use token::{Claims, TokenIssuer, VerificationError};

pub const MISSING_FIELDS: &str = "Missing fields";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Treats an empty string the same as an absent field.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Raw payload of `POST /register`. Every field is optional at the JSON level
/// so that a missing field produces our own error body.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A registration whose fields are all present.
#[derive(Debug, Validate)]
pub struct Registration {
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Checks presence, then format.
    pub fn into_registration(self) -> Result<Registration, AppError> {
        let (name, email, password) = match (
            present(self.name),
            present(self.email),
            present(self.password),
        ) {
            (Some(name), Some(email), Some(password)) => (name, email, password),
            _ => return Err(AppError::Validation(MISSING_FIELDS.into())),
        };

        let registration = Registration {
            name,
            email,
            password,
        };
        registration.validate()?;
        Ok(registration)
    }
}

/// Raw payload of `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(email, password)` if both are present.
    pub fn into_credentials(self) -> Result<(String, String), AppError> {
        match (present(self.email), present(self.password)) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::Validation(MISSING_FIELDS.into())),
        }
    }
}

/// Response body for a successful register or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The signed bearer token.
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("Ann", "ann@x.com", "pw123").into_registration().is_ok());

        let missing = RegisterRequest {
            email: Some("ann@x.com".into()),
            password: Some("pw123".into()),
            ..Default::default()
        };
        assert_eq!(message(missing.into_registration().unwrap_err()), MISSING_FIELDS);

        let empty = register("Ann", "", "pw123");
        assert_eq!(message(empty.into_registration().unwrap_err()), MISSING_FIELDS);

        let bad_email = register("Ann", "annx.com", "pw123");
        assert_eq!(
            message(bad_email.into_registration().unwrap_err()),
            "Invalid email address"
        );

        let long_name = register(&"a".repeat(101), "ann@x.com", "pw123");
        assert!(long_name.into_registration().is_ok());
    }

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: Some("ann@x.com".into()),
            password: Some("pw123".into()),
        };
        assert_eq!(
            ok.into_credentials().unwrap(),
            ("ann@x.com".to_string(), "pw123".to_string())
        );

        let missing = LoginRequest {
            email: Some("ann@x.com".into()),
            password: None,
        };
        assert_eq!(message(missing.into_credentials().unwrap_err()), MISSING_FIELDS);
    }
}
