use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored user account. `password` always holds a PHC hash string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_fails_validation() {
        let req = SignUpRequest {
            username: "alice".into(),
            password: String::new(),
            email: "alice@example.com".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_username_is_allowed() {
        let req = SignUpRequest {
            username: String::new(),
            password: "secret".into(),
            email: String::new(),
        };
        assert!(req.validate().is_ok());
    }
}
