// Account service - user signup
use std::sync::Arc;

use crate::db::{HospitalStore, StoreError};
use crate::error::{AppError, Result};
use crate::models::{SignUpRequest, User};
use crate::security;

pub struct AccountService {
    store: Arc<dyn HospitalStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// The existence check and the insert are separate store calls; the
    /// store's unique constraint on `username` decides any race between them.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<()> {
        let taken = self
            .store
            .username_exists(&request.username)
            .await
            .map_err(|e| AppError::store("Error checking username availability", e))?;
        if taken {
            return Err(AppError::UsernameTaken);
        }

        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || security::hash_password(&password))
            .await
            .map_err(|e| AppError::internal("Error hashing password", e))?
            .map_err(|e| AppError::internal("Error hashing password", e))?;

        let user = User {
            username: request.username,
            password: password_hash,
            email: request.email,
        };

        match self.store.insert_user(&user).await {
            Ok(()) => {
                tracing::info!(username = %user.username, "User created");
                Ok(())
            }
            Err(StoreError::DuplicateKey(_)) => Err(AppError::UsernameTaken),
            Err(e) => Err(AppError::store("Error creating user", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;

    fn request(username: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.to_string(),
            password: "hunter2".to_string(),
            email: format!("{}@example.com", username),
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_hashed_password() {
        let store = Arc::new(InMemoryStore::new());
        let service = AccountService::new(store.clone());

        service.sign_up(request("alice")).await.unwrap();

        let users = store.users().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
        assert_ne!(users[0].password, "hunter2");
        assert!(security::verify_password("hunter2", &users[0].password).unwrap());
    }

    #[tokio::test]
    async fn test_sign_up_is_case_sensitive() {
        let store = Arc::new(InMemoryStore::new());
        let service = AccountService::new(store.clone());

        service.sign_up(request("alice")).await.unwrap();
        service.sign_up(request("Alice")).await.unwrap();

        assert_eq!(store.users().await.len(), 2);
    }

    #[tokio::test]
    async fn test_sign_up_taken() {
        let store = Arc::new(InMemoryStore::new());
        let service = AccountService::new(store.clone());

        service.sign_up(request("alice")).await.unwrap();
        let err = service.sign_up(request("alice")).await.unwrap_err();

        assert!(matches!(err, AppError::UsernameTaken));
        assert_eq!(store.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_store_failure() {
        let store = Arc::new(InMemoryStore::new());
        store.set_unavailable(true);
        let service = AccountService::new(store);

        let err = service.sign_up(request("alice")).await.unwrap_err();
        assert_eq!(err.to_string(), "Error checking username availability");
    }
}
