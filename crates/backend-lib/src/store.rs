// ============================
// crates/backend-lib/src/store.rs
// ============================
//! Credential store abstraction with an in-memory implementation.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use signet_common::UserView;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;

/// A persisted user record. Created exactly once at registration;
/// never mutated or deleted by this service.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    /// Stored in normalized canonical form
    pub email: String,
    /// bcrypt PHC string; the plaintext is never persisted
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Sanitized view of this record, safe to return to clients
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Fields for a record that has not been assigned an id yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Trait for credential store backends.
///
/// `insert_unique` is the load-bearing operation: the uniqueness check
/// and the insert must happen atomically inside the store, because two
/// concurrent registrations for the same identifiers can both pass any
/// application-level pre-check.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a record by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    /// Look up a record matching either the username or the normalized email
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, AppError>;

    /// Insert a new record, enforcing username and email uniqueness.
    ///
    /// A uniqueness violation fails with [`AppError::DuplicateUser`],
    /// distinguishable from any infrastructure failure.
    async fn insert_unique(&self, user: NewUser) -> Result<UserRecord, AppError>;
}

/// In-memory implementation of the `CredentialStore` trait
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, UserRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn insert_unique(&self, user: NewUser) -> Result<UserRecord, AppError> {
        // Check and insert under one write lock: this is the atomic
        // uniqueness constraint the register flow depends on.
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AppError::DuplicateUser);
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$fakefakefakefakefakefakefakefakefakefakefakefakefakef"
                .to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new();

        let record = store
            .insert_unique(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(record.username, "alice");

        let found = store.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, record.id);

        assert!(store.find_by_email("bob@example.com").await.unwrap().is_none());

        let by_name = store
            .find_by_username_or_email("alice", "nobody@example.com")
            .await
            .unwrap();
        assert!(by_name.is_some());
    }

    #[tokio::test]
    async fn test_insert_unique_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store
            .insert_unique(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let result = store
            .insert_unique(new_user("bob", "alice@example.com"))
            .await;
        assert!(matches!(result, Err(AppError::DuplicateUser)));
    }

    #[tokio::test]
    async fn test_insert_unique_rejects_duplicate_username() {
        let store = MemoryStore::new();
        store
            .insert_unique(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let result = store
            .insert_unique(new_user("alice", "other@example.com"))
            .await;
        assert!(matches!(result, Err(AppError::DuplicateUser)));
    }

    #[tokio::test]
    async fn test_concurrent_identical_inserts_yield_one_record() {
        // The check-then-act race: both tasks may pass any pre-check,
        // but insert_unique itself must admit exactly one.
        let store = MemoryStore::new();

        let s1 = store.clone();
        let s2 = store.clone();
        let t1 = tokio::spawn(async move {
            s1.insert_unique(new_user("alice", "alice@example.com")).await
        });
        let t2 = tokio::spawn(async move {
            s2.insert_unique(new_user("alice", "alice@example.com")).await
        });

        let (r1, r2) = (t1.await.unwrap(), t2.await.unwrap());
        assert!(r1.is_ok() != r2.is_ok());
        let loser = if r1.is_ok() { r2 } else { r1 };
        assert!(matches!(loser, Err(AppError::DuplicateUser)));
    }

    #[test]
    fn test_view_excludes_password_hash() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            created_at: Utc::now(),
        };

        let view = record.view();
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password"));
        assert_eq!(view.username, "alice");
    }
}
