use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for user persistence
///
/// Users are append-only: registration inserts, logins read. There is no
/// update or delete surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user (id and created_at are assigned by the store)
    async fn insert(&self, user: NewUser) -> UserResult<User>;

    /// Look up a user by id
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Look up a user by email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> UserResult<User> {
        let mut state = self.state.write().await;

        // Mirrors the unique index on users.email
        if state.users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        state.next_id += 1;
        let user = User {
            id: state.next_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}
