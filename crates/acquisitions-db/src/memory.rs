use std::collections::BTreeMap;
use std::sync::Arc;

use acquisitions_core::AppError;
use acquisitions_models::{NewUser, User, UserChanges, UserRecord};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{DUPLICATE_EMAIL, UserStore};

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, UserRecord>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|r| r.user.email == email && Some(r.user.id) != except)
    }
}

/// Process-local [`UserStore`]. Ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&user.email, None) {
            return Err(AppError::conflict(anyhow!(DUPLICATE_EMAIL)));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let created = User {
            id: inner.next_id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(
            created.id,
            UserRecord {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|r| r.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|r| r.user.clone()))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().map(|r| r.user.clone()).collect())
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.write().await;
        if let Some(email) = &changes.email {
            if inner.email_taken(email, Some(id)) {
                return Err(AppError::conflict(anyhow!(DUPLICATE_EMAIL)));
            }
        }

        let Some(record) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            record.user.name = name;
        }
        if let Some(email) = changes.email {
            record.user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            record.password_hash = hash;
        }
        if let Some(role) = changes.role {
            record.user.role = role;
        }
        record.user.updated_at = Utc::now();
        Ok(Some(record.user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.remove(&id).is_some())
    }
}
