//! # Acquisitions DB
//!
//! User persistence for the Acquisitions API.
//!
//! Handlers only see the [`UserStore`] capability. Two implementations ship:
//!
//! - [`PgUserStore`]: PostgreSQL via SQLx, used when `DATABASE_URL` is set
//! - [`InMemoryUserStore`]: process-local map, used in tests and local runs
//!   without a database
//!
//! # Example
//!
//! ```ignore
//! use acquisitions_db::{init_db_pool, PgUserStore, UserStore};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store = PgUserStore::new(pool);
//! let users = store.list().await?;
//! ```

pub mod memory;
pub mod postgres;

use acquisitions_core::AppError;
use acquisitions_models::{NewUser, User, UserChanges, UserRecord};
use anyhow::Context;
use async_trait::async_trait;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;
pub use sqlx::PgPool;

pub const DUPLICATE_EMAIL: &str = "User with this email already exists";

/// Storage capability for user accounts.
///
/// Lookups that find nothing return `Ok(None)` / `Ok(false)`; deciding whether
/// that is a 404 is left to the caller.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Fails with 409 when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Applies `changes` and bumps `updated_at`. Fails with 409 when the new
    /// email belongs to another user.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

/// Connects to PostgreSQL and applies pending migrations.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, AppError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
        .map_err(AppError::database)?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")
        .map_err(AppError::database)?;

    tracing::info!("Database connection established");
    Ok(pool)
}
