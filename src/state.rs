use std::sync::Arc;

use acquisitions_config::{CookieConfig, CorsConfig, JwtConfig, SecurityConfig};
use acquisitions_core::AppError;
use acquisitions_db::{InMemoryUserStore, PgUserStore, UserStore, init_db_pool};
use acquisitions_guard::{DecisionEngine, LocalDecisionEngine, SlidingWindowStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub engine: Arc<dyn DecisionEngine>,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    pub security_config: SecurityConfig,
}

impl AppState {
    /// State with env-loaded configuration around the given collaborators.
    pub fn new(users: Arc<dyn UserStore>, engine: Arc<dyn DecisionEngine>) -> Self {
        Self {
            users,
            engine,
            jwt_config: JwtConfig::from_env(),
            cookie_config: CookieConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            security_config: SecurityConfig::from_env(),
        }
    }
}

/// Builds the application state. Uses PostgreSQL when `DATABASE_URL` is set,
/// the in-memory store otherwise. `windows` backs the local decision engine.
pub async fn init_app_state(windows: SlidingWindowStore) -> Result<AppState, AppError> {
    let users: Arc<dyn UserStore> = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => {
            let pool = init_db_pool(&url).await?;
            Arc::new(PgUserStore::new(pool))
        }
        _ => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory and lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let engine = Arc::new(LocalDecisionEngine::new(windows));

    Ok(AppState::new(users, engine))
}
