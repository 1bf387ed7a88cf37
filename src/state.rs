use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::store::{InMemoryStore, PgStore, TaskStore, UserStore};

/// Everything a request handler needs, built once at startup and shared
/// read-only across workers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: Arc<TokenIssuer>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        tokens: TokenIssuer,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            tasks,
            tokens: Arc::new(tokens),
            bcrypt_cost,
        }
    }

    /// State backed by Postgres, using the secret and cost from `config`.
    pub fn postgres(store: PgStore, config: &Config) -> Self {
        let store = Arc::new(store);
        Self::new(
            store.clone(),
            store,
            TokenIssuer::new(&config.jwt_secret),
            config.bcrypt_cost,
        )
    }

    /// State backed by a fresh [`InMemoryStore`], which is returned alongside
    /// so callers can inspect it.
    pub fn in_memory(jwt_secret: &str, bcrypt_cost: u32) -> (Self, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let state = Self::new(
            store.clone(),
            store.clone(),
            TokenIssuer::new(jwt_secret),
            bcrypt_cost,
        );
        (state, store)
    }
}
