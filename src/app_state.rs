use sqlx::PgPool;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: Config,
}

impl AppState {
    pub fn new(db: PgPool, env: Config) -> Self {
        Self { db, env }
    }
}
