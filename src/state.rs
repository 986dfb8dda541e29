use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(&config.database_url).await?;
        db::bootstrap(&db).await?;

        Ok(Self {
            db,
            config: Arc::new(config),
        })
    }

    /// In-memory store with the schema applied and the given admin secret.
    #[cfg(test)]
    pub async fn for_tests(admin_token: &str) -> Self {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            admin_token: admin_token.into(),
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").into(),
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self {
            db: db::memory_pool().await,
            config,
        }
    }
}
