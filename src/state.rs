use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::db;
use crate::storage::{MemoryStore, PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match config.storage {
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is not set")?;
                let pool = db::connect(url).await?;
                db::run_migrations(&pool).await;
                info!("using postgres store");
                Arc::new(PgStore::new(pool)) as Arc<dyn Store>
            }
            StorageBackend::Memory => {
                warn!("using in-memory store; data is lost on restart");
                Arc::new(MemoryStore::new()) as Arc<dyn Store>
            }
        };

        Ok(Self { store, config })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::SessionConfig;

        let config = Arc::new(AppConfig {
            storage: StorageBackend::Memory,
            database_url: None,
            host: "127.0.0.1".into(),
            port: 0,
            session: SessionConfig::default(),
        });
        Self {
            store: Arc::new(MemoryStore::new()),
            config,
        }
    }
}
