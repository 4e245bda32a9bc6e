use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub index_html: Arc<str>,
}

impl AppState {
    /// Reads the client page and prepares the store. Either failing aborts startup.
    pub async fn init(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let index_html = tokio::fs::read_to_string(&config.client_html)
            .await
            .with_context(|| format!("read {}", config.client_html.display()))?;

        let db = Database::new(&config.database_path);
        db.init_schema()
            .await
            .with_context(|| format!("initialize database at {}", db.path().display()))?;

        Ok(Self {
            db,
            config,
            index_html: index_html.into(),
        })
    }
}
