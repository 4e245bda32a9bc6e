use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_PATH: &str = "meal_records.db";
pub const DEFAULT_CLIENT_HTML: &str = "client.html";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding the `meals` table; created on first start.
    pub database_path: PathBuf,
    /// Page served at `/`.
    pub client_html: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.into(),
            client_html: DEFAULT_CLIENT_HTML.into(),
        }
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
