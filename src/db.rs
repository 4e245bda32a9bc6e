use std::path::{Path, PathBuf};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection,
};

use crate::error::AppError;

const CREATE_MEALS: &str = r#"
    CREATE TABLE IF NOT EXISTS meals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date_time TEXT NOT NULL,
        meal_type TEXT NOT NULL,
        food_name TEXT NOT NULL,
        calories INTEGER,
        notes TEXT,
        image_url TEXT
    )
"#;

/// Location of the embedded store. Holds no open connection: every
/// operation opens its own and drops it when done.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        Self {
            path: path.as_ref().to_path_buf(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn connect(&self) -> Result<SqliteConnection, AppError> {
        let conn = SqliteConnection::connect_with(&self.options).await?;
        Ok(conn)
    }

    pub async fn init_schema(&self) -> Result<(), AppError> {
        let mut conn = self.connect().await?;
        sqlx::query(CREATE_MEALS).execute(&mut conn).await?;
        conn.close().await?;
        tracing::debug!(path = %self.path.display(), "meals table ready");
        Ok(())
    }
}
