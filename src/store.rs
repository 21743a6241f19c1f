//! Store lifecycle: open the SQLite pool and make sure `userDetails` exists.

use crate::config::Settings;
use crate::error::AppError;
use crate::sql::USER_TABLE;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open the pool described by `settings`. Creates the database file if it is missing.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;
    tracing::info!(url = %settings.database_url, max_connections = settings.max_connections, "database pool opened");
    Ok(pool)
}

/// Create `userDetails` if not exists. Every column except `id` is required.
pub async fn ensure_user_table(pool: &SqlitePool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{}" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            company_name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            zip INTEGER NOT NULL,
            email TEXT NOT NULL,
            web TEXT NOT NULL,
            age INTEGER NOT NULL
        )
        "#,
        USER_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}
