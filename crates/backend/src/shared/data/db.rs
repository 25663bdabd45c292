use std::path::Path;

use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_UPLOAD_STAGING_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS u510_upload_staging (
        key TEXT PRIMARY KEY NOT NULL,
        format TEXT NOT NULL,
        file_name TEXT,
        row_count INTEGER NOT NULL DEFAULT 0,
        rows_json TEXT NOT NULL,
        stored_at TEXT NOT NULL
    );
"#;

/// Opens (or creates) the staging database and makes it the global connection.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening staging database at {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Creates the tables this service writes to, if missing.
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        CREATE_UPLOAD_STAGING_TABLE.to_string(),
    ))
    .await?;
    Ok(())
}

pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}

/// Fresh in-memory database with the schema applied
#[cfg(test)]
pub async fn connect_in_memory() -> DatabaseConnection {
    let conn = Database::connect("sqlite::memory:").await.unwrap();
    bootstrap_schema(&conn).await.unwrap();
    conn
}
