use contracts::domain::a001_issue::aggregate::Issue;
use contracts::domain::common::AggregateRoot;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use std::path::Path;

use crate::shared::config::{self, Config};

/// Открыть БД по пути из конфигурации и подготовить схему
pub async fn initialize_database(config: &Config) -> anyhow::Result<DatabaseConnection> {
    let db_file = config::get_database_path(config);
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file
    } else {
        std::env::current_dir()?.join(db_file)
    };

    tracing::info!("Opening database: {}", absolute_path.display());
    let conn = Database::connect(build_sqlite_url(&absolute_path)).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Отдельная БД в памяти (одно соединение в пуле, иначе у каждого своя БД)
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Минимальный bootstrap схемы: таблица задач и индекс по проекту
pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let table = Issue::full_name();

    let check_table = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        table
    );
    let existing = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check_table))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", table);
        let create_table_sql = format!(
            r#"
            CREATE TABLE {table} (
                id TEXT PRIMARY KEY NOT NULL,
                issue_title TEXT NOT NULL,
                issue_text TEXT NOT NULL,
                created_by TEXT NOT NULL,
                project TEXT NOT NULL,
                assigned_to TEXT NOT NULL DEFAULT '',
                status_text TEXT NOT NULL DEFAULT '',
                open INTEGER NOT NULL DEFAULT 1,
                created_on TEXT NOT NULL,
                updated_on TEXT NOT NULL
            );
        "#
        );
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_table_sql,
        ))
        .await?;
    }

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        format!("CREATE INDEX IF NOT EXISTS idx_{table}_project ON {table} (project);"),
    ))
    .await?;

    Ok(())
}
