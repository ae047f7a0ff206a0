//! SQLite pool factory and migration tooling.

use std::str::FromStr;

use anyhow::Context;
use bookshelf_kernel::settings::DatabaseSettings;
use bookshelf_kernel::Migration;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open a connection pool for the configured SQLite database.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    tracing::info!(target: "bookshelf-db", url = %settings.url, "opening database pool");

    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Single-connection pool over a private in-memory database.
///
/// Every connection to `sqlite::memory:` opens a fresh database, so the pool
/// is pinned to one connection that is never recycled.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("failed to open in-memory database")?;

    Ok(pool)
}

/// Apply every migration not yet recorded in `schema_migrations`.
///
/// Migrations are keyed by `module/id` and run in the order given, each in
/// its own transaction. Returns the number of migrations applied.
pub async fn migrate(pool: &SqlitePool, migrations: &[(String, Migration)]) -> anyhow::Result<usize> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            id TEXT PRIMARY KEY NOT NULL,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create schema_migrations table")?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let key = format!("{}/{}", module, migration.id);

        let already: Option<(String,)> =
            sqlx::query_as("SELECT id FROM schema_migrations WHERE id = ?")
                .bind(&key)
                .fetch_optional(pool)
                .await
                .with_context(|| format!("failed to look up migration '{}'", key))?;
        if already.is_some() {
            tracing::debug!(target: "bookshelf-db", migration = %key, "already applied");
            continue;
        }

        let mut tx = pool.begin().await.context("failed to begin migration")?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("migration '{}' failed", key))?;
        sqlx::query("INSERT INTO schema_migrations (id) VALUES (?)")
            .bind(&key)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to record migration '{}'", key))?;
        tx.commit()
            .await
            .with_context(|| format!("failed to commit migration '{}'", key))?;

        tracing::info!(target: "bookshelf-db", migration = %key, "applied migration");
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf_migrations() -> Vec<(String, Migration)> {
        vec![(
            "shelf".to_string(),
            Migration {
                id: "001_init",
                up: "CREATE TABLE shelf (id INTEGER PRIMARY KEY, label TEXT NOT NULL);",
            },
        )]
    }

    #[tokio::test]
    async fn migrations_apply_once() {
        let pool = connect_in_memory().await.unwrap();

        assert_eq!(migrate(&pool, &shelf_migrations()).await.unwrap(), 1);
        assert_eq!(migrate(&pool, &shelf_migrations()).await.unwrap(), 0);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn failed_migration_is_not_recorded() {
        let pool = connect_in_memory().await.unwrap();
        let broken = vec![(
            "shelf".to_string(),
            Migration {
                id: "001_broken",
                up: "CREATE TABLE (",
            },
        )];

        let err = migrate(&pool, &broken).await.unwrap_err();
        assert!(err.to_string().contains("shelf/001_broken"));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn connect_creates_file_database() {
        let path = std::env::temp_dir().join(format!("bookshelf-db-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let settings = DatabaseSettings {
            url: format!("sqlite://{}", path.display()),
            ..DatabaseSettings::default()
        };

        let pool = connect(&settings).await.unwrap();
        migrate(&pool, &shelf_migrations()).await.unwrap();
        pool.close().await;

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
