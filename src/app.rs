//! Application bootstrap: store selection, migrations, module lifecycle.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use bookshelf_kernel::settings::{DatabaseBackend, Settings};
use bookshelf_kernel::{InitCtx, ModuleRegistry};
use sqlx::SqlitePool;

use crate::modules;
use crate::modules::books::repository::{
    BookRepository, InMemoryBookRepository, SqliteBookRepository,
};

/// A fully initialized application, ready to serve.
pub struct Application {
    settings: Settings,
    registry: ModuleRegistry,
    pool: Option<SqlitePool>,
}

impl Application {
    /// Open the store, apply pending migrations and initialize every module.
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let (registry, pool) = open(&settings).await?;

        if let Some(pool) = &pool {
            apply_migrations(pool, &registry).await?;
        }

        let ctx = InitCtx {
            settings: &settings,
        };
        registry.init_modules(&ctx).await?;

        Ok(Self {
            settings,
            registry,
            pool,
        })
    }

    /// Apply pending migrations and return how many ran.
    pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
        let (registry, pool) = open(settings).await?;
        let Some(pool) = pool else {
            tracing::info!("memory backend has no schema; nothing to migrate");
            return Ok(0);
        };

        let applied = apply_migrations(&pool, &registry).await?;
        pool.close().await;
        Ok(applied)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The complete HTTP router, without binding a listener.
    pub fn router(&self) -> Router {
        bookshelf_http::build_router(&self.registry)
    }

    /// Start modules, serve until a shutdown signal, then stop modules.
    pub async fn run(self) -> anyhow::Result<()> {
        let ctx = InitCtx {
            settings: &self.settings,
        };
        self.registry.start_modules(&ctx).await?;

        let served = bookshelf_http::start_server(&self.registry, &self.settings).await;

        self.registry.stop_modules().await?;
        if let Some(pool) = &self.pool {
            pool.close().await;
        }

        served
    }
}

async fn open(settings: &Settings) -> anyhow::Result<(ModuleRegistry, Option<SqlitePool>)> {
    let (repository, pool) = match settings.database.backend {
        DatabaseBackend::Sqlite => {
            let pool = bookshelf_db::connect(&settings.database)
                .await
                .context("failed to open book store")?;
            let repository: Arc<dyn BookRepository> =
                Arc::new(SqliteBookRepository::new(pool.clone()));
            (repository, Some(pool))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("using in-memory book store; data is lost on restart");
            let repository: Arc<dyn BookRepository> = Arc::new(InMemoryBookRepository::new());
            (repository, None)
        }
    };

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, repository);

    Ok((registry, pool))
}

async fn apply_migrations(pool: &SqlitePool, registry: &ModuleRegistry) -> anyhow::Result<usize> {
    let migrations = registry.collect_migrations();
    let applied = bookshelf_db::migrate(pool, &migrations).await?;
    tracing::info!(applied, total = migrations.len(), "migrations complete");
    Ok(applied)
}
