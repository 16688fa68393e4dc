//! Schema Migrations
//!
//! `database/migrations/NNN_name.sql` files are embedded at compile time and
//! applied in id order. Each file runs in its own transaction together with
//! its bookkeeping row in `migrations`, so a failed file leaves no trace and
//! is retried on the next start.

use anyhow::Context;
use sqlx::PgPool;
use sqlx::migrate::{Migration, Migrator};
use std::collections::HashSet;

static MIGRATOR: Migrator = sqlx::migrate!("../../../database/migrations");

const CREATE_MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS migrations (
        id BIGINT PRIMARY KEY,
        filename TEXT NOT NULL,
        applied_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// Apply pending migrations; returns how many ran
pub async fn run(pool: &PgPool) -> anyhow::Result<usize> {
    sqlx::query(CREATE_MIGRATIONS_TABLE)
        .execute(pool)
        .await
        .context("failed to create migrations table")?;

    let applied: HashSet<i64> = sqlx::query_scalar::<_, i64>("SELECT id FROM migrations")
        .fetch_all(pool)
        .await
        .context("failed to read applied migrations")?
        .into_iter()
        .collect();

    let mut pending: Vec<&Migration> = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .collect();
    pending.sort_by_key(|m| m.version);

    for migration in &pending {
        apply(pool, migration).await?;
    }

    Ok(pending.len())
}

async fn apply(pool: &PgPool, migration: &Migration) -> anyhow::Result<()> {
    let filename = filename(migration.version, &migration.description);

    let mut tx = pool.begin().await?;

    sqlx::raw_sql(&migration.sql)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to execute migration {filename}"))?;

    sqlx::query("INSERT INTO migrations (id, filename) VALUES ($1, $2)")
        .bind(migration.version)
        .bind(&filename)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to record migration {filename}"))?;

    tx.commit().await?;

    tracing::info!(id = migration.version, filename = %filename, "Migration applied");

    Ok(())
}

/// Rebuild the source file name; the description has `_` replaced by spaces
fn filename(version: i64, description: &str) -> String {
    format!("{version:03}_{}.sql", description.replace(' ', "_"))
}
