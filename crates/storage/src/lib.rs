use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tokio::sync::Mutex;
use tracing::debug;

/// A named slot holding one serialized value. Writes overwrite.
#[async_trait]
pub trait SlotStore: Send + Sync {
    async fn write_slot(&self, key: &str, value: &str) -> Result<()>;
    async fn read_slot(&self, key: &str) -> Result<Option<String>>;
    async fn clear_slot(&self, key: &str) -> Result<bool>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredSlot {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `:memory:` opens its own database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn load_slot(&self, key: &str) -> Result<Option<StoredSlot>> {
        let row = sqlx::query("SELECT key, value, updated_at FROM kv_slots WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read slot '{key}'"))?;
        Ok(row.map(|r| StoredSlot {
            key: r.get::<String, _>(0),
            value: r.get::<String, _>(1),
            updated_at: r.get::<DateTime<Utc>, _>(2),
        }))
    }
}

#[async_trait]
impl SlotStore for Storage {
    async fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO kv_slots (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to write slot '{key}'"))?;
        debug!(key, bytes = value.len(), "slot written");
        Ok(())
    }

    async fn read_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_slot(key).await?.map(|slot| slot.value))
    }

    async fn clear_slot(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv_slots WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to clear slot '{key}'"))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Process-local slot store, used where no database is configured.
#[derive(Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn read_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn clear_slot(&self, key: &str) -> Result<bool> {
        Ok(self.slots.lock().await.remove(key).is_some())
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
