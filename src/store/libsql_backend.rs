//! libSQL backend: async `LeadStore` implementation.
//!
//! Stores the whole lead list as one JSON blob under a single key in a
//! key-value table. Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use libsql::{params, Connection, Database as LibSqlDatabase};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::store::traits::{Lead, LeadStore};

/// The single slot the serialized lead list lives under.
const LEADS_KEY: &str = "leads";

/// libSQL lead store.
///
/// Holds a single connection reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlLeadStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlLeadStore {
    /// Open (or create) a local database file and initialize the schema.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Open(format!("Failed to create database directory: {e}")))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Open(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Open(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        info!(path = %path.display(), "Lead store opened");
        Ok(store)
    }

    /// Create an in-memory store (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Open(format!("Failed to create in-memory database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Open(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        Ok(store)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        self.conn()
            .execute(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| StoreError::Query(format!("init_schema: {e}")))?;
        Ok(())
    }

    /// Read the raw stored blob for a key, if any.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut rows = self
            .conn()
            .query("SELECT value FROM kv_store WHERE key = ?1", params![key])
            .await
            .map_err(|e| StoreError::Query(format!("get_raw: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let value: String = row
                    .get(0)
                    .map_err(|e| StoreError::Query(format!("get_raw: {e}")))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Query(format!("get_raw: {e}"))),
        }
    }

    /// Rewrite the stored blob for a key wholesale.
    async fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, now],
            )
            .await
            .map_err(|e| StoreError::Query(format!("put_raw: {e}")))?;
        Ok(())
    }

    #[cfg(test)]
    async fn put_raw_for_test(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put_raw(key, value).await
    }
}

#[async_trait]
impl LeadStore for LibSqlLeadStore {
    async fn load(&self) -> Result<Vec<Lead>, StoreError> {
        let Some(blob) = self.get_raw(LEADS_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Lead>>(&blob) {
            Ok(leads) => Ok(leads),
            Err(e) => {
                warn!("Stored lead list is unparseable, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    async fn record(&self, lead: Lead) -> Result<(), StoreError> {
        let mut leads = self.load().await?;
        leads.insert(0, lead);
        let blob = serde_json::to_string(&leads)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put_raw(LEADS_KEY, &blob).await?;
        info!(count = leads.len(), "Lead recorded");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.conn()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![LEADS_KEY])
            .await
            .map_err(|e| StoreError::Query(format!("clear: {e}")))?;
        info!("Lead store cleared");
        Ok(())
    }
}
