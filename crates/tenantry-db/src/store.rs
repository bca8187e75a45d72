//! SurrealDB implementation of the key-value [`Store`].
//!
//! A transaction buffers its writes in memory and applies them in a single
//! `BEGIN TRANSACTION ... COMMIT TRANSACTION` query on commit. Read-write
//! transactions hold the store's writer lock from `begin` until they are
//! committed, rolled back or dropped, which serializes check-then-write
//! sequences across callers sharing the lock. Keys written with
//! [`Transaction::insert`] are created inside the commit query and abort
//! it if they already exist, which keeps writers that do not share the
//! lock (other stores, other processes) from both claiming the same key.

use std::collections::BTreeMap;
use std::sync::Arc;

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tenantry_core::error::TenantryResult;
use tenantry_core::kv::{Store, Transaction};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, warn};

use crate::error::DbError;

const COMMIT_QUERY: &str = "\
BEGIN TRANSACTION;
FOR $entry IN $creates {
    IF record::exists(type::record('kv', $entry.path)) {
        THROW 'key already exists: ' + $entry.path;
    };
    CREATE type::record('kv', $entry.path) SET path = $entry.path, body = $entry.body;
};
FOR $entry IN $puts {
    UPSERT type::record('kv', $entry.path) SET path = $entry.path, body = $entry.body;
};
FOR $path IN $deletes {
    DELETE type::record('kv', $path);
};
COMMIT TRANSACTION;
";

/// Sort a failed commit into a conflict (another writer owns a key this
/// transaction wanted to create, or the engine detected overlapping
/// writes) or a plain commit failure.
fn commit_error(message: String) -> DbError {
    let lower = message.to_lowercase();
    if lower.contains("already exists") || lower.contains("conflict") {
        DbError::Conflict(message)
    } else {
        DbError::Commit(message)
    }
}

/// A buffered write.
#[derive(Debug, Clone)]
enum Pending {
    Put(String),
    Create(String),
    Delete,
}

impl Pending {
    fn body(&self) -> Option<&String> {
        match self {
            Pending::Put(body) | Pending::Create(body) => Some(body),
            Pending::Delete => None,
        }
    }
}

/// Row struct for entry reads.
#[derive(Debug, SurrealValue)]
struct EntryRow {
    path: String,
    body: String,
}

/// Transactional key-value store over a SurrealDB connection.
pub struct SurrealStore<C: Connection> {
    db: Surreal<C>,
    writer: Arc<Mutex<()>>,
}

impl<C: Connection> SurrealStore<C> {
    /// A store with a writer lock of its own.
    pub fn new(db: Surreal<C>) -> Self {
        Self::with_writer(db, Arc::new(Mutex::new(())))
    }

    /// A store whose write transactions serialize with every other store
    /// built on the same `writer`.
    pub fn with_writer(db: Surreal<C>, writer: Arc<Mutex<()>>) -> Self {
        Self { db, writer }
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<C> {
        &self.db
    }
}

impl<C: Connection> Clone for SurrealStore<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<C: Connection> Store for SurrealStore<C> {
    type Tx = SurrealTransaction<C>;

    async fn begin(&self) -> TenantryResult<SurrealTransaction<C>> {
        let guard = Arc::clone(&self.writer).lock_owned().await;
        debug!("Write transaction started");
        Ok(SurrealTransaction {
            db: self.db.clone(),
            pending: BTreeMap::new(),
            writer: Some(guard),
        })
    }

    async fn begin_read(&self) -> TenantryResult<SurrealTransaction<C>> {
        Ok(SurrealTransaction {
            db: self.db.clone(),
            pending: BTreeMap::new(),
            writer: None,
        })
    }
}

/// A transaction against a [`SurrealStore`].
pub struct SurrealTransaction<C: Connection> {
    db: Surreal<C>,
    pending: BTreeMap<String, Pending>,
    /// Held for the lifetime of a read-write transaction.
    writer: Option<OwnedMutexGuard<()>>,
}

impl<C: Connection> SurrealTransaction<C> {
    pub fn is_read_only(&self) -> bool {
        self.writer.is_none()
    }

    fn ensure_writable(&self) -> Result<(), DbError> {
        if self.is_read_only() {
            return Err(DbError::ReadOnly);
        }
        Ok(())
    }

    /// Buffered writes as `(creates, puts, deletes)` query parameters.
    fn split_pending(&self) -> (serde_json::Value, serde_json::Value, serde_json::Value) {
        let mut creates = Vec::new();
        let mut puts = Vec::new();
        let mut deletes = Vec::new();
        for (path, write) in &self.pending {
            match write {
                Pending::Create(body) => {
                    creates.push(serde_json::json!({ "path": path, "body": body }))
                }
                Pending::Put(body) => puts.push(serde_json::json!({ "path": path, "body": body })),
                Pending::Delete => deletes.push(serde_json::Value::String(path.clone())),
            }
        }
        (
            serde_json::Value::Array(creates),
            serde_json::Value::Array(puts),
            serde_json::Value::Array(deletes),
        )
    }
}

impl<C: Connection> Transaction for SurrealTransaction<C> {
    async fn get(&mut self, key: &str) -> TenantryResult<Option<String>> {
        if let Some(pending) = self.pending.get(key) {
            return Ok(pending.body().cloned());
        }

        let mut result = self
            .db
            .query("SELECT path, body FROM type::record('kv', $path)")
            .bind(("path", key.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EntryRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|row| row.body))
    }

    async fn scan_prefix(&mut self, prefix: &str) -> TenantryResult<Vec<(String, String)>> {
        let mut result = self
            .db
            .query(
                "SELECT path, body FROM kv \
                 WHERE string::starts_with(path, $prefix) \
                 ORDER BY path ASC",
            )
            .bind(("prefix", prefix.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EntryRow> = result.take(0).map_err(DbError::from)?;
        let mut entries: BTreeMap<String, String> =
            rows.into_iter().map(|row| (row.path, row.body)).collect();

        for (path, write) in self.pending.range(prefix.to_string()..) {
            if !path.starts_with(prefix) {
                break;
            }
            match write.body() {
                Some(body) => {
                    entries.insert(path.clone(), body.clone());
                }
                None => {
                    entries.remove(path);
                }
            }
        }

        Ok(entries.into_iter().collect())
    }

    fn put(&mut self, key: &str, value: String) -> TenantryResult<()> {
        self.ensure_writable()?;
        self.pending.insert(key.to_string(), Pending::Put(value));
        Ok(())
    }

    fn insert(&mut self, key: &str, value: String) -> TenantryResult<()> {
        self.ensure_writable()?;
        // Recreating a key this transaction deleted replaces the record.
        let write = match self.pending.get(key) {
            Some(Pending::Delete) => Pending::Put(value),
            _ => Pending::Create(value),
        };
        self.pending.insert(key.to_string(), write);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> TenantryResult<()> {
        self.ensure_writable()?;
        self.pending.insert(key.to_string(), Pending::Delete);
        Ok(())
    }

    async fn commit(self) -> TenantryResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let (creates, puts, deletes) = self.split_pending();
        let writes = self.pending.len();

        let response = self
            .db
            .query(COMMIT_QUERY)
            .bind(("creates", creates))
            .bind(("puts", puts))
            .bind(("deletes", deletes))
            .await
            .map_err(|e| log_commit_failure(commit_error(e.to_string()), writes))?;

        response
            .check()
            .map_err(|e| log_commit_failure(commit_error(e.to_string()), writes))?;

        debug!(writes, "Transaction committed");
        Ok(())
    }

    async fn rollback(self) -> TenantryResult<()> {
        debug!(discarded = self.pending.len(), "Transaction rolled back");
        Ok(())
    }
}

fn log_commit_failure(err: DbError, writes: usize) -> DbError {
    match &err {
        DbError::Conflict(_) => warn!(error = %err, writes, "Transaction lost a write conflict"),
        _ => error!(error = %err, writes, "Failed to commit transaction"),
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_keys_and_engine_conflicts_are_conflicts() {
        for message in [
            "An error occurred: key already exists: userindex/admin",
            "Failed to commit transaction due to a read or write conflict",
        ] {
            assert!(matches!(commit_error(message.into()), DbError::Conflict(_)));
        }
        assert!(matches!(
            commit_error("connection reset".into()),
            DbError::Commit(_)
        ));
    }
}
