//! Transactional key-value store abstraction.
//!
//! Entity stores never talk to a database directly: every read and write
//! goes through a [`Transaction`] handed to them by the caller, so the
//! caller decides where the atomicity boundary lies.
//!
//! Keys are `/`-separated strings, values are JSON documents.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::TenantryResult;

/// A transactional key-value store.
///
/// Read-write transactions opened through one store (and its clones) are
/// serialized. Writers that do not share that serialization, such as other
/// processes on the same database, are kept apart by create-only keys
/// ([`Transaction::insert`]). Read-only transactions never block.
pub trait Store: Clone + Send + Sync + 'static {
    type Tx: Transaction;

    /// Begin a read-write transaction, waiting for any other writer to
    /// finish first.
    fn begin(&self) -> impl Future<Output = TenantryResult<Self::Tx>> + Send;

    /// Begin a read-only transaction. Writes on it fail.
    fn begin_read(&self) -> impl Future<Output = TenantryResult<Self::Tx>> + Send;
}

/// A single unit of work against a [`Store`].
///
/// Writes are buffered until [`Transaction::commit`]; reads observe the
/// transaction's own pending writes. Dropping a transaction without
/// committing discards everything it wrote.
pub trait Transaction: Send + Sized {
    fn get(&mut self, key: &str) -> impl Future<Output = TenantryResult<Option<String>>> + Send;

    /// All entries whose key starts with `prefix`, ordered by key.
    fn scan_prefix(
        &mut self,
        prefix: &str,
    ) -> impl Future<Output = TenantryResult<Vec<(String, String)>>> + Send;

    fn put(&mut self, key: &str, value: String) -> TenantryResult<()>;

    /// Buffer a write that requires `key` to be absent when the
    /// transaction commits. If another writer created the key in the
    /// meantime the commit fails with
    /// [`TenantryError::WriteConflict`](crate::error::TenantryError::WriteConflict)
    /// and nothing from this transaction is applied.
    fn insert(&mut self, key: &str, value: String) -> TenantryResult<()>;

    fn delete(&mut self, key: &str) -> TenantryResult<()>;

    fn commit(self) -> impl Future<Output = TenantryResult<()>> + Send;

    fn rollback(self) -> impl Future<Output = TenantryResult<()>> + Send;
}

/// Read and decode a JSON record.
pub async fn get_record<T, X>(tx: &mut X, key: &str) -> TenantryResult<Option<T>>
where
    T: DeserializeOwned,
    X: Transaction,
{
    match tx.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and buffer a JSON record.
pub fn put_record<T, X>(tx: &mut X, key: &str, record: &T) -> TenantryResult<()>
where
    T: Serialize,
    X: Transaction,
{
    let raw = serde_json::to_string(record)?;
    tx.put(key, raw)
}

/// Encode and buffer a create-only JSON record (see
/// [`Transaction::insert`]).
pub fn insert_record<T, X>(tx: &mut X, key: &str, record: &T) -> TenantryResult<()>
where
    T: Serialize,
    X: Transaction,
{
    let raw = serde_json::to_string(record)?;
    tx.insert(key, raw)
}

/// Decode every record under `prefix`, in key order.
pub async fn scan_records<T, X>(tx: &mut X, prefix: &str) -> TenantryResult<Vec<T>>
where
    T: DeserializeOwned,
    X: Transaction,
{
    let entries = tx.scan_prefix(prefix).await?;
    entries
        .iter()
        .map(|(_, raw)| serde_json::from_str(raw).map_err(Into::into))
        .collect()
}
