//! SurrealDB connection management.

use std::sync::Arc;

use surrealdb::engine::local::{Db, Mem};
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::DbError;
use crate::schema::run_migrations;
use crate::store::SurrealStore;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket URL (e.g., `127.0.0.1:8000`). Ignored by the in-memory
    /// engine.
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "tenantry".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Owns a migrated SurrealDB handle and hands out stores over it.
///
/// Every store handed out by one manager shares its writer lock.
pub struct DbManager<C: Connection> {
    db: Surreal<C>,
    writer: Arc<Mutex<()>>,
}

impl DbManager<Client> {
    /// Connect to a SurrealDB server.
    ///
    /// Authenticates as root, selects the configured namespace and
    /// database, and applies pending migrations.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        run_migrations(&db).await?;

        info!("Successfully connected to SurrealDB");

        Ok(Self::new(db))
    }
}

impl DbManager<Db> {
    /// Start an embedded in-memory SurrealDB. Data lives as long as the
    /// returned manager and the stores created from it.
    pub async fn in_memory(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            namespace = %config.namespace,
            database = %config.database,
            "Starting in-memory SurrealDB"
        );

        let db = Surreal::new::<Mem>(()).await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        run_migrations(&db).await?;

        Ok(Self::new(db))
    }
}

impl<C: Connection> DbManager<C> {
    fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<C> {
        &self.db
    }

    /// A key-value store over this connection.
    ///
    /// Write transactions of all stores from this manager are serialized.
    /// Managers in other processes do not share the lock; there the
    /// store's create-only keys make the second of two conflicting
    /// commits fail instead.
    pub fn store(&self) -> SurrealStore<C> {
        SurrealStore::with_writer(self.db.clone(), Arc::clone(&self.writer))
    }
}
