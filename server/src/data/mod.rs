//! Data storage layer
//!
//! - `filters` - Dynamic filter engine (criteria, expressions, predicate fragments)
//! - `sqlite` - Transactional database for accounts and departments
//! - `types` - Row and input types
//! - `traits` - Repository trait the domain services depend on
//! - `error` - Unified error type for the data layer

pub mod error;
pub mod filters;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteService;

pub use error::DataError;

pub use traits::TransactionalRepository;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::DatabaseConfig;
use crate::core::storage::AppStorage;

/// Transactional database service
///
/// Wraps the backend-specific service behind one handle that owns startup,
/// maintenance and shutdown. Services are stored as `Arc` so background
/// tasks and repository handles can share them.
pub enum TransactionalService {
    /// SQLite backend (embedded)
    Sqlite(Arc<SqliteService>),
}

impl TransactionalService {
    /// Open the store and apply pending migrations
    pub async fn init(storage: &AppStorage, config: &DatabaseConfig) -> Result<Self, DataError> {
        let service = SqliteService::init(storage, config).await?;
        Ok(Self::Sqlite(Arc::new(service)))
    }

    /// Run a WAL checkpoint
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        match self {
            Self::Sqlite(s) => s.checkpoint().await.map_err(Into::into),
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
        }
    }

    /// Start the background checkpoint task
    pub fn start_checkpoint_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        match self {
            Self::Sqlite(s) => s.start_checkpoint_task(shutdown_rx),
        }
    }

    /// Get the repository trait object for data operations
    pub fn repository(&self) -> Arc<dyn TransactionalRepository> {
        match self {
            Self::Sqlite(s) => Arc::new(Arc::clone(s)),
        }
    }
}
