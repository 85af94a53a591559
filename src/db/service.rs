//! Data-access service.
//!
//! `DataService` owns the single connection handle to the dashboard database
//! for the life of the process, together with the memoized customer-name
//! list. It is constructed once at startup and shared across request
//! handlers via `Arc`; there is no module-level global state.

use crate::error::{DashResult, DashboardError};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Lookup query for the customer selection control.
const CUSTOMER_NAMES_SQL: &str =
    "SELECT DISTINCT FirstName || ' ' || LastName AS Name FROM Customer ORDER BY Name";

const ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Shared handle to the dashboard database plus session-lifetime caches.
#[derive(Debug)]
pub struct DataService {
    pool: SqlitePool,
    /// Populated on first lookup; never invalidated. A change to the
    /// Customer table is not reflected until process restart.
    customer_names: OnceCell<Vec<String>>,
}

impl DataService {
    /// Open the database file and build the service.
    ///
    /// The file must already exist; a missing or unreadable file surfaces as
    /// a `Connection` error. The pool is capped at a single connection so
    /// exactly one handle exists per process, and it is opened read-write:
    /// the dashboard issues no writes itself, but custom and AI-generated
    /// SQL are allowed to.
    pub async fn connect(db_path: &str) -> DashResult<Self> {
        info!(db_path = %db_path, "Opening dashboard database");

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect_with(options)
            .await
            .map_err(|e| {
                DashboardError::connection(format!(
                    "Failed to open database '{}': {}",
                    db_path, e
                ))
            })?;

        match sqlx::query_scalar::<_, String>("SELECT sqlite_version()")
            .fetch_one(&pool)
            .await
        {
            Ok(version) => debug!(version = %version, "Got engine version"),
            Err(e) => warn!(error = %e, "Failed to get engine version"),
        }

        Ok(Self {
            pool,
            customer_names: OnceCell::new(),
        })
    }

    /// Get the shared pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Distinct customer display names, sorted, memoized for the process.
    ///
    /// Two calls within the same process return identical, order-stable
    /// results even if the underlying table changes between them.
    pub async fn customer_names(&self) -> DashResult<Vec<String>> {
        let names = self
            .customer_names
            .get_or_try_init(|| async {
                let names = sqlx::query_scalar::<_, String>(CUSTOMER_NAMES_SQL)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(DashboardError::from)?;
                info!(count = names.len(), "Loaded customer name list");
                Ok::<_, DashboardError>(names)
            })
            .await?;
        Ok(names.clone())
    }

    /// Close the pool. Only used by tests; in normal operation the handle
    /// lives until the process exits.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
