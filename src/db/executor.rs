//! Query execution engine.
//!
//! Executes arbitrary SQL text against the shared SQLite pool and returns a
//! tabular result. Row limits are enforced via streaming (only the needed
//! rows are fetched) and every statement runs under a wall-clock timeout.
//!
//! There is no statement-type restriction: SELECT, DDL and DML all execute
//! if the connection permits them. The custom-SQL and AI paths both rely on
//! this openness.

use crate::db::types::RowToJson;
use crate::error::{DashResult, DashboardError};
use crate::models::{MAX_ROW_LIMIT, QueryResult};
use futures_util::StreamExt;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::{DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_ROW_LIMIT};

/// Query executor that handles SQL execution against the shared pool.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    default_timeout: Duration,
    default_limit: u32,
}

impl QueryExecutor {
    /// Create a new query executor with default settings.
    pub fn new() -> Self {
        Self {
            default_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
            default_limit: DEFAULT_ROW_LIMIT,
        }
    }

    /// Create a new query executor with custom settings.
    pub fn with_defaults(timeout_secs: u64, row_limit: u32) -> Self {
        Self {
            default_timeout: Duration::from_secs(timeout_secs),
            default_limit: row_limit.clamp(1, MAX_ROW_LIMIT),
        }
    }

    /// Execute a SQL statement and return its tabular result.
    ///
    /// Failure surfaces the engine's message verbatim as a `Query` error.
    pub async fn run_sql(&self, pool: &SqlitePool, sql: &str) -> DashResult<QueryResult> {
        let start = Instant::now();
        let row_limit = self.default_limit;

        debug!(
            sql = %sql,
            limit = row_limit,
            timeout_secs = self.default_timeout.as_secs(),
            "Executing query"
        );

        let rows = self.fetch_rows(pool, sql, row_limit).await?;
        Ok(process_rows(rows, row_limit, start))
    }

    /// Fetch up to `row_limit + 1` rows so truncation can be detected.
    async fn fetch_rows(
        &self,
        pool: &SqlitePool,
        sql: &str,
        row_limit: u32,
    ) -> DashResult<Vec<SqliteRow>> {
        use sqlx::Executor;

        let fetch_limit = row_limit as usize + 1;
        let rows_future = pool.fetch(sql).take(fetch_limit).collect::<Vec<_>>();

        match timeout(self.default_timeout, rows_future).await {
            Ok(results) => collect_rows(results),
            Err(_) => Err(DashboardError::timeout(
                "query execution",
                self.default_timeout.as_secs() as u32,
            )),
        }
    }
}

impl Default for QueryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_rows(results: Vec<Result<SqliteRow, sqlx::Error>>) -> DashResult<Vec<SqliteRow>> {
    let mut rows = Vec::with_capacity(results.len());
    for result in results {
        rows.push(result.map_err(DashboardError::from)?);
    }
    Ok(rows)
}

/// Build a QueryResult from fetched rows, marking truncation.
fn process_rows(rows: Vec<SqliteRow>, row_limit: u32, start: Instant) -> QueryResult {
    let execution_time_ms = start.elapsed().as_millis() as u64;

    if rows.is_empty() {
        return QueryResult::empty(execution_time_ms);
    }

    let columns = rows[0].get_column_metadata();
    let total_rows = rows.len();
    let truncated = total_rows > row_limit as usize;
    let rows_to_take = (row_limit as usize).min(total_rows);

    let json_rows: Vec<serde_json::Map<String, serde_json::Value>> = rows
        .iter()
        .take(rows_to_take)
        .map(|r| r.to_json_map())
        .collect();

    if truncated {
        warn!(
            total_rows = total_rows,
            limit = row_limit,
            "Query result truncated"
        );
    }

    QueryResult {
        columns,
        rows: json_rows,
        truncated,
        execution_time_ms,
    }
}
