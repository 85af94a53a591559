//! Query result models.
//!
//! A query result is an ordered list of named columns plus an ordered list of
//! rows; it is built per execution and discarded after display.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Maximum allowed row limit.
pub const MAX_ROW_LIMIT: u32 = 10000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    /// Engine-reported type (e.g., "INTEGER", "TEXT")
    pub type_name: String,
    pub nullable: bool,
}

impl ColumnMetadata {
    /// Create new column metadata.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<ColumnMetadata>,
    pub rows: Vec<serde_json::Map<String, JsonValue>>,
    /// True if rows past the configured limit were dropped
    pub truncated: bool,
    pub execution_time_ms: u64,
}

impl QueryResult {
    /// Create an empty result (for statements returning no rows).
    pub fn empty(execution_time_ms: u64) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            truncated: false,
            execution_time_ms,
        }
    }

    /// Get the number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in projection order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_result_empty() {
        let result = QueryResult::empty(10);
        assert!(result.is_empty());
        assert_eq!(result.row_count(), 0);
        assert!(!result.truncated);
    }

    #[test]
    fn test_column_names_preserve_order() {
        let result = QueryResult {
            columns: vec![
                ColumnMetadata::new("OrderID", "INTEGER", false),
                ColumnMetadata::new("ProductName", "TEXT", true),
            ],
            rows: Vec::new(),
            truncated: false,
            execution_time_ms: 0,
        };
        assert_eq!(result.column_names(), vec!["OrderID", "ProductName"]);
    }
}
