//! Data models for the sales dashboard.

pub mod query;

pub use query::{ColumnMetadata, MAX_ROW_LIMIT, QueryResult};
