//! Error types for the sales dashboard.
//!
//! This module defines all error types using `thiserror`. Every failure is
//! surfaced verbatim to the caller; nothing is retried automatically.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Startup configuration error: {message}")]
    StartupConfig { message: String },

    #[error("Authentication failed: {reason}")]
    Auth { reason: String },

    #[error("Connection failed: {message}")]
    Connection { message: String },

    /// SQL execution failure. The message is the engine's text, unsanitized.
    #[error("Query failed: {message}")]
    Query { message: String },

    #[error("AI service error: {message}")]
    AiService { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Timeout: {operation} exceeded {elapsed_secs}s")]
    Timeout {
        operation: String,
        elapsed_secs: u32,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DashboardError {
    /// Create a startup configuration error.
    pub fn startup_config(message: impl Into<String>) -> Self {
        Self::StartupConfig {
            message: message.into(),
        }
    }

    /// Create an authentication error.
    pub fn auth(reason: impl Into<String>) -> Self {
        Self::Auth {
            reason: reason.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error carrying the engine message verbatim.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create an AI service error.
    pub fn ai_service(message: impl Into<String>) -> Self {
        Self::AiService {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>, elapsed_secs: u32) -> Self {
        Self::Timeout {
            operation: operation.into(),
            elapsed_secs,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StartupConfig { .. } => "startup_config",
            Self::Auth { .. } => "auth",
            Self::Connection { .. } => "connection",
            Self::Query { .. } => "query",
            Self::AiService { .. } => "ai_service",
            Self::InvalidInput { .. } => "invalid_input",
            Self::Timeout { .. } => "timeout",
            Self::Internal { .. } => "internal",
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth { .. } => StatusCode::UNAUTHORIZED,
            Self::Query { .. } | Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::AiService { .. } => StatusCode::BAD_GATEWAY,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::StartupConfig { .. } | Self::Connection { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Convert sqlx errors to DashboardError.
impl From<sqlx::Error> for DashboardError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => DashboardError::connection(msg.to_string()),
            sqlx::Error::Database(db_err) => DashboardError::query(db_err.message()),
            sqlx::Error::Io(io_err) => {
                DashboardError::connection(format!("I/O error: {}", io_err))
            }
            sqlx::Error::PoolTimedOut => DashboardError::timeout("connection acquire", 30),
            sqlx::Error::PoolClosed => DashboardError::connection("Connection pool is closed"),
            sqlx::Error::ColumnDecode { index, source } => {
                DashboardError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                DashboardError::internal(format!("Decode error: {}", source))
            }
            sqlx::Error::WorkerCrashed => DashboardError::internal("Database worker crashed"),
            other => DashboardError::query(other.to_string()),
        }
    }
}

/// Render the error as a JSON body so the UI can show it inline.
impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

/// Result type alias for dashboard operations.
pub type DashResult<T> = Result<T, DashboardError>;
