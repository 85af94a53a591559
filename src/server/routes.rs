//! Request handlers, one per user action.

use crate::error::DashResult;
use crate::models::QueryResult;
use crate::reports::{self, ReportKind};
use crate::server::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Body for the "Run query" action.
#[derive(Debug, Clone, Deserialize)]
pub struct RunReportRequest {
    /// Selected report kind
    pub report: ReportKind,
    /// Selected customer name; required for customer-scoped reports
    #[serde(default)]
    pub customer: Option<String>,
    /// Free-form SQL for the custom report kind
    #[serde(default)]
    pub sql: Option<String>,
}

/// Body for the "Ask AI" action.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    pub customers: Vec<String>,
}

/// The SQL that ran (shown as a preview block) plus its tabular result.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub sql: String,
    pub result: QueryResult,
}

/// `GET /api/customers`: the memoized customer-name list.
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> DashResult<Json<CustomersResponse>> {
    let customers = state.data.customer_names().await?;
    Ok(Json(CustomersResponse { customers }))
}

/// `POST /api/query`: dispatch a report selection to SQL and execute it.
pub async fn run_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RunReportRequest>,
) -> DashResult<Json<ReportResponse>> {
    let sql = reports::dispatch(
        request.report,
        request.customer.as_deref(),
        request.sql.as_deref(),
    )?;

    let result = state.executor.run_sql(state.data.pool(), &sql).await?;

    info!(
        report = request.report.label(),
        rows = result.row_count(),
        execution_time_ms = result.execution_time_ms,
        "Report executed"
    );

    Ok(Json(ReportResponse { sql, result }))
}

/// `POST /api/ask`: translate a question to SQL, then execute it.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> DashResult<Json<ReportResponse>> {
    let sql = state.translator.translate(&request.question).await?;

    let result = state.executor.run_sql(state.data.pool(), &sql).await?;

    info!(
        rows = result.row_count(),
        execution_time_ms = result.execution_time_ms,
        "AI-generated query executed"
    );

    Ok(Json(ReportResponse { sql, result }))
}
