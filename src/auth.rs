//! Password gate for the dashboard API.
//!
//! Access is gated by a single shared secret. Each request carries the
//! password in a header (the per-action equivalent of the login field), and
//! a wrong or missing password blocks that request only. Nothing is locked
//! out and nothing is retried.

use crate::error::DashboardError;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

/// Header carrying the shared secret on every API request.
pub const PASSWORD_HEADER: &str = "x-dashboard-password";

/// Holds the configured shared secret and verifies submissions against it.
#[derive(Clone)]
pub struct PasswordGate {
    password: String,
}

impl PasswordGate {
    /// Create a gate for the configured password.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Check a submitted password in constant time.
    pub fn verify(&self, provided: &str) -> bool {
        constant_time_eq(provided.as_bytes(), self.password.as_bytes())
    }
}

impl std::fmt::Debug for PasswordGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordGate").finish_non_exhaustive()
    }
}

/// Authentication middleware for the API routes.
pub async fn password_middleware(
    State(gate): State<Arc<PasswordGate>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        None => {
            warn!("Request rejected: missing password header");
            DashboardError::auth("Enter the password to view the dashboard").into_response()
        }
        Some(provided) if gate.verify(provided) => next.run(request).await,
        Some(_) => {
            warn!("Request rejected: wrong password");
            DashboardError::auth("Wrong password").into_response()
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_correct_password() {
        let gate = PasswordGate::new("test123");
        assert!(gate.verify("test123"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let gate = PasswordGate::new("test123");
        assert!(!gate.verify("test124"));
        assert!(!gate.verify(""));
        assert!(!gate.verify("test1234"));
    }

    #[test]
    fn test_debug_hides_password() {
        let gate = PasswordGate::new("hunter2");
        assert!(!format!("{:?}", gate).contains("hunter2"));
    }
}
