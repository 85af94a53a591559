//! Sales Dashboard - Main entry point.

use sales_dashboard::ai::{ChatClient, SqlTranslator};
use sales_dashboard::auth::PasswordGate;
use sales_dashboard::config::Config;
use sales_dashboard::db::{DataService, QueryExecutor};
use sales_dashboard::server::{self, AppState};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();

    init_tracing(&config);

    // The hosted-model key is required; nothing renders without it.
    let api_key = match config.require_api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Set GROQ_API_KEY in the environment or in a .env file.");
            std::process::exit(1);
        }
    };

    if config.uses_default_password() {
        warn!(
            "Using the insecure default password; set APP_PASSWORD before exposing the dashboard"
        );
    }

    info!(
        db_path = %config.db_path,
        model = %config.ai_model,
        "Starting Sales Dashboard v{}",
        env!("CARGO_PKG_VERSION")
    );

    let data = DataService::connect(&config.db_path).await?;
    let executor = QueryExecutor::with_defaults(config.query_timeout, config.row_limit);
    let translator = SqlTranslator::new(ChatClient::new(
        api_key,
        config.ai_base_url.clone(),
        config.ai_model.clone(),
    ));

    let state = Arc::new(AppState::new(data, executor, translator));
    let gate = Arc::new(PasswordGate::new(config.password.clone()));
    let app = server::build_router(state, gate);

    if let Err(e) = server::serve(app, &config.http_bind_addr()).await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
