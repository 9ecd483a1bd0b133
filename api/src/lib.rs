//! HTTP surface of the clinical documentation assistant.
//!
//! Routes:
//! - `POST /api/summarize`: run a note through the pipeline
//! - `GET  /api/status`: liveness plus enabled features
//! - `GET  /api/config`: static application configuration

pub mod core;
pub mod error_handler;
mod routes;

use std::{env, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use colored::Colorize;
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::{
        config::config_route::config_route, status::status_route::status_route,
        summarize::summarize_route::summarize_route,
    },
};

pub const APP_NAME: &str = "Clinical Documentation Assistant";
pub const API_VERSION: &str = "2.0.0";

const DEFAULT_ADDRESS: &str = "0.0.0.0:5000";

/// Builds the router over a fully-initialized state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize_route))
        .route("/api/status", get(status_route))
        .route("/api/config", get(config_route))
        .with_state(Arc::new(state))
}

/// Loads state from the environment, binds `API_ADDRESS` and serves until Ctrl+C.
///
/// # Errors
/// Bad completion settings, broken built-in tables, bind or serve failures.
pub async fn start() -> Result<(), AppError> {
    let addr = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string());

    let state = AppState::from_env()?;
    print_banner(&addr, state.ai_enabled());

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

fn print_banner(addr: &str, ai_enabled: bool) {
    let rule = "=".repeat(70);
    println!("{}", rule.dimmed());
    println!("{} {}", APP_NAME.bold(), format!("v{API_VERSION}").cyan());
    println!("{}", rule.dimmed());
    println!("  address         {}", addr.green());
    let ai = if ai_enabled {
        "enabled".green()
    } else {
        "disabled (set GITHUB_MODELS_TOKEN)".yellow()
    };
    println!("  AI summarizer   {ai}");
    println!("{}", rule.dimmed());
}

/// Resolves on Ctrl+C. If the handler cannot be installed, the server runs until killed.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
