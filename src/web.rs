use crate::backend::BackendClient;
use crate::config::Config;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod admin;
mod assets;
mod contact;
mod login;
mod multipart;
mod notice;
mod pages;
mod render;

pub use notice::Notice;

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let backend = BackendClient::from_config(&config)
            .context("Failed to create backend client")?;
        Ok(Self {
            backend,
            config: Arc::new(config),
        })
    }
}

#[derive(Debug)]
pub enum AppError {
    StatusCode(StatusCode),
    Internal(anyhow::Error),
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::StatusCode(status) => {
                let reason = status.canonical_reason().unwrap_or("Error");
                (status, reason.to_string()).into_response()
            }
            AppError::Internal(err) => {
                error!(error = ?err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(|| async { Redirect::to("/home") }))
        .merge(pages::routes())
        .merge(contact::routes())
        .merge(login::routes())
        .merge(admin::routes())
        .route("/assets/{*path}", get(assets::static_handler))
        .fallback(pages::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(config)?;
    info!(backend = %state.backend.base_url(), mode = %state.config.mode, "Using backend");

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Portfolio listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
