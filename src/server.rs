//!
//! sqlgate HTTP server
//! -------------------
//! This module defines the Axum-based HTTP API for sqlgate.
//!
//! Responsibilities:
//! - A `parse` endpoint accepting a dialect name and a SQL program, returning
//!   the split/probe result as JSON.
//! - A `dialects` endpoint listing every resolvable dialect name.
//! - Clean error mapping: an unknown dialect is a 404 with a structured body,
//!   never a panic or a bare string.
//!
//! Each request resolves a fresh grammar engine from the shared registry, so
//! concurrent requests never share engine state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dialect::DialectRegistry;
use crate::error::AppError;
use crate::program::parse_program;

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DialectRegistry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRequest {
    pub dialect: String,
    pub sql: String,
}

fn error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, axum::Json(serde_json::json!(err))).into_response()
}

/// Parse a SQL program with the requested dialect.
///
/// Outright rejection of the program is not an HTTP error: the response is a
/// well-formed parse result with its `error` field set, exactly what the
/// in-process API returns.
async fn parse_handler(State(state): State<AppState>, Json(req): Json<ParseRequest>) -> Response {
    match parse_program(&state.registry, &req.dialect, &req.sql) {
        Ok(result) => {
            debug!(
                dialect = req.dialect.as_str(),
                statements = result.statements.len(),
                position = result.position,
                "parsed program ({} bytes)",
                req.sql.len()
            );
            axum::Json(result).into_response()
        }
        Err(err) => {
            debug!(dialect = req.dialect.as_str(), "parse refused: {}", err);
            error_response(&err)
        }
    }
}

async fn dialects_handler(State(state): State<AppState>) -> Response {
    axum::Json(state.registry.dialects()).into_response()
}

/// Build the router with all routes mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "sqlgate ok" }))
        .route("/dialects", get(dialects_handler))
        .route("/parse", post(parse_handler))
        .with_state(state)
}

/// Start the sqlgate HTTP server bound to the given port.
///
/// The dialect registry is built once here and shared read-only by every
/// request; registration happens only at this point, never mid-flight.
pub async fn run_with_port(http_port: u16) -> anyhow::Result<()> {
    let registry = Arc::new(DialectRegistry::with_builtins());
    info!("Registered dialects: {}", registry.dialects().join(", "));

    let app = router(AppState { registry });

    let addr: SocketAddr = format!("0.0.0.0:{}", http_port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
