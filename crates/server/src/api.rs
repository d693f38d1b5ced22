//! HTTP endpoints: ingest, search, health.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use logpile_core::{validate, Document};
use logpile_store::SearchRequest;

use crate::state::AppState;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ── Health ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ── Ingest ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct IngestResponse {
    pub accepted: usize,
    pub rejected: Vec<RejectedLine>,
}

#[derive(Serialize)]
pub struct RejectedLine {
    /// 1-based line number within the request body.
    pub line: usize,
    pub kind: &'static str,
    pub error: String,
}

/// Ingest newline-delimited records.
///
/// Each line is validated independently; a bad line is reported with its
/// line number and error kind and never blocks the good lines around it.
/// Accepted lines hit the durable log before the in-memory store.
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<(StatusCode, Json<IngestResponse>), (StatusCode, Json<ErrorResponse>)> {
    let mut accepted = 0usize;
    let mut rejected = Vec::new();

    for (idx, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let document = match validate(line) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(line = idx + 1, kind = e.kind(), "rejected record: {}", e);
                rejected.push(RejectedLine {
                    line: idx + 1,
                    kind: e.kind(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        if let Err(e) = state.wal.append(line).await {
            // Durability is gone; stop acknowledging anything further.
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("unable to persist record: {}", e),
                }),
            ));
        }

        if state.store.insert(document).await.is_err() {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "document store is unavailable".to_string(),
                }),
            ));
        }

        accepted += 1;
    }

    let status = if accepted == 0 && !rejected.is_empty() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    Ok((status, Json(IngestResponse { accepted, rejected })))
}

// ── Search ───────────────────────────────────────────────────────

pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<Document>>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.search(request).await {
        Ok(hits) => Ok(Json(hits)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
