//! Axum router and all HTTP handlers for rdk-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers.  Handlers are `pub(crate)`-free on purpose — the
//! scenario tests in `tests/` compose the router directly via the lib.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, warn};

use rdk_engine::classify;
use rdk_schemas::{amount_micros_from_f64, validate_facts, ClassifiedTransaction, TransactionFacts};
use rdk_submit::IdentityContext;

use crate::{
    api_types::{
        ClearResponse, ErrorResponse, HealthResponse, HistoryResponse, RemoveResponse,
        TransactionRequest, UndoResponse, UndoStatusResponse,
    },
    state::AppState,
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route(
            "/v1/transactions",
            post(create_transaction)
                .get(list_transactions)
                .delete(clear_transactions),
        )
        .route("/v1/transactions/undo", get(undo_status))
        .route("/v1/transactions/undo-remove", post(undo_remove))
        .route("/v1/transactions/undo-clear", post(undo_clear))
        .route("/v1/transactions/:index", delete(remove_transaction))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Extract the identity context, if any, from the request headers.
///
/// The daemon never verifies credentials; it only requires that *some*
/// identity accompanies a submission and forwards it unchanged.
fn identity_from_headers(headers: &HeaderMap) -> IdentityContext {
    let bearer_token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let user = headers
        .get("x-user")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    IdentityContext { bearer_token, user }
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// POST /v1/transactions
// ---------------------------------------------------------------------------

/// Validate → fetch opinion → classify → push.
///
/// The push happens only after the opinion request has fully resolved; an
/// unreachable risk service is a well-defined outcome (no opinion), never a
/// partial push.
async fn create_transaction(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<TransactionRequest>,
) -> Response {
    let identity = identity_from_headers(&headers);
    if !identity.is_present() {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "missing identity: provide an Authorization bearer token or X-User header",
        );
    }

    let Some(amount_micros) = amount_micros_from_f64(req.amount) else {
        return error_response(StatusCode::BAD_REQUEST, "amount is not representable");
    };
    let facts = TransactionFacts {
        amount_micros,
        currency: req.currency,
        merchant: req.merchant,
    };
    if let Err(err) = validate_facts(&facts) {
        return error_response(StatusCode::BAD_REQUEST, err.to_string());
    }

    // The push below only happens once this call has fully resolved.  A
    // transport failure is surfaced to the caller and nothing is recorded;
    // an unconfigured service or a reply without a usable label resolves to
    // "no opinion" and classification proceeds on the local rules.
    let server_opinion = match st.opinion.fetch_opinion(&facts, &identity).await {
        Ok(opinion) => opinion,
        Err(err) => {
            warn!("risk service unavailable: {err:#}");
            return error_response(
                StatusCode::BAD_GATEWAY,
                "risk service unavailable; transaction was not recorded",
            );
        }
    };

    let tier = classify(&st.policy, &facts, server_opinion);
    let entry =
        ClassifiedTransaction::new(facts, tier, server_opinion).with_user(identity.user.clone());

    info!(merchant = %entry.merchant, tier = %entry.risk_tier, "transaction classified");

    let mut ledger = st.ledger.lock().await;
    ledger.push(entry.clone());

    (StatusCode::OK, Json(entry)).into_response()
}

// ---------------------------------------------------------------------------
// GET /v1/transactions
// ---------------------------------------------------------------------------

/// Recent checks, most-recent-first.  With an `X-User` header, only that
/// user's checks are returned.
async fn list_transactions(State(st): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let filter_user = headers
        .get("x-user")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let ledger = st.ledger.lock().await;
    let items = ledger
        .entries()
        .iter()
        .filter(|e| match &filter_user {
            Some(user) => e.user.as_deref() == Some(user.as_str()),
            None => true,
        })
        .cloned()
        .collect();

    (StatusCode::OK, Json(HistoryResponse { items })).into_response()
}

// ---------------------------------------------------------------------------
// DELETE /v1/transactions/:index
// ---------------------------------------------------------------------------

/// Remove one check by index.  Out of range is reported as nothing removed,
/// not as an error — the UI treats both the same way.
async fn remove_transaction(
    State(st): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Response {
    let mut ledger = st.ledger.lock().await;
    let removed = ledger.remove_at(index);
    (StatusCode::OK, Json(RemoveResponse { removed })).into_response()
}

// ---------------------------------------------------------------------------
// DELETE /v1/transactions
// ---------------------------------------------------------------------------

async fn clear_transactions(State(st): State<Arc<AppState>>) -> Response {
    let mut ledger = st.ledger.lock().await;
    let cleared = ledger.clear_all();
    info!(cleared, "recent checks cleared");
    (StatusCode::OK, Json(ClearResponse { cleared })).into_response()
}

// ---------------------------------------------------------------------------
// POST /v1/transactions/undo-remove · POST /v1/transactions/undo-clear
// ---------------------------------------------------------------------------

async fn undo_remove(State(st): State<Arc<AppState>>) -> Response {
    let mut ledger = st.ledger.lock().await;
    let restored = ledger.undo_remove();
    (StatusCode::OK, Json(UndoResponse { restored })).into_response()
}

async fn undo_clear(State(st): State<Arc<AppState>>) -> Response {
    let mut ledger = st.ledger.lock().await;
    let restored = ledger.undo_clear();
    (StatusCode::OK, Json(UndoResponse { restored })).into_response()
}

// ---------------------------------------------------------------------------
// GET /v1/transactions/undo
// ---------------------------------------------------------------------------

/// Which undo affordance to display.  Clear-all takes precedence when both
/// slots are live.
async fn undo_status(State(st): State<Arc<AppState>>) -> Response {
    let ledger = st.ledger.lock().await;

    let status = if let Some(slot) = ledger.pending_clear_undo() {
        UndoStatusResponse {
            pending: Some("clear"),
            expires_at_ms: Some(slot.expires_at_ms),
        }
    } else if let Some(slot) = ledger.pending_remove_undo() {
        UndoStatusResponse {
            pending: Some("remove"),
            expires_at_ms: Some(slot.expires_at_ms),
        }
    } else {
        UndoStatusResponse {
            pending: None,
            expires_at_ms: None,
        }
    };

    (StatusCode::OK, Json(status)).into_response()
}
