//! Wire types for the HTTP surface.  Kept apart from the domain model: the
//! daemon accepts floats and loose strings at the boundary and converts to
//! the typed core before anything else happens.

use serde::{Deserialize, Serialize};

use rdk_schemas::ClassifiedTransaction;

/// Body of `POST /v1/transactions`.
#[derive(Clone, Debug, Deserialize)]
pub struct TransactionRequest {
    pub amount: f64,
    pub currency: String,
    pub merchant: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct HistoryResponse {
    pub items: Vec<ClassifiedTransaction>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RemoveResponse {
    /// `null` when the index was out of range (a no-op, not an error).
    pub removed: Option<ClassifiedTransaction>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct UndoResponse {
    pub restored: bool,
}

/// Which undo affordance (if any) a UI should offer right now.
///
/// When both undo kinds are live, clear-all takes precedence — a display
/// policy, applied here so every frontend shows the same thing.
#[derive(Clone, Debug, Serialize)]
pub struct UndoStatusResponse {
    /// "clear" | "remove" | null
    pub pending: Option<&'static str>,
    pub expires_at_ms: Option<i64>,
}
