//! rdk-submit
//!
//! HTTP client for the external risk service.  The service receives the
//! transaction facts and replies with a payload that may carry a
//! `risk_level` label; everything else in the reply is irrelevant here.
//!
//! An unconfigured, unreachable, or incoherent service is a well-defined
//! outcome — the caller classifies with no upstream opinion.  Only the
//! transport failure is surfaced (so the caller can log it); a reply that
//! simply lacks a usable label is `Ok(None)`.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use rdk_schemas::{RiskTier, TransactionFacts, MICROS_SCALE};

/// Risk service request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Identity context
// ---------------------------------------------------------------------------

/// Whatever identity accompanies a submission.  The core is indifferent to
/// its shape; when present it is forwarded as headers, nothing more.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityContext {
    /// Forwarded as `Authorization: Bearer <token>`.
    pub bearer_token: Option<String>,
    /// Forwarded as `X-User`.
    pub user: Option<String>,
}

impl IdentityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.bearer_token.is_some() || self.user.is_some()
    }
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

/// The only field of the reply payload the core cares about.  Unknown
/// fields are ignored by construction.
#[derive(Debug, Default, Deserialize)]
struct OpinionReply {
    #[serde(default)]
    risk_level: Option<String>,
}

/// Map a reply label onto a tier; unknown labels count as no opinion.
fn opinion_from_label(label: Option<&str>) -> Option<RiskTier> {
    label.and_then(|s| s.parse::<RiskTier>().ok())
}

// ---------------------------------------------------------------------------
// HttpOpinionClient
// ---------------------------------------------------------------------------

/// Client for the risk service endpoint.
///
/// `base_url = None` means "no service configured": every fetch resolves to
/// `Ok(None)` without touching the network, which keeps offline and test
/// wiring trivial.
#[derive(Clone, Debug)]
pub struct HttpOpinionClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl HttpOpinionClient {
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build http client")?;
        Ok(Self { http, base_url })
    }

    /// Read the service URL from `RDK_RISK_URL` (absent = unconfigured).
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var("RDK_RISK_URL").ok())
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Fetch the optional upstream opinion for one transaction.
    ///
    /// # Errors
    /// Only transport failures (connect, timeout, non-JSON error paths in
    /// the stack) are errors.  A reply that parses but carries no usable
    /// `risk_level` — or a malformed body — is `Ok(None)`.
    pub async fn fetch_opinion(
        &self,
        facts: &TransactionFacts,
        identity: &IdentityContext,
    ) -> Result<Option<RiskTier>> {
        let Some(url) = &self.base_url else {
            return Ok(None);
        };

        let payload = serde_json::json!({
            "amount": facts.amount_micros as f64 / MICROS_SCALE as f64,
            "merchant": facts.merchant,
        });

        let mut request = self.http.post(url).json(&payload);
        if let Some(token) = &identity.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(user) = &identity.user {
            request = request.header("X-User", user);
        }

        let reply = request
            .send()
            .await
            .with_context(|| format!("risk service request to {url} failed"))?;

        let body: OpinionReply = match reply.json().await {
            Ok(body) => body,
            Err(err) => {
                debug!("risk service reply was not usable JSON: {err}");
                OpinionReply::default()
            }
        };

        Ok(opinion_from_label(body.risk_level.as_deref()))
    }
}
