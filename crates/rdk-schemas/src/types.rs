use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RiskTier
// ---------------------------------------------------------------------------

/// Risk tier with a total severity order: `Low < Medium < High`.
///
/// Serializes as `"LOW"` / `"MEDIUM"` / `"HIGH"` — the wire labels the
/// upstream risk services exchange.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for [`RiskTier::from_str`] on an unrecognized label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRiskTier(pub String);

impl std::fmt::Display for UnknownRiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown risk tier label: {:?}", self.0)
    }
}

impl std::error::Error for UnknownRiskTier {}

impl std::str::FromStr for RiskTier {
    type Err = UnknownRiskTier;

    /// Case-insensitive parse of the wire labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("LOW") {
            Ok(RiskTier::Low)
        } else if trimmed.eq_ignore_ascii_case("MEDIUM") {
            Ok(RiskTier::Medium)
        } else if trimmed.eq_ignore_ascii_case("HIGH") {
            Ok(RiskTier::High)
        } else {
            Err(UnknownRiskTier(s.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction records
// ---------------------------------------------------------------------------

/// The facts about one transaction, as supplied by the caller.
///
/// Amounts are micros (see [`crate::MICROS_SCALE`]).  Well-formedness
/// (`amount_micros > 0`, merchant length) is the caller's responsibility,
/// checked via [`crate::validate_facts`] before classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFacts {
    pub amount_micros: i64,
    pub currency: String,
    pub merchant: String,
}

/// A transaction after classification — the unit the ledger stores.
///
/// Immutable once created: the ledger reorders, removes, and reinserts whole
/// entries but never edits one.  `server_risk_tier` retains the upstream
/// opinion for audit; it plays no further role after classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub check_id: Uuid,
    pub checked_at_utc: DateTime<Utc>,
    /// Identity descriptor of whoever submitted the check, when known.
    pub user: Option<String>,
    pub amount_micros: i64,
    pub currency: String,
    pub merchant: String,
    pub risk_tier: RiskTier,
    pub server_risk_tier: Option<RiskTier>,
}

impl ClassifiedTransaction {
    /// Stamp a classification outcome into a ledger-ready record.
    pub fn new(
        facts: TransactionFacts,
        risk_tier: RiskTier,
        server_risk_tier: Option<RiskTier>,
    ) -> Self {
        Self {
            check_id: Uuid::new_v4(),
            checked_at_utc: Utc::now(),
            user: None,
            amount_micros: facts.amount_micros,
            currency: facts.currency,
            merchant: facts.merchant,
            risk_tier,
            server_risk_tier,
        }
    }

    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }
}
