use rdk_schemas::{RiskTier, TransactionFacts, MICROS_SCALE};

use crate::overrides::MerchantOverrides;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Classification thresholds + override table.
///
/// All floors are micros and all comparisons are inclusive (`>=`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiskPolicy {
    /// At or above this amount the result is HIGH unconditionally — the
    /// fixed regulatory reporting floor.  Nothing overrides it.
    pub aml_floor_micros: i64,

    /// Fallback: at or above this amount the local tier is HIGH.
    pub high_floor_micros: i64,

    /// Fallback: at or above this amount the local tier is MEDIUM.
    pub medium_floor_micros: i64,

    /// Merchant override table (whole-word match on normalized names).
    pub overrides: MerchantOverrides,
}

impl RiskPolicy {
    pub fn sane_defaults() -> Self {
        Self {
            aml_floor_micros: 10_000 * MICROS_SCALE,
            high_floor_micros: 500 * MICROS_SCALE,
            medium_floor_micros: 100 * MICROS_SCALE,
            overrides: MerchantOverrides::sane_defaults(),
        }
    }
}

// ---------------------------------------------------------------------------
// Core engine
// ---------------------------------------------------------------------------

/// Local amount-only tier.
///
/// Always computable; it is the result when no override matched and no
/// upstream opinion arrived, and the reconciliation floor when one did.
pub fn fallback_tier(policy: &RiskPolicy, amount_micros: i64) -> RiskTier {
    if amount_micros >= policy.high_floor_micros {
        RiskTier::High
    } else if amount_micros >= policy.medium_floor_micros {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Main classifier (pure deterministic logic, total over well-formed facts).
///
/// Precedence, first match wins:
///
/// 1. AML floor — `amount >= aml_floor` is HIGH regardless of merchant or
///    upstream opinion.
/// 2. Merchant override — whole-word match against the policy table decides
///    the tier outright.
/// 3. Fallback — local amount tier when no opinion is present.
/// 4. Reconciliation — with an opinion present, the more severe of opinion
///    and fallback.  The fallback can raise an upstream tier, never lower
///    it.
pub fn classify(
    policy: &RiskPolicy,
    facts: &TransactionFacts,
    server_opinion: Option<RiskTier>,
) -> RiskTier {
    // 1) Absolute compliance threshold.
    if facts.amount_micros >= policy.aml_floor_micros {
        return RiskTier::High;
    }

    // 2) Merchant override beats both the fallback and the opinion.
    if let Some(tier) = policy.overrides.lookup(&facts.merchant) {
        return tier;
    }

    // 3) Local fallback tier.
    let fallback = fallback_tier(policy, facts.amount_micros);

    // 4) Reconcile with the upstream opinion when one arrived; absence falls
    //    through to the fallback with no max-comparison.
    match server_opinion {
        Some(opinion) => opinion.max(fallback),
        None => fallback,
    }
}
