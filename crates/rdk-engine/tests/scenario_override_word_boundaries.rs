use rdk_engine::*;
use rdk_schemas::{RiskTier, TransactionFacts, MICROS_SCALE};

const M: i64 = MICROS_SCALE;

fn facts(amount_units: i64, merchant: &str) -> TransactionFacts {
    TransactionFacts {
        amount_micros: amount_units * M,
        currency: "USD".to_string(),
        merchant: merchant.to_string(),
    }
}

#[test]
fn scenario_override_beats_fallback_and_opinion_below_floor() {
    let policy = RiskPolicy::sane_defaults();

    assert_eq!(
        classify(&policy, &facts(2_500, "Apple Store"), None),
        RiskTier::Low
    );
    assert_eq!(
        classify(&policy, &facts(50, "Target"), None),
        RiskTier::Medium
    );
    // An upstream HIGH does not displace a matched override.
    assert_eq!(
        classify(&policy, &facts(2_500, "Apple, Inc."), Some(RiskTier::High)),
        RiskTier::Low
    );
}

#[test]
fn scenario_embedded_keyword_does_not_fire() {
    let policy = RiskPolicy::sane_defaults();

    // At 50 the result is LOW either way; the 600 probe proves the override
    // genuinely did not match — a fired "apple" override would pin LOW, but
    // the fallback returns HIGH.
    assert_eq!(
        classify(&policy, &facts(50, "Pineapple Co"), None),
        RiskTier::Low
    );
    assert_eq!(
        classify(&policy, &facts(600, "Pineapple Co"), None),
        RiskTier::High
    );
}
