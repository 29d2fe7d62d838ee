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
fn scenario_reporting_floor_cannot_be_argued_down() {
    let policy = RiskPolicy::sane_defaults();

    // Neither a LOW-pinned merchant nor a LOW upstream opinion moves the
    // result once the reporting floor is reached.
    for merchant in ["Acme", "Apple Store", "Target"] {
        for opinion in [None, Some(RiskTier::Low), Some(RiskTier::Medium)] {
            assert_eq!(
                classify(&policy, &facts(15_000, merchant), opinion),
                RiskTier::High,
                "merchant={merchant} opinion={opinion:?}"
            );
        }
    }

    // Exactly at the floor counts too.
    assert_eq!(
        classify(&policy, &facts(10_000, "Apple Store"), Some(RiskTier::Low)),
        RiskTier::High
    );
}
