//! rdk-engine
//!
//! Risk classification:
//! - absolute AML reporting floor
//! - merchant override table (whole-word match on normalized names)
//! - local amount-tier fallback
//! - reconciliation with an optional upstream opinion (never lowers it)
//!
//! Deterministic, pure logic. No IO, no time, no network calls.

mod engine;
mod normalize;
mod overrides;

pub use engine::{classify, fallback_tier, RiskPolicy};
pub use normalize::normalize_merchant;
pub use overrides::MerchantOverrides;
