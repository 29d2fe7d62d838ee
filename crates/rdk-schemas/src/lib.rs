//! rdk-schemas
//!
//! Shared data model for the risk desk:
//! - [`RiskTier`] — the LOW/MEDIUM/HIGH severity order
//! - [`TransactionFacts`] / [`ClassifiedTransaction`] — inputs and outcomes
//! - micros fixed-point amount helpers
//! - caller-side input validation ([`validate_facts`])
//!
//! Everything here is plain data: no IO, no clocks, no network.

mod micros;
mod types;
mod validate;

pub use micros::{
    amount_micros_from_f64, format_amount_micros, parse_amount_micros, MICROS_SCALE,
};
pub use types::{ClassifiedTransaction, RiskTier, TransactionFacts, UnknownRiskTier};
pub use validate::{validate_facts, ValidationError, MIN_MERCHANT_LEN};
