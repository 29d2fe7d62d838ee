use crate::types::TransactionFacts;

/// Minimum trimmed merchant length accepted for a check.
pub const MIN_MERCHANT_LEN: usize = 2;

/// All well-formedness violations a caller must reject before classifying.
///
/// Classification itself is total over well-formed facts and has no error
/// taxonomy; these are surfaced by the caller as validation failures,
/// distinct from any classification outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `amount_micros` must be strictly positive.
    NonPositiveAmount { amount_micros: i64 },
    /// Trimmed merchant must be at least [`MIN_MERCHANT_LEN`] characters.
    MerchantTooShort { merchant: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount { amount_micros } => {
                write!(f, "amount must be > 0, got {amount_micros} micros")
            }
            Self::MerchantTooShort { merchant } => write!(
                f,
                "merchant must be at least {MIN_MERCHANT_LEN} characters, got {merchant:?}"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check the caller-side invariants on [`TransactionFacts`].
///
/// The facts are **not** modified; the merchant is trimmed only for the
/// length check.
pub fn validate_facts(facts: &TransactionFacts) -> Result<(), ValidationError> {
    if facts.amount_micros <= 0 {
        return Err(ValidationError::NonPositiveAmount {
            amount_micros: facts.amount_micros,
        });
    }
    if facts.merchant.trim().chars().count() < MIN_MERCHANT_LEN {
        return Err(ValidationError::MerchantTooShort {
            merchant: facts.merchant.clone(),
        });
    }
    Ok(())
}
