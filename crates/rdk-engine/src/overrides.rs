use std::collections::BTreeMap;

use rdk_schemas::RiskTier;

use crate::normalize::normalize_merchant;

/// Declarative merchant override table, keyed by normalized word token.
///
/// Kept as a mapping rather than chained conditionals so the table can grow
/// without touching the rule chain.  Matching is whole-word only: a keyword
/// fires when it equals one of the merchant's normalized tokens, never on
/// substring containment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerchantOverrides {
    tiers: BTreeMap<String, RiskTier>,
}

impl MerchantOverrides {
    /// Empty table (no merchant ever matches).
    pub fn empty() -> Self {
        Self {
            tiers: BTreeMap::new(),
        }
    }

    /// The stock table: "apple" → LOW, "target" → MEDIUM.
    pub fn sane_defaults() -> Self {
        let mut table = Self::empty();
        table.insert("apple", RiskTier::Low);
        table.insert("target", RiskTier::Medium);
        table
    }

    /// Add (or replace) a keyword.  The keyword itself is normalized first;
    /// a keyword that normalizes to several words keeps only the first.
    pub fn insert(&mut self, keyword: &str, tier: RiskTier) {
        if let Some(token) = normalize_merchant(keyword).into_iter().next() {
            self.tiers.insert(token, tier);
        }
    }

    /// Match a raw merchant name against the table.
    ///
    /// The first matching token in merchant word order wins, which keeps the
    /// result deterministic when a name carries several keywords.
    pub fn lookup(&self, merchant: &str) -> Option<RiskTier> {
        normalize_merchant(merchant)
            .iter()
            .find_map(|token| self.tiers.get(token).copied())
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }
}
