#![allow(dead_code)] // not every scenario uses every helper

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rdk_ledger::{HistoryStore, LedgerConfig, RecentChecksLedger};
use rdk_schemas::{ClassifiedTransaction, RiskTier, TransactionFacts, MICROS_SCALE};

/// Store stub that records every written sequence for later inspection.
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub writes: Rc<RefCell<Vec<Vec<ClassifiedTransaction>>>>,
}

impl HistoryStore for RecordingStore {
    fn write(&self, _key: &str, entries: &[ClassifiedTransaction]) -> anyhow::Result<()> {
        self.writes.borrow_mut().push(entries.to_vec());
        Ok(())
    }

    fn read(&self, _key: &str) -> anyhow::Result<Option<Vec<ClassifiedTransaction>>> {
        Ok(self.writes.borrow().last().cloned())
    }
}

/// Store stub whose writes always fail.
pub struct FailingStore;

impl HistoryStore for FailingStore {
    fn write(&self, _key: &str, _entries: &[ClassifiedTransaction]) -> anyhow::Result<()> {
        anyhow::bail!("store unavailable")
    }

    fn read(&self, _key: &str) -> anyhow::Result<Option<Vec<ClassifiedTransaction>>> {
        anyhow::bail!("store unavailable")
    }
}

pub fn entry(merchant: &str, amount_units: i64) -> ClassifiedTransaction {
    ClassifiedTransaction::new(
        TransactionFacts {
            amount_micros: amount_units * MICROS_SCALE,
            currency: "USD".to_string(),
            merchant: merchant.to_string(),
        },
        RiskTier::Low,
        None,
    )
}

/// Ledger over a controllable clock: `now.set(..)` moves time.
pub fn ledger_with_store<S: HistoryStore>(
    store: S,
) -> (RecentChecksLedger<impl Fn() -> i64, S>, Rc<Cell<i64>>) {
    let now = Rc::new(Cell::new(0_i64));
    let clock = {
        let now = Rc::clone(&now);
        move || now.get()
    };
    let ledger = RecentChecksLedger::new(
        LedgerConfig::sane_defaults(),
        clock,
        store,
        "recent_checks",
    );
    (ledger, now)
}

pub fn merchants<S: HistoryStore>(
    ledger: &RecentChecksLedger<impl Fn() -> i64, S>,
) -> Vec<String> {
    ledger
        .entries()
        .iter()
        .map(|e| e.merchant.clone())
        .collect()
}
