use rdk_schemas::ClassifiedTransaction;
use tracing::warn;

use crate::history::HistoryStore;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Ledger bounds + undo timing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Maximum entries retained; insertion beyond this evicts the oldest.
    pub capacity: usize,

    /// How long (ms) a removal or clear stays reversible.
    pub undo_window_ms: i64,
}

impl LedgerConfig {
    pub fn sane_defaults() -> Self {
        Self {
            capacity: 8,
            undo_window_ms: 8_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Undo slots
// ---------------------------------------------------------------------------

/// Pending undo for a single removed entry.
///
/// At most one lives at a time; arming a new one discards the old
/// (last-remove-wins).  Past `expires_at_ms` the removal is permanent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveUndoSlot {
    pub entry: ClassifiedTransaction,
    pub original_index: usize,
    pub expires_at_ms: i64,
}

/// Pending undo for a bulk clear, holding the full pre-clear sequence.
/// Same single-slot, replace-and-discard rule as [`RemoveUndoSlot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearUndoSlot {
    pub snapshot: Vec<ClassifiedTransaction>,
    pub expires_at_ms: i64,
}

// ---------------------------------------------------------------------------
// RecentChecksLedger
// ---------------------------------------------------------------------------

/// Bounded, ordered, most-recent-first history of classified transactions.
///
/// Index 0 is the newest entry.  `len() <= capacity` holds after every
/// operation.  Undo deadlines are absolute epoch-ms timestamps evaluated
/// lazily against the injected clock at each entry point — there is no
/// explicit commit step; an elapsed deadline IS the commit.
///
/// # Clock injection
///
/// `C: Fn() -> i64` returns epoch-milliseconds.  In production pass the
/// system wall clock; in tests, a closure over an `Rc<Cell<i64>>` gives full
/// control of time.
pub struct RecentChecksLedger<C, S>
where
    C: Fn() -> i64,
    S: HistoryStore,
{
    cfg: LedgerConfig,
    entries: Vec<ClassifiedTransaction>,
    remove_undo: Option<RemoveUndoSlot>,
    clear_undo: Option<ClearUndoSlot>,
    clock: C,
    store: S,
    store_key: String,
}

impl<C, S> RecentChecksLedger<C, S>
where
    C: Fn() -> i64,
    S: HistoryStore,
{
    /// Create an empty ledger mirroring to `store` under `store_key`.
    pub fn new(cfg: LedgerConfig, clock: C, store: S, store_key: impl Into<String>) -> Self {
        Self {
            cfg,
            entries: Vec::new(),
            remove_undo: None,
            clear_undo: None,
            clock,
            store,
            store_key: store_key.into(),
        }
    }

    /// Replace the contents from a persisted sequence (startup rehydration).
    ///
    /// Truncates to capacity.  Does not write back — the data just came from
    /// the store.
    pub fn hydrate(&mut self, mut entries: Vec<ClassifiedTransaction>) {
        entries.truncate(self.cfg.capacity);
        self.entries = entries;
    }

    // -----------------------------------------------------------------------
    // Write surface
    // -----------------------------------------------------------------------

    /// Insert at the front; evict the oldest entry past capacity.
    /// Always succeeds.
    pub fn push(&mut self, entry: ClassifiedTransaction) {
        self.expire_slots();
        self.entries.insert(0, entry);
        self.entries.truncate(self.cfg.capacity);
        self.persist();
    }

    /// Remove the entry at `index`, arming a fresh single-remove undo slot.
    ///
    /// Any previously armed single-remove slot is discarded.  Out-of-range
    /// `index` removes nothing and returns `None` — a silent no-op, not an
    /// error.
    pub fn remove_at(&mut self, index: usize) -> Option<ClassifiedTransaction> {
        self.expire_slots();
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.remove_undo = Some(RemoveUndoSlot {
            entry: entry.clone(),
            original_index: index,
            expires_at_ms: self.now_ms() + self.cfg.undo_window_ms,
        });
        self.persist();
        Some(entry)
    }

    /// Reinsert the pending removed entry, if its window is still open.
    ///
    /// The list may have changed shape since removal, so the entry lands at
    /// `min(original_index, len)` and the capacity bound is re-enforced.
    /// Returns `false` (no-op) when no slot is live.
    pub fn undo_remove(&mut self) -> bool {
        self.expire_slots();
        let Some(slot) = self.remove_undo.take() else {
            return false;
        };
        let at = slot.original_index.min(self.entries.len());
        self.entries.insert(at, slot.entry);
        self.entries.truncate(self.cfg.capacity);
        self.persist();
        true
    }

    /// Empty the ledger, snapshotting the full sequence into a fresh
    /// clear-all undo slot (discarding any prior one).  Returns how many
    /// entries were cleared.
    pub fn clear_all(&mut self) -> usize {
        self.expire_slots();
        let snapshot = std::mem::take(&mut self.entries);
        let cleared = snapshot.len();
        self.clear_undo = Some(ClearUndoSlot {
            snapshot,
            expires_at_ms: self.now_ms() + self.cfg.undo_window_ms,
        });
        self.persist();
        cleared
    }

    /// Restore exactly the pre-clear snapshot, if the window is still open.
    /// Returns `false` (no-op) when no slot is live.
    pub fn undo_clear(&mut self) -> bool {
        self.expire_slots();
        let Some(slot) = self.clear_undo.take() else {
            return false;
        };
        self.entries = slot.snapshot;
        self.persist();
        true
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// The current sequence, most-recent-first.
    pub fn entries(&self) -> &[ClassifiedTransaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The live single-remove undo slot, if its window is still open.
    pub fn pending_remove_undo(&self) -> Option<&RemoveUndoSlot> {
        let now = self.now_ms();
        self.remove_undo
            .as_ref()
            .filter(|slot| now < slot.expires_at_ms)
    }

    /// The live clear-all undo slot, if its window is still open.
    ///
    /// Both slot kinds are independent state; which one a UI offers when
    /// both are live is a presentation decision, not a ledger invariant.
    pub fn pending_clear_undo(&self) -> Option<&ClearUndoSlot> {
        let now = self.now_ms();
        self.clear_undo
            .as_ref()
            .filter(|slot| now < slot.expires_at_ms)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn now_ms(&self) -> i64 {
        (self.clock)()
    }

    /// Drop any slot whose deadline has passed.  Called at every entry
    /// point, making the elapsed deadline the point of permanence.
    fn expire_slots(&mut self) {
        let now = self.now_ms();
        if self
            .remove_undo
            .as_ref()
            .is_some_and(|slot| now >= slot.expires_at_ms)
        {
            self.remove_undo = None;
        }
        if self
            .clear_undo
            .as_ref()
            .is_some_and(|slot| now >= slot.expires_at_ms)
        {
            self.clear_undo = None;
        }
    }

    /// Mirror the current sequence to the store.  Best-effort: a failed
    /// write is logged and swallowed; ledger correctness never depends on
    /// persistence succeeding.
    fn persist(&self) {
        if let Err(err) = self.store.write(&self.store_key, &self.entries) {
            warn!(key = %self.store_key, "history write failed: {err:#}");
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use rdk_schemas::{RiskTier, TransactionFacts, MICROS_SCALE};

    use super::*;

    /// Store stub that ignores writes and holds nothing.
    struct NullStore;

    impl HistoryStore for NullStore {
        fn write(&self, _key: &str, _entries: &[ClassifiedTransaction]) -> anyhow::Result<()> {
            Ok(())
        }
        fn read(&self, _key: &str) -> anyhow::Result<Option<Vec<ClassifiedTransaction>>> {
            Ok(None)
        }
    }

    fn entry(merchant: &str) -> ClassifiedTransaction {
        ClassifiedTransaction::new(
            TransactionFacts {
                amount_micros: 42 * MICROS_SCALE,
                currency: "USD".to_string(),
                merchant: merchant.to_string(),
            },
            RiskTier::Low,
            None,
        )
    }

    fn test_ledger() -> (
        RecentChecksLedger<impl Fn() -> i64, NullStore>,
        Rc<Cell<i64>>,
    ) {
        let now = Rc::new(Cell::new(0_i64));
        let clock = {
            let now = Rc::clone(&now);
            move || now.get()
        };
        let ledger = RecentChecksLedger::new(
            LedgerConfig::sane_defaults(),
            clock,
            NullStore,
            "recent_checks",
        );
        (ledger, now)
    }

    fn merchants(ledger: &RecentChecksLedger<impl Fn() -> i64, NullStore>) -> Vec<String> {
        ledger.entries().iter().map(|e| e.merchant.clone()).collect()
    }

    // --- Bounded insertion ---

    #[test]
    fn push_is_most_recent_first() {
        let (mut l, _) = test_ledger();
        l.push(entry("m1"));
        l.push(entry("m2"));
        assert_eq!(merchants(&l), vec!["m2", "m1"]);
    }

    #[test]
    fn push_past_capacity_evicts_oldest() {
        let (mut l, _) = test_ledger();
        for i in 1..=9 {
            l.push(entry(&format!("m{i}")));
        }
        assert_eq!(l.len(), 8);
        assert_eq!(
            merchants(&l),
            vec!["m9", "m8", "m7", "m6", "m5", "m4", "m3", "m2"]
        );
    }

    // --- remove_at / undo_remove ---

    #[test]
    fn remove_at_returns_entry_and_arms_undo() {
        let (mut l, _) = test_ledger();
        for i in 1..=4 {
            l.push(entry(&format!("m{i}")));
        }
        // sequence: m4 m3 m2 m1
        let removed = l.remove_at(2).expect("index 2 is in range");
        assert_eq!(removed.merchant, "m2");
        assert_eq!(merchants(&l), vec!["m4", "m3", "m1"]);

        let slot = l.pending_remove_undo().expect("slot armed");
        assert_eq!(slot.original_index, 2);
        assert_eq!(slot.expires_at_ms, 8_000);
    }

    #[test]
    fn remove_at_out_of_range_is_a_noop() {
        let (mut l, _) = test_ledger();
        l.push(entry("m1"));
        assert_eq!(l.remove_at(5), None);
        assert_eq!(l.len(), 1);
        assert!(l.pending_remove_undo().is_none());
    }

    #[test]
    fn undo_remove_restores_original_order() {
        let (mut l, _) = test_ledger();
        for i in 1..=4 {
            l.push(entry(&format!("m{i}")));
        }
        let before = merchants(&l);
        l.remove_at(2);
        assert!(l.undo_remove());
        assert_eq!(merchants(&l), before);
        assert!(l.pending_remove_undo().is_none());
    }

    #[test]
    fn undo_remove_without_slot_is_a_noop() {
        let (mut l, _) = test_ledger();
        l.push(entry("m1"));
        assert!(!l.undo_remove());
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn second_remove_discards_first_slot() {
        let (mut l, _) = test_ledger();
        for i in 1..=4 {
            l.push(entry(&format!("m{i}")));
        }
        // m4 m3 m2 m1
        l.remove_at(3); // removes m1
        l.remove_at(0); // removes m4, replacing the slot
        assert!(l.undo_remove());
        // Only m4 comes back; m1 is gone for good.
        assert_eq!(merchants(&l), vec!["m4", "m3", "m2"]);
        assert!(!l.undo_remove());
    }

    #[test]
    fn undo_remove_clamps_index_to_shrunk_list() {
        let (mut l, _) = test_ledger();
        for i in 1..=3 {
            l.push(entry(&format!("m{i}")));
        }
        // m3 m2 m1; remove the tail...
        l.remove_at(2);
        // ...then clear what's left (arming the other slot kind).
        l.clear_all();
        // original_index 2 > len 0: clamped to the end.
        assert!(l.undo_remove());
        assert_eq!(merchants(&l), vec!["m1"]);
    }

    #[test]
    fn undo_remove_reenforces_capacity() {
        let (mut l, _) = test_ledger();
        for i in 1..=8 {
            l.push(entry(&format!("m{i}")));
        }
        l.remove_at(7); // drop the oldest (m1)
        l.push(entry("m9")); // back at capacity
        assert!(l.undo_remove());
        // Reinsertion may not breach the bound: m1 reappears at its clamped
        // slot and the now-oldest overflow entry is evicted.
        assert_eq!(l.len(), 8);
    }

    // --- Expiry ---

    #[test]
    fn remove_undo_expires_after_window() {
        let (mut l, now) = test_ledger();
        for i in 1..=3 {
            l.push(entry(&format!("m{i}")));
        }
        l.remove_at(1);
        now.set(8_000); // deadline reached — removal is permanent
        assert!(l.pending_remove_undo().is_none());
        assert!(!l.undo_remove());
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn remove_undo_succeeds_just_before_deadline() {
        let (mut l, now) = test_ledger();
        for i in 1..=3 {
            l.push(entry(&format!("m{i}")));
        }
        l.remove_at(1);
        now.set(7_999);
        assert!(l.undo_remove());
        assert_eq!(l.len(), 3);
    }

    #[test]
    fn slots_expire_independently() {
        let (mut l, now) = test_ledger();
        for i in 1..=4 {
            l.push(entry(&format!("m{i}")));
        }
        l.remove_at(0); // remove slot expires at 8_000
        now.set(5_000);
        l.clear_all(); // clear slot expires at 13_000
        now.set(9_000); // remove slot dead, clear slot alive
        assert!(!l.undo_remove());
        assert!(l.undo_clear());
        assert_eq!(merchants(&l), vec!["m3", "m2", "m1"]);
    }

    // --- clear_all / undo_clear ---

    #[test]
    fn clear_all_empties_and_reports_count() {
        let (mut l, _) = test_ledger();
        for i in 1..=5 {
            l.push(entry(&format!("m{i}")));
        }
        assert_eq!(l.clear_all(), 5);
        assert!(l.is_empty());
        assert!(l.pending_clear_undo().is_some());
    }

    #[test]
    fn undo_clear_restores_exact_sequence() {
        let (mut l, _) = test_ledger();
        for i in 1..=5 {
            l.push(entry(&format!("m{i}")));
        }
        let before = merchants(&l);
        l.clear_all();
        assert!(l.undo_clear());
        assert_eq!(merchants(&l), before);
        assert!(l.pending_clear_undo().is_none());
    }

    #[test]
    fn double_clear_keeps_only_second_snapshot() {
        let (mut l, _) = test_ledger();
        l.push(entry("m1"));
        l.clear_all(); // snapshot [m1]
        l.push(entry("m2"));
        l.clear_all(); // snapshot [m2], first snapshot discarded
        assert!(l.undo_clear());
        assert_eq!(merchants(&l), vec!["m2"]);
        assert!(!l.undo_clear());
    }

    #[test]
    fn clear_undo_expires_after_window() {
        let (mut l, now) = test_ledger();
        l.push(entry("m1"));
        l.clear_all();
        now.set(8_000);
        assert!(!l.undo_clear());
        assert!(l.is_empty());
    }

    // --- Hydration ---

    #[test]
    fn hydrate_truncates_to_capacity() {
        let (mut l, _) = test_ledger();
        let persisted: Vec<_> = (1..=12).map(|i| entry(&format!("m{i}"))).collect();
        l.hydrate(persisted);
        assert_eq!(l.len(), 8);
        assert_eq!(l.entries()[0].merchant, "m1");
    }
}
