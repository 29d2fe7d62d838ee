//! rdk-ledger
//!
//! The recent-checks ledger: a bounded, most-recent-first history of
//! classified transactions with timed, reversible deletion.
//!
//! - capacity-bounded insertion (oldest entry evicted past the bound)
//! - indexed removal with a single-slot timed undo
//! - bulk clear with a single-slot timed undo
//! - best-effort mirroring of every mutation to a [`HistoryStore`]
//!
//! The clock is an injectable `Fn() -> i64` returning epoch-milliseconds,
//! enabling deterministic unit tests without real time passing.  All
//! operations are synchronous; if shared across threads, mutations must be
//! serialized by the caller (single-writer discipline).

mod history;
mod ledger;

pub use history::HistoryStore;
pub use ledger::{
    ClearUndoSlot, LedgerConfig, RecentChecksLedger, RemoveUndoSlot,
};
