use rdk_schemas::ClassifiedTransaction;

/// Key-value persistence collaborator for the recent-checks sequence.
///
/// The ledger calls [`write`](HistoryStore::write) after every mutation with
/// the full resulting sequence (most-recent-first, already bounded).  Writes
/// are best-effort: the ledger logs and swallows failures, so an
/// implementation may fail freely without affecting ledger correctness.
///
/// [`read`](HistoryStore::read) is used once at startup to rehydrate the
/// ledger when a persisted sequence exists.
pub trait HistoryStore {
    fn write(&self, key: &str, entries: &[ClassifiedTransaction]) -> anyhow::Result<()>;

    fn read(&self, key: &str) -> anyhow::Result<Option<Vec<ClassifiedTransaction>>>;
}
