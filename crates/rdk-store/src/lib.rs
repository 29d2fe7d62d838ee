//! rdk-store
//!
//! [`HistoryStore`] implementations:
//! - [`JsonFileStore`] — one JSON document per key under a data directory
//! - [`MemStore`] — mutexed in-memory map for tests and ephemeral runs
//!
//! Both are deliberately dumb key-value stores; retention, ordering, and
//! bounds are the ledger's business.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use rdk_ledger::HistoryStore;
use rdk_schemas::ClassifiedTransaction;

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// File-backed store: `<dir>/<key>.json` holds the sequence for `key`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates the store and ensures the data directory exists.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).with_context(|| format!("create_dir_all {:?}", dir))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl HistoryStore for JsonFileStore {
    fn write(&self, key: &str, entries: &[ClassifiedTransaction]) -> Result<()> {
        let path = self.key_path(key);
        let body = serde_json::to_string_pretty(entries).context("serialize history")?;
        fs::write(&path, body).with_context(|| format!("write history {:?}", path))
    }

    fn read(&self, key: &str) -> Result<Option<Vec<ClassifiedTransaction>>> {
        let path = self.key_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("read history {:?}", path))
            }
        };
        let entries = serde_json::from_str(&raw)
            .with_context(|| format!("parse history {:?}", path))?;
        Ok(Some(entries))
    }
}

// ---------------------------------------------------------------------------
// MemStore
// ---------------------------------------------------------------------------

/// In-memory store.  Clones share the same map, so a test can keep a handle
/// and inspect what the ledger wrote.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    inner: Arc<Mutex<BTreeMap<String, Vec<ClassifiedTransaction>>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemStore {
    fn write(&self, key: &str, entries: &[ClassifiedTransaction]) -> Result<()> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| anyhow!("history store mutex poisoned"))?;
        map.insert(key.to_string(), entries.to_vec());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<ClassifiedTransaction>>> {
        let map = self
            .inner
            .lock()
            .map_err(|_| anyhow!("history store mutex poisoned"))?;
        Ok(map.get(key).cloned())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rdk_schemas::{RiskTier, TransactionFacts, MICROS_SCALE};

    use super::*;

    fn entry(merchant: &str) -> ClassifiedTransaction {
        ClassifiedTransaction::new(
            TransactionFacts {
                amount_micros: 42 * MICROS_SCALE,
                currency: "USD".to_string(),
                merchant: merchant.to_string(),
            },
            RiskTier::Low,
            Some(RiskTier::Low),
        )
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path()).expect("store");

        let entries = vec![entry("m2"), entry("m1")];
        store.write("recent_checks", &entries).expect("write");

        let loaded = store
            .read("recent_checks")
            .expect("read")
            .expect("key exists");
        assert_eq!(loaded, entries);
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path()).expect("store");
        assert_eq!(store.read("nothing_here").expect("read"), None);
    }

    #[test]
    fn file_store_write_replaces_previous_sequence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path()).expect("store");

        store.write("k", &[entry("old")]).expect("write");
        store.write("k", &[entry("new")]).expect("write");

        let loaded = store.read("k").expect("read").expect("key exists");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].merchant, "new");
    }

    #[test]
    fn mem_store_clones_share_state() {
        let store = MemStore::new();
        let observer = store.clone();

        store.write("k", &[entry("m1")]).expect("write");
        let loaded = observer.read("k").expect("read").expect("key exists");
        assert_eq!(loaded[0].merchant, "m1");
    }

    #[test]
    fn mem_store_missing_key_is_none() {
        assert_eq!(MemStore::new().read("k").expect("read"), None);
    }
}
