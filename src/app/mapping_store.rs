// LogSift - app/mapping_store.rs
//
// Process-wide, load-once mapping table.
//
// The first caller runs the loader; every other caller (concurrent or later)
// blocks on that single attempt and receives the same result. A failed load
// is stored as an empty table plus the warning text, so later lookups report
// "not loaded" instead of retrying.

use crate::core::mapping::MappingTable;
use crate::util::error::LoadError;
use std::sync::OnceLock;

/// Outcome of the single initialization attempt.
#[derive(Debug)]
pub struct LoadedMapping {
    pub table: MappingTable,
    /// Non-fatal warning shown to the operator when loading failed.
    pub warning: Option<String>,
}

/// A once-initialized mapping table slot.
#[derive(Debug, Default)]
pub struct MappingStore {
    cell: OnceLock<LoadedMapping>,
}

impl MappingStore {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the stored table, running `load` if this is the first request.
    pub fn get_or_init<F>(&self, load: F) -> &LoadedMapping
    where
        F: FnOnce() -> Result<MappingTable, LoadError>,
    {
        self.cell.get_or_init(|| match load() {
            Ok(table) => LoadedMapping {
                table,
                warning: None,
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to load mapping table");
                LoadedMapping {
                    table: MappingTable::empty(),
                    warning: Some(format!(
                        "{e}. Error code lookup is unavailable; log search still works."
                    )),
                }
            }
        })
    }

    /// The stored table, if initialization has already happened.
    pub fn get(&self) -> Option<&LoadedMapping> {
        self.cell.get()
    }
}

static GLOBAL: MappingStore = MappingStore::new();

/// The process-wide store shared by every view and the CLI.
pub fn global() -> &'static MappingStore {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::RawMappingRecord;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_loader_runs_once_across_threads() {
        let store = Arc::new(MappingStore::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    let loaded = store.get_or_init(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(MappingTable::from_records(vec![RawMappingRecord::new(
                            Some("E1"),
                            Some("Cause"),
                            Some("Act"),
                        )]))
                    });
                    loaded.table.len()
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_shared_as_empty_table() {
        let store = MappingStore::new();
        let first = store.get_or_init(|| {
            Err(LoadError::NoSourceFound {
                dir: PathBuf::from("/nowhere"),
            })
        });
        assert!(!first.table.is_loaded());
        assert!(first.warning.is_some());

        // A second request does not retry.
        let second = store.get_or_init(|| Ok(MappingTable::empty()));
        assert!(second.warning.is_some());
        assert!(store.get().is_some());
    }
}
