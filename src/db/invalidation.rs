use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;

/// Per-table generation counters that committed writes bump and live queries
/// wait on. Watch channels coalesce, so a slow reader only sees the newest
/// generation.
#[derive(Default)]
pub(crate) struct InvalidationTracker {
    tables: Mutex<HashMap<&'static str, watch::Sender<u64>>>,
}

impl InvalidationTracker {
    pub(crate) fn subscribe(&self, table: &'static str) -> watch::Receiver<u64> {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        tables
            .entry(table)
            .or_insert_with(|| watch::channel(0).0)
            .subscribe()
    }

    pub(crate) fn notify(&self, table: &'static str) {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sender) = tables.get(table) {
            sender.send_modify(|generation| *generation += 1);
        }
    }
}
