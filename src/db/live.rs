use futures::Stream;
use rusqlite::Connection;
use std::sync::{Arc, Weak};
use tokio::sync::watch;

use super::Shared;
use crate::error::Result;

type Query<T> = Arc<dyn Fn(&Connection) -> Result<T> + Send + Sync>;

/// A query that re-runs whenever its table is written.
///
/// Holds only a weak reference to the store, so it never keeps the database
/// open by itself. Dropping it unsubscribes.
pub struct LiveQuery<T> {
    shared: Weak<Shared>,
    invalidations: watch::Receiver<u64>,
    query: Query<T>,
    /// Read on the next call without waiting for a write. Cleared only once a
    /// read has completed, so a dropped `next()` leaves it set.
    stale: bool,
}

impl<T: Send + 'static> LiveQuery<T> {
    pub(crate) fn new<F>(shared: &Arc<Shared>, table: &'static str, query: F) -> Self
    where
        F: Fn(&Connection) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            shared: Arc::downgrade(shared),
            invalidations: shared.tracker.subscribe(table),
            query: Arc::new(query),
            stale: true,
        }
    }

    /// The current result on the first call, then the result after each
    /// subsequent write. `None` once the store has been dropped.
    ///
    /// A failed read is returned as `Some(Err(_))`; the query stays subscribed
    /// and reads again after the next write.
    ///
    /// Cancel safe: if the future is dropped before it yields, the following
    /// call reads again instead of waiting for another write.
    pub async fn next(&mut self) -> Option<Result<T>> {
        if !self.stale {
            if self.invalidations.changed().await.is_err() {
                return None;
            }
            self.stale = true;
        }
        // Anything committed after this point triggers another read.
        self.invalidations.borrow_and_update();

        let shared = self.shared.upgrade()?;
        let query = Arc::clone(&self.query);
        let result = shared.blocking(move |conn| query(conn)).await;
        self.stale = false;
        tracing::debug!(ok = result.is_ok(), "live query refreshed");
        Some(result)
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        futures::stream::unfold(self, |mut live| async move {
            live.next().await.map(|item| (item, live))
        })
    }
}
