mod backup;
mod invalidation;
mod live;
mod schema;

use rusqlite::{params, Connection, Row, Transaction};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::codec;
use crate::error::{Result, StorageError};
use crate::models::{Budget, Period};

pub use backup::{BudgetBackup, BACKUP_VERSION};
pub use live::LiveQuery;

use invalidation::InvalidationTracker;
use schema::BUDGETS_TABLE;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Budget records in one SQLite table.
///
/// Every operation runs on tokio's blocking pool; the store must be used from
/// within a tokio runtime. Cloning is cheap and shares the connection.
#[derive(Clone)]
pub struct BudgetStore {
    shared: Arc<Shared>,
}

pub(crate) struct Shared {
    conn: Mutex<Connection>,
    tracker: InvalidationTracker,
}

impl BudgetStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        tracing::info!(path = %path.display(), "opened budget database");
        Self::from_connection(conn)
    }

    /// Open the database at the platform data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = crate::paths::default_db_path()?;
        Self::open(&path)
            .with_context(|| format!("Failed to open database: {}", path.display()))
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::SCHEMA)?;
        Ok(Self {
            shared: Arc::new(Shared {
                conn: Mutex::new(conn),
                tracker: InvalidationTracker::default(),
            }),
        })
    }

    // ── Writes ────────────────────────────────────────────────

    /// Insert `budget`, or replace the row with the same id. Returns the row id.
    pub async fn upsert(&self, budget: &Budget) -> Result<i64> {
        let encoded = prepare_write(budget)?;
        let budget = budget.clone();
        let id = self
            .shared
            .write(move |tx| {
                insert_budget(tx, &budget, &encoded)?;
                Ok(tx.last_insert_rowid())
            })
            .await?;
        tracing::debug!(id, "upserted budget");
        Ok(id)
    }

    /// Delete every budget. A no-op on an empty table.
    pub async fn clear_all(&self) -> Result<()> {
        let removed = self
            .shared
            .write(|tx| Ok(tx.execute("DELETE FROM budgets", [])?))
            .await?;
        tracing::debug!(removed, "cleared budgets");
        Ok(())
    }

    /// Swap the whole table for `budgets` in one transaction, keeping their ids.
    pub async fn replace_all(&self, budgets: Vec<Budget>) -> Result<usize> {
        let rows = budgets
            .into_iter()
            .map(|b| prepare_write(&b).map(|encoded| (b, encoded)))
            .collect::<Result<Vec<_>>>()?;
        let count = rows.len();
        self.shared
            .write(move |tx| {
                tx.execute("DELETE FROM budgets", [])?;
                for (budget, encoded) in &rows {
                    insert_budget(tx, budget, encoded)?;
                }
                Ok(())
            })
            .await?;
        tracing::debug!(count, "replaced all budgets");
        Ok(count)
    }

    // ── Reads ─────────────────────────────────────────────────

    /// Live view of the budget for one period.
    ///
    /// The first [`LiveQuery::next`] yields the current row (or `None`); each
    /// later call waits for a committed write to the table and reads again.
    pub fn get_budget_for_month(&self, month: u32, year: i32) -> LiveQuery<Option<Budget>> {
        LiveQuery::new(&self.shared, BUDGETS_TABLE, move |conn| {
            query_budget_for_month(conn, month, year)
        })
    }

    pub fn get_budget_for_period(&self, period: Period) -> LiveQuery<Option<Budget>> {
        self.get_budget_for_month(period.month, period.year)
    }

    /// Every stored budget, in no particular order.
    ///
    /// Dropping the returned future stops the read at the next row.
    pub async fn get_all_budgets(&self) -> Result<Vec<Budget>> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let _guard = CancelOnDrop(Arc::clone(&cancelled));
        let budgets = self
            .shared
            .blocking(move |conn| read_all_budgets(conn, || cancelled.load(Ordering::Relaxed)))
            .await?;
        Ok(budgets.unwrap_or_default())
    }

    #[cfg(test)]
    pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
        self.shared
            .blocking(move |conn| Ok(conn.execute_batch(sql)?))
            .await
    }
}

impl Shared {
    /// Run `f` against the connection on the blocking pool.
    pub(crate) async fn blocking<T, F>(self: &Arc<Self>, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let shared = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let mut conn = shared.conn.lock().map_err(|_| StorageError::Poisoned)?;
            f(&mut conn)
        })
        .await?
    }

    /// Run `f` in a transaction and notify watchers of the budgets table once
    /// it has committed. Any error rolls the transaction back.
    async fn write<T, F>(self: &Arc<Self>, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let shared = Arc::clone(self);
        self.blocking(move |conn| {
            let tx = conn.transaction()?;
            let out = f(&tx)?;
            tx.commit()?;
            // Still under the connection lock, so notifications follow commit order.
            shared.tracker.notify(BUDGETS_TABLE);
            Ok(out)
        })
        .await
    }
}

struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// A row as stored, before the category budgets are decoded.
struct RawBudget {
    id: i64,
    month: u32,
    year: i32,
    overall_budget: f64,
    category_budgets: String,
}

impl RawBudget {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            month: row.get(1)?,
            year: row.get(2)?,
            overall_budget: row.get(3)?,
            category_budgets: row.get(4)?,
        })
    }

    fn decode(self) -> Result<Budget> {
        let category_budgets = codec::decode(&self.category_budgets).map_err(|source| {
            tracing::warn!(id = self.id, error = %source, "undecodable category budgets");
            StorageError::CorruptRow {
                id: self.id,
                source,
            }
        })?;
        Ok(Budget {
            id: Some(self.id),
            month: self.month,
            year: self.year,
            overall_budget: self.overall_budget,
            category_budgets,
        })
    }
}

/// Validate a budget and encode its category budgets ahead of any transaction.
fn prepare_write(budget: &Budget) -> Result<String> {
    if !budget.overall_budget.is_finite() {
        return Err(StorageError::InvalidBudget(format!(
            "overall budget for {}/{} is not finite",
            budget.month, budget.year
        )));
    }
    Ok(codec::encode(&budget.category_budgets)?)
}

fn insert_budget(tx: &Transaction<'_>, budget: &Budget, encoded: &str) -> Result<()> {
    tx.execute(
        schema::UPSERT,
        params![
            budget.assigned_id(),
            budget.month,
            budget.year,
            budget.overall_budget,
            encoded,
        ],
    )?;
    Ok(())
}

/// Every row, checking `is_cancelled` before the query and before each row.
/// `None` means the read was abandoned and the cursor released early.
fn read_all_budgets(
    conn: &Connection,
    is_cancelled: impl Fn() -> bool,
) -> Result<Option<Vec<Budget>>> {
    if is_cancelled() {
        return Ok(None);
    }
    let mut stmt = conn.prepare(schema::SELECT_COLUMNS)?;
    let mut rows = stmt.query([])?;
    let mut budgets = Vec::new();
    while let Some(row) = rows.next()? {
        if is_cancelled() {
            return Ok(None);
        }
        budgets.push(RawBudget::from_row(row)?.decode()?);
    }
    Ok(Some(budgets))
}

fn query_budget_for_month(conn: &Connection, month: u32, year: i32) -> Result<Option<Budget>> {
    let sql = format!("{} WHERE month = ?1 AND year = ?2 LIMIT 1", schema::SELECT_COLUMNS);
    let result = conn.query_row(&sql, params![month, year], RawBudget::from_row);
    match result {
        Ok(raw) => raw.decode().map(Some),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
