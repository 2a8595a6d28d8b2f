//! Storage for monthly budgets.
//!
//! One record per (month, year) holds an overall limit and per-category
//! limits. Writes are transactional; reads for a single period are live and
//! re-emit after every committed write.

pub mod codec;
mod db;
mod error;
pub mod models;
pub mod paths;

pub use db::{BudgetBackup, BudgetStore, LiveQuery, BACKUP_VERSION};
pub use error::{CodecError, Result, StorageError};
pub use models::{Budget, CategoryBudgets, Period};
