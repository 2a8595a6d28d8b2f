use serde::{Deserialize, Serialize};

use super::BudgetStore;
use crate::error::{Result, StorageError};
use crate::models::Budget;

pub const BACKUP_VERSION: u32 = 1;

/// Portable snapshot of every budget, as written by [`BudgetStore::export_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBackup {
    pub version: u32,
    pub budgets: Vec<Budget>,
}

impl BudgetStore {
    /// All budgets as a JSON backup document, ordered by id.
    pub async fn export_json(&self) -> Result<String> {
        let mut budgets = self.get_all_budgets().await?;
        budgets.sort_by_key(|b| b.id);
        let backup = BudgetBackup {
            version: BACKUP_VERSION,
            budgets,
        };
        Ok(serde_json::to_string_pretty(&backup)?)
    }

    /// Replace every stored budget with the contents of a backup document.
    /// The table is untouched if the document is rejected.
    pub async fn import_json(&self, json: &str) -> Result<usize> {
        let backup: BudgetBackup = serde_json::from_str(json)?;
        if backup.version != BACKUP_VERSION {
            return Err(StorageError::UnsupportedBackup(backup.version));
        }
        self.replace_all(backup.budgets).await
    }
}
