use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category id to spending limit for one period.
pub type CategoryBudgets = BTreeMap<i64, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// `None` (or `Some(0)`) asks the store to assign the next id.
    pub id: Option<i64>,
    /// 1-12. Not checked by the store.
    pub month: u32,
    pub year: i32,
    pub overall_budget: f64,
    pub category_budgets: CategoryBudgets,
}

impl Budget {
    pub fn new(month: u32, year: i32, overall_budget: f64, category_budgets: CategoryBudgets) -> Self {
        Self {
            id: None,
            month,
            year,
            overall_budget,
            category_budgets,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// The id the store should bind, with `Some(0)` treated as unassigned.
    pub(crate) fn assigned_id(&self) -> Option<i64> {
        self.id.filter(|&id| id != 0)
    }

    pub fn total_categorized(&self) -> f64 {
        self.category_budgets.values().sum()
    }

    /// Part of the overall budget not claimed by any category, floored at zero.
    pub fn uncategorized(&self) -> f64 {
        (self.overall_budget - self.total_categorized()).max(0.0)
    }

    /// Drop limits for categories that no longer exist.
    pub fn retain_categories(&mut self, category_ids: &[i64]) {
        self.category_budgets
            .retain(|id, _| category_ids.contains(id));
    }

    pub fn period(&self) -> super::Period {
        super::Period::new(self.month, self.year)
    }
}
