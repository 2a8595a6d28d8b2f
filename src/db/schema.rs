pub(crate) const BUDGETS_TABLE: &str = "budgets";

pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS budgets (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    month            INTEGER NOT NULL,
    year             INTEGER NOT NULL,
    overall_budget   REAL NOT NULL,
    category_budgets TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_budgets_period ON budgets(year, month);
"#;

pub(crate) const SELECT_COLUMNS: &str =
    "SELECT id, month, year, overall_budget, category_budgets FROM budgets";

/// Id 0 or NULL lets SQLite assign the next id.
pub(crate) const UPSERT: &str =
    "INSERT OR REPLACE INTO budgets (id, month, year, overall_budget, category_budgets)
     VALUES (nullif(?1, 0), ?2, ?3, ?4, ?5)";
