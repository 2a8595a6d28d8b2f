use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures turning a category-budgets column into a mapping or back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("malformed category budgets: {0}")]
    Malformed(String),

    #[error("duplicate category id {0} in category budgets")]
    DuplicateKey(i64),

    #[error("category budgets not in canonical form: {0:?}")]
    NonCanonical(String),

    #[error("category {category_id} has a non-finite limit")]
    NonFiniteLimit { category_id: i64 },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A stored row whose category budgets cannot be decoded.
    #[error("budget {id} has unreadable category budgets: {source}")]
    CorruptRow { id: i64, source: CodecError },

    #[error("backup error: {0}")]
    Backup(#[from] serde_json::Error),

    #[error("unsupported backup version {0}")]
    UnsupportedBackup(u32),

    #[error("invalid budget: {0}")]
    InvalidBudget(String),

    #[error("database worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("database connection lock poisoned")]
    Poisoned,
}
