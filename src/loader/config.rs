use crate::hashing::stream::DEFAULT_SEED;
use std::path::PathBuf;

/// Default location of the persisted table, relative to the working directory.
pub const DEFAULT_TABLE_FILE: &str = "RandomNumbers.txt";

/// Where the table lives and how to rebuild it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub seed: u64,
    pub path: PathBuf,
    /// Overwrite an unreadable persisted table with a fresh one instead of failing.
    pub regenerate_on_corruption: bool,
}

impl TableConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        TableConfig {
            path: path.into(),
            ..TableConfig::default()
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            seed: DEFAULT_SEED,
            path: PathBuf::from(DEFAULT_TABLE_FILE),
            regenerate_on_corruption: true,
        }
    }
}
