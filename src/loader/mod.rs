//! Table loading
//!
//! Gets the random table from storage (or generates it) and guards access
//! until it is ready.

pub mod config;
pub mod ready;
pub mod source;

pub use config::{DEFAULT_TABLE_FILE, TableConfig};
pub use ready::ZobristTable;
pub use source::{
    AsyncTableSource, FileSource, LoadOrigin, Loaded, RemoteSource, SeededSource, TableSource,
    table_from_text,
};
