//! One-time table initialization shared by every hashing call site.

use super::source::{AsyncTableSource, LoadOrigin, Loaded, TableSource};
use crate::hashing::error::{Result, ZobristError};
use crate::hashing::table::RandomConstantTable;
use crate::hashing::zobrist::{BoardSnapshot, PositionKey, compute_full_key};
use tokio::sync::OnceCell;

/// Handle to the process's random table.
///
/// Starts unready. Once a source has filled it the table never changes, and
/// the handle can be shared (e.g. behind an `Arc`) by any number of readers.
/// Hashing through an unready handle fails with [`ZobristError::NotReady`].
#[derive(Debug, Default)]
pub struct ZobristTable {
    cell: OnceCell<Loaded>,
}

impl ZobristTable {
    pub fn new() -> Self {
        ZobristTable {
            cell: OnceCell::new(),
        }
    }

    /// A handle that is ready from the start
    pub fn with_table(table: RandomConstantTable) -> Self {
        ZobristTable {
            cell: OnceCell::new_with(Some(Loaded {
                table,
                origin: LoadOrigin::Provided,
            })),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }

    pub fn get(&self) -> Result<&RandomConstantTable> {
        self.cell
            .get()
            .map(|loaded| &loaded.table)
            .ok_or(ZobristError::NotReady)
    }

    pub fn origin(&self) -> Option<&LoadOrigin> {
        self.cell.get().map(|loaded| &loaded.origin)
    }

    /// Load from `source` unless already ready, blocking the caller.
    ///
    /// Returns [`ZobristError::NotReady`] if an async load is still in
    /// flight. A failed load leaves the handle unready.
    pub fn ensure_ready<S: TableSource + ?Sized>(&self, source: &S) -> Result<&RandomConstantTable> {
        if let Some(loaded) = self.cell.get() {
            return Ok(&loaded.table);
        }

        let loaded = source.load()?;
        // Lost a race: whichever table was stored first stays.
        let _ = self.cell.set(loaded);
        self.get()
    }

    /// Load from `source` unless already ready.
    ///
    /// Concurrent callers wait on a single in-flight load.
    pub async fn ensure_ready_async<S: AsyncTableSource>(&self, source: &S) -> Result<&RandomConstantTable> {
        let loaded = self.cell.get_or_try_init(|| source.load_async()).await?;
        Ok(&loaded.table)
    }

    /// Full key of `board`, or `NotReady`
    pub fn full_key<B: BoardSnapshot + ?Sized>(&self, board: &B) -> Result<PositionKey> {
        Ok(compute_full_key(board, self.get()?))
    }
}
