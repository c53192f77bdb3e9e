//! Table sources
//!
//! A source turns some medium into a ready [`RandomConstantTable`]. The
//! synchronous [`TableSource`] suits hosts with local file access; the
//! [`AsyncTableSource`] suits hosts that can only fetch assets
//! asynchronously. Callers of the hasher only see the resulting table.

use super::config::TableConfig;
use crate::hashing::error::{Result, ZobristError};
use crate::hashing::stream::RandomStream;
use crate::hashing::table::RandomConstantTable;
use std::fs;
use std::future::Future;
use std::io;
use std::path::Path;

/// How a table came to be
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Read from a persisted copy
    Persisted,
    /// Downloaded through a host fetch
    Fetched,
    /// Nothing was persisted; generated and written out
    Generated,
    /// The persisted copy was unusable and has been replaced
    Regenerated { reason: String },
    /// Generated in memory without touching storage
    Seeded,
    /// Handed over already built
    Provided,
}

/// A table together with its origin
#[derive(Clone, Debug)]
pub struct Loaded {
    pub table: RandomConstantTable,
    pub origin: LoadOrigin,
}

pub trait TableSource {
    fn load(&self) -> Result<Loaded>;
}

pub trait AsyncTableSource {
    fn load_async(&self) -> impl Future<Output = Result<Loaded>> + Send;
}

/// Parse persisted text straight into a table
pub fn table_from_text(text: &str) -> Result<RandomConstantTable> {
    let mut stream = RandomStream::from_persisted(text)?;
    RandomConstantTable::from_stream(&mut stream)
}

/// Generates from a seed every time, never persists
#[derive(Clone, Copy, Debug)]
pub struct SeededSource {
    pub seed: u64,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        SeededSource { seed }
    }
}

impl TableSource for SeededSource {
    fn load(&self) -> Result<Loaded> {
        Ok(Loaded {
            table: RandomConstantTable::generate(self.seed),
            origin: LoadOrigin::Seeded,
        })
    }
}

impl AsyncTableSource for SeededSource {
    fn load_async(&self) -> impl Future<Output = Result<Loaded>> + Send {
        let loaded = self.load();
        async move { loaded }
    }
}

/// Outcome of reading persisted text
enum Parsed {
    Ready(Loaded),
    Regenerate(LoadOrigin),
}

/// Persisted table on the local file system.
///
/// A missing file is generated from the configured seed and written out
/// for the next run. An unparseable or short file is replaced the same way
/// when `regenerate_on_corruption` is set, and is an error otherwise.
#[derive(Clone, Debug)]
pub struct FileSource {
    config: TableConfig,
}

impl FileSource {
    pub fn new(config: TableConfig) -> Self {
        FileSource { config }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Decide what persisted text yields, without touching storage.
    fn from_text(&self, text: &str) -> Result<Parsed> {
        match table_from_text(text) {
            Ok(table) => Ok(Parsed::Ready(Loaded {
                table,
                origin: LoadOrigin::Persisted,
            })),
            Err(e) if e.is_corruption() && self.config.regenerate_on_corruption => {
                Ok(Parsed::Regenerate(LoadOrigin::Regenerated {
                    reason: e.to_string(),
                }))
            }
            Err(e) => Err(e),
        }
    }

    /// Fresh table from the configured seed, with the text to persist.
    fn generate(&self, origin: LoadOrigin) -> Result<(String, Loaded)> {
        let mut stream = RandomStream::generate(self.config.seed);
        let text = stream.to_persisted();
        let table = RandomConstantTable::from_stream(&mut stream)?;
        Ok((text, Loaded { table, origin }))
    }

    fn generate_and_persist(&self, origin: LoadOrigin) -> Result<Loaded> {
        let (text, loaded) = self.generate(origin)?;
        write_persisted(&self.config.path, &text)?;
        Ok(loaded)
    }

    async fn generate_and_persist_async(&self, origin: LoadOrigin) -> Result<Loaded> {
        let (text, loaded) = self.generate(origin)?;
        write_persisted_async(&self.config.path, &text).await?;
        Ok(loaded)
    }

    fn read_error(&self, e: io::Error) -> ZobristError {
        ZobristError::unavailable(format!("reading {}", self.config.path.display()), e)
    }
}

impl TableSource for FileSource {
    fn load(&self) -> Result<Loaded> {
        match fs::read_to_string(&self.config.path) {
            Ok(text) => match self.from_text(&text)? {
                Parsed::Ready(loaded) => Ok(loaded),
                Parsed::Regenerate(origin) => self.generate_and_persist(origin),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.generate_and_persist(LoadOrigin::Generated)
            }
            Err(e) => Err(self.read_error(e)),
        }
    }
}

impl AsyncTableSource for FileSource {
    fn load_async(&self) -> impl Future<Output = Result<Loaded>> + Send {
        async move {
            match tokio::fs::read_to_string(&self.config.path).await {
                Ok(text) => match self.from_text(&text)? {
                    Parsed::Ready(loaded) => Ok(loaded),
                    Parsed::Regenerate(origin) => self.generate_and_persist_async(origin).await,
                },
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    self.generate_and_persist_async(LoadOrigin::Generated).await
                }
                Err(e) => Err(self.read_error(e)),
            }
        }
    }
}

fn write_persisted(path: &Path, text: &str) -> Result<()> {
    let context = || format!("writing {}", path.display());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ZobristError::unavailable(context(), e))?;
    }
    fs::write(path, text).map_err(|e| ZobristError::unavailable(context(), e))
}

async fn write_persisted_async(path: &Path, text: &str) -> Result<()> {
    let context = || format!("writing {}", path.display());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ZobristError::unavailable(context(), e))?;
    }
    tokio::fs::write(path, text)
        .await
        .map_err(|e| ZobristError::unavailable(context(), e))
}

/// A table fetched through a host-supplied async transport.
///
/// The fetched text is authoritative: it is never regenerated locally, and
/// any retry policy belongs to the fetch closure.
pub struct RemoteSource<F> {
    fetch: F,
    name: String,
}

impl<F, Fut> RemoteSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = io::Result<String>> + Send,
{
    pub fn new(name: impl Into<String>, fetch: F) -> Self {
        RemoteSource {
            fetch,
            name: name.into(),
        }
    }
}

impl<F, Fut> AsyncTableSource for RemoteSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = io::Result<String>> + Send,
{
    fn load_async(&self) -> impl Future<Output = Result<Loaded>> + Send {
        async move {
            let text = (self.fetch)()
                .await
                .map_err(|e| ZobristError::unavailable(format!("fetching {}", self.name), e))?;
            Ok(Loaded {
                table: table_from_text(&text)?,
                origin: LoadOrigin::Fetched,
            })
        }
    }
}
