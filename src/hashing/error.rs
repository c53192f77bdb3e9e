//! Errors raised while building, loading or using the random table.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZobristError {
    /// The stream ran out. Both counts are taken from the current read position.
    #[error("random stream exhausted: needed {needed} values, {available} available")]
    ExhaustedStream { needed: usize, available: usize },
    /// A persisted value could not be parsed as an unsigned 64-bit integer.
    #[error("malformed persisted value {token:?} at position {index}")]
    MalformedPersistedData { index: usize, token: String },
    #[error("random table unavailable ({context}): {source}")]
    PersistenceUnavailable {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("random table is not ready")]
    NotReady,
}

impl ZobristError {
    pub(crate) fn unavailable(context: impl Into<String>, source: io::Error) -> Self {
        ZobristError::PersistenceUnavailable {
            context: context.into(),
            source,
        }
    }

    /// True for errors caused by bad persisted content rather than I/O.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            ZobristError::MalformedPersistedData { .. } | ZobristError::ExhaustedStream { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ZobristError>;
