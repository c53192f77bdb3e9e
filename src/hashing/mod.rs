//! Core hashing types
//!
//! This module contains the pure parts of the scheme:
//! - Seeded random stream and its persisted text form
//! - Partitioned constant table
//! - Full key computation and the incremental update algebra

pub mod castling;
pub mod error;
pub mod incremental;
pub mod stream;
pub mod table;
pub mod zobrist;

pub use castling::CastlingRights;
pub use error::{Result, ZobristError};
pub use incremental::key_after_move;
pub use stream::{DEFAULT_SEED, REQUIRED_VALUES, RandomStream};
pub use table::RandomConstantTable;
pub use zobrist::{BoardSnapshot, PositionKey, compute_full_key};
