//! UCI-style host front-end
//!
//! A small line protocol for driving the key table from a chess GUI or a
//! script: `isready` loads the table, `position` tracks a position and its
//! key, `key` prints it.

pub mod protocol;

pub use protocol::{MAX_SEED, UCI};
