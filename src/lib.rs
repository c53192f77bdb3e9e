pub mod hashing;
pub mod loader;
pub mod uci;

pub use crate::hashing::{
    BoardSnapshot, CastlingRights, PositionKey, RandomConstantTable, RandomStream, ZobristError,
    compute_full_key, key_after_move,
};
pub use loader::{FileSource, RemoteSource, SeededSource, TableConfig, ZobristTable};
pub use shakmaty;
pub use uci::UCI;
