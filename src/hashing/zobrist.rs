//! Zobrist hashing for position identification
//!
//! A position key is the XOR of one table constant per contributing
//! feature: each occupied square, the castling mask, the en passant file
//! and, when black is to move, the side to move constant. XOR is its own
//! inverse, so any feature can be toggled out and back in without
//! recomputing the rest of the key.

use super::castling::CastlingRights;
use super::table::RandomConstantTable;
use shakmaty::{CastlingSide, Chess, Color, EnPassantMode, File, Piece, Position, Square};
use std::fmt;

/// A 64-bit position fingerprint
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PositionKey(u64);

impl PositionKey {
    /// Raw key, e.g. for transposition table indexing
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn toggle_piece(&mut self, table: &RandomConstantTable, piece: Piece, sq: Square) {
        self.0 ^= table.piece(piece, sq);
    }

    #[inline]
    pub fn toggle_castling(&mut self, table: &RandomConstantTable, rights: CastlingRights) {
        self.0 ^= table.castling(rights);
    }

    #[inline]
    pub fn toggle_en_passant(&mut self, table: &RandomConstantTable, file: Option<File>) {
        self.0 ^= table.en_passant(file);
    }

    #[inline]
    pub fn toggle_side_to_move(&mut self, table: &RandomConstantTable) {
        self.0 ^= table.side_to_move();
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// What the hasher needs to know about a position
pub trait BoardSnapshot {
    fn piece_at(&self, sq: Square) -> Option<Piece>;
    fn castling_rights(&self) -> CastlingRights;
    /// File of the en passant target, set after every double pawn push
    fn en_passant_file(&self) -> Option<File>;
    fn side_to_move(&self) -> Color;
}

impl BoardSnapshot for Chess {
    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board().piece_at(sq)
    }

    fn castling_rights(&self) -> CastlingRights {
        let castles = self.castles();
        let mut mask = 0;
        for color in [Color::White, Color::Black] {
            for side in [CastlingSide::KingSide, CastlingSide::QueenSide] {
                if castles.has(color, side) {
                    mask |= CastlingRights::flag(color, side);
                }
            }
        }
        CastlingRights::new(mask)
    }

    fn en_passant_file(&self) -> Option<File> {
        self.ep_square(EnPassantMode::Always).map(|sq| sq.file())
    }

    fn side_to_move(&self) -> Color {
        self.turn()
    }
}

/// Calculate the Zobrist key from scratch.
///
/// Only needed when a position is set up from outside (start position,
/// FEN); during search keys are updated incrementally.
pub fn compute_full_key<B: BoardSnapshot + ?Sized>(board: &B, table: &RandomConstantTable) -> PositionKey {
    let mut key = PositionKey(0);

    for sq in Square::ALL {
        if let Some(piece) = board.piece_at(sq) {
            key.toggle_piece(table, piece, sq);
        }
    }

    key.toggle_en_passant(table, board.en_passant_file());

    if board.side_to_move() == Color::Black {
        key.toggle_side_to_move(table);
    }

    key.toggle_castling(table, board.castling_rights());

    key
}
