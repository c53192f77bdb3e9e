//! Castling rights as the 4-bit mask used to index the castling constants.

use shakmaty::{CastlingSide, Color, Square};

/// Castling rights
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;
    pub const ALL: CastlingRights = CastlingRights(0xF);

    /// Wrap a raw mask. Anything above 15 is a caller bug.
    #[inline]
    pub fn new(rights: u8) -> Self {
        debug_assert!(rights <= 0xF, "castling mask out of range: {}", rights);
        CastlingRights(rights & 0xF)
    }

    #[inline]
    pub const fn has(self, right: u8) -> bool {
        (self.0 & right) != 0
    }

    #[inline]
    pub fn remove(&mut self, right: u8) {
        self.0 &= !right;
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// The bit for one side of one colour
    pub const fn flag(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => Self::WHITE_KINGSIDE,
            (Color::White, CastlingSide::QueenSide) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::KingSide) => Self::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::QueenSide) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Rights lost when a piece moves from or to `sq`
    pub fn rights_for_square(sq: Square) -> u8 {
        match sq {
            Square::A1 => Self::WHITE_QUEENSIDE,
            Square::H1 => Self::WHITE_KINGSIDE,
            Square::E1 => Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE,
            Square::A8 => Self::BLACK_QUEENSIDE,
            Square::H8 => Self::BLACK_KINGSIDE,
            Square::E8 => Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE,
            _ => 0,
        }
    }

    /// Rights remaining after a move touching `from` and `to`
    pub fn after_move(self, from: Square, to: Square) -> Self {
        let mut rights = self;
        rights.remove(Self::rights_for_square(from));
        rights.remove(Self::rights_for_square(to));
        rights
    }
}
