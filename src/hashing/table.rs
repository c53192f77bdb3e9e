//! The partitioned table of Zobrist constants
//!
//! Values are drawn from a [`RandomStream`] in a fixed order:
//! square-major, then piece kind (0..8), then white before black; then the
//! 16 castling constants; then the 9 en passant constants; then the single
//! side to move constant.

use super::castling::CastlingRights;
use super::error::Result;
use super::stream::{EN_PASSANT_VALUES, REQUIRED_VALUES, RandomStream};
use shakmaty::{Color, File, Piece, Role, Square};

/// Piece kind slots. 0 is "none", 1..=6 are the [`Role`] discriminants, 7 is unused.
pub const PIECE_KINDS: usize = 8;

/// Zobrist random constants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomConstantTable {
    /// Keys for each piece on each square [kind][color][square]
    pieces: [[[u64; 64]; 2]; PIECE_KINDS],
    /// Keys for castling rights (one for each of the 16 possible masks)
    castling: [u64; 16],
    /// Keys for en passant file, slot 0 is always zero
    en_passant: [u64; EN_PASSANT_VALUES],
    /// Key for black to move
    side: u64,
}

impl RandomConstantTable {
    /// Generate and partition the stream for `seed`
    pub fn generate(seed: u64) -> Self {
        let mut stream = RandomStream::generate(seed);
        // A freshly generated stream always holds exactly REQUIRED_VALUES.
        match Self::from_stream(&mut stream) {
            Ok(table) => table,
            Err(e) => unreachable!("generated stream too short: {}", e),
        }
    }

    /// Consume [`REQUIRED_VALUES`] values from `stream` and partition them.
    ///
    /// The stream is checked up front, so a short stream fails before any
    /// value is consumed. The value drawn for en passant slot 0 is discarded
    /// and the slot is left at zero, making "no en passant file" a no-op.
    pub fn from_stream(stream: &mut RandomStream) -> Result<Self> {
        stream.require(REQUIRED_VALUES)?;

        let mut pieces = [[[0u64; 64]; 2]; PIECE_KINDS];
        for sq in 0..64 {
            for kind in pieces.iter_mut() {
                kind[0][sq] = stream.next_value()?;
                kind[1][sq] = stream.next_value()?;
            }
        }

        let mut castling = [0u64; 16];
        for key in castling.iter_mut() {
            *key = stream.next_value()?;
        }

        let mut en_passant = [0u64; EN_PASSANT_VALUES];
        for key in en_passant.iter_mut() {
            *key = stream.next_value()?;
        }
        en_passant[0] = 0;

        let side = stream.next_value()?;

        Ok(RandomConstantTable {
            pieces,
            castling,
            en_passant,
            side,
        })
    }

    /// Get the key for a piece on a square
    #[inline]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_slot(role_index(piece.role), color_index(piece.color), sq as usize)
    }

    /// Raw slot access for all 8 kinds, including the unused ones.
    #[inline]
    pub fn piece_slot(&self, kind: usize, color: usize, sq: usize) -> u64 {
        self.pieces[kind][color][sq]
    }

    /// Get the side to move key
    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.side
    }

    /// Get the castling rights key
    #[inline]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.raw() as usize]
    }

    /// Get the en passant key; `None` maps to the zero slot
    #[inline]
    pub fn en_passant(&self, file: Option<File>) -> u64 {
        self.en_passant[en_passant_index(file)]
    }

    pub fn castling_keys(&self) -> &[u64; 16] {
        &self.castling
    }

    pub fn en_passant_keys(&self) -> &[u64; EN_PASSANT_VALUES] {
        &self.en_passant
    }

    /// Every piece/colour/square constant, in table order
    pub fn piece_keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.pieces.iter().flatten().flatten().copied()
    }
}

#[inline]
pub fn role_index(role: Role) -> usize {
    role as usize
}

#[inline]
pub fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

#[inline]
pub fn en_passant_index(file: Option<File>) -> usize {
    file.map_or(0, |f| f as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::stream::DEFAULT_SEED;

    #[test]
    fn consumes_exactly_required_values() {
        let mut values = RandomStream::generate(DEFAULT_SEED).values().to_vec();
        values.push(42);
        let mut stream = RandomStream::from_values(values);
        RandomConstantTable::from_stream(&mut stream).unwrap();
        assert_eq!(stream.remaining(), 1);
        assert_eq!(stream.next_value().unwrap(), 42);
    }

    #[test]
    fn short_stream_is_rejected_untouched() {
        let mut stream = RandomStream::from_values(vec![1; REQUIRED_VALUES - 1]);
        assert!(RandomConstantTable::from_stream(&mut stream).is_err());
        assert_eq!(stream.remaining(), REQUIRED_VALUES - 1);
    }

    #[test]
    fn partition_follows_generation_order() {
        let stream = RandomStream::generate(DEFAULT_SEED);
        let values = stream.values().to_vec();
        let table = RandomConstantTable::from_stream(&mut stream.clone()).unwrap();

        // a1: kind 0 white, kind 0 black, kind 1 white, ...
        assert_eq!(table.piece_slot(0, 0, 0), values[0]);
        assert_eq!(table.piece_slot(0, 1, 0), values[1]);
        assert_eq!(table.piece_slot(1, 0, 0), values[2]);
        assert_eq!(table.piece_slot(7, 1, 0), values[15]);
        assert_eq!(table.piece_slot(0, 0, 1), values[16]);
        assert_eq!(table.piece_slot(7, 1, 63), values[1023]);

        assert_eq!(table.castling_keys()[0], values[1024]);
        assert_eq!(table.castling_keys()[15], values[1039]);
        assert_eq!(table.en_passant_keys()[1], values[1041]);
        assert_eq!(table.en_passant_keys()[8], values[1048]);
        assert_eq!(table.side_to_move(), values[1049]);
    }

    #[test]
    fn en_passant_slot_zero_is_zero() {
        let table = RandomConstantTable::generate(DEFAULT_SEED);
        assert_eq!(table.en_passant(None), 0);
        assert_eq!(table.en_passant(Some(File::A)), table.en_passant_keys()[1]);
        assert_eq!(table.en_passant(Some(File::H)), table.en_passant_keys()[8]);
    }
}
