//! Incremental key update for a single move.
//!
//! Mirrors what a move-application routine does to a running key: every
//! feature the move changes is XORed out with its old constant and back in
//! with its new one. The result equals [`compute_full_key`] on the position
//! after the move.
//!
//! [`compute_full_key`]: super::zobrist::compute_full_key

use super::table::RandomConstantTable;
use super::zobrist::{BoardSnapshot, PositionKey};
use shakmaty::{Chess, File, Move, Piece, Role, Square};

/// Key of the position reached by playing `mv` in `before`, given `key` for `before`.
///
/// `mv` must be legal in `before`.
pub fn key_after_move(
    mut key: PositionKey,
    table: &RandomConstantTable,
    before: &Chess,
    mv: &Move,
) -> PositionKey {
    let us = BoardSnapshot::side_to_move(before);
    let them = !us;

    let old_rights = before.castling_rights();
    let old_ep = before.en_passant_file();
    let mut new_ep = None;

    let new_rights = match *mv {
        Move::Normal {
            role,
            from,
            capture,
            to,
            promotion,
        } => {
            key.toggle_piece(table, Piece { color: us, role }, from);
            if let Some(captured) = capture {
                key.toggle_piece(table, Piece { color: them, role: captured }, to);
            }
            let placed = promotion.unwrap_or(role);
            key.toggle_piece(table, Piece { color: us, role: placed }, to);

            if role == Role::Pawn && (from as i32 - to as i32).abs() == 16 {
                new_ep = Some(from.file());
            }
            old_rights.after_move(from, to)
        }
        Move::EnPassant { from, to } => {
            let pawn = Piece { color: us, role: Role::Pawn };
            key.toggle_piece(table, pawn, from);
            key.toggle_piece(table, pawn, to);
            // The captured pawn sits beside the origin, on the destination file.
            let captured_sq = Square::from_coords(to.file(), from.rank());
            key.toggle_piece(table, Piece { color: them, role: Role::Pawn }, captured_sq);
            old_rights
        }
        Move::Castle { king, rook } => {
            let rank = king.rank();
            let (king_to, rook_to) = if rook < king {
                (Square::from_coords(File::C, rank), Square::from_coords(File::D, rank))
            } else {
                (Square::from_coords(File::G, rank), Square::from_coords(File::F, rank))
            };
            let king_piece = Piece { color: us, role: Role::King };
            let rook_piece = Piece { color: us, role: Role::Rook };
            key.toggle_piece(table, king_piece, king);
            key.toggle_piece(table, rook_piece, rook);
            key.toggle_piece(table, king_piece, king_to);
            key.toggle_piece(table, rook_piece, rook_to);
            old_rights.after_move(king, rook)
        }
        Move::Put { role, to } => {
            key.toggle_piece(table, Piece { color: us, role }, to);
            old_rights
        }
    };

    if new_rights != old_rights {
        key.toggle_castling(table, old_rights);
        key.toggle_castling(table, new_rights);
    }

    if new_ep != old_ep {
        key.toggle_en_passant(table, old_ep);
        key.toggle_en_passant(table, new_ep);
    }

    key.toggle_side_to_move(table);
    key
}
