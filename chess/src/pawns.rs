//! Pawn moves and en passant

use crate::bitboard::Bitboard;
use crate::board::{Board, LastMove};
use crate::geometry;
use crate::movegen::{probe, Probe};
use crate::types::{Cell, Color, Coord, Piece};

/// Returns the square where the pawn on `src` may capture en passant, if any
///
/// The pawn must stand on its en passant rank, next to an enemy pawn which has just made a
/// double step. The right neighbour is examined before the left one.
pub fn enpassant_target(b: &Board, src: Coord) -> Option<Coord> {
    let color = match (b.get(src).color(), b.get(src).piece()) {
        (Some(c), Some(Piece::Pawn)) => c,
        _ => return None,
    };
    if src.rank() != geometry::enpassant_src_rank(color) {
        return None;
    }
    let LastMove { src: last_src, dst: last_dst } = b.last_move()?;
    let dir = geometry::pawn_direction(color);
    let enemy_pawn = Cell::from_parts(color.inv(), Piece::Pawn);
    for side in [1, -1] {
        let neighbour = match src.try_shift(side, 0) {
            Some(n) => n,
            None => continue,
        };
        if b.get(neighbour) != enemy_pawn || last_dst != neighbour {
            continue;
        }
        if neighbour.try_shift(0, 2 * dir) != Some(last_src) {
            continue;
        }
        return neighbour.try_shift(0, dir);
    }
    None
}

/// Targets of a pawn of color `color` standing on `src`, including en passant
pub fn pawn(b: &Board, src: Coord, color: Color) -> Bitboard {
    let dir = geometry::pawn_direction(color);
    let mut res = Bitboard::EMPTY;

    let single = src.try_shift(0, dir);
    if let (Some(t), Probe::Empty) = (single, probe(b, single, color)) {
        res.set(t);
        if src.rank() == geometry::double_move_src_rank(color) {
            let double = src.try_shift(0, 2 * dir);
            if let (Some(t), Probe::Empty) = (double, probe(b, double, color)) {
                res.set(t);
            }
        }
    }

    for side in [-1, 1] {
        let diag = src.try_shift(side, dir);
        if let (Some(t), Probe::Capturable) = (diag, probe(b, diag, color)) {
            res.set(t);
        }
    }

    if let Some(t) = enpassant_target(b, src) {
        res.set(t);
    }

    res
}
