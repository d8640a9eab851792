//! Castling rules

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::movegen;
use crate::types::{CastlingSide, Cell, Color, Coord, Piece};

const fn on_back_rank(c: Color, x: u64) -> Bitboard {
    Bitboard::from_raw(match c {
        Color::White => x,
        Color::Black => x << 56,
    })
}

/// Squares between the king and the rook, which must be empty
#[inline]
pub const fn between(c: Color, s: CastlingSide) -> Bitboard {
    on_back_rank(
        c,
        match s {
            CastlingSide::King => 0x60,
            CastlingSide::Queen => 0x0e,
        },
    )
}

/// Squares the king passes through, its destination included
#[inline]
pub const fn pass(c: Color, s: CastlingSide) -> Bitboard {
    on_back_rank(
        c,
        match s {
            CastlingSide::King => 0x60,
            CastlingSide::Queen => 0x0c,
        },
    )
}

/// Home squares of the king and the rook
#[inline]
pub const fn srcs(c: Color, s: CastlingSide) -> Bitboard {
    on_back_rank(
        c,
        match s {
            CastlingSide::King => 0x90,
            CastlingSide::Queen => 0x11,
        },
    )
}

/// Home squares of both kings and all four rooks
pub const ALL_SRCS: Bitboard = Bitboard::from_raw(0x91 | (0x91 << 56));

#[inline]
pub const fn king_src(c: Color) -> Coord {
    Coord::from_parts(geometry::king_src_file(), geometry::castling_rank(c))
}

#[inline]
pub const fn king_dst(c: Color, s: CastlingSide) -> Coord {
    Coord::from_parts(
        geometry::castling_king_dst_file(s),
        geometry::castling_rank(c),
    )
}

#[inline]
pub const fn rook_src(c: Color, s: CastlingSide) -> Coord {
    Coord::from_parts(
        geometry::castling_rook_src_file(s),
        geometry::castling_rank(c),
    )
}

#[inline]
pub const fn rook_dst(c: Color, s: CastlingSide) -> Coord {
    Coord::from_parts(
        geometry::castling_rook_dst_file(s),
        geometry::castling_rank(c),
    )
}

/// Recognizes a king move from `src` to `dst` for color `c` as castling
///
/// Only the geometry is checked here, not whether castling is allowed.
pub fn side_of(c: Color, src: Coord, dst: Coord) -> Option<CastlingSide> {
    if src != king_src(c) {
        return None;
    }
    [CastlingSide::King, CastlingSide::Queen]
        .into_iter()
        .find(|&s| king_dst(c, s) == dst)
}

/// Returns `true` if color `c` may castle to side `s` in the current position
///
/// Requires that:
/// - neither the king nor the rook has moved, according to the castling flags
/// - both pieces stand on their home squares
/// - all the squares between them are empty
/// - the king is not attacked, and none of the squares it passes through is attacked
///
/// Whose turn it is does not matter here.
pub fn is_castling_allowed(b: &Board, c: Color, s: CastlingSide) -> bool {
    if !b.castling().has(c, s) {
        return false;
    }
    if b.get(king_src(c)) != Cell::from_parts(c, Piece::King)
        || b.get(rook_src(c, s)) != Cell::from_parts(c, Piece::Rook)
    {
        return false;
    }
    if between(c, s).into_iter().any(|p| b.get(p).is_occupied()) {
        return false;
    }
    let enemy = c.inv();
    !pass(c, s)
        .with(king_src(c))
        .into_iter()
        .any(|p| movegen::is_cell_attacked(b, p, enemy))
}

/// Returns the castling destinations of the king standing on `src`
///
/// Empty if `src` doesn't hold a king on its home square.
pub fn castling_targets(b: &Board, src: Coord) -> Bitboard {
    let cell = b.get(src);
    let c = match (cell.color(), cell.piece()) {
        (Some(c), Some(Piece::King)) if src == king_src(c) => c,
        _ => return Bitboard::EMPTY,
    };
    [CastlingSide::King, CastlingSide::Queen]
        .into_iter()
        .filter(|&s| is_castling_allowed(b, c, s))
        .map(|s| king_dst(c, s))
        .collect()
}

/// Clears castling flags after a move from `src`
///
/// Only the source square matters: a king or rook leaving its home square loses the
/// corresponding flags. Capturing a rook on its home square leaves the flag alone, but
/// [`is_castling_allowed()`] still requires the rook to be there.
pub(crate) fn update_rights(b: &mut Board, src: Coord) {
    if !ALL_SRCS.has(src) {
        return;
    }
    for c in [Color::White, Color::Black] {
        for s in [CastlingSide::King, CastlingSide::Queen] {
            if srcs(c, s).has(src) {
                b.castling.unset(c, s);
            }
        }
    }
}
