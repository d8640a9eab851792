//! Move generation
//!
//! All generators produce pseudo-legal target squares: a move that leaves the own king under
//! attack is still generated. Each candidate square goes through [`probe()`], which decides
//! whether the square is free, holds an enemy piece or is unreachable.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::Move;
use crate::types::{Color, Coord, Piece};
use crate::{castling, pawns};

use arrayvec::ArrayVec;
use std::ops::{Deref, DerefMut};

/// Result of examining a candidate destination square
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Probe {
    /// The square is on the board and free
    Empty,
    /// The square holds a piece of the opposite color
    Capturable,
    /// The square is off the board or holds a piece of the same color
    Blocked,
}

/// Classifies `target` for a piece of color `color`
///
/// `None` stands for a square outside of the board, which is always [`Probe::Blocked`].
#[inline]
pub fn probe(b: &Board, target: Option<Coord>, color: Color) -> Probe {
    let target = match target {
        Some(t) => t,
        None => return Probe::Blocked,
    };
    match b.get(target).color() {
        None => Probe::Empty,
        Some(c) if c == color => Probe::Blocked,
        Some(_) => Probe::Capturable,
    }
}

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const BISHOP_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

const ROOK_DIRS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

fn gen_steps(b: &Board, src: Coord, color: Color, deltas: &[(isize, isize)]) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    for &(df, dr) in deltas {
        let target = src.try_shift(df, dr);
        match (target, probe(b, target, color)) {
            (Some(t), Probe::Empty | Probe::Capturable) => res.set(t),
            _ => {}
        }
    }
    res
}

fn gen_rays(b: &Board, src: Coord, color: Color, dirs: &[(isize, isize)]) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let mut cur = src;
        loop {
            let target = cur.try_shift(df, dr);
            match (target, probe(b, target, color)) {
                (Some(t), Probe::Empty) => {
                    res.set(t);
                    cur = t;
                }
                (Some(t), Probe::Capturable) => {
                    res.set(t);
                    break;
                }
                _ => break,
            }
        }
    }
    res
}

/// Targets of a knight of color `color` standing on `src`
pub fn knight(b: &Board, src: Coord, color: Color) -> Bitboard {
    gen_steps(b, src, color, &KNIGHT_DELTAS)
}

/// Targets of a king of color `color` standing on `src`, castling excluded
pub fn king(b: &Board, src: Coord, color: Color) -> Bitboard {
    gen_steps(b, src, color, &KING_DELTAS)
}

/// Targets of a bishop of color `color` standing on `src`
pub fn bishop(b: &Board, src: Coord, color: Color) -> Bitboard {
    gen_rays(b, src, color, &BISHOP_DIRS)
}

/// Targets of a rook of color `color` standing on `src`
pub fn rook(b: &Board, src: Coord, color: Color) -> Bitboard {
    gen_rays(b, src, color, &ROOK_DIRS)
}

/// Targets of a queen of color `color` standing on `src`
pub fn queen(b: &Board, src: Coord, color: Color) -> Bitboard {
    bishop(b, src, color) | rook(b, src, color)
}

/// Returns the set of squares the piece on `src` may move to
///
/// Castling is not included here, see [`castling::castling_targets()`]. For an empty square,
/// returns an empty set.
pub fn moves_for(b: &Board, src: Coord) -> Bitboard {
    let cell = b.get(src);
    let (color, piece) = match (cell.color(), cell.piece()) {
        (Some(c), Some(p)) => (c, p),
        _ => return Bitboard::EMPTY,
    };
    match piece {
        Piece::Pawn => pawns::pawn(b, src, color),
        Piece::King => king(b, src, color),
        Piece::Knight => knight(b, src, color),
        Piece::Bishop => bishop(b, src, color),
        Piece::Rook => rook(b, src, color),
        Piece::Queen => queen(b, src, color),
    }
}

/// Returns `true` if any piece of color `by` may move to `target`
///
/// A square is attacked when it belongs to the [`moves_for()`] set of an enemy piece. For
/// pawns this means their pushes and captures, exactly as they would be generated. The answer
/// is always recomputed from the current position.
pub fn is_cell_attacked(b: &Board, target: Coord, by: Color) -> bool {
    b.color(by)
        .into_iter()
        .any(|src| moves_for(b, src).has(target))
}

/// Upper bound on the number of pseudo-legal moves in any position reachable here
///
/// A side has at most 16 pieces, a queen reaches at most 27 squares, and there are two
/// castling moves.
pub const MAX_MOVES: usize = 16 * 27 + 2;

/// List of moves
#[derive(Debug, Clone, Default)]
pub struct MoveList(ArrayVec<Move, MAX_MOVES>);

impl MoveList {
    #[inline]
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

impl Deref for MoveList {
    type Target = ArrayVec<Move, MAX_MOVES>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_MOVES>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Adds all the pseudo-legal moves of the side to move into `dst`
pub fn gen_all_into(b: &Board, dst: &mut MoveList) {
    let side = b.side();
    for src in b.color(side) {
        let targets = moves_for(b, src) | castling::castling_targets(b, src);
        for target in targets {
            // Every target produced above classifies successfully
            if let Ok(mv) = Move::classify(b, src, target) {
                dst.push(mv);
            }
        }
    }
}

/// Returns all the pseudo-legal moves of the side to move
pub fn gen_all(b: &Board) -> MoveList {
    let mut res = MoveList::new();
    gen_all_into(b, &mut res);
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};
    use std::str::FromStr;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn bb(squares: &[&str]) -> Bitboard {
        squares.iter().map(|s| c(s)).collect()
    }

    #[test]
    fn test_probe() {
        let b = Board::initial();
        assert_eq!(probe(&b, None, Color::White), Probe::Blocked);
        assert_eq!(probe(&b, Some(c("E4")), Color::White), Probe::Empty);
        assert_eq!(probe(&b, Some(c("E2")), Color::White), Probe::Blocked);
        assert_eq!(probe(&b, Some(c("E7")), Color::White), Probe::Capturable);
        assert_eq!(probe(&b, Some(c("E7")), Color::Black), Probe::Blocked);
        assert_eq!(probe(&b, c("A1").try_shift(-1, 0), Color::Black), Probe::Blocked);
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(moves_for(&b, c("B1")), bb(&["A3", "C3"]));
        assert_eq!(moves_for(&b, c("G8")), bb(&["F6", "H6"]));
        assert_eq!(moves_for(&b, c("E2")), bb(&["E3", "E4"]));
        assert_eq!(moves_for(&b, c("D7")), bb(&["D6", "D5"]));
        for s in ["A1", "C1", "D1", "E1", "F1", "H8", "D8", "E8"] {
            assert!(moves_for(&b, c(s)).is_empty(), "{} can move", s);
        }
        assert!(moves_for(&b, c("E4")).is_empty());
        assert_eq!(gen_all(&b).len(), 20);
    }

    #[test]
    fn test_sliders() {
        let b = Board::from_fen("4k3/8/8/3p4/8/1p1Q4/8/4K3 w - - 0 1").unwrap();
        let d3 = c("D3");
        assert_eq!(
            rook(&b, d3, Color::White),
            bb(&["D4", "D5", "D2", "D1", "C3", "B3", "E3", "F3", "G3", "H3"])
        );
        assert_eq!(
            bishop(&b, d3, Color::White),
            bb(&["E4", "F5", "G6", "H7", "C4", "B5", "A6", "C2", "B1", "E2", "F1"])
        );
        assert_eq!(moves_for(&b, d3), queen(&b, d3, Color::White));
        assert_eq!(moves_for(&b, d3).len(), 21);
    }

    #[test]
    fn test_knight_king_edges() {
        let b = Board::empty();
        assert_eq!(knight(&b, c("A1"), Color::White), bb(&["B3", "C2"]));
        assert_eq!(knight(&b, c("H8"), Color::Black), bb(&["G6", "F7"]));
        assert_eq!(knight(&b, c("D4"), Color::White).len(), 8);
        assert_eq!(king(&b, c("A1"), Color::White), bb(&["A2", "B1", "B2"]));
        assert_eq!(king(&b, c("E4"), Color::Black).len(), 8);
        for coord in Coord::iter() {
            assert!(!knight(&b, coord, Color::White).has(coord));
            assert!(!queen(&b, coord, Color::White).has(coord));
        }
    }

    #[test]
    fn test_attacked() {
        let b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let e2 = Coord::from_parts(File::E, Rank::R2);
        assert_eq!(moves_for(&b, e2), bb(&["E3", "E4"]));
        // A pawn attacks the squares it can move to, not its empty diagonals
        assert!(is_cell_attacked(&b, c("E3"), Color::White));
        assert!(is_cell_attacked(&b, c("E4"), Color::White));
        assert!(!is_cell_attacked(&b, c("D3"), Color::White));
        assert!(!is_cell_attacked(&b, c("F3"), Color::White));
        assert!(is_cell_attacked(&b, c("D7"), Color::Black));
        assert!(!is_cell_attacked(&b, c("D7"), Color::White));

        let b = Board::from_fen("4k3/8/8/8/8/5p2/4P3/4K3 b - - 0 1").unwrap();
        assert!(is_cell_attacked(&b, c("E2"), Color::Black));
        assert!(is_cell_attacked(&b, c("F3"), Color::White));
        assert!(!is_cell_attacked(&b, c("D3"), Color::White));
        assert!(!is_cell_attacked(&b, c("G2"), Color::Black));
    }

    #[test]
    fn test_gen_all_side() {
        let b = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = gen_all(&b);
        assert!(moves.iter().all(|m| m.side == Color::White));
        assert!(moves.iter().any(|m| m.src == c("E1") && m.dst == c("G1")));
        assert!(moves.iter().any(|m| m.src == c("E1") && m.dst == c("C1")));
    }
}
