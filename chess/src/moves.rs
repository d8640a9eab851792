//! Moves and related stuff

use crate::board::{Board, LastMove};
use crate::types::{CastlingSide, Cell, Color, Coord, Piece};
use crate::{castling, movegen, pawns};

use std::fmt;

use log::trace;
use thiserror::Error;

/// Move kind
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// Non-pawn move or capture, except castling
    Simple,
    /// Single pawn step or pawn capture, except en passant
    PawnSimple,
    /// Double pawn step
    PawnDouble,
    /// En passant capture
    Enpassant,
    /// Kingside castling
    CastlingKingside,
    /// Queenside castling
    CastlingQueenside,
}

impl MoveKind {
    #[inline]
    pub fn from_castling(s: CastlingSide) -> MoveKind {
        match s {
            CastlingSide::King => MoveKind::CastlingKingside,
            CastlingSide::Queen => MoveKind::CastlingQueenside,
        }
    }

    #[inline]
    pub fn castling_side(&self) -> Option<CastlingSide> {
        match *self {
            MoveKind::CastlingKingside => Some(CastlingSide::King),
            MoveKind::CastlingQueenside => Some(CastlingSide::Queen),
            _ => None,
        }
    }
}

/// Reason why a move is rejected
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("no piece on {0}")]
    NoPiece(Coord),
    #[error("it is not {0:?}'s turn")]
    WrongTurn(Color),
    #[error("cannot move from {src} to {dst}")]
    IllegalDestination { src: Coord, dst: Coord },
    #[error("castling to the {0:?} side is not allowed")]
    CastlingForbidden(CastlingSide),
}

/// Chess move
///
/// A move is always created against a particular position via [`Move::classify()`], so it is
/// known to be pseudo-legal there. It must not be applied to any other position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub kind: MoveKind,
    pub src: Coord,
    pub dst: Coord,
    pub side: Color,
}

impl Move {
    /// Checks that the side to move may go from `src` to `dst`, and finds out the kind of
    /// this move
    ///
    /// The checks are performed in the following order: there must be a piece on `src`, it
    /// must belong to the side to move, and `dst` must be among its targets. A king move from
    /// its home square two files sideways is treated as castling, which yields
    /// [`ValidateError::CastlingForbidden`] if castling is not possible there.
    pub fn classify(b: &Board, src: Coord, dst: Coord) -> Result<Move, ValidateError> {
        let cell = b.get(src);
        let (color, piece) = match (cell.color(), cell.piece()) {
            (Some(c), Some(p)) => (c, p),
            _ => return Err(ValidateError::NoPiece(src)),
        };
        if color != b.side() {
            return Err(ValidateError::WrongTurn(color));
        }

        let kind = if movegen::moves_for(b, src).has(dst) {
            match piece {
                Piece::Pawn => {
                    if pawns::enpassant_target(b, src) == Some(dst) {
                        MoveKind::Enpassant
                    } else if src.rank().index().abs_diff(dst.rank().index()) == 2 {
                        MoveKind::PawnDouble
                    } else {
                        MoveKind::PawnSimple
                    }
                }
                _ => MoveKind::Simple,
            }
        } else {
            let side = match piece {
                Piece::King => castling::side_of(color, src, dst),
                _ => None,
            };
            match side {
                Some(s) if castling::is_castling_allowed(b, color, s) => {
                    MoveKind::from_castling(s)
                }
                Some(s) => return Err(ValidateError::CastlingForbidden(s)),
                None => return Err(ValidateError::IllegalDestination { src, dst }),
            }
        };

        Ok(Move {
            kind,
            src,
            dst,
            side: color,
        })
    }

    /// Returns `true` if the move captures a piece on `b`
    pub fn is_capture(&self, b: &Board) -> bool {
        self.kind == MoveKind::Enpassant || b.get(self.dst).is_occupied()
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.kind.castling_side().is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

/// Applies the move `mv` to `b`
///
/// `mv` must come from [`Move::classify()`] on this very position.
pub(crate) fn make_move_unchecked(b: &mut Board, mv: Move) {
    let src_cell = b.get(mv.src);
    let pawn_move = src_cell.piece() == Some(Piece::Pawn);
    let capture = mv.is_capture(b);

    b.put(mv.src, Cell::EMPTY);
    b.put(mv.dst, src_cell);
    match mv.kind {
        MoveKind::Enpassant => {
            let taken = Coord::from_parts(mv.dst.file(), mv.src.rank());
            b.put(taken, Cell::EMPTY);
        }
        MoveKind::CastlingKingside | MoveKind::CastlingQueenside => {
            if let Some(s) = mv.kind.castling_side() {
                b.put(castling::rook_src(mv.side, s), Cell::EMPTY);
                b.put(
                    castling::rook_dst(mv.side, s),
                    Cell::from_parts(mv.side, Piece::Rook),
                );
            }
        }
        MoveKind::Simple | MoveKind::PawnSimple | MoveKind::PawnDouble => {}
    }

    castling::update_rights(b, mv.src);
    b.last_move = Some(LastMove {
        src: mv.src,
        dst: mv.dst,
    });
    if pawn_move || capture {
        b.move_counter = 0;
    } else {
        b.move_counter = b.move_counter.saturating_add(1);
    }
    if b.side == Color::Black {
        b.move_number = b.move_number.saturating_add(1);
    }
    b.side = b.side.inv();
}

impl Board {
    /// Moves the piece from `src` to `dst` if this is a valid move for the side to move
    ///
    /// On error, the board is left unchanged.
    pub fn make_move(&mut self, src: Coord, dst: Coord) -> Result<Move, ValidateError> {
        let mv = Move::classify(self, src, dst).map_err(|e| {
            trace!("rejected {}{}: {}", src, dst, e);
            e
        })?;
        make_move_unchecked(self, mv);
        Ok(mv)
    }

    /// Returns the position after the move from `src` to `dst`, leaving `self` intact
    pub fn make_move_cloned(&self, src: Coord, dst: Coord) -> Result<Board, ValidateError> {
        let mut res = self.clone();
        res.make_move(src, dst)?;
        Ok(res)
    }
}
