//! Engine facade for user interfaces
//!
//! [`Engine`] wraps a [`MoveChain`] and adds what an interactive front end needs on top of
//! the rules: the selected square, the highlighted destinations, and tracking of the squares
//! that must be redrawn. All the squares are addressed by upper-case algebraic notation,
//! like `E2`.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castling;
use crate::chain::MoveChain;
use crate::movegen;
use crate::moves::{Move, ValidateError};
use crate::types::{Color, Coord, CoordParseError, Piece};

use std::ops::Index;
use std::str::FromStr;

use log::{debug, trace};
use thiserror::Error;

/// Error returned by [`Engine`] operations
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The square name is not valid notation
    #[error("square not found: {0}")]
    NotFound(#[from] CoordParseError),
    /// The square cannot be selected
    #[error("cannot select: {0}")]
    NotSelectable(ValidateError),
    /// The move is not valid
    #[error("move rejected: {0}")]
    Rejected(#[from] ValidateError),
}

/// Result of a successful [`Engine::select_piece()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection {
    pub selected: Coord,
    pub highlighted: Bitboard,
}

/// What a front end needs to draw a single square
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquareState {
    pub piece: Option<Piece>,
    pub color: Option<Color>,
    pub selected: bool,
    pub highlighted: bool,
}

/// Copy of the states of all the 64 squares
///
/// Indexable by [`Coord`]. Use [`Snapshot::get()`] to look up a square by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot([SquareState; 64]);

impl Snapshot {
    pub fn get(&self, name: &str) -> Result<SquareState, Error> {
        Ok(self[Coord::from_str(name)?])
    }

    /// Iterates over all the squares, from `A1` to `H8`
    pub fn iter(&self) -> impl Iterator<Item = (Coord, SquareState)> + '_ {
        Coord::iter().zip(self.0.iter().copied())
    }

    pub fn occupied(&self) -> usize {
        self.0.iter().filter(|s| s.piece.is_some()).count()
    }
}

impl Index<Coord> for Snapshot {
    type Output = SquareState;

    #[inline]
    fn index(&self, c: Coord) -> &SquareState {
        &self.0[c.index()]
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Snapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(c, s)| (c.to_string(), s)))
    }
}

/// Chess rules engine with selection state
#[derive(Debug, Clone)]
pub struct Engine {
    chain: MoveChain,
    selected: Option<Coord>,
    highlighted: Bitboard,
    dirty: Bitboard,
}

impl Engine {
    /// Creates an engine with an empty board
    pub fn new() -> Engine {
        Engine::from_board(Board::empty())
    }

    /// Creates an engine with the initial position
    pub fn initial() -> Engine {
        Engine::from_board(Board::initial())
    }

    /// Creates an engine starting from the position `b`
    pub fn from_board(b: Board) -> Engine {
        Engine {
            chain: MoveChain::new(b),
            selected: None,
            highlighted: Bitboard::EMPTY,
            dirty: Bitboard::FULL,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.chain.last()
    }

    #[inline]
    pub fn chain(&self) -> &MoveChain {
        &self.chain
    }

    #[inline]
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    #[inline]
    pub fn highlighted(&self) -> Bitboard {
        self.highlighted
    }

    /// Empties the board and forgets all the moves
    pub fn reset(&mut self) {
        *self = Engine::new();
    }

    /// Puts the pieces into the initial position and forgets all the moves
    ///
    /// Every square is reported by the next [`Engine::take_changes()`].
    pub fn set_starting_configuration(&mut self) {
        debug!("new game");
        *self = Engine::initial();
    }

    fn clear_marks(&mut self) {
        self.dirty |= self.highlighted;
        if let Some(s) = self.selected.take() {
            self.dirty.set(s);
        }
        self.highlighted = Bitboard::EMPTY;
    }

    /// Selects the piece on `square` and highlights the squares it can move to
    ///
    /// The previous selection is dropped first, even if this call fails. Only pieces of the
    /// side to move can be selected.
    pub fn select_piece(&mut self, square: &str) -> Result<Selection, Error> {
        self.clear_marks();
        let src = Coord::from_str(square)?;
        let b = self.chain.last();
        let color = match b.get(src).color() {
            Some(c) => c,
            None => {
                trace!("nothing to select on {}", src);
                return Err(Error::NotSelectable(ValidateError::NoPiece(src)));
            }
        };
        if color != b.side() {
            trace!("{} holds a piece of the wrong color", src);
            return Err(Error::NotSelectable(ValidateError::WrongTurn(color)));
        }

        let highlighted = movegen::moves_for(b, src) | castling::castling_targets(b, src);
        debug!("selected {}, {} target(s)", src, highlighted.len());
        self.selected = Some(src);
        self.highlighted = highlighted;
        self.dirty |= highlighted.with(src);
        Ok(Selection {
            selected: src,
            highlighted,
        })
    }

    /// Moves the piece from `src` to `dst`
    ///
    /// On success, the selection is dropped. On failure, nothing changes.
    pub fn move_piece(&mut self, src: &str, dst: &str) -> Result<Move, Error> {
        let src = Coord::from_str(src)?;
        let dst = Coord::from_str(dst)?;
        let before = self.chain.last().clone();
        let mv = self.chain.push(src, dst)?;

        let after = self.chain.last();
        self.dirty |= Coord::iter()
            .filter(|&c| before.get(c) != after.get(c))
            .collect::<Bitboard>();
        self.clear_marks();
        Ok(mv)
    }

    /// Returns the state of a single square
    pub fn square(&self, c: Coord) -> SquareState {
        let cell = self.chain.last().get(c);
        SquareState {
            piece: cell.piece(),
            color: cell.color(),
            selected: self.selected == Some(c),
            highlighted: self.highlighted.has(c),
        }
    }

    /// Returns the states of all the squares
    pub fn board_snapshot(&self) -> Snapshot {
        let mut res = [SquareState::default(); 64];
        for c in Coord::iter() {
            res[c.index()] = self.square(c);
        }
        Snapshot(res)
    }

    /// Returns the squares whose state may have changed since the previous call
    pub fn take_changes(&mut self) -> Vec<(Coord, SquareState)> {
        let dirty = std::mem::replace(&mut self.dirty, Bitboard::EMPTY);
        dirty.into_iter().map(|c| (c, self.square(c))).collect()
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}
