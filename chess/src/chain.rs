//! Record of a game played from some starting position

use crate::board::{self, Board};
use crate::moves::{Move, ValidateError};
use crate::types::{Coord, CoordParseError};

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

/// Error parsing a single move written as two squares, like `E2E4`
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("move must consist of two squares")]
    BadLength,
    #[error("bad source square: {0}")]
    BadSrc(CoordParseError),
    #[error("bad destination square: {0}")]
    BadDst(CoordParseError),
    #[error("invalid move: {0}")]
    Validate(#[from] ValidateError),
}

/// Error parsing a whitespace-separated list of moves
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
#[error("cannot parse move #{}: {}", .pos + 1, .source)]
pub struct ListParseError {
    pub pos: usize,
    pub source: MoveParseError,
}

/// Splits `s` into source and destination squares
pub fn parse_squares(s: &str) -> Result<(Coord, Coord), MoveParseError> {
    if s.len() != 4 || !s.is_char_boundary(2) {
        return Err(MoveParseError::BadLength);
    }
    let src = Coord::from_str(&s[..2]).map_err(MoveParseError::BadSrc)?;
    let dst = Coord::from_str(&s[2..]).map_err(MoveParseError::BadDst)?;
    Ok((src, dst))
}

/// Board together with the moves that led to it
///
/// Moves are only ever added: there is no way to take a move back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveChain {
    start: Board,
    board: Board,
    stack: Vec<Move>,
}

impl MoveChain {
    pub fn new(b: Board) -> MoveChain {
        MoveChain {
            start: b.clone(),
            board: b,
            stack: Vec::new(),
        }
    }

    pub fn new_initial() -> MoveChain {
        MoveChain::new(Board::initial())
    }

    pub fn from_fen(s: &str) -> Result<MoveChain, board::FenParseError> {
        Ok(MoveChain::new(Board::from_fen(s)?))
    }

    /// Creates a chain from the board `b` and the moves in `list`
    ///
    /// See [`MoveChain::push_list()`] for the format of `list`.
    pub fn from_list(b: Board, list: &str) -> Result<MoveChain, ListParseError> {
        let mut res = MoveChain::new(b);
        res.push_list(list)?;
        Ok(res)
    }

    /// Position before the first move
    #[inline]
    pub fn start(&self) -> &Board {
        &self.start
    }

    /// Current position
    #[inline]
    pub fn last(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().copied()
    }

    pub fn get(&self, idx: usize) -> Option<Move> {
        self.stack.get(idx).copied()
    }

    /// Validates the move from `src` to `dst` and applies it to the current position
    ///
    /// Nothing changes if the move is rejected.
    pub fn push(&mut self, src: Coord, dst: Coord) -> Result<Move, ValidateError> {
        let mv = self.board.make_move(src, dst)?;
        debug!("move #{}: {:?} {}", self.stack.len() + 1, mv.side, mv);
        self.stack.push(mv);
        Ok(mv)
    }

    /// Parses a move like `E2E4` and pushes it
    pub fn push_str(&mut self, s: &str) -> Result<Move, MoveParseError> {
        let (src, dst) = parse_squares(s)?;
        Ok(self.push(src, dst)?)
    }

    /// Pushes a whitespace-separated list of moves like `E2E4 E7E5`
    ///
    /// Stops at the first bad move, keeping the moves before it.
    pub fn push_list(&mut self, list: &str) -> Result<(), ListParseError> {
        for (pos, token) in list.split_ascii_whitespace().enumerate() {
            self.push_str(token)
                .map_err(|source| ListParseError { pos, source })?;
        }
        Ok(())
    }

    /// Wraps the chain to print its moves as a space-separated list
    #[inline]
    pub fn uci_list(&self) -> UciList<'_> {
        UciList(self)
    }
}

impl Default for MoveChain {
    fn default() -> MoveChain {
        MoveChain::new(Board::empty())
    }
}

pub struct UciList<'a>(&'a MoveChain);

impl<'a> fmt::Display for UciList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, m) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}
