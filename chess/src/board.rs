//! Board and related things

use crate::types::{
    self, CastlingRights, CastlingSide, Cell, Color, Coord, File, Piece, Rank,
};
use crate::{bitboard::Bitboard, geometry};

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the piece placement part of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// The rank describes more or less than eight squares
    #[error("rank {0} must have exactly eight squares")]
    BadRankLength(Rank),
    /// There are not exactly eight ranks
    #[error("expected 8 ranks, got {0}")]
    BadRankCount(usize),
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    /// More than 16 pieces of one color
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
}

/// Error parsing [`Board`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    #[error("non-ASCII data in FEN")]
    NonAscii,
    #[error("board not specified")]
    NoBoard,
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    #[error("no move side")]
    NoMoveSide,
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorParseError),
    #[error("no castling rights")]
    NoCastling,
    #[error("bad castling rights: {0}")]
    Castling(#[from] types::CastlingRightsParseError),
    #[error("no enpassant")]
    NoEnpassant,
    #[error("bad enpassant: {0}")]
    Enpassant(#[from] types::CoordParseError),
    #[error("invalid enpassant rank {0}")]
    InvalidEnpassantRank(Rank),
    #[error("bad move counter: {0}")]
    MoveCounter(ParseIntError),
    #[error("bad move number: {0}")]
    MoveNumber(ParseIntError),
    #[error("extra data in FEN")]
    ExtraData,
}

/// The most recent move made on the board
///
/// For castling, this is the move of the king.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LastMove {
    pub src: Coord,
    pub dst: Coord,
}

/// Chess position
///
/// Holds the contents of all the 64 squares, the side to move, the most recent move (needed
/// for en passant) and the castling eligibility flags.
///
/// The board is never edited square by square from outside of this crate: it is created
/// either empty, from the initial position or from FEN, and then changes only by making
/// moves via [`Board::make_move()`] or [`MoveChain`](crate::chain::MoveChain).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    pub(crate) cells: [Cell; 64],
    pub(crate) side: Color,
    pub(crate) last_move: Option<LastMove>,
    pub(crate) castling: CastlingRights,
    pub(crate) move_counter: u16,
    pub(crate) move_number: u16,
}

impl Board {
    /// Returns an empty board with White to move
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
            side: Color::White,
            last_move: None,
            castling: CastlingRights::EMPTY,
            move_counter: 0,
            move_number: 1,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        res.set_starting_configuration();
        res
    }

    /// Clears all the squares and the move history
    pub fn reset(&mut self) {
        *self = Board::empty();
    }

    /// Places the standard 32 pieces of the opening position
    ///
    /// White moves first, there is no last move, and castling is available on both sides
    /// for both colors.
    pub fn set_starting_configuration(&mut self) {
        self.reset();
        for color in [Color::White, Color::Black] {
            let back = geometry::castling_rank(color);
            let pawns = geometry::double_move_src_rank(color);
            for (file, piece) in File::iter().zip(geometry::BACK_RANK) {
                self.put(Coord::from_parts(file, back), Cell::from_parts(color, piece));
                self.put(
                    Coord::from_parts(file, pawns),
                    Cell::from_parts(color, Piece::Pawn),
                );
            }
        }
        self.castling = CastlingRights::FULL;
    }

    /// Parses a board from FEN
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        Board::from_str(fen)
    }

    /// Returns the contents of the square `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    #[inline]
    pub(crate) fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns the most recent move, or `None` before the first move
    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Returns castling eligibility flags
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Number of half-moves since the last capture or pawn move
    #[inline]
    pub fn move_counter(&self) -> u16 {
        self.move_counter
    }

    /// Move number, incremented after each move by Black
    #[inline]
    pub fn move_number(&self) -> u16 {
        self.move_number
    }

    /// Returns the set of all the squares occupied by pieces of color `c`
    pub fn color(&self, c: Color) -> Bitboard {
        Coord::iter()
            .filter(|&p| self.get(p).color() == Some(c))
            .collect()
    }

    /// Returns the set of all the occupied squares
    pub fn occupied(&self) -> Bitboard {
        Coord::iter().filter(|&p| self.get(p).is_occupied()).collect()
    }

    /// Returns the square over which the last move was a double pawn step, if any
    ///
    /// This is what FEN calls the en passant square. It is reported regardless of whether
    /// any pawn is actually able to capture there.
    pub fn ep_dest(&self) -> Option<Coord> {
        let LastMove { src, dst } = self.last_move?;
        let mover = self.side.inv();
        let is_double_step = self.get(dst) == Cell::from_parts(mover, Piece::Pawn)
            && src.file() == dst.file()
            && src.rank() == geometry::double_move_src_rank(mover)
            && dst.rank() == geometry::double_move_dst_rank(mover);
        if !is_double_step {
            return None;
        }
        src.try_shift(0, geometry::pawn_direction(mover))
    }

    /// Wraps the board to print it as a diagram, eighth rank on top
    ///
    /// # Example
    ///
    /// ```
    /// # use chesst::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8 rnbqkbnr
    /// 7 pppppppp
    /// 6 ........
    /// 5 ........
    /// 4 ........
    /// 3 ........
    /// 2 PPPPPPPP
    /// 1 RNBQKBNR
    ///   ABCDEFGH
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Converts the board into a FEN string
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }

    /// Drops the castling flags whose king or rook is not at home
    fn fix_castling(&mut self) {
        for color in [Color::White, Color::Black] {
            let rank = geometry::castling_rank(color);
            let king = Coord::from_parts(geometry::king_src_file(), rank);
            for side in [CastlingSide::King, CastlingSide::Queen] {
                let rook = Coord::from_parts(geometry::castling_rook_src_file(side), rank);
                if self.get(king) != Cell::from_parts(color, Piece::King)
                    || self.get(rook) != Cell::from_parts(color, Piece::Rook)
                {
                    self.castling.unset(color, side);
                }
            }
        }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// FEN letters for pieces
    Ascii,
    /// Chess symbols for pieces
    Utf8,
}

/// Board diagram, see [`Board::pretty()`]
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let row: String = File::iter()
                .map(|file| {
                    let cell = self.board.get(Coord::from_parts(file, rank));
                    match self.style {
                        PrettyStyle::Ascii => cell.as_char(),
                        PrettyStyle::Utf8 => cell.as_utf8_char(),
                    }
                })
                .collect();
            writeln!(f, "{} {}", rank, row)?;
        }
        let files: String = File::iter().map(|file| file.as_char()).collect();
        writeln!(f, "  {}", files)
    }
}

fn parse_rank(rank: Rank, s: &str, cells: &mut [Cell; 64]) -> Result<(), CellsParseError> {
    let mut file = 0;
    for ch in s.chars() {
        let skip = match ch.to_digit(10) {
            Some(n @ 1..=8) => n as usize,
            _ => {
                let cell = Cell::from_char(ch).ok_or(CellsParseError::UnexpectedChar(ch))?;
                if file < 8 {
                    cells[Coord::from_parts(File::from_index(file), rank).index()] = cell;
                }
                1
            }
        };
        file += skip;
        if file > 8 {
            return Err(CellsParseError::BadRankLength(rank));
        }
    }
    if file != 8 {
        return Err(CellsParseError::BadRankLength(rank));
    }
    Ok(())
}

fn parse_cells(s: &str) -> Result<[Cell; 64], CellsParseError> {
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != 8 {
        return Err(CellsParseError::BadRankCount(rows.len()));
    }
    let mut cells = [Cell::EMPTY; 64];
    // FEN lists the eighth rank first
    for (rank, row) in Rank::iter().rev().zip(rows) {
        parse_rank(rank, row, &mut cells)?;
    }
    for color in [Color::White, Color::Black] {
        if cells.iter().filter(|c| c.color() == Some(color)).count() > 16 {
            return Err(CellsParseError::TooManyPieces(color));
        }
    }
    Ok(cells)
}

/// Turns the FEN en passant square back into the double step that produced it
fn parse_last_move(s: &str, side: Color) -> Result<Option<LastMove>, FenParseError> {
    if s == "-" {
        return Ok(None);
    }
    let ep = Coord::from_str(&s.to_ascii_uppercase())?;
    if ep.rank() != geometry::enpassant_dst_rank(side) {
        return Err(FenParseError::InvalidEnpassantRank(ep.rank()));
    }
    let dir = geometry::pawn_direction(side.inv());
    match (ep.try_shift(0, -dir), ep.try_shift(0, dir)) {
        (Some(src), Some(dst)) => Ok(Some(LastMove { src, dst })),
        _ => Err(FenParseError::InvalidEnpassantRank(ep.rank())),
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = FenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut fields = s.split(' ');
        let mut next = |err: Error| fields.next().ok_or(err);

        let cells = parse_cells(next(Error::NoBoard)?)?;
        let side: Color = next(Error::NoMoveSide)?.parse()?;
        let castling: CastlingRights = next(Error::NoCastling)?.parse()?;
        let last_move = parse_last_move(next(Error::NoEnpassant)?, side)?;
        let move_counter = match fields.next() {
            Some(s) => s.parse().map_err(Error::MoveCounter)?,
            None => 0,
        };
        let move_number = match fields.next() {
            Some(s) => s.parse().map_err(Error::MoveNumber)?,
            None => 1,
        };
        if fields.next().is_some() {
            return Err(Error::ExtraData);
        }

        let mut res = Board {
            cells,
            side,
            last_move,
            castling,
            move_counter,
            move_number,
        };
        res.fix_castling();

        // The double step must agree with the placement, otherwise it is ignored
        if let Some(LastMove { src, .. }) = res.last_move {
            let passed_free = res.ep_dest().map_or(false, |p| res.get(p).is_free());
            if res.get(src).is_occupied() || !passed_free {
                res.last_move = None;
            }
        }

        Ok(res)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = Rank::iter()
            .rev()
            .map(|rank| {
                let mut row = String::new();
                let mut gap = 0;
                for file in File::iter() {
                    let cell = self.get(Coord::from_parts(file, rank));
                    if cell.is_free() {
                        gap += 1;
                        continue;
                    }
                    if gap > 0 {
                        row += &gap.to_string();
                        gap = 0;
                    }
                    row.push(cell.as_char());
                }
                if gap > 0 {
                    row += &gap.to_string();
                }
                row
            })
            .collect();
        let ep = match self.ep_dest() {
            Some(p) => p.to_string().to_ascii_lowercase(),
            None => "-".to_string(),
        };
        write!(
            f,
            "{} {} {} {} {} {}",
            rows.join("/"),
            self.side,
            self.castling,
            ep,
            self.move_counter,
            self.move_number
        )
    }
}
