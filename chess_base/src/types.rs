use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
    #[error("coordinates ({0}, {1}) are off the board")]
    OutOfRange(isize, isize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected \"w\" or \"b\", got {0:?}")]
    Unexpected(String),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastlingRightsParseError {
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    #[error("duplicate char {0:?}")]
    DuplicateChar(char),
    #[error("unexpected empty string")]
    EmptyString,
}

/// Declares one axis of the board: eight variants named by their characters
macro_rules! board_axis {
    ($(#[$meta:meta])* $name:ident, $first:literal, [$($var:ident),*]) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[repr(u8)]
        pub enum $name {
            $($var),*
        }

        impl $name {
            pub const ALL: [$name; 8] = [$($name::$var),*];

            #[inline]
            pub const fn index(&self) -> usize {
                *self as usize
            }

            /// Panics if `val` is not in `0..8`
            #[inline]
            pub const fn from_index(val: usize) -> Self {
                Self::ALL[val]
            }

            pub fn try_from_index(val: isize) -> Option<Self> {
                usize::try_from(val).ok().and_then(|v| Self::ALL.get(v).copied())
            }

            pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
                Self::ALL.into_iter()
            }

            pub fn from_char(c: char) -> Option<Self> {
                let offset = u32::from(c).checked_sub(u32::from($first))?;
                Self::ALL.get(offset as usize).copied()
            }

            pub fn as_char(&self) -> char {
                char::from(($first as u8) + *self as u8)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_char())
            }
        }
    };
}

board_axis!(
    /// File (column) of the board, `A` to `H`
    File, 'A', [A, B, C, D, E, F, G, H]
);

board_axis!(
    /// Rank (row) of the board
    ///
    /// Index 0 is the first rank (White's back rank), index 7 is the eighth one.
    Rank, '1', [R1, R2, R3, R4, R5, R6, R7, R8]
);

/// Square of the board
///
/// Written in algebraic notation as an upper-case file letter followed by the rank digit,
/// e.g. `E2`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    /// Panics if `val` is not in `0..64`
    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(rank as u8 * 8 + file as u8)
    }

    /// Builds a coordinate from raw file and rank numbers, both in `0..8`
    pub fn try_from_indices(file: isize, rank: isize) -> Result<Coord, CoordParseError> {
        match (File::try_from_index(file), Rank::try_from_index(rank)) {
            (Some(f), Some(r)) => Ok(Coord::from_parts(f, r)),
            _ => Err(CoordParseError::OutOfRange(file, rank)),
        }
    }

    pub const fn file(&self) -> File {
        File::from_index(self.0 as usize % 8)
    }

    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.0 as usize / 8)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the square `delta_file` files and `delta_rank` ranks away, or `None` if it's
    /// off the board
    pub fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Coord> {
        let file = File::try_from_index(self.file().index() as isize + delta_file)?;
        let rank = Rank::try_from_index(self.rank().index() as isize + delta_rank)?;
        Some(Coord::from_parts(file, rank))
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file_ch, rank_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file_ch), Some(rank_ch), None) => (file_ch, rank_ch),
            _ => return Err(CoordParseError::BadLength),
        };
        let file = File::from_char(file_ch).ok_or(CoordParseError::UnexpectedFileChar(file_ch))?;
        let rank = Rank::from_char(rank_ch).ok_or(CoordParseError::UnexpectedRankChar(rank_ch))?;
        Ok(Coord::from_parts(file, rank))
    }
}

#[cfg(feature = "serde")]
impl Serialize for Coord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Coord::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Formats the color as in FEN, `w` or `b`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "w",
            Color::Black => "b",
        })
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _ => Err(ColorParseError::Unexpected(s.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Piece {
    Pawn,
    King,
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::King,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
    ];

    /// Lower-case letter of the piece, as used in FEN for Black
    pub fn letter(&self) -> char {
        match *self {
            Piece::Pawn => 'p',
            Piece::King => 'k',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
        }
    }

    pub fn from_letter(c: char) -> Option<Piece> {
        Piece::ALL.into_iter().find(|p| p.letter() == c)
    }
}

/// Contents of a single square: either empty or a piece of some color
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(Option<(Color, Piece)>);

impl Cell {
    pub const EMPTY: Cell = Cell(None);

    #[inline]
    pub const fn from_parts(c: Color, p: Piece) -> Cell {
        Cell(Some((c, p)))
    }

    #[inline]
    pub const fn is_free(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.0.map(|(c, _)| c)
    }

    #[inline]
    pub fn piece(&self) -> Option<Piece> {
        self.0.map(|(_, p)| p)
    }

    /// FEN letter of the piece (upper case for White), or `.` for an empty square
    pub fn as_char(&self) -> char {
        match self.0 {
            None => '.',
            Some((Color::White, p)) => p.letter().to_ascii_uppercase(),
            Some((Color::Black, p)) => p.letter(),
        }
    }

    /// Chess symbol of the piece, or `.` for an empty square
    pub fn as_utf8_char(&self) -> char {
        const WHITE: [char; 6] = ['♙', '♔', '♘', '♗', '♖', '♕'];
        const BLACK: [char; 6] = ['♟', '♚', '♞', '♝', '♜', '♛'];
        match self.0 {
            None => '.',
            Some((Color::White, p)) => WHITE[p as usize],
            Some((Color::Black, p)) => BLACK[p as usize],
        }
    }

    /// Parses a FEN piece letter
    pub fn from_char(c: char) -> Option<Cell> {
        let piece = Piece::from_letter(c.to_ascii_lowercase())?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Cell::from_parts(color, piece))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.as_char())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastlingSide {
    Queen,
    King,
}

/// Castling eligibility for both colors and both sides
///
/// A flag is set while neither the king nor the corresponding rook has left its home square.
/// Once cleared, a flag is never set again by a move.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// FEN letters of the flags, in the order they are written
    const LETTERS: [(char, Color, CastlingSide); 4] = [
        ('K', Color::White, CastlingSide::King),
        ('Q', Color::White, CastlingSide::Queen),
        ('k', Color::Black, CastlingSide::King),
        ('q', Color::Black, CastlingSide::Queen),
    ];

    const fn bit(c: Color, s: CastlingSide) -> u8 {
        let shift = match (c, s) {
            (Color::White, CastlingSide::King) => 0,
            (Color::White, CastlingSide::Queen) => 1,
            (Color::Black, CastlingSide::King) => 2,
            (Color::Black, CastlingSide::Queen) => 3,
        };
        1 << shift
    }

    pub const EMPTY: CastlingRights = CastlingRights(0);
    pub const FULL: CastlingRights = CastlingRights(0b1111);

    pub const fn has(&self, c: Color, s: CastlingSide) -> bool {
        self.0 & Self::bit(c, s) != 0
    }

    pub const fn with(self, c: Color, s: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 | Self::bit(c, s))
    }

    pub fn set(&mut self, c: Color, s: CastlingSide) {
        self.0 |= Self::bit(c, s);
    }

    pub fn unset(&mut self, c: Color, s: CastlingSide) {
        self.0 &= !Self::bit(c, s);
    }

    pub fn unset_color(&mut self, c: Color) {
        self.unset(c, CastlingSide::King);
        self.unset(c, CastlingSide::Queen);
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({})", self)
    }
}

/// Formats the flags as in FEN, like `KQkq`, or `-` if there are none
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::EMPTY {
            return f.write_str("-");
        }
        for (letter, c, s) in Self::LETTERS {
            if self.has(c, s) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<CastlingRights, Self::Err> {
        type Error = CastlingRightsParseError;
        match s {
            "-" => return Ok(CastlingRights::EMPTY),
            "" => return Err(Error::EmptyString),
            _ => {}
        }
        s.chars().try_fold(CastlingRights::EMPTY, |acc, ch| {
            let (_, c, side) = Self::LETTERS
                .into_iter()
                .find(|&(letter, _, _)| letter == ch)
                .ok_or(Error::UnexpectedChar(ch))?;
            if acc.has(c, side) {
                return Err(Error::DuplicateChar(ch));
            }
            Ok(acc.with(c, side))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes() {
        for (idx, file) in File::iter().enumerate() {
            assert_eq!(file.index(), idx);
            assert_eq!(File::from_index(idx), file);
            assert_eq!(File::from_char(file.as_char()), Some(file));
        }
        assert_eq!(File::try_from_index(-1), None);
        assert_eq!(File::try_from_index(8), None);
        assert_eq!(File::from_char('a'), None);
        assert_eq!(File::from_char('I'), None);

        assert_eq!(Rank::R1.as_char(), '1');
        assert_eq!(Rank::R8.as_char(), '8');
        assert_eq!(Rank::from_char('0'), None);
        assert_eq!(
            Rank::iter().rev().collect::<Vec<_>>(),
            vec![
                Rank::R8,
                Rank::R7,
                Rank::R6,
                Rank::R5,
                Rank::R4,
                Rank::R3,
                Rank::R2,
                Rank::R1
            ]
        );
    }

    #[test]
    fn test_coord() {
        let mut coords = Vec::new();
        for rank in Rank::iter() {
            for file in File::iter() {
                let coord = Coord::from_parts(file, rank);
                assert_eq!(coord.file(), file);
                assert_eq!(coord.rank(), rank);
                coords.push(coord);
            }
        }
        assert_eq!(coords, Coord::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_coord_roundtrip() {
        for file in 0..8 {
            for rank in 0..8 {
                let coord = Coord::try_from_indices(file, rank).unwrap();
                assert_eq!(Coord::from_str(&coord.to_string()), Ok(coord));
                assert_eq!(coord.file().index() as isize, file);
                assert_eq!(coord.rank().index() as isize, rank);
            }
        }
        assert_eq!(
            Coord::try_from_indices(8, 0),
            Err(CoordParseError::OutOfRange(8, 0))
        );
        assert_eq!(
            Coord::try_from_indices(0, -1),
            Err(CoordParseError::OutOfRange(0, -1))
        );
    }

    #[test]
    fn test_coord_str() {
        assert_eq!(Coord::from_parts(File::B, Rank::R4).to_string(), "B4");
        assert_eq!(Coord::from_str("A1"), Ok(Coord::from_parts(File::A, Rank::R1)));
        assert_eq!(Coord::from_str("H8"), Ok(Coord::from_parts(File::H, Rank::R8)));
        assert_eq!(Coord::from_str("H9"), Err(CoordParseError::UnexpectedRankChar('9')));
        assert_eq!(Coord::from_str("H0"), Err(CoordParseError::UnexpectedRankChar('0')));
        assert_eq!(Coord::from_str("I4"), Err(CoordParseError::UnexpectedFileChar('I')));
        assert_eq!(Coord::from_str("e2"), Err(CoordParseError::UnexpectedFileChar('e')));
        assert_eq!(Coord::from_str(""), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_str("E"), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_str("E22"), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_str("É2"), Err(CoordParseError::UnexpectedFileChar('É')));
    }

    #[test]
    fn test_try_shift() {
        let e4 = Coord::from_parts(File::E, Rank::R4);
        assert_eq!(e4.try_shift(1, 2), Some(Coord::from_parts(File::F, Rank::R6)));
        assert_eq!(e4.try_shift(-4, -3), Some(Coord::from_parts(File::A, Rank::R1)));
        assert_eq!(e4.try_shift(-5, 0), None);
        assert_eq!(e4.try_shift(0, 5), None);
    }

    #[test]
    fn test_cell() {
        assert_eq!(Cell::EMPTY.color(), None);
        assert_eq!(Cell::EMPTY.piece(), None);
        assert_eq!(Cell::EMPTY.as_char(), '.');
        for color in [Color::White, Color::Black] {
            for piece in Piece::ALL {
                let cell = Cell::from_parts(color, piece);
                assert_eq!(cell.color(), Some(color));
                assert_eq!(cell.piece(), Some(piece));
                assert_eq!(Cell::from_char(cell.as_char()), Some(cell));
            }
        }
        assert_eq!(
            Cell::from_char('N'),
            Some(Cell::from_parts(Color::White, Piece::Knight))
        );
        assert_eq!(Cell::from_parts(Color::Black, Piece::Queen).as_utf8_char(), '♛');
        assert_eq!(Cell::from_char('x'), None);
    }

    #[test]
    fn test_color() {
        assert_eq!(Color::from_str("w"), Ok(Color::White));
        assert_eq!(Color::Black.to_string(), "b");
        assert_eq!(
            Color::from_str("white"),
            Err(ColorParseError::Unexpected("white".to_string()))
        );
    }

    #[test]
    fn test_castling() {
        let empty = CastlingRights::EMPTY;
        assert!(!empty.has(Color::White, CastlingSide::Queen));
        assert_eq!(empty.to_string(), "-");
        assert_eq!(CastlingRights::from_str("-"), Ok(empty));

        let full = CastlingRights::FULL;
        for c in [Color::White, Color::Black] {
            for s in [CastlingSide::King, CastlingSide::Queen] {
                assert!(full.has(c, s));
            }
        }
        assert_eq!(full.to_string(), "KQkq");
        assert_eq!(CastlingRights::from_str("qkQK"), Ok(full));

        let mut rights = full;
        rights.unset_color(Color::White);
        rights.unset(Color::Black, CastlingSide::King);
        assert_eq!(rights.to_string(), "q");
        assert_eq!(CastlingRights::from_str("q"), Ok(rights));

        assert_eq!(
            CastlingRights::from_str("KK"),
            Err(CastlingRightsParseError::DuplicateChar('K'))
        );
        assert_eq!(
            CastlingRights::from_str("Kx"),
            Err(CastlingRightsParseError::UnexpectedChar('x'))
        );
        assert_eq!(
            CastlingRights::from_str(""),
            Err(CastlingRightsParseError::EmptyString)
        );
    }
}
