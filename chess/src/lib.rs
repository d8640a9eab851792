//! Chess rules engine
//!
//! Keeps the state of a chess game on an 8x8 board, generates the squares each piece may
//! move to, validates and applies moves, including en passant and castling.
//!
//! Moves are pseudo-legal: a move that leaves the own king in check is accepted. Promotion,
//! check detection and game end detection are not performed.
//!
//! # Example
//!
//! ```
//! use chesst::{engine::Engine, Piece};
//!
//! let mut engine = Engine::initial();
//!
//! let sel = engine.select_piece("B1").unwrap();
//! assert_eq!(sel.highlighted.len(), 2);
//!
//! engine.move_piece("E2", "E4").unwrap();
//! assert!(engine.move_piece("E4", "E5").is_err());
//!
//! let snap = engine.board_snapshot();
//! assert_eq!(snap.get("E4").unwrap().piece, Some(Piece::Pawn));
//! ```

pub mod board;
pub mod castling;
pub mod chain;
pub mod engine;
pub mod movegen;
pub mod moves;
pub mod pawns;

pub use chesst_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::{Board, LastMove};
pub use chain::MoveChain;
pub use engine::{Engine, Snapshot, SquareState};
pub use movegen::{MoveList, Probe};
pub use moves::{Move, MoveKind, ValidateError};
pub use types::{CastlingRights, CastlingSide, Cell, Color, Coord, File, Piece, Rank};
