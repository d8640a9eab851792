//! # Base types for chesst
//!
//! This is an auxiliary crate for `chesst`, which contains the plain value types of the board:
//! squares, pieces, colors and sets of squares. It has no knowledge of the chess rules.
//!
//! Normally you don't want to use this crate directly. Use `chesst` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;
