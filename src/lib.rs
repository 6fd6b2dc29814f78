#![deny(missing_docs)]
//! This crate solves the exact cover problem via Knuth's Algorithm X with the
//! Dancing Links technique, and applies that engine to Sudoku puzzles of
//! sizes 4x4, 9x9, and 16x16.

/// The `dlx` module implements the Dancing Links sparse matrix and the
/// Algorithm X solver for the exact cover problem.
pub mod dlx;

/// The `sudoku` module maps Sudoku puzzles onto the exact cover engine and
/// provides text input/output for puzzle files.
pub mod sudoku;
