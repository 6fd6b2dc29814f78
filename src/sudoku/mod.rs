#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku solving on top of the exact cover engine.
//!
//! A Sudoku puzzle is modelled as an exact cover problem: every candidate
//! placement of a number in a cell becomes one matrix row, and the Sudoku
//! rules become matrix columns that must each be covered exactly once.

/// The exact cover matrix modelling a Sudoku puzzle.
pub mod matrix;

/// Text input/output for Sudoku puzzles.
pub mod processor;

/// The Sudoku solver and its solution grid.
pub mod solver;
