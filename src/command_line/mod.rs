//! Command-line interface of the Sudoku solver binary.

pub(crate) mod cli;
