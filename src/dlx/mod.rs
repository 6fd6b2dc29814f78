#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Dancing Links implementation of Knuth's Algorithm X.
//!
//! The exact cover problem is represented as a sparse 0/1 matrix: the goal is
//! to select a subset of the rows such that every column contains exactly one
//! selected `1`. The matrix is stored as a two-dimensional circular
//! doubly-linked list of nodes (the Dancing Links structure), which supports
//! removing and reinserting a node in O(1) while preserving enough state to
//! restore the matrix exactly during backtracking.

/// Node arena and link primitives for the sparse matrix.
pub mod matrix;

/// Node identifiers and the node storage record.
pub mod node;

/// The Algorithm X recursive backtracking solver.
pub mod solver;
