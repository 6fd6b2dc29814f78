#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The exact cover matrix modelling a Sudoku puzzle.
//!
//! For a puzzle of size D there are four groups of conditions to satisfy:
//!
//! 1. the first D^2 columns represent that each cell has a number filled in,
//! 2. the second D^2 columns represent that each row contains every number
//!    between 1..D,
//! 3. the third D^2 columns represent that each column contains every number
//!    between 1..D,
//! 4. the fourth D^2 columns represent that each box contains every number
//!    between 1..D.
//!
//! That makes 4*D^2 condition columns in total (324 for a typical 9x9
//! Sudoku). The matrix rows are the D^3 candidate placements: for every
//! (row, column, number) triple one row with exactly four nodes, one per
//! condition group.

use crate::dlx::matrix::Matrix;
use crate::dlx::node::NodeId;
use crate::sudoku::solver::{Placement, Size};

/// The four types of conditions modelled per cell: the cell is filled, and
/// its row, column, and box each contain the placed number exactly once.
const CONDITION_GROUPS: usize = 4;

/// A sparse matrix modelling the exact cover problem for a Sudoku puzzle of
/// a given size.
///
/// Construction creates all 4*D^2 column headers and all D^3 candidate rows up
/// front; solving only rearranges links. Every node of a candidate row
/// carries the corresponding [`Placement`] as payload so that a raw solution
/// can be reinterpreted as values in a Sudoku grid.
///
/// # Examples
///
/// ```
/// use sudoku_dlx::sudoku::matrix::SudokuMatrix;
/// use sudoku_dlx::sudoku::solver::{Size, SudokuSolver};
///
/// let matrix = SudokuMatrix::new(Size::Four);
/// let mut solver = SudokuSolver::new(matrix);
/// solver.set_input(1, 1, 4);
/// assert!(solver.solve().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SudokuMatrix {
    pub(crate) matrix: Matrix<Placement>,
    pub(crate) size: Size,
    pub(crate) row_anchors: Vec<NodeId>,
}

impl SudokuMatrix {
    /// Constructs the sparse matrix modelling a Sudoku problem of the given
    /// size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        let digits = usize::from(size);
        let conditions = CONDITION_GROUPS * digits * digits;
        let mut matrix = Matrix::new();

        // Header lookup by condition index, used while filling the matrix
        // with candidate rows.
        let columns: Vec<NodeId> = (0..conditions).map(|_| matrix.new_header()).collect();

        // One candidate row per (row, column, number) triple. The iteration
        // order matches `anchor_index`, so anchors can simply be pushed.
        let mut row_anchors = Vec::with_capacity(digits * digits * digits);
        for row in 1..=digits {
            for column in 1..=digits {
                for number in 1..=digits {
                    let node_cell = matrix.new_node(columns[cell_column(size, row, column)]);
                    let node_row = matrix.new_node(columns[row_column(size, row, number)]);
                    let node_column =
                        matrix.new_node(columns[column_column(size, column, number)]);
                    let node_box =
                        matrix.new_node(columns[box_column(size, row, column, number)]);

                    matrix.make_row(node_cell, &[node_row, node_column, node_box]);

                    // Placement meta-data lets a found solution be read back
                    // as values in a Sudoku grid.
                    let placement = Placement::new(row, column, number);
                    for node in [node_cell, node_row, node_column, node_box] {
                        matrix.set_data(node, placement);
                    }

                    row_anchors.push(node_cell);
                }
            }
        }

        Self {
            matrix,
            size,
            row_anchors,
        }
    }

    /// Returns the size of the modelled puzzle.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the anchor node of the candidate row for the given placement.
    ///
    /// # Panics
    ///
    /// Panics if `row`, `column`, or `number` is outside `1..=D`.
    #[must_use]
    pub fn anchor(&self, row: usize, column: usize, number: usize) -> NodeId {
        self.row_anchors[anchor_index(self.size, row, column, number)]
    }
}

/// Header index for the cell condition: cell (row, column) is filled with
/// some number.
pub(crate) fn cell_column(size: Size, row: usize, column: usize) -> usize {
    let digits = usize::from(size);
    (row - 1) * digits + (column - 1)
}

/// Header index for the row condition: row `row` contains number `number`.
pub(crate) fn row_column(size: Size, row: usize, number: usize) -> usize {
    let digits = usize::from(size);
    digits * digits + (row - 1) * digits + (number - 1)
}

/// Header index for the column condition: column `column` contains number
/// `number`.
pub(crate) fn column_column(size: Size, column: usize, number: usize) -> usize {
    let digits = usize::from(size);
    2 * digits * digits + (column - 1) * digits + (number - 1)
}

/// Header index for the box condition: the box containing cell
/// (row, column) contains number `number`.
pub(crate) fn box_column(size: Size, row: usize, column: usize, number: usize) -> usize {
    let digits = usize::from(size);
    let side = size.block_size();
    let block = (column - 1) / side + (row - 1) / side * side;
    3 * digits * digits + block * digits + (number - 1)
}

/// The four condition header indexes of one placement, in node order.
pub(crate) fn condition_indexes(
    size: Size,
    row: usize,
    column: usize,
    number: usize,
) -> [usize; 4] {
    [
        cell_column(size, row, column),
        row_column(size, row, number),
        column_column(size, column, number),
        box_column(size, row, column, number),
    ]
}

/// Lookup index for candidate row anchors by (row, column, number) triple.
pub(crate) fn anchor_index(size: Size, row: usize, column: usize, number: usize) -> usize {
    let digits = usize::from(size);
    ((row - 1) * digits + (column - 1)) * digits + (number - 1)
}
