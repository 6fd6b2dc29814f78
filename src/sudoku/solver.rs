#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The Sudoku solver and its solution grid.
//!
//! [`SudokuSolver`] wraps the exact cover [`Solver`](crate::dlx::solver::Solver)
//! and provides the Sudoku-specific conveniences: pinning pre-filled cells as
//! input via [`SudokuSolver::set_input`], and converting a raw exact cover
//! solution into an easy-to-access [`Solution`] grid.

use crate::dlx::node::NodeId;
use crate::dlx::solver::{SearchStats, Solver};
use crate::sudoku::matrix::{anchor_index, SudokuMatrix};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::Display;

/// The supported sizes of a Sudoku grid.
///
/// Each valid value is a perfect square, a property needed to model the box
/// conditions of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    /// A Sudoku of 4x4, using numbers 1..4 and having boxes of 2x2.
    Four = 4,
    /// A Sudoku of 9x9, using numbers 1..9 and having boxes of 3x3.
    Nine = 9,
    /// A Sudoku of 16x16, using numbers 1..16 (printed as 0..F) and having
    /// boxes of 4x4.
    Sixteen = 16,
}

impl TryFrom<usize> for Size {
    type Error = ();

    /// Tries to convert a `usize` into a `Size`.
    ///
    /// Returns `Ok(Size)` if the value is one of 4, 9, or 16. Otherwise,
    /// returns `Err(())`.
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            16 => Ok(Self::Sixteen),
            _ => Err(()),
        }
    }
}

impl From<Size> for usize {
    /// Converts a `Size` into its `usize` representation.
    fn from(size: Size) -> Self {
        match size {
            Size::Four => 4,
            Size::Nine => 9,
            Size::Sixteen => 16,
        }
    }
}

impl Display for Size {
    /// Formats the size as `NxN`. For example, `Size::Nine` is "9x9".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size: usize = (*self).into();
        write!(f, "{size}x{size}")
    }
}

impl Size {
    /// Returns the side length of the boxes (subgrids) of the puzzle.
    /// For example, a 9x9 Sudoku has 3x3 boxes.
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
        }
    }
}

/// A placement models a number for a specific row-column cell.
///
/// Given a digit range D (in a normal 9x9 Sudoku, D == 9), row, column, and
/// number all range over `1..=D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The row (1..=D) of the cell.
    pub row: usize,
    /// The column (1..=D) of the cell.
    pub column: usize,
    /// The number (1..=D) placed in the cell.
    pub number: usize,
}

impl Placement {
    /// Creates a new placement.
    #[must_use]
    pub const fn new(row: usize, column: usize, number: usize) -> Self {
        Self {
            row,
            column,
            number,
        }
    }
}

/// A fully populated Sudoku grid of size D x D, with every cell filled with
/// a number in `1..=D` such that all Sudoku rules are observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    size: Size,
    /// The grid as a one-dimensional row-by-row vector.
    grid: Vec<usize>,
}

impl Solution {
    /// Converts a set of placements into an easy-to-access solution grid.
    ///
    /// The grid is sized to D^2 cells and initialized to 0 (empty) before the
    /// placement values are written, so cells without a placement read as 0.
    #[must_use]
    pub fn from_placements(size: Size, placements: impl IntoIterator<Item = Placement>) -> Self {
        let digits = usize::from(size);
        let mut grid = vec![0; digits * digits];

        for placement in placements {
            grid[(placement.row - 1) * digits + placement.column - 1] = placement.number;
        }

        Self { size, grid }
    }

    /// Returns the size of the solution grid.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the number at the given grid cell, with `row` and `column` in
    /// `1..=D`. An unfilled cell reads as 0.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is outside `1..=D`.
    #[must_use]
    pub fn cell_value(&self, row: usize, column: usize) -> usize {
        let digits = usize::from(self.size);
        self.grid[(row - 1) * digits + column - 1]
    }

    /// Checks the grid against the Sudoku rules: every row, column, and box
    /// must contain each number in `1..=D` exactly once.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let digits = usize::from(self.size);
        let side = self.size.block_size();

        let rows = (1..=digits)
            .all(|row| self.unit_is_complete((1..=digits).map(|column| (row, column))));
        let columns = (1..=digits)
            .all(|column| self.unit_is_complete((1..=digits).map(|row| (row, column))));
        let boxes = (0..digits)
            .step_by(side)
            .cartesian_product((0..digits).step_by(side))
            .all(|(band, stack)| {
                self.unit_is_complete(
                    (1..=side).flat_map(|row| (1..=side).map(move |column| (band + row, stack + column))),
                )
            });

        rows && columns && boxes
    }

    /// Whether one unit (row, column, or box) contains every number in
    /// `1..=D` exactly once.
    fn unit_is_complete(&self, cells: impl Iterator<Item = (usize, usize)>) -> bool {
        let digits = usize::from(self.size);
        let values: SmallVec<[usize; 16]> = cells
            .map(|(row, column)| self.cell_value(row, column))
            .collect();

        values.len() == digits
            && values.iter().all(|value| (1..=digits).contains(value))
            && values.iter().all_unique()
    }
}

impl Display for Solution {
    /// Formats the grid as D lines of D space-separated numbers.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = usize::from(self.size);
        for row in 1..=digits {
            writeln!(
                f,
                "{}",
                (1..=digits)
                    .map(|column| self.cell_value(row, column))
                    .join(" ")
            )?;
        }
        Ok(())
    }
}

/// Solves a [`SudokuMatrix`] to find a valid Sudoku [`Solution`].
///
/// The solver takes ownership of the matrix. Pre-filled cells are pinned
/// with [`SudokuSolver::set_input`] before calling [`SudokuSolver::solve`];
/// a solver is single-use.
///
/// # Examples
///
/// ```
/// use sudoku_dlx::sudoku::matrix::SudokuMatrix;
/// use sudoku_dlx::sudoku::solver::{Size, SudokuSolver};
///
/// let mut solver = SudokuSolver::new(SudokuMatrix::new(Size::Four));
/// solver.set_input(1, 1, 4);
///
/// let solution = solver.solve().expect("a puzzle with one pin is solvable");
/// assert_eq!(solution.cell_value(1, 1), 4);
/// assert!(solution.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct SudokuSolver {
    size: Size,
    row_anchors: Vec<NodeId>,
    solver: Solver<Placement>,
}

impl SudokuSolver {
    /// Creates a new solver over the given Sudoku matrix, taking ownership
    /// of it.
    #[must_use]
    pub fn new(matrix: SudokuMatrix) -> Self {
        let SudokuMatrix {
            matrix,
            size,
            row_anchors,
        } = matrix;

        Self {
            size,
            row_anchors,
            solver: Solver::new(matrix),
        }
    }

    /// Returns the size of the puzzle being solved.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the statistics collected by the underlying exact cover
    /// search.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.solver.stats()
    }

    /// Pins the given number as pre-filled input on the given row and
    /// column.
    ///
    /// The corresponding candidate row is committed to the solution
    /// permanently. The placement must not conflict with an earlier pin
    /// (same cell, or same number already pinned in the row, column, or
    /// box); conflicts are a programming error asserted in debug builds.
    ///
    /// # Panics
    ///
    /// Panics if `row`, `column`, or `number` is outside `1..=D`.
    pub fn set_input(&mut self, row: usize, column: usize, number: usize) {
        let anchor = self.row_anchors[anchor_index(self.size, row, column, number)];
        self.solver.cover_row(anchor);
    }

    /// Solves the puzzle, returning a fully populated grid or `None` if no
    /// valid solution exists.
    pub fn solve(&mut self) -> Option<Solution> {
        let rows = self.solver.solve()?;

        let placements: Vec<Placement> = rows
            .iter()
            .map(|&node| {
                self.solver
                    .matrix()
                    .data(node)
                    .copied()
                    .expect("every candidate node carries a placement")
            })
            .collect();

        Some(Solution::from_placements(self.size, placements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_try_from_usize() {
        assert_eq!(Size::try_from(4), Ok(Size::Four));
        assert_eq!(Size::try_from(9), Ok(Size::Nine));
        assert_eq!(Size::try_from(16), Ok(Size::Sixteen));
        assert_eq!(Size::try_from(0), Err(()));
        assert_eq!(Size::try_from(25), Err(()));
    }

    #[test]
    fn usize_from_size() {
        assert_eq!(usize::from(Size::Four), 4);
        assert_eq!(usize::from(Size::Nine), 9);
        assert_eq!(usize::from(Size::Sixteen), 16);
    }

    #[test]
    fn size_display() {
        assert_eq!(format!("{}", Size::Four), "4x4");
        assert_eq!(format!("{}", Size::Sixteen), "16x16");
    }

    #[test]
    fn size_block_size() {
        assert_eq!(Size::Four.block_size(), 2);
        assert_eq!(Size::Nine.block_size(), 3);
        assert_eq!(Size::Sixteen.block_size(), 4);
    }

    #[test]
    fn solution_from_placements() {
        let placements = [Placement::new(1, 1, 4), Placement::new(2, 3, 1)];
        let solution = Solution::from_placements(Size::Four, placements);

        assert_eq!(solution.size(), Size::Four);
        assert_eq!(solution.cell_value(1, 1), 4);
        assert_eq!(solution.cell_value(2, 3), 1);
        // Cells without a placement read as empty.
        assert_eq!(solution.cell_value(4, 4), 0);
    }

    #[test]
    fn solution_display() {
        let placements = [Placement::new(1, 1, 4), Placement::new(2, 2, 3)];
        let solution = Solution::from_placements(Size::Four, placements);
        assert_eq!(format!("{solution}"), "4 0 0 0\n0 3 0 0\n0 0 0 0\n0 0 0 0\n");
    }

    fn valid_four_grid() -> [[usize; 4]; 4] {
        [[4, 3, 2, 1], [2, 1, 3, 4], [3, 4, 1, 2], [1, 2, 4, 3]]
    }

    fn placements_of(grid: &[[usize; 4]; 4]) -> Vec<Placement> {
        let mut placements = Vec::new();
        for (row, values) in grid.iter().enumerate() {
            for (column, &number) in values.iter().enumerate() {
                placements.push(Placement::new(row + 1, column + 1, number));
            }
        }
        placements
    }

    #[test]
    fn solution_validity() {
        let solution = Solution::from_placements(Size::Four, placements_of(&valid_four_grid()));
        assert!(solution.is_valid());

        // Swapping two values breaks a row and a column.
        let mut broken = valid_four_grid();
        broken[0][0] = 3;
        let solution = Solution::from_placements(Size::Four, placements_of(&broken));
        assert!(!solution.is_valid());

        // An incomplete grid is not valid either.
        let solution =
            Solution::from_placements(Size::Four, [Placement::new(1, 1, 4)]);
        assert!(!solution.is_valid());
    }

    /// Sets up the solver for the following Sudoku:
    ///
    /// ```text
    /// 4 _ _ 1
    /// _ 1 3 _
    /// _ 4 1 _
    /// 1 _ _ 3
    /// ```
    fn small_sudoku() -> SudokuSolver {
        let mut solver = SudokuSolver::new(SudokuMatrix::new(Size::Four));

        solver.set_input(1, 1, 4);
        solver.set_input(1, 4, 1);

        solver.set_input(2, 2, 1);
        solver.set_input(2, 3, 3);

        solver.set_input(3, 2, 4);
        solver.set_input(3, 3, 1);

        solver.set_input(4, 1, 1);
        solver.set_input(4, 4, 3);

        solver
    }

    #[test]
    fn solves_small_sudoku() {
        let mut solver = small_sudoku();
        let solution = solver.solve().expect("the small Sudoku is solvable");

        assert_eq!(solution.size(), Size::Four);
        assert!(solution.is_valid());

        let expected = valid_four_grid();
        for row in 1..=4 {
            for column in 1..=4 {
                assert_eq!(solution.cell_value(row, column), expected[row - 1][column - 1]);
            }
        }
    }

    #[test]
    fn solving_is_deterministic() {
        let first = small_sudoku().solve();
        let second = small_sudoku().solve();
        assert_eq!(first, second);
    }

    #[test]
    fn fully_pinned_grid_needs_no_search() {
        let grid = [
            [5, 3, 4, 6, 7, 8, 9, 1, 2],
            [6, 7, 2, 1, 9, 5, 3, 4, 8],
            [1, 9, 8, 3, 4, 2, 5, 6, 7],
            [8, 5, 9, 7, 6, 1, 4, 2, 3],
            [4, 2, 6, 8, 5, 3, 7, 9, 1],
            [7, 1, 3, 9, 2, 4, 8, 5, 6],
            [9, 6, 1, 5, 3, 7, 2, 8, 4],
            [2, 8, 7, 4, 1, 9, 6, 3, 5],
            [3, 4, 5, 2, 8, 6, 1, 7, 9],
        ];

        let mut solver = SudokuSolver::new(SudokuMatrix::new(Size::Nine));
        for (row, values) in grid.iter().enumerate() {
            for (column, &number) in values.iter().enumerate() {
                solver.set_input(row + 1, column + 1, number);
            }
        }

        let solution = solver.solve().expect("a complete valid grid solves itself");
        for row in 1..=9 {
            for column in 1..=9 {
                assert_eq!(solution.cell_value(row, column), grid[row - 1][column - 1]);
            }
        }

        // Every column was covered by the pinned input, so the search
        // succeeded without trying a single row.
        assert_eq!(solver.stats().decisions, 0);
        assert_eq!(solver.stats().backtracks, 0);
    }

    #[test]
    fn reports_unsolvable_puzzle() {
        // Cell (1, 4) needs a 4 to complete its row, but the 4 in cell
        // (2, 4) rules it out. No pair of pins conflicts directly.
        let mut solver = SudokuSolver::new(SudokuMatrix::new(Size::Four));
        solver.set_input(1, 1, 1);
        solver.set_input(1, 2, 2);
        solver.set_input(1, 3, 3);
        solver.set_input(2, 4, 4);

        assert_eq!(solver.solve(), None);
    }
}
