#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The Algorithm X solver for the exact cover problem.
//!
//! Algorithm X (Knuth, <https://arxiv.org/abs/cs/0011047>) recursively
//! reduces the sparse matrix until a solution is found:
//!
//! 1. If the matrix has no columns, the current partial solution is a valid
//!    exact cover.
//! 2. Otherwise, select the column `c` with the lowest count.
//! 3. Cover the chosen column.
//! 4. For each row `r` with a node in `c`: include `r` in the partial
//!    solution, cover every other column that `r` intersects, and recurse on
//!    the reduced matrix.
//! 5. If the recursion yields no solution, remove `r` from the partial
//!    solution, uncover the columns it intersects, and try the next row.
//!
//! Cover and uncover rely on the O(1) remove/reinsert operations of the
//! Dancing Links structure. Uncover traverses the exact mirror order of
//! cover, so the restored configuration is bit-identical to the pre-cover
//! state.

use crate::dlx::matrix::Matrix;
use crate::dlx::node::NodeId;

/// Counters collected while solving, reported alongside a result.
///
/// Counting is the only work added to the search; solving allocates nothing
/// on the hot path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of rows tried by the search.
    pub decisions: usize,
    /// Number of rows removed from the partial solution while backtracking.
    pub backtracks: usize,
    /// Number of column cover operations, including those performed when
    /// pinning rows.
    pub covers: usize,
    /// Deepest partial solution reached, pinned rows included.
    pub max_depth: usize,
}

/// Solves an exact cover problem over a [`Matrix`] using Algorithm X.
///
/// The solver takes ownership of the matrix for its lifetime; after
/// [`Solver::solve`] returns, payloads of solution rows can be read back
/// through [`Solver::matrix`]. A solver is single-use: solve once, then read
/// the result.
///
/// # Examples
///
/// ```
/// use sudoku_dlx::dlx::matrix::Matrix;
/// use sudoku_dlx::dlx::solver::Solver;
///
/// // Columns {1, 2}; a single row {1, 2} covering both.
/// let mut matrix: Matrix<&str> = Matrix::new();
/// let first = matrix.new_header();
/// let second = matrix.new_header();
/// let a = matrix.new_node(first);
/// let b = matrix.new_node(second);
/// matrix.make_row(a, &[b]);
/// matrix.set_data(a, "row");
///
/// let mut solver = Solver::new(matrix);
/// let solution = solver.solve().expect("exact cover exists");
/// assert_eq!(solution.len(), 1);
/// assert_eq!(solver.matrix().data(solution[0]), Some(&"row"));
/// ```
#[derive(Debug, Clone)]
pub struct Solver<T> {
    matrix: Matrix<T>,
    solution: Vec<NodeId>,
    stats: SearchStats,
}

impl<T> Solver<T> {
    /// Creates a new solver over the given matrix, taking ownership of it.
    #[must_use]
    pub fn new(matrix: Matrix<T>) -> Self {
        Self {
            matrix,
            solution: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Returns the matrix this solver operates on, for reading payloads and
    /// traversing solution rows.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    /// Returns the statistics collected so far.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Commits a specific row to the solution before searching.
    ///
    /// This is used to pin predetermined input (e.g. the pre-filled cells of
    /// a Sudoku puzzle): the row is pushed into the solution and the columns
    /// of every node in it are covered. Unlike covers performed by the
    /// search, these covers are permanent; they are never paired with an
    /// uncover.
    ///
    /// `anchor` may be any node of the target row; the row's other nodes are
    /// discovered by walking right from it. The row must not intersect any
    /// column that was already covered (asserted in debug builds).
    pub fn cover_row(&mut self, anchor: NodeId) {
        debug_assert!(
            self.matrix
                .column_contains(self.matrix.header(anchor), anchor),
            "cover_row anchor belongs to a row that was already covered"
        );

        self.solution.push(anchor);
        self.stats.max_depth = self.stats.max_depth.max(self.solution.len());

        self.cover(self.matrix.header(anchor));
        let mut node = self.matrix.right(anchor);
        while node != anchor {
            self.cover(self.matrix.header(node));
            node = self.matrix.right(node);
        }
    }

    /// Searches for an exact cover of the matrix.
    ///
    /// Returns the solution as an ordered list of node references, one per
    /// selected row (rows committed via [`Solver::cover_row`] included, in
    /// insertion order), or `None` if the matrix admits no exact cover.
    ///
    /// On return the matrix links are restored to their pre-search state:
    /// every cover performed by the search is undone, while rows committed
    /// via [`Solver::cover_row`] stay covered.
    pub fn solve(&mut self) -> Option<Vec<NodeId>> {
        let pinned = self.solution.len();
        if !self.search() {
            return None;
        }
        let solution = self.solution.clone();
        self.unwind(pinned);
        Some(solution)
    }

    /// One recursive step of Algorithm X.
    ///
    /// Returns whether a solution was found; if so, `self.solution` holds a
    /// valid exact cover. At every `false` return the matrix is restored to
    /// the state it had on entry.
    fn search(&mut self) -> bool {
        let root = self.matrix.root();

        // No condition columns left means every condition is satisfied: the
        // rows covered so far form a valid solution.
        if self.matrix.right(root) == root {
            return true;
        }

        let Some(header) = self.select_column() else {
            return false;
        };

        self.cover(header);

        // Try every row in this column: add it to the solution, recurse on
        // the smaller matrix, and backtrack if no solution was found.
        let mut row = self.matrix.down(header);
        while row != header {
            self.solution.push(row);
            self.stats.decisions += 1;
            self.stats.max_depth = self.stats.max_depth.max(self.solution.len());

            let mut node = self.matrix.right(row);
            while node != row {
                self.cover(self.matrix.header(node));
                node = self.matrix.right(node);
            }

            if self.search() {
                return true;
            }

            self.solution.pop();
            self.stats.backtracks += 1;

            let mut node = self.matrix.left(row);
            while node != row {
                self.uncover(self.matrix.header(node));
                node = self.matrix.left(node);
            }

            row = self.matrix.down(row);
        }

        self.uncover(header);
        false
    }

    /// Selects the column header with the lowest count, ties broken towards
    /// the leftmost header. Returns `None` only for an empty header row,
    /// which the caller has already ruled out.
    fn select_column(&self) -> Option<NodeId> {
        let root = self.matrix.root();
        let mut target = None;
        let mut min_count = usize::MAX;

        let mut header = self.matrix.right(root);
        while header != root {
            let count = self.matrix.count(header);
            if count < min_count {
                min_count = count;
                target = Some(header);
            }
            header = self.matrix.right(header);
        }

        target
    }

    /// Covers a column: unlinks the header from the header row, then removes
    /// every row intersecting the column from all *other* columns it is in.
    ///
    /// The header's own count is not decremented; only the counts of the
    /// other columns losing a node are.
    fn cover(&mut self, header: NodeId) {
        self.stats.covers += 1;
        self.matrix.remove_horizontal(header);

        let mut row = self.matrix.down(header);
        while row != header {
            let mut node = self.matrix.right(row);
            while node != row {
                self.matrix.remove_vertical(node);
                let other = self.matrix.header(node);
                self.matrix.dec_count(other);
                node = self.matrix.right(node);
            }
            row = self.matrix.down(row);
        }
    }

    /// Uncovers a column, the exact inverse of [`Solver::cover`].
    ///
    /// Traverses up/left, the mirror order of cover's down/right, so the
    /// dancing-links restoration reproduces the pre-cover configuration
    /// bit-for-bit.
    fn uncover(&mut self, header: NodeId) {
        let mut row = self.matrix.up(header);
        while row != header {
            let mut node = self.matrix.left(row);
            while node != row {
                let other = self.matrix.header(node);
                self.matrix.inc_count(other);
                self.matrix.reinsert_vertical(node);
                node = self.matrix.left(node);
            }
            row = self.matrix.up(row);
        }

        self.matrix.reinsert_horizontal(header);
    }

    /// Undoes the covers of every searched (non-pinned) solution row, deepest
    /// first, restoring the matrix to its pre-search state after a successful
    /// search.
    fn unwind(&mut self, pinned: usize) {
        while self.solution.len() > pinned {
            let Some(row) = self.solution.pop() else {
                break;
            };

            let mut node = self.matrix.left(row);
            while node != row {
                self.uncover(self.matrix.header(node));
                node = self.matrix.left(node);
            }
            // A searched row was reached by walking down from its selected
            // column header, so that header is the row node's own column.
            self.uncover(self.matrix.header(row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The basic example from <https://en.wikipedia.org/wiki/Exact_cover>:
    /// columns {1,2,3,4} and rows O = {1,3}, P = {1,2,3}, E = {2,4}.
    fn wikipedia_matrix() -> (Matrix<&'static str>, [NodeId; 7]) {
        let mut matrix = Matrix::new();

        let header1 = matrix.new_header();
        let header2 = matrix.new_header();
        let header3 = matrix.new_header();
        let header4 = matrix.new_header();

        let o1 = matrix.new_node(header1);
        let o3 = matrix.new_node(header3);
        matrix.make_row(o1, &[o3]);

        let p1 = matrix.new_node(header1);
        let p2 = matrix.new_node(header2);
        let p3 = matrix.new_node(header3);
        matrix.make_row(p1, &[p2, p3]);

        let e2 = matrix.new_node(header2);
        let e4 = matrix.new_node(header4);
        matrix.make_row(e2, &[e4]);

        for node in [o1, o3] {
            matrix.set_data(node, "O");
        }
        for node in [p1, p2, p3] {
            matrix.set_data(node, "P");
        }
        for node in [e2, e4] {
            matrix.set_data(node, "E");
        }

        (matrix, [o1, o3, p1, p2, p3, e2, e4])
    }

    #[test]
    fn solves_wikipedia_example() {
        let (matrix, nodes) = wikipedia_matrix();
        let [o1, _, _, _, _, _, e4] = nodes;

        let mut solver = Solver::new(matrix);
        let solution = solver.solve().expect("the example has an exact cover");

        // Column 4 has the lowest count, so row E is selected first.
        assert_eq!(solution.len(), 2);
        assert_eq!(solution[0], e4);
        assert_eq!(solution[1], o1);
        assert_eq!(solver.matrix().data(solution[0]), Some(&"E"));
        assert_eq!(solver.matrix().data(solution[1]), Some(&"O"));
    }

    #[test]
    fn returns_none_when_no_cover_exists() {
        // Columns {1,2}; a single row {1} leaves column 2 uncoverable.
        let mut matrix: Matrix<()> = Matrix::new();
        let header1 = matrix.new_header();
        let _header2 = matrix.new_header();
        let _node = matrix.new_node(header1);

        let mut solver = Solver::new(matrix);
        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn empty_matrix_yields_empty_solution() {
        let matrix: Matrix<()> = Matrix::new();
        let mut solver = Solver::new(matrix);
        assert_eq!(solver.solve(), Some(Vec::new()));
    }

    #[test]
    fn cover_uncover_restores_links_and_counts() {
        let (matrix, _) = wikipedia_matrix();
        let mut solver = Solver::new(matrix);

        let root = solver.matrix.root();
        let header1 = solver.matrix.right(root);
        let header2 = solver.matrix.right(header1);

        let snapshot = solver.matrix.link_snapshot();
        let counts_before = column_counts(&solver.matrix);

        solver.cover(header1);
        solver.cover(header2);
        solver.uncover(header2);
        solver.uncover(header1);

        assert_eq!(solver.matrix.link_snapshot(), snapshot);
        assert_eq!(column_counts(&solver.matrix), counts_before);
    }

    #[test]
    fn counts_stay_consistent_during_cover() {
        let (matrix, _) = wikipedia_matrix();
        let mut solver = Solver::new(matrix);

        let root = solver.matrix.root();
        let header1 = solver.matrix.right(root);

        solver.cover(header1);
        // Each header's count must equal the number of nodes actually linked
        // into its vertical list.
        for (header, count) in column_counts(&solver.matrix) {
            assert_eq!(solver.matrix.count(header), count);
        }
        solver.uncover(header1);
    }

    #[test]
    fn matrix_is_restored_after_failed_search() {
        let mut matrix: Matrix<()> = Matrix::new();
        let header1 = matrix.new_header();
        let header2 = matrix.new_header();
        let header3 = matrix.new_header();
        // Two overlapping rows, neither covering column 3.
        let a1 = matrix.new_node(header1);
        let a2 = matrix.new_node(header2);
        matrix.make_row(a1, &[a2]);
        let b2 = matrix.new_node(header2);
        let b3 = matrix.new_node(header3);
        matrix.make_row(b2, &[b3]);

        let snapshot = matrix.link_snapshot();
        let mut solver = Solver::new(matrix);
        assert_eq!(solver.solve(), None);
        assert_eq!(solver.matrix.link_snapshot(), snapshot);
    }

    #[test]
    fn matrix_is_restored_after_successful_search() {
        let (matrix, _) = wikipedia_matrix();
        let snapshot = matrix.link_snapshot();
        let counts = column_counts(&matrix);

        let mut solver = Solver::new(matrix);
        assert!(solver.solve().is_some());

        assert_eq!(solver.matrix.link_snapshot(), snapshot);
        assert_eq!(column_counts(&solver.matrix), counts);
    }

    #[test]
    fn pinned_rows_stay_covered_after_solve() {
        let (matrix, nodes) = wikipedia_matrix();
        let [o1, _, _, _, _, e2, _] = nodes;
        let snapshot_before_pin = {
            let mut probe = Solver::new(matrix.clone());
            probe.cover_row(e2);
            probe.matrix.link_snapshot()
        };

        let mut solver = Solver::new(matrix);
        solver.cover_row(e2);
        let solution = solver.solve().expect("still solvable after pinning");

        assert_eq!(solution, vec![e2, o1]);
        // Search covers are unwound; the pin is permanent.
        assert_eq!(solver.matrix.link_snapshot(), snapshot_before_pin);
    }

    #[test]
    fn solving_is_deterministic() {
        let (matrix_a, _) = wikipedia_matrix();
        let (matrix_b, _) = wikipedia_matrix();

        let mut first = Solver::new(matrix_a);
        let mut second = Solver::new(matrix_b);

        assert_eq!(first.solve(), second.solve());
        assert_eq!(first.stats(), second.stats());
    }

    #[test]
    fn stats_count_decisions_and_covers() {
        let (matrix, _) = wikipedia_matrix();
        let mut solver = Solver::new(matrix);
        assert!(solver.solve().is_some());

        let stats = solver.stats();
        assert_eq!(stats.decisions, 2);
        assert_eq!(stats.backtracks, 0);
        assert_eq!(stats.max_depth, 2);
        assert!(stats.covers > 0);
    }

    /// Independently recounts every header's vertical list, walking the
    /// header row from the root.
    fn column_counts<T>(matrix: &Matrix<T>) -> Vec<(NodeId, usize)> {
        let root = matrix.root();
        let mut counts = Vec::new();
        let mut header = matrix.right(root);
        while header != root {
            let mut len = 0;
            let mut node = matrix.down(header);
            while node != header {
                len += 1;
                node = matrix.down(node);
            }
            counts.push((header, len));
            header = matrix.right(header);
        }
        counts
    }
}
