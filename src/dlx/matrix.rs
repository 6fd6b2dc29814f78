#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The Dancing Links sparse matrix.
//!
//! A [`Matrix`] models an exact cover problem. It consists of a header row,
//! anchored at a root header node, and node rows covering some subset of the
//! header columns. Each header typically models one condition to be covered;
//! the nodes model the `1`s of the sparse 0/1 matrix.
//!
//! The matrix owns a single arena holding the root, every column header, and
//! every row node. All neighbor links are [`NodeId`] indices into that arena,
//! which makes the cyclic, non-owning link graph straightforward to express:
//! ownership flows matrix -> arena -> nodes, while left/right/up/down links are
//! used purely for traversal.
//!
//! Link primitives deliberately do not touch header counts. The
//! [`Solver`](crate::dlx::solver::Solver) cover step removes a header itself
//! (which must not be counted against its own column) and then removes nodes
//! from *other* columns (which must adjust those columns' counts), so count
//! bookkeeping belongs to the caller, not to the primitives.

use crate::dlx::node::{Node, NodeId};

/// A sparse 0/1 matrix stored as a two-dimensional circular doubly-linked
/// list, generic over the payload type `T` attached to row nodes.
///
/// The matrix is built incrementally: append column headers with
/// [`Matrix::new_header`], allocate nodes under them with
/// [`Matrix::new_node`], and group nodes into rows with [`Matrix::make_row`].
/// Once search begins no new nodes are allocated; only links are mutated.
///
/// # Examples
///
/// ```
/// use sudoku_dlx::dlx::matrix::Matrix;
///
/// let mut matrix: Matrix<&str> = Matrix::new();
/// let first = matrix.new_header();
/// let second = matrix.new_header();
///
/// let a = matrix.new_node(first);
/// let b = matrix.new_node(second);
/// matrix.make_row(a, &[b]);
///
/// assert_eq!(matrix.right(matrix.root()), first);
/// assert_eq!(matrix.count(first), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    nodes: Vec<Node<T>>,
    root: NodeId,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Matrix<T> {
    /// Constructs a new empty matrix consisting of only the root header.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId::new(0);
        Self {
            nodes: vec![Node::isolated(root, root)],
            root,
        }
    }

    /// Returns the root header node, the anchor of the header row.
    ///
    /// The matrix is empty exactly when `self.right(self.root())` equals the
    /// root again.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes in the arena, including the root and all
    /// column headers.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a new column header and appends it to the header row.
    ///
    /// Headers are stored in append order: `right(root)` is the first header
    /// created, `left(root)` the most recent one.
    pub fn new_header(&mut self) -> NodeId {
        let header = self.alloc();
        self.insert_left_of(header, self.root);
        header
    }

    /// Allocates a new node owned by the given column header and splices it
    /// into the end of the header's vertical list, just above the header.
    /// The header's count is incremented to reflect the additional node.
    pub fn new_node(&mut self, header: NodeId) -> NodeId {
        let node = self.alloc();
        self.set_header(node, header);
        self.insert_up_of(node, header);
        self.inc_count(header);
        node
    }

    /// Combines multiple nodes into one horizontally linked row.
    ///
    /// Each node in `nodes` is spliced into the horizontal list anchored at
    /// `anchor`, yielding the cycle `anchor -> nodes[0] -> ... -> nodes[k] ->
    /// anchor`.
    pub fn make_row(&mut self, anchor: NodeId, nodes: &[NodeId]) {
        for &node in nodes {
            self.insert_left_of(node, anchor);
        }
    }

    /// Attaches a payload to a node. Payloads are meta-data for problem
    /// encoders; the engine itself never inspects them.
    pub fn set_data(&mut self, id: NodeId, data: T) {
        self.node_mut(id).data = Some(data);
    }

    /// Returns the payload attached to a node, if any.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.node(id).data.as_ref()
    }

    /// Returns the left neighbor in the horizontal list.
    #[must_use]
    pub fn left(&self, id: NodeId) -> NodeId {
        self.node(id).left
    }

    /// Returns the right neighbor in the horizontal list.
    #[must_use]
    pub fn right(&self, id: NodeId) -> NodeId {
        self.node(id).right
    }

    /// Returns the up neighbor in the vertical list.
    #[must_use]
    pub fn up(&self, id: NodeId) -> NodeId {
        self.node(id).up
    }

    /// Returns the down neighbor in the vertical list.
    #[must_use]
    pub fn down(&self, id: NodeId) -> NodeId {
        self.node(id).down
    }

    /// Returns the header acting as container for the given node. A header is
    /// its own container.
    #[must_use]
    pub fn header(&self, id: NodeId) -> NodeId {
        self.node(id).header
    }

    /// Returns the number of nodes currently linked into the given header's
    /// vertical list.
    #[must_use]
    pub fn count(&self, id: NodeId) -> usize {
        self.node(id).count
    }

    /// Inserts `id` into the horizontal list immediately left of `other`.
    ///
    /// If `other` is the anchor of a list, `id` effectively ends up at the
    /// end of that list.
    pub fn insert_left_of(&mut self, id: NodeId, other: NodeId) {
        // Before: ... <-> [other-left] <-> [other] <-> ...
        // After:  ... <-> [other-left] <-> [id] <-> [other] <-> ...
        let other_left = self.node(other).left;
        self.node_mut(other_left).right = id;
        self.node_mut(id).left = other_left;
        self.node_mut(other).left = id;
        self.node_mut(id).right = other;
    }

    /// Inserts `id` into the vertical list immediately above `other`.
    ///
    /// If `other` is the anchor of a list, `id` effectively ends up at the
    /// end of that list.
    pub fn insert_up_of(&mut self, id: NodeId, other: NodeId) {
        // Before: ... <-> [other-up] <-> [other] <-> ...
        // After:  ... <-> [other-up] <-> [id] <-> [other] <-> ...
        let other_up = self.node(other).up;
        self.node_mut(other_up).down = id;
        self.node_mut(id).up = other_up;
        self.node_mut(other).up = id;
        self.node_mut(id).down = other;
    }

    /// Removes `id` from its horizontal list. The neighbors skip over the
    /// node, while the node's own left/right links are preserved so that
    /// [`Matrix::reinsert_horizontal`] can restore it in O(1).
    pub(crate) fn remove_horizontal(&mut self, id: NodeId) {
        let (left, right) = (self.node(id).left, self.node(id).right);
        self.node_mut(right).left = left;
        self.node_mut(left).right = right;
    }

    /// Removes `id` from its vertical list, preserving the node's own up/down
    /// links for [`Matrix::reinsert_vertical`].
    pub(crate) fn remove_vertical(&mut self, id: NodeId) {
        let (up, down) = (self.node(id).up, self.node(id).down);
        self.node_mut(up).down = down;
        self.node_mut(down).up = up;
    }

    /// Reinserts `id` into its horizontal list between the neighbors it
    /// remembered from the matching [`Matrix::remove_horizontal`].
    pub(crate) fn reinsert_horizontal(&mut self, id: NodeId) {
        let (left, right) = (self.node(id).left, self.node(id).right);
        self.node_mut(left).right = id;
        self.node_mut(right).left = id;
    }

    /// Reinserts `id` into its vertical list between the neighbors it
    /// remembered from the matching [`Matrix::remove_vertical`].
    pub(crate) fn reinsert_vertical(&mut self, id: NodeId) {
        let (up, down) = (self.node(id).up, self.node(id).down);
        self.node_mut(up).down = id;
        self.node_mut(down).up = id;
    }

    pub(crate) fn inc_count(&mut self, header: NodeId) {
        self.node_mut(header).count += 1;
    }

    pub(crate) fn dec_count(&mut self, header: NodeId) {
        let count = &mut self.node_mut(header).count;
        debug_assert!(*count > 0, "header count underflow");
        *count -= 1;
    }

    /// Whether `target` is currently linked into `header`'s vertical list.
    pub(crate) fn column_contains(&self, header: NodeId, target: NodeId) -> bool {
        let mut node = self.down(header);
        while node != header {
            if node == target {
                return true;
            }
            node = self.down(node);
        }
        false
    }

    /// Allocates a fresh isolated node acting as its own header.
    fn alloc(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::isolated(id, id));
        id
    }

    fn set_header(&mut self, id: NodeId, header: NodeId) {
        self.node_mut(id).header = header;
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
impl<T> Matrix<T> {
    /// Snapshot of every node's four neighbor links, for restoration checks.
    pub(crate) fn link_snapshot(&self) -> Vec<(NodeId, NodeId, NodeId, NodeId)> {
        self.nodes
            .iter()
            .map(|node| (node.left, node.right, node.up, node.down))
            .collect()
    }
}
