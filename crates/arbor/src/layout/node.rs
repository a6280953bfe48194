//! Per-node layout records and the arena that holds them.
//!
//! A [`LayoutTree`] is built once per layout call from the caller's
//! [`Tree`]. Nodes live in a flat arena in preorder, so the root is always
//! index 0 and every child has a larger index than its parent. All
//! cross references (`parent`, `thread`, `ancestor`, cached siblings) are
//! arena indices; none of them owns anything.
//!
//! Labels and payloads are moved into a side table while the passes run
//! and moved back into the resulting [`PositionedTree`].

use std::ops::{Index, IndexMut};

use arbor_core::{Position, PositionedTree, Tree};

/// Index of a node in a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Preliminary x of a node the first walk has not reached yet.
const UNPLACED: f64 = f64::NAN;

/// Mutable layout state of a single node.
#[derive(Debug, Clone)]
pub(crate) struct LayoutNode {
    /// Preliminary x after the first walk, final x after the second.
    pub(crate) x: f64,
    pub(crate) depth: usize,
    /// Offset applied to every descendant during the second walk.
    pub(crate) modifier: f64,
    /// Contour link to the next node at the following depth when the
    /// node itself has no children there.
    pub(crate) thread: Option<NodeIndex>,
    pub(crate) ancestor: NodeIndex,
    pub(crate) change: f64,
    pub(crate) shift: f64,
    pub(crate) left_most_sibling: Option<NodeIndex>,
    pub(crate) left_sibling: Option<NodeIndex>,
    /// 1-based position among siblings.
    pub(crate) number: usize,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,
}

impl LayoutNode {
    fn new(own: NodeIndex, parent: Option<NodeIndex>, depth: usize) -> Self {
        Self {
            x: UNPLACED,
            depth,
            modifier: 0.0,
            thread: None,
            ancestor: own,
            change: 0.0,
            shift: 0.0,
            left_most_sibling: None,
            left_sibling: None,
            number: 1,
            parent,
            children: Vec::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Labels and payloads, indexed like the arena.
pub(crate) type Payloads<T> = Vec<Option<(String, T)>>;

/// Arena of [`LayoutNode`]s isomorphic to the input tree.
#[derive(Debug, Clone)]
pub(crate) struct LayoutTree {
    nodes: Vec<LayoutNode>,
}

impl LayoutTree {
    /// Builds the arena from `tree`, moving labels and payloads aside.
    ///
    /// Child order is preserved. Each node records its depth, 1-based
    /// sibling number, parent, left sibling and left-most sibling.
    pub(crate) fn build<T>(tree: Tree<T>) -> (Self, Payloads<T>) {
        let mut nodes: Vec<LayoutNode> = Vec::new();
        let mut payloads = Vec::new();

        let mut stack = vec![(tree, None, 0)];
        while let Some((tree, parent, depth)) = stack.pop() {
            let own = NodeIndex(nodes.len());
            let mut node = LayoutNode::new(own, parent, depth);

            if let Some(parent) = parent {
                let siblings = &mut nodes[parent.0].children;
                node.number = siblings.len() + 1;
                node.left_sibling = siblings.last().copied();
                node.left_most_sibling = siblings.first().copied();
                siblings.push(own);
            }

            let (label, children, data) = tree.into_parts();
            nodes.push(node);
            payloads.push(Some((label, data)));

            // Reversed so the first child is popped, and numbered, first.
            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (child, Some(own), depth + 1)),
            );
        }

        (Self { nodes }, payloads)
    }

    pub(crate) fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut LayoutNode> {
        self.nodes.iter_mut()
    }

    /// Next node on the left contour: the first child, else the thread.
    pub(crate) fn next_left(&self, node: NodeIndex) -> Option<NodeIndex> {
        let node = &self[node];
        node.children.first().copied().or(node.thread)
    }

    /// Next node on the right contour: the last child, else the thread.
    pub(crate) fn next_right(&self, node: NodeIndex) -> Option<NodeIndex> {
        let node = &self[node];
        node.children.last().copied().or(node.thread)
    }

    /// Converts the arena back into an owned tree carrying final positions.
    ///
    /// Runs from the highest index down, so every child is assembled before
    /// its parent.
    pub(crate) fn into_positioned<T>(self, mut payloads: Payloads<T>) -> Option<PositionedTree<T>> {
        let mut built: Vec<Option<PositionedTree<T>>> =
            (0..self.nodes.len()).map(|_| None).collect();

        for (index, node) in self.nodes.iter().enumerate().rev() {
            let children = node
                .children
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            let (label, data) = payloads[index].take()?;

            built[index] = Some(PositionedTree::new(
                label,
                Position::new(node.x, node.depth),
                children,
                data,
            ));
        }

        built.first_mut().and_then(Option::take)
    }
}

impl Index<NodeIndex> for LayoutTree {
    type Output = LayoutNode;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.0]
    }
}

impl IndexMut<NodeIndex> for LayoutTree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index.0]
    }
}
