//! Ordered n-ary trees.
//!
//! [`Tree`] is the value callers hand to the layout engine. It carries a
//! label, an ordered list of children and an opaque payload that is moved
//! through the layout untouched. [`PositionedTree`] is the isomorphic result
//! of a layout: the same labels, payloads and child order, plus a
//! [`Position`] per node.
//!
//! Both types own their children directly, so a node can never be reached
//! through more than one path.

use std::{fmt, mem};

use crate::geometry::Position;

/// Owned children of a node.
///
/// Dropping a node detaches the children of every descendant onto a work
/// list first, so dropping never recurses, however deep the tree is.
#[derive(Clone, PartialEq)]
struct Subtrees<N: Detach>(Vec<N>);

/// Tree nodes whose children can be moved out in place.
trait Detach: Sized {
    fn detach_children(&mut self) -> Vec<Self>;
}

impl<N: Detach> Subtrees<N> {
    fn into_vec(mut self) -> Vec<N> {
        mem::take(&mut self.0)
    }
}

impl<N: Detach> Drop for Subtrees<N> {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.0);
        while let Some(mut node) = pending.pop() {
            pending.extend(node.detach_children());
        }
    }
}

impl<N: Detach + fmt::Debug> fmt::Debug for Subtrees<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

/// A rooted, ordered tree node with an opaque payload.
///
/// # Examples
///
/// ```
/// use arbor_core::Tree;
///
/// let tree = Tree::leaf("root", ())
///     .with_child(Tree::leaf("a", ()))
///     .with_child(Tree::leaf("b", ()));
///
/// assert_eq!(tree.node_count(), 3);
/// assert_eq!(tree.children()[1].label(), "b");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<T> {
    label: String,
    children: Subtrees<Tree<T>>,
    data: T,
}

impl<T> Tree<T> {
    /// Creates a node with the given children.
    pub fn new(label: impl Into<String>, children: Vec<Tree<T>>, data: T) -> Self {
        Self {
            label: label.into(),
            children: Subtrees(children),
            data,
        }
    }

    /// Creates a node without children.
    pub fn leaf(label: impl Into<String>, data: T) -> Self {
        Self::new(label, Vec::new(), data)
    }

    /// Appends a child and returns the node.
    pub fn with_child(mut self, child: Tree<T>) -> Self {
        self.children.0.push(child);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Tree<T>] {
        &self.children.0
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn is_leaf(&self) -> bool {
        self.children.0.is_empty()
    }

    /// Splits the node into its label, children and payload.
    pub fn into_parts(self) -> (String, Vec<Tree<T>>, T) {
        let Tree {
            label,
            children,
            data,
        } = self;
        (label, children.into_vec(), data)
    }

    /// Returns the number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns a preorder iterator over this subtree.
    pub fn iter(&self) -> Preorder<'_, Tree<T>> {
        Preorder::new(self)
    }
}

impl<T> Detach for Tree<T> {
    fn detach_children(&mut self) -> Vec<Self> {
        mem::take(&mut self.children.0)
    }
}

/// A laid-out tree node.
///
/// Mirrors the shape of the [`Tree`] it was computed from: labels, payloads
/// and child order are preserved, and every node carries its final
/// [`Position`].
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedTree<T> {
    label: String,
    position: Position,
    children: Subtrees<PositionedTree<T>>,
    data: T,
}

impl<T> PositionedTree<T> {
    /// Creates a positioned node.
    pub fn new(
        label: impl Into<String>,
        position: Position,
        children: Vec<PositionedTree<T>>,
        data: T,
    ) -> Self {
        Self {
            label: label.into(),
            position,
            children: Subtrees(children),
            data,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> usize {
        self.position.y()
    }

    pub fn children(&self) -> &[PositionedTree<T>] {
        &self.children.0
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns the number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns a preorder iterator over this subtree.
    pub fn iter(&self) -> Preorder<'_, PositionedTree<T>> {
        Preorder::new(self)
    }

    /// Returns the first node in preorder with the given label.
    pub fn find(&self, label: &str) -> Option<&PositionedTree<T>> {
        self.iter().find(|node| node.label == label)
    }
}

impl<T> Detach for PositionedTree<T> {
    fn detach_children(&mut self) -> Vec<Self> {
        mem::take(&mut self.children.0)
    }
}

/// Access to the ordered children of a tree-shaped value.
pub trait Children: Sized {
    fn child_nodes(&self) -> &[Self];
}

impl<T> Children for Tree<T> {
    fn child_nodes(&self) -> &[Self] {
        self.children()
    }
}

impl<T> Children for PositionedTree<T> {
    fn child_nodes(&self) -> &[Self] {
        self.children()
    }
}

/// Preorder (parent before children, children left to right) iterator.
///
/// Uses an explicit stack, so arbitrarily deep trees can be walked.
#[derive(Debug)]
pub struct Preorder<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: Children> Preorder<'a, N> {
    fn new(root: &'a N) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a, N: Children> Iterator for Preorder<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.child_nodes().iter().rev());
        Some(node)
    }
}
