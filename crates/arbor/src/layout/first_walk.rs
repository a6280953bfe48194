//! Bottom-up preliminary placement.
//!
//! Every subtree is first laid out relative to itself. Each subtree is then
//! pushed right until it clears all the subtrees of its left siblings, by
//! walking the facing contours of both sides level by level ([`apportion`]).
//! Contours are followed through `thread` links where a subtree ends
//! early, which keeps the total contour work linear in the node count.
//!
//! Shifts applied to a subtree are also spread over the siblings between it
//! and the subtree it collided with ([`move_subtree`] records the
//! adjustment, [`execute_shifts`] realizes it once all children of a node
//! are placed).

use log::trace;

use crate::layout::node::{LayoutTree, NodeIndex};

/// A node whose children are being placed.
struct Frame {
    node: NodeIndex,
    next_child: usize,
    default_ancestor: NodeIndex,
}

impl Frame {
    fn new(tree: &LayoutTree, node: NodeIndex) -> Self {
        Self {
            node,
            next_child: 0,
            default_ancestor: tree[node].children.first().copied().unwrap_or(node),
        }
    }
}

/// Assigns preliminary x coordinates and modifiers to every node.
///
/// Uses an explicit stack instead of recursion. Returns the number of
/// contour levels compared, which never exceeds the number of nodes.
pub(crate) fn run(tree: &mut LayoutTree, distance: f64) -> usize {
    let mut contour_steps = 0;
    let mut stack = vec![Frame::new(tree, tree.root())];

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        if let Some(&child) = tree[node].children.get(frame.next_child) {
            frame.next_child += 1;
            stack.push(Frame::new(tree, child));
            continue;
        }

        stack.pop();
        place(tree, node, distance);

        if let Some(parent) = stack.last_mut() {
            let (default_ancestor, steps) =
                apportion(tree, node, parent.default_ancestor, distance);
            parent.default_ancestor = default_ancestor;
            contour_steps += steps;
        }
    }

    contour_steps
}

/// Places `node` once all of its children are placed.
fn place(tree: &mut LayoutTree, node: NodeIndex, distance: f64) {
    let left_sibling = tree[node].left_sibling;

    if tree[node].is_leaf() {
        tree[node].x = match left_sibling {
            Some(sibling) => tree[sibling].x + distance,
            None => 0.0,
        };
        return;
    }

    execute_shifts(tree, node);

    let children = &tree[node].children;
    let (first, last) = (children[0], children[children.len() - 1]);
    let midpoint = (tree[first].x + tree[last].x) / 2.0;

    match left_sibling {
        Some(sibling) => {
            let x = tree[sibling].x + distance;
            tree[node].x = x;
            tree[node].modifier = x - midpoint;
        }
        None => tree[node].x = midpoint,
    }
}

/// Separates the subtree of `node` from the subtrees of its left siblings.
///
/// Returns the default ancestor for the next sibling and the number of
/// contour levels compared.
fn apportion(
    tree: &mut LayoutTree,
    node: NodeIndex,
    default_ancestor: NodeIndex,
    distance: f64,
) -> (NodeIndex, usize) {
    let (Some(left_sibling), Some(left_most)) =
        (tree[node].left_sibling, tree[node].left_most_sibling)
    else {
        return (default_ancestor, 0);
    };

    // Inner contours face each other, outer contours bound the whole group.
    let mut inner_right = node;
    let mut outer_right = Some(node);
    let mut inner_left = left_sibling;
    let mut outer_left = Some(left_most);

    let mut shift_inner_right = tree[node].modifier;
    let mut shift_outer_right = tree[node].modifier;
    let mut shift_inner_left = tree[inner_left].modifier;
    let mut shift_outer_left = tree[left_most].modifier;

    let mut steps = 0;
    while let (Some(next_inner_left), Some(next_inner_right)) =
        (tree.next_right(inner_left), tree.next_left(inner_right))
    {
        steps += 1;
        inner_left = next_inner_left;
        inner_right = next_inner_right;
        outer_left = outer_left.and_then(|outer| tree.next_left(outer));
        outer_right = outer_right.and_then(|outer| tree.next_right(outer));

        if let Some(outer) = outer_right {
            tree[outer].ancestor = node;
        }

        let shift = (tree[inner_left].x + shift_inner_left)
            - (tree[inner_right].x + shift_inner_right)
            + distance;
        if shift > 0.0 {
            let ancestor = ancestor_of(tree, inner_left, node, default_ancestor);
            trace!(
                node = node.index(),
                ancestor = ancestor.index(),
                shift;
                "Moving subtree"
            );
            move_subtree(tree, ancestor, node, shift);
            shift_inner_right += shift;
            shift_outer_right += shift;
        }

        shift_inner_left += tree[inner_left].modifier;
        shift_inner_right += tree[inner_right].modifier;
        shift_outer_left += outer_left.map_or(0.0, |outer| tree[outer].modifier);
        shift_outer_right += outer_right.map_or(0.0, |outer| tree[outer].modifier);
    }

    // The left group is deeper: continue the right outer contour into it.
    if let (Some(target), Some(outer)) = (tree.next_right(inner_left), outer_right) {
        if tree.next_right(outer).is_none() {
            tree[outer].thread = Some(target);
            tree[outer].modifier += shift_inner_left - shift_outer_right;
            return (default_ancestor, steps);
        }
    }

    // The new subtree is deeper: continue the left outer contour into it.
    if let (Some(target), Some(outer)) = (tree.next_left(inner_right), outer_left) {
        if tree.next_left(outer).is_none() {
            tree[outer].thread = Some(target);
            tree[outer].modifier += shift_inner_right - shift_outer_left;
        }
    }

    (node, steps)
}

/// Picks the left sibling subtree that a conflict with `node` is charged to.
///
/// The recorded ancestor of `inner_left` is only usable while it is still a
/// sibling of `node`; otherwise the default ancestor is used.
fn ancestor_of(
    tree: &LayoutTree,
    inner_left: NodeIndex,
    node: NodeIndex,
    default_ancestor: NodeIndex,
) -> NodeIndex {
    let candidate = tree[inner_left].ancestor;
    if tree[candidate].parent == tree[node].parent {
        candidate
    } else {
        default_ancestor
    }
}

/// Moves the subtree rooted at `right` by `shift` and records how the shift
/// is spread over the siblings between `left` and `right`.
fn move_subtree(tree: &mut LayoutTree, left: NodeIndex, right: NodeIndex, shift: f64) {
    debug_assert!(tree[right].number > tree[left].number);
    let subtrees = tree[right].number.saturating_sub(tree[left].number).max(1) as f64;

    tree[right].change -= shift / subtrees;
    tree[right].shift += shift;
    tree[left].change += shift / subtrees;
    tree[right].x += shift;
    tree[right].modifier += shift;
}

/// Applies the shifts recorded by [`move_subtree`] to the children of
/// `node`, right to left.
fn execute_shifts(tree: &mut LayoutTree, node: NodeIndex) {
    let mut shift = 0.0;
    let mut change = 0.0;

    for position in (0..tree[node].children.len()).rev() {
        let child = tree[node].children[position];
        let child = &mut tree[child];
        child.x += shift;
        child.modifier += shift;
        change += child.change;
        shift += child.shift + change;
    }
}
