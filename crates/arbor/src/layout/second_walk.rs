//! Top-down absolute positioning and normalization.

use crate::layout::node::LayoutTree;

/// Turns preliminary coordinates into absolute ones.
///
/// Every node's x is offset by the sum of its ancestors' modifiers and its
/// y is set to its depth. Returns the smallest x in the tree.
pub(crate) fn run(tree: &mut LayoutTree) -> f64 {
    let mut min_x = f64::INFINITY;
    let mut stack = vec![(tree.root(), 0.0, 0)];

    while let Some((index, modifier_sum, depth)) = stack.pop() {
        let node = &mut tree[index];
        node.x += modifier_sum;
        node.depth = depth;
        min_x = min_x.min(node.x);

        let child_modifier = modifier_sum + node.modifier;
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|&child| (child, child_modifier, depth + 1)),
        );
    }

    min_x
}

/// Moves every node right by `offset`.
pub(crate) fn shift_all(tree: &mut LayoutTree, offset: f64) {
    for node in tree.nodes_mut() {
        node.x += offset;
    }
}
