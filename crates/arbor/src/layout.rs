//! Tidy tree layout.
//!
//! Assigns every node of an ordered tree an x coordinate such that
//! neighbouring nodes on the same depth are at least `distance` apart,
//! parents are centred over their children and the drawing is as narrow as
//! the left-to-right order allows. Runs in time linear in the node count.
//!
//! # Pipeline
//!
//! ```text
//! Tree<T>
//!     ↓ node::LayoutTree::build
//! LayoutTree (arena, preorder)
//!     ↓ first_walk        bottom-up: preliminary x, modifiers, threads
//!     ↓ second_walk       top-down: absolute x, y = depth, min x
//!     ↓ shift_all         only when min x < 0
//! PositionedTree<T>
//! ```

mod first_walk;
mod node;
mod second_walk;

use log::{debug, trace};

use arbor_core::{PositionedTree, Tree};

use node::LayoutTree;

/// Lays out `tree` with the given horizontal distance between neighbours.
///
/// `distance` must already be validated as positive and finite. Returns
/// `None` only if the arena lost track of a node.
pub(crate) fn compute<T>(tree: Tree<T>, distance: f64) -> Option<PositionedTree<T>> {
    let (mut layout_tree, payloads) = LayoutTree::build(tree);
    debug!(nodes = layout_tree.len(); "Layout tree built");

    let contour_steps = first_walk::run(&mut layout_tree, distance);
    debug!(contour_steps; "First walk complete");

    let min_x = second_walk::run(&mut layout_tree);
    trace!(min_x; "Second walk complete");

    if min_x < 0.0 {
        debug!(offset = -min_x; "Shifting layout to non-negative x");
        second_walk::shift_all(&mut layout_tree, -min_x);
    }

    layout_tree.into_positioned(payloads)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn leaves(labels: &[&str]) -> Vec<Tree<()>> {
        labels.iter().map(|label| Tree::leaf(*label, ())).collect()
    }

    fn x_of<T>(tree: &PositionedTree<T>, label: &str) -> f64 {
        tree.find(label)
            .unwrap_or_else(|| panic!("node `{label}` should exist"))
            .x()
    }

    #[test]
    fn test_single_node() {
        let positioned = compute(Tree::leaf("root", ()), 1.0).expect("layout");
        assert_approx_eq!(f64, positioned.x(), 0.0);
        assert_eq!(positioned.y(), 0);
    }

    #[test]
    fn test_root_centred_over_three_leaves() {
        let positioned =
            compute(Tree::new("r", leaves(&["a", "b", "c"]), ()), 1.0).expect("layout");

        assert_approx_eq!(f64, x_of(&positioned, "a"), 0.0);
        assert_approx_eq!(f64, x_of(&positioned, "b"), 1.0);
        assert_approx_eq!(f64, x_of(&positioned, "c"), 2.0);
        assert_approx_eq!(f64, positioned.x(), 1.0);
        assert!(positioned.children().iter().all(|child| child.y() == 1));
    }

    #[test]
    fn test_deeper_right_subtree() {
        // r -> [a, b -> [c, d]]
        let tree = Tree::new(
            "r",
            vec![Tree::leaf("a", ()), Tree::new("b", leaves(&["c", "d"]), ())],
            (),
        );
        let positioned = compute(tree, 1.0).expect("layout");

        assert_approx_eq!(f64, x_of(&positioned, "r"), 0.5);
        assert_approx_eq!(f64, x_of(&positioned, "a"), 0.0);
        assert_approx_eq!(f64, x_of(&positioned, "b"), 1.0);
        assert_approx_eq!(f64, x_of(&positioned, "c"), 0.5);
        assert_approx_eq!(f64, x_of(&positioned, "d"), 1.5);
    }

    #[test]
    fn test_colliding_subtrees() {
        // r -> [b -> [c, d], e -> [f, g]]
        let tree = Tree::new(
            "r",
            vec![
                Tree::new("b", leaves(&["c", "d"]), ()),
                Tree::new("e", leaves(&["f", "g"]), ()),
            ],
            (),
        );
        let positioned = compute(tree, 1.0).expect("layout");

        let xs: Vec<f64> = ["c", "d", "f", "g"]
            .iter()
            .map(|label| x_of(&positioned, label))
            .collect();
        for (x, expected) in xs.iter().zip([0.0, 1.0, 2.0, 3.0]) {
            assert_approx_eq!(f64, *x, expected);
        }
        assert_approx_eq!(f64, x_of(&positioned, "b"), 0.5);
        assert_approx_eq!(f64, x_of(&positioned, "e"), 2.5);
        assert_approx_eq!(f64, positioned.x(), 1.5);
    }

    #[test]
    fn test_small_subtrees_spread_evenly_between_large_ones() {
        // r -> [a -> [a1, a2, a3], b, c, d -> [d1 .. d5]]
        let tree = Tree::new(
            "r",
            vec![
                Tree::new("a", leaves(&["a1", "a2", "a3"]), ()),
                Tree::leaf("b", ()),
                Tree::leaf("c", ()),
                Tree::new("d", leaves(&["d1", "d2", "d3", "d4", "d5"]), ()),
            ],
            (),
        );
        let positioned = compute(tree, 1.0).expect("layout");

        let xs: Vec<f64> = ["a", "b", "c", "d"]
            .iter()
            .map(|label| x_of(&positioned, label))
            .collect();
        let gap = xs[1] - xs[0];
        assert_approx_eq!(f64, gap, 4.0 / 3.0, epsilon = 1e-9);
        assert_approx_eq!(f64, xs[2] - xs[1], gap, epsilon = 1e-9);
        assert_approx_eq!(f64, xs[3] - xs[2], gap, epsilon = 1e-9);
        assert_approx_eq!(f64, x_of(&positioned, "d1"), x_of(&positioned, "a3") + 1.0);
    }

    #[test]
    fn test_negative_positions_are_normalized() {
        // r -> [a, b -> [c, d, e, f, g]]: `c` lands left of `a`.
        let tree = Tree::new(
            "r",
            vec![
                Tree::leaf("a", ()),
                Tree::new("b", leaves(&["c", "d", "e", "f", "g"]), ()),
            ],
            (),
        );
        let positioned = compute(tree, 1.0).expect("layout");

        assert_approx_eq!(f64, x_of(&positioned, "c"), 0.0);
        assert_approx_eq!(f64, x_of(&positioned, "a"), 1.0);
        assert_approx_eq!(f64, x_of(&positioned, "b"), 2.0);
        assert_approx_eq!(f64, x_of(&positioned, "g"), 4.0);
        assert_approx_eq!(f64, positioned.x(), 1.5);
    }

    #[test]
    fn test_distance_scales_layout() {
        let tree = || Tree::new("r", leaves(&["a", "b", "c"]), ());
        let unit = compute(tree(), 1.0).expect("layout");
        let wide = compute(tree(), 3.0).expect("layout");

        for (unit, wide) in unit.iter().zip(wide.iter()) {
            assert_approx_eq!(f64, wide.x(), unit.x() * 3.0);
            assert_eq!(wide.y(), unit.y());
        }
    }

    #[test]
    fn test_payloads_pass_through() {
        let tree = Tree::new(
            "r",
            vec![Tree::leaf("a", vec![1, 2]), Tree::leaf("b", vec![3])],
            Vec::new(),
        );
        let positioned = compute(tree, 1.0).expect("layout");

        let payloads: Vec<&Vec<i32>> = positioned.iter().map(PositionedTree::data).collect();
        assert_eq!(payloads, [&vec![], &vec![1, 2], &vec![3]]);
    }

    /// A chain of `depth` nodes next to a node with `width` leaf children.
    fn chain_and_fan(depth: usize, width: usize) -> Tree<()> {
        let mut chain = Tree::leaf(format!("chain{depth}"), ());
        for level in (0..depth).rev() {
            chain = Tree::new(format!("chain{level}"), vec![chain], ());
        }
        let fan = Tree::new(
            "fan",
            (0..width).map(|i| Tree::leaf(format!("leaf{i}"), ())).collect(),
            (),
        );
        Tree::new("root", vec![chain, fan], ())
    }

    #[test]
    fn test_chain_and_fan_contour_work_is_linear() {
        let tree = chain_and_fan(1_000, 20_000);
        let node_count = tree.node_count();

        let (mut layout_tree, _) = LayoutTree::build(tree);
        let steps = first_walk::run(&mut layout_tree, 1.0);

        assert!(
            steps <= node_count,
            "{steps} contour steps for {node_count} nodes"
        );
    }

    #[test]
    fn test_chain_and_fan_layout() {
        let positioned = compute(chain_and_fan(1_000, 20_000), 1.0).expect("layout");

        assert_eq!(positioned.node_count(), 1 + 1_001 + 1 + 20_000);
        let fan = x_of(&positioned, "fan");
        let midpoint = (x_of(&positioned, "leaf0") + x_of(&positioned, "leaf19999")) / 2.0;
        assert_approx_eq!(f64, fan, midpoint);
        assert!(x_of(&positioned, "leaf0") >= x_of(&positioned, "chain1") + 1.0);
    }

    fn arb_tree() -> impl Strategy<Value = Tree<()>> {
        let leaf = Just(Tree::leaf("n", ()));
        leaf.prop_recursive(8, 256, 6, |inner| {
            prop::collection::vec(inner, 0..6).prop_map(|children| Tree::new("n", children, ()))
        })
    }

    proptest! {
        #[test]
        fn prop_contour_steps_bounded_by_node_count(tree in arb_tree()) {
            let node_count = tree.node_count();
            let (mut layout_tree, _) = LayoutTree::build(tree);
            let steps = first_walk::run(&mut layout_tree, 1.0);
            prop_assert!(steps <= node_count);
        }
    }
}
