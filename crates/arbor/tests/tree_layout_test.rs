//! Integration tests for the TreeLayout API
//!
//! These tests check the layout guarantees on arbitrary trees through the
//! public API only.

use std::collections::BTreeMap;

use float_cmp::approx_eq;
use proptest::prelude::*;

use arbor::{
    ArborError, Item, MultiParentPolicy, PositionedTree, Tree, TreeLayout,
    config::{AppConfig, LayoutConfig, ResolveConfig},
};

const EPSILON: f64 = 1e-9;

fn layout_with_distance(distance: f64) -> TreeLayout {
    TreeLayout::new(AppConfig::new(
        LayoutConfig::new(distance),
        ResolveConfig::default(),
    ))
}

/// Nodes grouped by depth, each group in left-to-right order.
fn levels<T>(tree: &PositionedTree<T>) -> BTreeMap<usize, Vec<f64>> {
    let mut levels: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for node in tree.iter() {
        levels.entry(node.y()).or_default().push(node.x());
    }
    levels
}

fn depths<T>(tree: &Tree<T>) -> Vec<usize> {
    let mut depths = Vec::new();
    let mut stack = vec![(tree, 0)];
    while let Some((node, depth)) = stack.pop() {
        depths.push(depth);
        stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
    }
    depths
}

fn shape<T>(tree: &Tree<T>) -> Vec<(String, usize)> {
    tree.iter()
        .map(|node| (node.label().to_string(), node.children().len()))
        .collect()
}

fn positioned_shape<T>(tree: &PositionedTree<T>) -> Vec<(String, usize)> {
    tree.iter()
        .map(|node| (node.label().to_string(), node.children().len()))
        .collect()
}

fn arb_tree() -> impl Strategy<Value = Tree<u32>> {
    let leaf = any::<u32>().prop_map(|data| Tree::leaf(format!("leaf{data}"), data));
    leaf.prop_recursive(8, 200, 5, |inner| {
        (any::<u32>(), prop::collection::vec(inner, 0..5))
            .prop_map(|(data, children)| Tree::new(format!("node{data}"), children, data))
    })
}

#[test]
fn test_layout_api_exists() {
    let _layout = TreeLayout::default();
}

#[test]
fn test_free_function_matches_builder() {
    let tree = Tree::new(
        "r",
        vec![Tree::leaf("a", ()), Tree::leaf("b", ())],
        (),
    );

    let via_fn = arbor::layout(tree.clone(), 2.0).expect("valid distance");
    let via_builder = layout_with_distance(2.0)
        .layout(tree)
        .expect("valid distance");

    assert_eq!(via_fn, via_builder);
}

#[test]
fn test_invalid_distance_is_rejected() {
    for distance in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = layout_with_distance(distance).layout(Tree::leaf("root", ()));
        assert!(
            matches!(result, Err(ArborError::InvalidDistance(_))),
            "distance {distance} should be rejected"
        );
    }
}

#[test]
fn test_empty_input_returns_empty_output() {
    let layout = TreeLayout::default();
    let result = layout.layout_optional::<()>(None).expect("empty is valid");
    assert!(result.is_none());

    let items: Vec<Item<()>> = Vec::new();
    let result = layout.layout_items(items).expect("empty is valid");
    assert!(result.is_none());
}

#[test]
fn test_empty_input_still_validates_distance() {
    let result = layout_with_distance(-2.0).layout_optional::<()>(None);
    assert!(matches!(result, Err(ArborError::InvalidDistance(_))));
}

#[test]
fn test_layout_items() {
    let items = vec![
        Item::new("app", 1),
        Item::new("db", 2).depends_on(["app"]),
        Item::new("cache", 3).depends_on(["app"]),
        Item::new("docs", 4),
    ];

    let positioned = TreeLayout::default()
        .layout_items(items)
        .expect("valid items")
        .expect("non-empty list");

    assert_eq!(positioned.label(), "Root");
    assert_eq!(positioned.node_count(), 5);
    let db = positioned.find("db").expect("db exists");
    let cache = positioned.find("cache").expect("cache exists");
    assert_eq!(db.y(), 2);
    assert!(approx_eq!(f64, cache.x() - db.x(), 1.0, epsilon = EPSILON));
    assert_eq!(*cache.data(), 3);
}

#[test]
fn test_layout_items_reports_structure_errors() {
    let items = vec![
        Item::new("a", ()),
        Item::new("b", ()),
        Item::new("c", ()).depends_on(["a", "b"]),
    ];

    let result = TreeLayout::default().layout_items(items);
    match result {
        Err(ArborError::Resolve(err)) => assert_eq!(err.diagnostics().len(), 1),
        other => panic!("expected a resolve error, got {other:?}"),
    }
}

#[test]
fn test_layout_items_with_duplicate_policy() {
    let items = vec![
        Item::new("a", ()),
        Item::new("b", ()),
        Item::new("c", ()).depends_on(["a", "b"]),
    ];
    let config = AppConfig::new(
        LayoutConfig::default(),
        ResolveConfig::new("Root", MultiParentPolicy::Duplicate),
    );

    let positioned = TreeLayout::new(config)
        .layout_items(items)
        .expect("duplicates are allowed")
        .expect("non-empty list");

    let copies: Vec<f64> = positioned
        .iter()
        .filter(|node| node.label() == "c")
        .map(PositionedTree::x)
        .collect();
    assert_eq!(copies.len(), 2);
    assert!(copies[1] - copies[0] >= 1.0 - EPSILON);
}

#[test]
fn test_deep_chain_is_laid_out_and_dropped() {
    let depth = 300_000;
    let mut tree = Tree::leaf("bottom", depth);
    for level in (0..depth).rev() {
        tree = Tree::new("link", vec![tree], level);
    }

    let positioned = arbor::layout(tree, 1.0).expect("valid distance");

    assert_eq!(positioned.node_count(), depth + 1);
    let bottom = positioned.find("bottom").expect("bottom exists");
    assert_eq!(bottom.y(), depth);
    assert!(
        positioned
            .iter()
            .all(|node| approx_eq!(f64, node.x(), 0.0, epsilon = EPSILON))
    );
    drop(positioned);
}

#[test]
fn test_layout_is_shared_across_threads() {
    let layout = TreeLayout::default();
    std::thread::scope(|scope| {
        for width in 1..4 {
            let layout = &layout;
            scope.spawn(move || {
                let tree = Tree::new(
                    "r",
                    (0..width).map(|i| Tree::leaf(format!("{i}"), ())).collect(),
                    (),
                );
                let positioned = layout.layout(tree).expect("valid layout");
                assert_eq!(positioned.node_count(), width + 1);
            });
        }
    });
}

proptest! {
    #[test]
    fn prop_neighbours_on_a_level_are_separated(tree in arb_tree(), distance in 0.1f64..10.0) {
        let positioned = layout_with_distance(distance).layout(tree).expect("valid layout");

        for xs in levels(&positioned).values() {
            for pair in xs.windows(2) {
                prop_assert!(
                    pair[1] - pair[0] >= distance - EPSILON * distance.max(1.0) * 1e3,
                    "neighbours at {} and {} closer than {}", pair[0], pair[1], distance
                );
            }
        }
    }

    #[test]
    fn prop_parents_are_centred_over_children(tree in arb_tree()) {
        let positioned = TreeLayout::default().layout(tree).expect("valid layout");

        for node in positioned.iter() {
            if let (Some(first), Some(last)) = (node.children().first(), node.children().last()) {
                let midpoint = (first.x() + last.x()) / 2.0;
                prop_assert!(approx_eq!(f64, node.x(), midpoint, epsilon = 1e-6));
            }
        }
    }

    #[test]
    fn prop_y_is_depth(tree in arb_tree()) {
        let expected = depths(&tree);
        let positioned = TreeLayout::default().layout(tree).expect("valid layout");

        let actual: Vec<usize> = positioned.iter().map(PositionedTree::y).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_leftmost_node_is_at_zero(tree in arb_tree()) {
        let positioned = TreeLayout::default().layout(tree).expect("valid layout");

        let min_x = positioned.iter().map(PositionedTree::x).fold(f64::INFINITY, f64::min);
        prop_assert!(approx_eq!(f64, min_x, 0.0, epsilon = 1e-6));
    }

    #[test]
    fn prop_shape_and_payloads_are_preserved(tree in arb_tree()) {
        let expected_shape = shape(&tree);
        let expected_data: Vec<u32> = tree.iter().map(|node| *node.data()).collect();

        let positioned = TreeLayout::default().layout(tree).expect("valid layout");

        prop_assert_eq!(positioned_shape(&positioned), expected_shape);
        let data: Vec<u32> = positioned.iter().map(|node| *node.data()).collect();
        prop_assert_eq!(data, expected_data);
    }

    #[test]
    fn prop_layout_is_deterministic(tree in arb_tree()) {
        let layout = TreeLayout::default();
        let first = layout.layout(tree.clone()).expect("valid layout");
        let second = layout.layout(tree).expect("valid layout");

        let bits = |tree: &PositionedTree<u32>| -> Vec<u64> {
            tree.iter().map(|node| node.x().to_bits()).collect()
        };
        prop_assert_eq!(bits(&first), bits(&second));
    }
}
