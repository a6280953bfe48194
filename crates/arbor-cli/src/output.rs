//! Writing laid-out trees as TOML.
//!
//! One `[[node]]` table per node, in preorder:
//!
//! ```toml
//! [[node]]
//! label = "Root"
//! x = 0.5
//! y = 0
//!
//! [[node]]
//! label = "app"
//! parent = "Root"
//! order = 1
//! x = 0.0
//! y = 1
//! ```

use serde::Serialize;

use arbor::{ArborError, Position, PositionedTree};

#[derive(Debug, Serialize)]
struct LayoutFile<'a> {
    node: Vec<NodeEntry<'a>>,
}

#[derive(Debug, PartialEq, Serialize)]
struct NodeEntry<'a> {
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    /// Position of the item in the input file.
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<usize>,
    #[serde(flatten)]
    position: Position,
}

fn entries(tree: &PositionedTree<Option<usize>>) -> Vec<NodeEntry<'_>> {
    let mut entries = Vec::with_capacity(tree.node_count());
    let mut stack = vec![(tree, None)];

    while let Some((node, parent)) = stack.pop() {
        entries.push(NodeEntry {
            label: node.label(),
            parent,
            order: *node.data(),
            position: node.position(),
        });
        stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|child| (child, Some(node.label()))),
        );
    }

    entries
}

/// Renders a layout. An empty layout renders as an empty document.
pub fn render(tree: Option<&PositionedTree<Option<usize>>>) -> Result<String, ArborError> {
    let file = LayoutFile {
        node: tree.map(entries).unwrap_or_default(),
    };

    toml::to_string(&file).map_err(|err| ArborError::Export(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PositionedTree<Option<usize>> {
        let a = PositionedTree::new("a", Position::new(0.0, 1), Vec::new(), Some(1));
        let b = PositionedTree::new("b", Position::new(1.0, 1), Vec::new(), Some(2));
        PositionedTree::new("Root", Position::new(0.5, 0), vec![a, b], None)
    }

    #[test]
    fn test_entries_are_preorder_with_parents() {
        let tree = sample();
        let entries = entries(&tree);

        let labels: Vec<&str> = entries.iter().map(|entry| entry.label).collect();
        assert_eq!(labels, ["Root", "a", "b"]);
        assert_eq!(entries[0].parent, None);
        assert_eq!(entries[1].parent, Some("Root"));
        assert_eq!(entries[2].order, Some(2));
        assert_eq!(entries[2].position, Position::new(1.0, 1));
    }

    #[test]
    fn test_render_omits_root_parent_and_order() {
        let tree = sample();
        let rendered = render(Some(&tree)).expect("render");

        let value: toml::Table = toml::from_str(&rendered).expect("valid toml");
        let nodes = value["node"].as_array().expect("node array");
        assert_eq!(nodes.len(), 3);

        let root = nodes[0].as_table().expect("table");
        assert!(!root.contains_key("parent"));
        assert!(!root.contains_key("order"));
        assert_eq!(root["x"].as_float(), Some(0.5));

        let b = nodes[2].as_table().expect("table");
        assert_eq!(b["parent"].as_str(), Some("Root"));
        assert_eq!(b["order"].as_integer(), Some(2));
    }

    #[test]
    fn test_render_empty_layout() {
        let rendered = render(None).expect("render");
        let value: toml::Table = toml::from_str(&rendered).expect("valid toml");
        assert!(value.get("node").is_none_or(|nodes| nodes.as_array().is_some_and(Vec::is_empty)));
    }
}
