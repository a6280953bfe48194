//! Dependency list resolution.
//!
//! Resolution runs in three steps:
//! 1. Index item labels and resolve every `depends_on` entry to an item,
//!    collecting diagnostics for anything that does not resolve.
//! 2. Build a parent → child graph and reject dependency cycles.
//! 3. Assemble the [`Tree`] bottom-up in reverse topological order.

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace, warn};
use petgraph::{
    algo::{tarjan_scc, toposort},
    graph::{DiGraph, NodeIndex},
};
use serde::Deserialize;

use arbor_core::Tree;

use crate::{
    Item,
    error::{Diagnostic, ErrorCode, ResolveError},
};

/// Label of the synthetic root unless configured otherwise.
pub const DEFAULT_ROOT_LABEL: &str = "Root";

/// Graph node of the synthetic root. Item `i` is graph node `i + 1`.
const ROOT: usize = 0;

/// How items that depend on more than one parent are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiParentPolicy {
    /// Report the item as a structural error.
    #[default]
    Reject,

    /// Attach a copy of the item's subtree under each of its parents.
    ///
    /// The result is always a proper tree, but repeated sharing can make it
    /// exponentially larger than the item list.
    Duplicate,
}

/// Options controlling how an item list is turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    root_label: String,
    multi_parent: MultiParentPolicy,
}

impl ResolveOptions {
    /// Creates options with the given root label and multi-parent policy.
    pub fn new(root_label: impl Into<String>, multi_parent: MultiParentPolicy) -> Self {
        Self {
            root_label: root_label.into(),
            multi_parent,
        }
    }

    /// Label of the synthetic root. Items may name it in `depends_on` to be
    /// attached to the root explicitly.
    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn multi_parent(&self) -> MultiParentPolicy {
        self.multi_parent
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_LABEL, MultiParentPolicy::default())
    }
}

/// Resolve a dependency list into a single rooted tree.
///
/// Items without parents become children of a synthetic root labelled
/// [`ResolveOptions::root_label`], whose payload is `T::default()`. Children
/// appear in the order their items appear in `items`.
///
/// Returns `Ok(None)` for an empty list.
///
/// # Errors
///
/// Returns a [`ResolveError`] holding every problem found: duplicate
/// labels, unknown parents, self dependencies, cycles, items using the root
/// label and, under [`MultiParentPolicy::Reject`], items with several
/// parents.
pub fn resolve<T>(
    items: Vec<Item<T>>,
    options: &ResolveOptions,
) -> Result<Option<Tree<T>>, ResolveError>
where
    T: Clone + Default,
{
    if items.is_empty() {
        debug!("Empty dependency list, nothing to resolve");
        return Ok(None);
    }

    info!(items = items.len(); "Resolving dependency list");

    let mut diagnostics = Vec::new();
    let parents = resolve_parents(&items, options, &mut diagnostics);

    let graph = dependency_graph(&parents);
    report_cycles(&graph, &items, &mut diagnostics);

    if !diagnostics.is_empty() {
        debug!(diagnostics = diagnostics.len(); "Dependency list rejected");
        return Err(ResolveError::new(diagnostics));
    }

    let order = toposort(&graph, None).map_err(|cycle| {
        let label = items[cycle.node_id().index() - 1].label();
        Diagnostic::new(
            ErrorCode::E103,
            format!("item `{label}` is part of a dependency cycle"),
        )
        .with_item(label)
    })?;

    let tree = assemble(items, &parents, &order, options.root_label());
    if let Some(tree) = &tree {
        debug!(nodes = tree.node_count(); "Dependency list resolved");
    }

    Ok(tree)
}

/// Resolves the parents of every item to graph nodes.
///
/// Entry `i` of the result lists the parents of item `i`, deduplicated and in
/// `depends_on` order.
fn resolve_parents<T>(
    items: &[Item<T>],
    options: &ResolveOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Vec<usize>> {
    let root_label = options.root_label();

    let mut index: IndexMap<&str, usize> = IndexMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        if item.label() == root_label {
            diagnostics.push(
                Diagnostic::new(
                    ErrorCode::E105,
                    format!("item `{}` uses the label of the synthetic root", item.label()),
                )
                .with_item(item.label())
                .with_help("rename the item or configure a different root label"),
            );
        } else if index.contains_key(item.label()) {
            diagnostics.push(
                Diagnostic::new(
                    ErrorCode::E100,
                    format!("item `{}` is declared more than once", item.label()),
                )
                .with_item(item.label())
                .with_help("give every item a unique label"),
            );
        } else {
            index.insert(item.label(), position);
        }
    }

    let mut resolved_parents = Vec::with_capacity(items.len());
    for item in items {
        let label = item.label();

        let mut unique = IndexSet::with_capacity(item.parents().len());
        for parent in item.parents() {
            if !unique.insert(parent.as_str()) {
                warn!(item = label, parent = parent.as_str(); "Ignoring repeated parent");
            }
        }

        let mut resolved = Vec::with_capacity(unique.len());
        for parent in unique {
            if parent == label {
                diagnostics.push(
                    Diagnostic::new(ErrorCode::E102, format!("item `{label}` depends on itself"))
                        .with_item(label)
                        .with_help("remove the item from its own `depends_on` list"),
                );
            } else if parent == root_label {
                resolved.push(ROOT);
            } else if let Some(&position) = index.get(parent) {
                resolved.push(position + 1);
            } else {
                diagnostics.push(
                    Diagnostic::new(
                        ErrorCode::E101,
                        format!("item `{label}` depends on unknown item `{parent}`"),
                    )
                    .with_item(label)
                    .with_help(format!(
                        "declare `{parent}` as an item or remove it from `depends_on`"
                    )),
                );
            }
        }

        if item.parents().is_empty() {
            resolved.push(ROOT);
        }

        if resolved.len() > 1 && options.multi_parent() == MultiParentPolicy::Reject {
            let names: Vec<&str> = resolved
                .iter()
                .map(|&node| {
                    if node == ROOT {
                        root_label
                    } else {
                        items[node - 1].label()
                    }
                })
                .collect();
            diagnostics.push(
                Diagnostic::new(
                    ErrorCode::E104,
                    format!(
                        "item `{label}` has {} parents: {}",
                        names.len(),
                        names.join(", ")
                    ),
                )
                .with_item(label)
                .with_help("keep a single parent or resolve with the `duplicate` policy"),
            );
        }

        trace!(item = label, parents = resolved.len(); "Resolved parents");
        resolved_parents.push(resolved);
    }

    resolved_parents
}

/// Builds the parent → child graph. Node 0 is the synthetic root.
fn dependency_graph(parents: &[Vec<usize>]) -> DiGraph<(), ()> {
    let edges = parents.iter().map(Vec::len).sum();
    let mut graph = DiGraph::with_capacity(parents.len() + 1, edges);
    for _ in 0..=parents.len() {
        graph.add_node(());
    }

    for (position, item_parents) in parents.iter().enumerate() {
        for &parent in item_parents {
            graph.add_edge(NodeIndex::new(parent), NodeIndex::new(position + 1), ());
        }
    }

    graph
}

/// Reports one diagnostic per strongly connected group of items.
fn report_cycles<T>(
    graph: &DiGraph<(), ()>,
    items: &[Item<T>],
    diagnostics: &mut Vec<Diagnostic>,
) {
    for component in tarjan_scc(graph) {
        if component.len() < 2 {
            continue;
        }

        // The root has no incoming edges, so it is never part of a cycle.
        let mut members: Vec<usize> = component.iter().map(|node| node.index() - 1).collect();
        members.sort_unstable();

        let labels: Vec<&str> = members.iter().map(|&m| items[m].label()).collect();
        let mut diag = Diagnostic::new(
            ErrorCode::E103,
            format!("items {} form a dependency cycle", labels.join(" -> ")),
        )
        .with_help("break the cycle by removing one of the dependencies");
        for label in labels {
            diag = diag.with_item(label);
        }
        diagnostics.push(diag);
    }
}

/// Builds the tree bottom-up, children before parents.
fn assemble<T>(
    items: Vec<Item<T>>,
    parents: &[Vec<usize>],
    order: &[NodeIndex],
    root_label: &str,
) -> Option<Tree<T>>
where
    T: Clone + Default,
{
    let node_count = items.len() + 1;

    let mut children = vec![Vec::new(); node_count];
    let mut uses = vec![0usize; node_count];
    for (position, item_parents) in parents.iter().enumerate() {
        for &parent in item_parents {
            children[parent].push(position + 1);
        }
        uses[position + 1] = item_parents.len();
    }

    let mut parts: Vec<Option<(String, T)>> = items
        .into_iter()
        .map(|item| {
            let (label, _, data) = item.into_parts();
            Some((label, data))
        })
        .collect();

    let mut built: Vec<Option<Tree<T>>> = (0..node_count).map(|_| None).collect();
    for node in order.iter().rev() {
        let id = node.index();

        // Reverse topological order builds every child before its parent.
        let mut subtrees = Vec::with_capacity(children[id].len());
        for &child in &children[id] {
            uses[child] -= 1;
            let subtree = if uses[child] == 0 {
                built[child].take()
            } else {
                built[child].clone()
            };
            subtrees.extend(subtree);
        }

        let (label, data) = if id == ROOT {
            (root_label.to_string(), T::default())
        } else {
            let Some(part) = parts[id - 1].take() else {
                continue;
            };
            part
        };

        built[id] = Some(Tree::new(label, subtrees, data));
    }

    built[ROOT].take()
}
