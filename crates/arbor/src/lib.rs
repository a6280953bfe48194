//! Arbor - Linear-time tidy drawings of ordered trees.
//!
//! Computes planar coordinates for every node of a rooted, ordered tree so
//! that subtrees never overlap, parents are centred over their children and
//! the drawing stays narrow. The layout follows Reingold and Tilford as
//! extended by Walker and made linear by Buchheim, Jünger and Leipert.
//!
//! Trees can be handed over directly as [`Tree`] values or built from a flat
//! dependency list with [`TreeLayout::layout_items`].

pub mod config;

mod error;
mod layout;

pub use arbor_core::{Position, PositionedTree, Tree, geometry, tree};
pub use arbor_deps::{self as deps, Item, MultiParentPolicy, ResolveOptions};

pub use error::ArborError;

use log::{debug, info};

use config::AppConfig;

/// Entry point for laying out trees.
///
/// Holds the configuration only; every call builds and discards its own
/// layout state, so one instance can serve any number of layouts, including
/// from several threads.
///
/// # Examples
///
/// ```
/// use arbor::{Tree, TreeLayout};
///
/// let tree = Tree::leaf("root", ())
///     .with_child(Tree::leaf("a", ()))
///     .with_child(Tree::leaf("b", ()))
///     .with_child(Tree::leaf("c", ()));
///
/// let positioned = TreeLayout::default()
///     .layout(tree)
///     .expect("Failed to lay out tree");
///
/// assert_eq!(positioned.x(), 1.0);
/// assert_eq!(positioned.children()[2].x(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    config: AppConfig,
}

impl TreeLayout {
    /// Create a new tree layout with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration including the node distance and dependency
    ///   resolution settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out a tree.
    ///
    /// The result has the same shape, labels, payloads and child order as
    /// `tree`. Every node carries `x ≥ 0` and `y` equal to its depth.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::InvalidDistance`] if the configured distance is
    /// not a positive, finite number.
    pub fn layout<T>(&self, tree: Tree<T>) -> Result<PositionedTree<T>, ArborError> {
        let distance = self.distance()?;

        info!(distance; "Laying out tree");
        let positioned = layout::compute(tree, distance)
            .ok_or_else(|| ArborError::Layout("layout lost track of a node".to_string()))?;
        debug!(nodes = positioned.node_count(); "Layout complete");

        Ok(positioned)
    }

    /// Lay out a tree that may be empty.
    ///
    /// An empty input produces an empty output.
    ///
    /// # Errors
    ///
    /// Same as [`TreeLayout::layout`]. The distance is validated even when
    /// the input is empty.
    pub fn layout_optional<T>(
        &self,
        tree: Option<Tree<T>>,
    ) -> Result<Option<PositionedTree<T>>, ArborError> {
        let Some(tree) = tree else {
            self.distance()?;
            debug!("Empty tree, nothing to lay out");
            return Ok(None);
        };

        self.layout(tree).map(Some)
    }

    /// Resolve a dependency list into a tree and lay it out.
    ///
    /// Resolution uses the `resolve` section of the configuration. An empty
    /// list produces an empty output.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::InvalidDistance`] for an invalid distance and
    /// [`ArborError::Resolve`] with every structural problem of the list.
    pub fn layout_items<T>(
        &self,
        items: Vec<Item<T>>,
    ) -> Result<Option<PositionedTree<T>>, ArborError>
    where
        T: Clone + Default,
    {
        self.distance()?;

        let tree = arbor_deps::resolve(items, &self.config.resolve().options())?;
        self.layout_optional(tree)
    }

    fn distance(&self) -> Result<f64, ArborError> {
        validate_distance(self.config.layout().distance())
    }
}

/// Lay out a tree with the given distance between neighbouring nodes.
///
/// Shorthand for a [`TreeLayout`] with default configuration apart from the
/// distance.
///
/// # Errors
///
/// Returns [`ArborError::InvalidDistance`] if `distance` is not a positive,
/// finite number.
pub fn layout<T>(tree: Tree<T>, distance: f64) -> Result<PositionedTree<T>, ArborError> {
    let config = AppConfig::new(
        config::LayoutConfig::new(distance),
        config::ResolveConfig::default(),
    );
    TreeLayout::new(config).layout(tree)
}

fn validate_distance(distance: f64) -> Result<f64, ArborError> {
    if distance.is_finite() && distance > 0.0 {
        Ok(distance)
    } else {
        Err(ArborError::InvalidDistance(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_distance() {
        assert!(validate_distance(1.0).is_ok());
        assert!(validate_distance(f64::MIN_POSITIVE).is_ok());

        for invalid in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(validate_distance(invalid), Err(ArborError::InvalidDistance(_))),
                "{invalid} should be rejected"
            );
        }
    }
}
