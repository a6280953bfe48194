//! Configuration types for Arbor layouts.
//!
//! This module provides configuration structures that control how trees are
//! built and laid out. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources; every field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and resolution settings.
//! - [`LayoutConfig`] - Controls the horizontal distance between neighbouring nodes.
//! - [`ResolveConfig`] - Controls how dependency lists are turned into trees.
//!
//! # Example
//!
//! ```
//! # use arbor::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().distance(), 1.0);
//! assert_eq!(config.resolve().root_label(), "Root");
//! ```

use serde::Deserialize;

use arbor_deps::{DEFAULT_ROOT_LABEL, MultiParentPolicy, ResolveOptions};

/// Horizontal distance used when none is configured.
pub const DEFAULT_DISTANCE: f64 = 1.0;

/// Top-level configuration combining layout and resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Dependency resolution configuration section.
    #[serde(default)]
    resolve: ResolveConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(layout: LayoutConfig, resolve: ResolveConfig) -> Self {
        Self { layout, resolve }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the dependency resolution configuration.
    pub fn resolve(&self) -> &ResolveConfig {
        &self.resolve
    }
}

/// Layout configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum horizontal distance between neighbouring nodes.
    distance: f64,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// The distance is validated when a layout runs, not here, so that a
    /// configuration file can be loaded and reported on as a whole.
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }

    /// Returns the configured distance between neighbouring nodes.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}

/// Dependency resolution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Label of the synthetic root that parentless items hang under.
    root_label: String,

    /// What to do with items that depend on more than one parent.
    multi_parent: MultiParentPolicy,
}

impl ResolveConfig {
    /// Creates a new [`ResolveConfig`].
    pub fn new(root_label: impl Into<String>, multi_parent: MultiParentPolicy) -> Self {
        Self {
            root_label: root_label.into(),
            multi_parent,
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn multi_parent(&self) -> MultiParentPolicy {
        self.multi_parent
    }

    /// Returns the resolver options described by this section.
    pub fn options(&self) -> ResolveOptions {
        ResolveOptions::new(self.root_label.clone(), self.multi_parent)
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_LABEL, MultiParentPolicy::default())
    }
}
