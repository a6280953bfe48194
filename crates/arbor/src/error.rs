//! Error types for Arbor operations.
//!
//! This module provides the main error type [`ArborError`] which wraps
//! the error conditions that can occur while building and laying out trees.

use std::io;

use thiserror::Error;

use arbor_deps::error::ResolveError;

/// The main error type for Arbor operations.
///
/// # Diagnostic Variants
///
/// The `Resolve` variant carries every structural problem found in a
/// dependency list, each as a separate
/// [`Diagnostic`](arbor_deps::error::Diagnostic).
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid layout distance {0}: expected a positive, finite number")]
    InvalidDistance(f64),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid item list: {0}")]
    Input(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}
