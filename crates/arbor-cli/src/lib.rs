//! CLI logic for the Arbor tree layout tool.
//!
//! Reads a TOML item list, resolves it into a tree, lays the tree out and
//! writes one TOML record per node.

pub mod error_adapter;

mod args;
mod config;
mod input;
mod output;

pub use args::Args;

use std::fs;

use log::{info, warn};

use arbor::{ArborError, TreeLayout};

/// Run the Arbor CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArborError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or structurally invalid item lists
/// - Invalid layout distance
/// - Output serialization errors
pub fn run(args: &Args) -> Result<(), ArborError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing item list"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let items = input::parse_items(&source)?;
    info!(items = items.len(); "Item list parsed");

    let layout = TreeLayout::new(app_config);
    let positioned = layout.layout_items(items)?;
    if positioned.is_none() {
        warn!(input_path = args.input; "Item list is empty, writing empty layout");
    }

    let rendered = output::render(positioned.as_ref())?;
    fs::write(&args.output, rendered)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
