//! Arbor Dependency Resolution
//!
//! Turns a flat list of items, each naming the items it depends on, into the
//! single rooted [`Tree`](arbor_core::Tree) the layout engine requires.
//! Items without parents are attached under a synthetic root.
//!
//! The resolver never repairs its input: duplicate labels, unknown parents,
//! cycles and (by default) items with more than one parent are reported as
//! [`Diagnostic`](error::Diagnostic)s.
//!
//! # Example
//!
//! ```
//! use arbor_deps::{Item, ResolveOptions, resolve};
//!
//! let items = vec![
//!     Item::new("app", ()),
//!     Item::new("db", ()).depends_on(["app"]),
//!     Item::new("cache", ()).depends_on(["app"]),
//! ];
//!
//! let tree = resolve(items, &ResolveOptions::default())
//!     .expect("valid dependency list")
//!     .expect("non-empty list");
//!
//! assert_eq!(tree.label(), "Root");
//! assert_eq!(tree.children()[0].children().len(), 2);
//! ```

pub mod error;

mod item;
mod resolve;

pub use item::Item;
pub use resolve::{DEFAULT_ROOT_LABEL, MultiParentPolicy, ResolveOptions, resolve};
