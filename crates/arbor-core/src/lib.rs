//! Arbor Core Types
//!
//! This crate provides the foundational types shared by the Arbor crates:
//!
//! - **Tree**: The ordered n-ary input tree with an opaque payload ([`tree::Tree`])
//! - **Positioned tree**: The laid-out output tree ([`tree::PositionedTree`])
//! - **Geometry**: Node coordinates ([`geometry::Position`])

pub mod geometry;
pub mod tree;

pub use geometry::Position;
pub use tree::{PositionedTree, Tree};
