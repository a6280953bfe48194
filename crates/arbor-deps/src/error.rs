//! Error and diagnostic types for dependency resolution.
//!
//! Resolution never stops at the first problem. Every issue found in the
//! item list is recorded as a [`Diagnostic`] and all of them are returned
//! together in a [`ResolveError`].
//!
//! # Example
//!
//! ```
//! # use arbor_deps::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::new(ErrorCode::E101, "item `b` depends on unknown item `x`")
//!     .with_help("declare `x` as an item or remove it from `depends_on`");
//!
//! assert_eq!(diag.to_string(), "[E101] item `b` depends on unknown item `x`");
//! ```

mod diagnostic;
mod error_code;
mod resolve_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use resolve_error::ResolveError;
