//! Error codes for dependency resolution diagnostics.
//!
//! All codes are structural: they describe why an item list does not
//! describe a single rooted tree.

use std::fmt;

/// Error codes for categorizing resolution diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Duplicate item.
    ///
    /// Two items share the same label.
    E100,

    /// Unknown parent.
    ///
    /// An item depends on a label that no item declares.
    E101,

    /// Self dependency.
    ///
    /// An item lists itself in its own `depends_on`.
    E102,

    /// Dependency cycle.
    ///
    /// A group of items depend on each other, directly or transitively.
    E103,

    /// Multiple parents.
    ///
    /// An item depends on more than one parent while the multi-parent
    /// policy rejects such items.
    E104,

    /// Reserved label.
    ///
    /// An item uses the label reserved for the synthetic root.
    E105,
}

impl ErrorCode {
    /// Returns a short, human-readable description of the error category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "duplicate item",
            ErrorCode::E101 => "unknown parent",
            ErrorCode::E102 => "self dependency",
            ErrorCode::E103 => "dependency cycle",
            ErrorCode::E104 => "multiple parents",
            ErrorCode::E105 => "reserved label",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
        };
        f.write_str(code)
    }
}
