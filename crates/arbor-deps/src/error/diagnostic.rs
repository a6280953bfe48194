//! The diagnostic type for resolution errors.

use std::fmt;

use crate::error::ErrorCode;

/// A single problem found while resolving an item list.
///
/// Carries an [`ErrorCode`], the message, the labels of the items involved
/// and optional help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    items: Vec<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            items: Vec::new(),
            help: None,
        }
    }

    /// Record an item involved in this diagnostic.
    pub fn with_item(mut self, label: impl Into<String>) -> Self {
        self.items.push(label.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels of the items involved, in item list order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
