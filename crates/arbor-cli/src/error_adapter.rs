//! Error adapter for converting ArborError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`ResolveError`](arbor::deps::error::ResolveError) contains
//! multiple diagnostics, each diagnostic is rendered independently. If the
//! item list source is available, every item a diagnostic names is labelled
//! at its `label = "..."` declaration.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use arbor::{ArborError, deps::error::Diagnostic};

/// Adapter for a single resolution diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Item list source, if it could be read
    src: Option<&'a str>,
    /// Declarations of the items named by the diagnostic
    labels: Vec<LabeledSpan>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: Option<&'a str>) -> Self {
        let labels = src
            .map(|src| item_labels(diag, src))
            .unwrap_or_default();
        Self { diag, src, labels }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diag.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }

        Some(Box::new(self.labels.iter().cloned()))
    }
}

/// Labels every declaration of the items named by `diag`.
///
/// The first declaration overall is the primary label. Repeated
/// declarations of the same item are labelled as such.
fn item_labels(diag: &Diagnostic, src: &str) -> Vec<LabeledSpan> {
    let mut labels = Vec::new();
    for item in diag.items() {
        for (nth, span) in declaration_spans(src, item).into_iter().enumerate() {
            let message = if nth == 0 {
                format!("`{item}` declared here")
            } else {
                "declared again here".to_string()
            };
            if labels.is_empty() {
                labels.push(LabeledSpan::new_primary_with_span(Some(message), span));
            } else {
                labels.push(LabeledSpan::new_with_span(Some(message), span));
            }
        }
    }
    labels
}

/// Spans of the quoted values of `label = "<item>"` lines, in file order.
fn declaration_spans(src: &str, item: &str) -> Vec<SourceSpan> {
    let quoted = format!("\"{item}\"");
    let mut spans = Vec::new();
    let mut offset = 0;

    for line in src.split_inclusive('\n') {
        let value = line
            .trim_start()
            .strip_prefix("label")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('='))
            .map(str::trim_start)
            .filter(|value| value.starts_with(&quoted));
        if let Some(value) = value {
            let start = offset + line.len() - value.len();
            spans.push(SourceSpan::new(start.into(), quoted.len()));
        }
        offset += line.len();
    }

    spans
}

/// Adapter for non-diagnostic [`ArborError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O errors, configuration errors and export errors.
pub struct ErrorAdapter<'a>(pub &'a ArborError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArborError::Io(_) => "arbor::io",
            ArborError::InvalidDistance(_) => "arbor::distance",
            ArborError::Resolve(_) => return None,
            ArborError::Config(_) => "arbor::config",
            ArborError::Input(_) => "arbor::input",
            ArborError::Layout(_) => "arbor::layout",
            ArborError::Export(_) => "arbor::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ArborError::InvalidDistance(_) => Some(Box::new(
                "set `distance` in the `[layout]` section to a positive number",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A resolution diagnostic with an error code and item labels.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`ArborError`] into a list of reportable errors.
///
/// For [`ArborError::Resolve`], this returns one [`Reportable`] for each
/// diagnostic in the error, labelled against `src` when given. For other
/// error variants, this returns a single [`Reportable`].
pub fn to_reportables<'a>(err: &'a ArborError, src: Option<&'a str>) -> Vec<Reportable<'a>> {
    match err {
        ArborError::Resolve(resolve_err) => resolve_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
