//! Diagnostic collection
//!
//!     Compilation never stops at the first problem. Every recoverable issue is recorded as a
//!     [`Diagnostic`] and compilation continues with a best-effort result. The renderer that
//!     consumes the output decides what to do with them (the live preview suppresses itself
//!     when any are present and shows them jointly).
//!
//!     Diagnostics are collected in source order. Nested block bodies are parsed in their own
//!     [`Diagnostics`] scope which is merged into the enclosing scope when the body is done, so
//!     no mutable list is ever shared between scopes.

use serde::Serialize;
use std::fmt;

/// What kind of problem a diagnostic describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A token did not match the element grammar
    Grammar,
    /// A block opener without its matching close delimiter
    UnclosedBlock,
    /// A block comment that runs to the end of its scope
    UnclosedComment,
    /// A repeat count or nesting depth above the configured limit
    Limit,
    /// The expression evaluator reported a failure
    Evaluation,
    /// An unanticipated fault caught at the compile boundary
    Internal,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Grammar => write!(f, "grammar"),
            DiagnosticKind::UnclosedBlock => write!(f, "unclosed-block"),
            DiagnosticKind::UnclosedComment => write!(f, "unclosed-comment"),
            DiagnosticKind::Limit => write!(f, "limit"),
            DiagnosticKind::Evaluation => write!(f, "evaluation"),
            DiagnosticKind::Internal => write!(f, "internal"),
        }
    }
}

/// A line-tagged message describing a compilation problem
///
/// `line` is the 1-based source line. Problems found in the assembled HTML (expression
/// failures) or at the compile boundary have no source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: Option<usize>,
    pub message: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            kind: DiagnosticKind::Grammar,
        }
    }

    /// Diagnostic attached to a source line
    pub fn at(line: usize, message: impl Into<String>) -> Self {
        Self::new(Some(line), message)
    }

    pub fn with_kind(mut self, kind: DiagnosticKind) -> Self {
        self.kind = kind;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Ordered collection of diagnostics for one scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: impl Into<Diagnostic>) {
        self.entries.push(diagnostic.into());
    }

    /// Append every diagnostic of a nested scope, keeping their order
    pub fn merge(&mut self, scope: Diagnostics) {
        self.entries.extend(scope.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.message.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(entries: Vec<Diagnostic>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}
