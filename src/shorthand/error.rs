//! Error types for compilation
//!
//! None of these errors escape [`compile`](crate::shorthand::compiling::compile): each one is
//! converted into a [`Diagnostic`] where it is caught. They exist so that the components can
//! use `Result` and `?` internally and leave the recovery decision to their caller.

use crate::shorthand::diagnostics::{Diagnostic, DiagnosticKind};
use std::any::Any;
use thiserror::Error;

/// A token that does not match the element grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid syntax near \"{token}\".")]
pub struct GrammarError {
    pub token: String,
    pub line: usize,
}

impl GrammarError {
    pub fn new(token: impl Into<String>, line: usize) -> Self {
        Self {
            token: token.into(),
            line,
        }
    }
}

/// A block opener that never found its matching close delimiter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unclosed block starting with <{tag}>.")]
pub struct UnclosedBlockError {
    pub tag: String,
    pub line: usize,
}

/// A block comment that was still open when its scope ended
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unclosed block comment.")]
pub struct UnclosedCommentError {
    pub line: usize,
}

/// Failure reported by an expression evaluator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EvaluationError {
    pub message: String,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Umbrella error for everything the compiler can run into
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    UnclosedBlock(#[from] UnclosedBlockError),

    #[error(transparent)]
    UnclosedComment(#[from] UnclosedCommentError),

    #[error("Expression evaluation failed: {source} in expression \"{expression}\"")]
    Evaluation {
        expression: String,
        #[source]
        source: EvaluationError,
    },

    #[error("Unexpected error: {0}")]
    Internal(String),
}

impl From<GrammarError> for Diagnostic {
    fn from(err: GrammarError) -> Self {
        Diagnostic::at(err.line, err.to_string()).with_kind(DiagnosticKind::Grammar)
    }
}

impl From<UnclosedBlockError> for Diagnostic {
    fn from(err: UnclosedBlockError) -> Self {
        Diagnostic::at(err.line, err.to_string()).with_kind(DiagnosticKind::UnclosedBlock)
    }
}

impl From<UnclosedCommentError> for Diagnostic {
    fn from(err: UnclosedCommentError) -> Self {
        Diagnostic::at(err.line, err.to_string()).with_kind(DiagnosticKind::UnclosedComment)
    }
}

impl From<CompileError> for Diagnostic {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Grammar(e) => e.into(),
            CompileError::UnclosedBlock(e) => e.into(),
            CompileError::UnclosedComment(e) => e.into(),
            evaluation @ CompileError::Evaluation { .. } => {
                Diagnostic::new(None, evaluation.to_string()).with_kind(DiagnosticKind::Evaluation)
            }
            internal @ CompileError::Internal(_) => {
                Diagnostic::new(None, internal.to_string()).with_kind(DiagnosticKind::Internal)
            }
        }
    }
}

/// Best-effort text of a caught panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
