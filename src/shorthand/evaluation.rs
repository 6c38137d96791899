//! Expression evaluation
//!
//!     Embedded expressions (`<$ expr $>`) are evaluated by the host, not by the compiler. The
//!     host plugs in through [`Evaluator`]: a synchronous call that returns the stringified
//!     value, nothing (rendered as an empty string), or a failure message. Any closure with the
//!     right signature is an evaluator.
//!
//!     The compiler sets no timeout and no sandbox. A host that evaluates untrusted or slow
//!     code has to bound it inside its own evaluator.
//!
//!     Two evaluators ship with the crate: [`NoEvaluator`], for hosts without an execution
//!     environment, and [`Bindings`], a lookup of names to values used by the CLI.

pub mod substitution;

pub use substitution::{substitute, EXPRESSION_PATTERN};

use crate::shorthand::error::EvaluationError;
use std::collections::BTreeMap;

/// Host capability that evaluates one embedded expression
pub trait Evaluator {
    /// Evaluate the trimmed text between the expression delimiters.
    fn evaluate(&self, expression: &str) -> Result<Option<String>, EvaluationError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str) -> Result<Option<String>, EvaluationError>,
{
    fn evaluate(&self, expression: &str) -> Result<Option<String>, EvaluationError> {
        self(expression)
    }
}

/// Evaluator for hosts that cannot run expressions; every expression fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvaluator;

impl Evaluator for NoEvaluator {
    fn evaluate(&self, _expression: &str) -> Result<Option<String>, EvaluationError> {
        Err(EvaluationError::new("expression evaluation is not available"))
    }
}

/// Evaluator that looks expressions up by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Bindings {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl Evaluator for Bindings {
    fn evaluate(&self, expression: &str) -> Result<Option<String>, EvaluationError> {
        let name = expression.trim();
        self.get(name)
            .map(|value| Some(value.to_string()))
            .ok_or_else(|| EvaluationError::new(format!("{} is not defined", name)))
    }
}
