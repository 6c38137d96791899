//! Expression substitution
//!
//! Runs once over the fully assembled HTML, so a span may cross the tags the compiler emitted.
//! Spans are matched shortest first and the whitespace inside the delimiters is trimmed.
//!
//! ```text
//! value      escaped and substituted
//! nothing    removed
//! failure    replaced by the error marker, diagnostic recorded
//! panic      same as a failure, with the panic message
//! ```

use super::Evaluator;
use crate::shorthand::config::CompileOptions;
use crate::shorthand::diagnostics::Diagnostics;
use crate::shorthand::error::{panic_message, CompileError, EvaluationError};
use crate::shorthand::rendering::escape_html;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::panic::{catch_unwind, AssertUnwindSafe};

pub const EXPRESSION_PATTERN: &str = r"<\$\s*([\s\S]+?)\s*\$>";

static EXPRESSION: Lazy<Regex> = Lazy::new(|| Regex::new(EXPRESSION_PATTERN).unwrap());

/// Replace every expression span in `html` with its evaluated value.
pub fn substitute(
    html: &str,
    evaluator: &dyn Evaluator,
    options: &CompileOptions,
    diagnostics: &mut Diagnostics,
) -> String {
    if !html.contains("<$") {
        return html.to_string();
    }

    EXPRESSION
        .replace_all(html, |captures: &Captures<'_>| {
            let expression = &captures[1];
            match evaluate_guarded(evaluator, expression) {
                Ok(Some(value)) => escape_html(&value),
                Ok(None) => String::new(),
                Err(source) => {
                    tracing::debug!(expression, error = %source, "expression failed");
                    diagnostics.push(CompileError::Evaluation {
                        expression: expression.to_string(),
                        source,
                    });
                    options.error_marker.clone()
                }
            }
        })
        .into_owned()
}

fn evaluate_guarded(
    evaluator: &dyn Evaluator,
    expression: &str,
) -> Result<Option<String>, EvaluationError> {
    catch_unwind(AssertUnwindSafe(|| evaluator.evaluate(expression)))
        .unwrap_or_else(|payload| Err(EvaluationError::new(panic_message(payload.as_ref()))))
}
