//! Testing utilities
//!
//! Fluent assertions over a compile call, so tests state the HTML and the diagnostics they
//! expect in one chain:
//!
//! ```rust-example
//! use shorthand::shorthand::testing::assert_compiled;
//!
//! assert_compiled("li{Item &index;}*2")
//!     .no_diagnostics()
//!     .html("<li>Item 1</li>\n<li>Item 2</li>\n");
//! ```
//!
//! Sources are compiled with [`NoEvaluator`] unless an evaluator is given with
//! [`assert_compiled_with`].

use crate::shorthand::compiling::{compile_with_options, Compilation};
use crate::shorthand::config::CompileOptions;
use crate::shorthand::diagnostics::DiagnosticKind;
use crate::shorthand::evaluation::{Evaluator, NoEvaluator};

/// Compile `source` with default options and no evaluator
pub fn assert_compiled(source: &str) -> CompiledAssertion {
    assert_compiled_with(source, &NoEvaluator)
}

pub fn assert_compiled_with(source: &str, evaluator: &dyn Evaluator) -> CompiledAssertion {
    assert_compiled_with_options(source, evaluator, &CompileOptions::default())
}

pub fn assert_compiled_with_options(
    source: &str,
    evaluator: &dyn Evaluator,
    options: &CompileOptions,
) -> CompiledAssertion {
    CompiledAssertion {
        source: source.to_string(),
        compilation: compile_with_options(source, evaluator, options),
    }
}

pub struct CompiledAssertion {
    source: String,
    compilation: Compilation,
}

impl CompiledAssertion {
    /// Assert the exact HTML output
    pub fn html(self, expected: &str) -> Self {
        assert_eq!(
            self.compilation.html, expected,
            "HTML mismatch for source:\n{}",
            self.source
        );
        self
    }

    pub fn html_contains(self, fragment: &str) -> Self {
        assert!(
            self.compilation.html.contains(fragment),
            "Expected HTML to contain {:?}, got:\n{}",
            fragment,
            self.compilation.html
        );
        self
    }

    pub fn no_diagnostics(self) -> Self {
        assert!(
            self.compilation.diagnostics.is_empty(),
            "Expected no diagnostics for source:\n{}\ngot:\n{}",
            self.source,
            self.compilation.diagnostics
        );
        self
    }

    pub fn diagnostic_count(self, expected: usize) -> Self {
        assert_eq!(
            self.compilation.diagnostics.len(),
            expected,
            "Diagnostic count mismatch, got:\n{}",
            self.compilation.diagnostics
        );
        self
    }

    /// Assert the line and message of the diagnostic at `index`
    pub fn diagnostic(self, index: usize, line: Option<usize>, message: &str) -> Self {
        let diagnostic = self.diagnostic_at(index);
        assert_eq!(diagnostic.0, line, "diagnostics[{}] line", index);
        assert_eq!(diagnostic.1, message, "diagnostics[{}] message", index);
        self
    }

    pub fn diagnostic_kind(self, index: usize, kind: DiagnosticKind) -> Self {
        let actual = self.diagnostic_at(index).2;
        assert_eq!(actual, kind, "diagnostics[{}] kind", index);
        self
    }

    /// The compilation under test, for checks the fluent API does not cover
    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    fn diagnostic_at(&self, index: usize) -> (Option<usize>, String, DiagnosticKind) {
        let diagnostic = self.compilation.diagnostics.iter().nth(index).unwrap_or_else(|| {
            panic!(
                "Diagnostic index {} out of bounds, got:\n{}",
                index, self.compilation.diagnostics
            )
        });
        (diagnostic.line, diagnostic.message.clone(), diagnostic.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_chain() {
        assert_compiled("p{a}\np{b")
            .html_contains("<p>a</p>")
            .diagnostic_count(1)
            .diagnostic(0, Some(2), "Invalid syntax near \"p{b\".")
            .diagnostic_kind(0, DiagnosticKind::Grammar);
    }

    #[test]
    #[should_panic(expected = "HTML mismatch")]
    fn test_html_mismatch_panics() {
        assert_compiled("p{a}").html("<p>b</p>\n");
    }
}
