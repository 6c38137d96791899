//! Compile entry points
//!
//! [`compile`] runs the whole pipeline on one source text:
//!
//! 1. [parse](crate::shorthand::parsing::parse) into a document
//! 2. [render](crate::shorthand::rendering::render) the document to HTML
//! 3. [substitute](crate::shorthand::evaluation::substitute) the expression spans
//!
//! It never fails and never panics. Malformed input shows up as diagnostics next to the best
//! HTML that could be produced. A panic anywhere in the pipeline is caught here and reported as
//! an internal diagnostic with empty HTML.

use crate::shorthand::config::CompileOptions;
use crate::shorthand::diagnostics::Diagnostics;
use crate::shorthand::error::{panic_message, CompileError};
use crate::shorthand::evaluation::{substitute, Evaluator};
use crate::shorthand::parsing::{parse, Parsed};
use crate::shorthand::rendering::render;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// HTML and diagnostics of one compile call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Compilation {
    pub html: String,
    pub diagnostics: Diagnostics,
}

impl Compilation {
    /// `true` when nothing was reported
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Compile with the default options.
pub fn compile(source: &str, evaluator: &dyn Evaluator) -> Compilation {
    compile_with_options(source, evaluator, &CompileOptions::default())
}

pub fn compile_with_options(
    source: &str,
    evaluator: &dyn Evaluator,
    options: &CompileOptions,
) -> Compilation {
    guarded(|| run(source, evaluator, options))
}

fn run(source: &str, evaluator: &dyn Evaluator, options: &CompileOptions) -> Compilation {
    let Parsed {
        document,
        mut diagnostics,
    } = parse(source, options);
    let html = render(&document, options, &mut diagnostics);
    let html = substitute(&html, evaluator, options, &mut diagnostics);
    Compilation { html, diagnostics }
}

fn guarded(pipeline: impl FnOnce() -> Compilation) -> Compilation {
    catch_unwind(AssertUnwindSafe(pipeline)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::error!(%message, "compilation panicked");

        let mut diagnostics = Diagnostics::new();
        diagnostics.push(CompileError::Internal(message));
        Compilation {
            html: String::new(),
            diagnostics,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shorthand::diagnostics::DiagnosticKind;
    use crate::shorthand::evaluation::{Bindings, NoEvaluator};

    #[test]
    fn test_compile_pipeline() {
        let bindings = Bindings::new().with("title", "Menu");
        let compilation = compile("h1{<$ title $>}\nul > li{&index;}*2", &bindings);
        assert!(compilation.is_clean());
        assert_eq!(
            compilation.html,
            "<h1>Menu</h1>\n<ul>\n<li>1</li>\n<li>2</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_empty_source() {
        let compilation = compile("", &NoEvaluator);
        assert_eq!(compilation, Compilation::default());
    }

    #[test]
    fn test_options_are_used() {
        let options = CompileOptions {
            error_marker: "??".to_string(),
            ..CompileOptions::default()
        };
        let compilation = compile_with_options("p{<$ x $>}", &NoEvaluator, &options);
        assert_eq!(compilation.html, "<p>??</p>\n");
        assert_eq!(compilation.diagnostics.len(), 1);
    }

    #[test]
    fn test_panics_become_internal_diagnostics() {
        let compilation = guarded(|| panic!("pipeline broke"));
        assert_eq!(compilation.html, "");

        let diagnostic = compilation.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.kind, DiagnosticKind::Internal);
        assert_eq!(diagnostic.message, "Unexpected error: pipeline broke");
    }

    #[test]
    fn test_serializes_to_json() {
        let compilation = compile("p{unclosed", &NoEvaluator);
        let json = serde_json::to_value(&compilation).unwrap();
        assert_eq!(json["html"], "p{unclosed\n");
        assert_eq!(json["diagnostics"][0]["line"], 1);
        assert_eq!(json["diagnostics"][0]["kind"], "grammar");
    }
}
