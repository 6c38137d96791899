//! # shorthand
//!
//! A compiler for a shorthand markup language that expands into HTML for live preview.
//!
//! ```text
//! ul.menu > li{Item &index;}*2    <ul class="menu">
//!                                 <li>Item 1</li>
//!                                 <li>Item 2</li>
//!                                 </ul>
//! ```
//!
//! Start with [`compile`]: it takes the source text and an [`Evaluator`] for embedded
//! expressions, and returns the HTML together with the diagnostics found on the way.
//!
//! ## Testing
//!
//! See the [testing module](shorthand::testing) for the fluent compile assertions.

pub mod shorthand;

pub use shorthand::compiling::{compile, compile_with_options, Compilation};
pub use shorthand::config::{CompileOptions, ShorthandConfig};
pub use shorthand::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use shorthand::error::{CompileError, EvaluationError};
pub use shorthand::evaluation::{Bindings, Evaluator, NoEvaluator};
