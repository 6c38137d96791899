//! Output budget
//!
//! Repeat counts are clamped one level at a time, so nested repeats still multiply:
//! `a*1000 > b*1000 > c*3` asks for three million elements from one short line. The budget
//! bounds the whole compile instead. Every rendered node costs one unit, and a repetition that
//! clones already rendered children pays for every cloned node. Once a charge does not fit,
//! the budget is exhausted for the rest of the compile: one `limit` diagnostic is recorded and
//! nothing else is rendered.

use crate::shorthand::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBudget {
    limit: usize,
    remaining: usize,
    exhausted: bool,
}

impl ElementBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            remaining: limit,
            exhausted: false,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Spend `cost` units for output produced on source line `line`.
    ///
    /// Returns `false` when the output must not be produced.
    pub fn charge(&mut self, cost: usize, line: usize, diagnostics: &mut Diagnostics) -> bool {
        if self.exhausted {
            return false;
        }
        if cost <= self.remaining {
            self.remaining -= cost;
            return true;
        }

        self.exhausted = true;
        tracing::debug!(line, limit = self.limit, "element budget exhausted");
        diagnostics.push(
            Diagnostic::at(
                line,
                format!(
                    "Output exceeds the limit of {} elements; rendering stopped here.",
                    self.limit
                ),
            )
            .with_kind(DiagnosticKind::Limit),
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charges_until_exhausted() {
        let mut diagnostics = Diagnostics::new();
        let mut budget = ElementBudget::new(5);

        assert!(budget.charge(3, 1, &mut diagnostics));
        assert!(budget.charge(2, 1, &mut diagnostics));
        assert_eq!(budget.remaining(), 0);
        assert!(!budget.charge(1, 2, &mut diagnostics));
        assert!(budget.is_exhausted());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().line, Some(2));
    }

    #[test]
    fn test_reports_once() {
        let mut diagnostics = Diagnostics::new();
        let mut budget = ElementBudget::new(1);

        assert!(!budget.charge(2, 1, &mut diagnostics));
        assert!(!budget.charge(1, 3, &mut diagnostics));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().message,
            "Output exceeds the limit of 1 elements; rendering stopped here."
        );
    }
}
