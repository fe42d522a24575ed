//! The assertion and reporting path.
//!
//! Every test-visible failure funnels through [`Harness::check`]; nothing is
//! thrown or returned across the test/runner boundary. The only signal to
//! the encompassing process is the aggregate failure count and the printed
//! report.

use crate::console::Mode;
use crate::harness::Harness;
use crate::value::TestValue;

/// Source location carried by an assertion, captured by the macros.
#[derive(Debug, Clone, Copy)]
pub struct CheckSite {
    pub line: u32,
    pub file: &'static str,
    /// Row index for batch-table checks; `0` for plain assertions.
    pub case: usize,
}

/// Aggregate statistics for one harness session.
///
/// Counters accumulate monotonically; `summary` never clears them, so calling
/// it twice reprints the same totals.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Entries dispatched (not assertions).
    pub run: u32,
    /// Assertions checked.
    pub checked: u32,
    /// Assertions passed.
    pub passed: u32,
    pub(crate) errors: Vec<String>,
}

impl RunStats {
    pub fn failed(&self) -> u32 {
        self.checked - self.passed
    }

    /// The formatted failure lines, in the order they occurred.
    pub fn failures(&self) -> &[String] {
        &self.errors
    }
}

/// Strips any directory prefix, recognizing both separator styles.
fn base_name(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

impl Harness {
    /// Records the outcome of one boolean check.
    ///
    /// On failure the formatted error line is logged and, when
    /// exit-on-failure is configured, the summary prints and the abort
    /// signal is raised: the run loop dispatches nothing further and later
    /// checks become no-ops.
    pub fn check(&mut self, passed: bool, site: CheckSite) {
        if self.aborted {
            return;
        }
        self.stats.checked += 1;
        if passed {
            self.stats.passed += 1;
            let line = format!(
                "PASS {}, line {}, case {}",
                self.current, site.line, site.case
            );
            self.console.set_mode(Mode::Passed);
            self.console.emit(&line);
            self.console.reset();
        } else {
            let line = format!(
                "ERROR {}, line {}, case {}, {}",
                self.current,
                site.line,
                site.case,
                base_name(site.file)
            );
            self.console.set_mode(Mode::Failed);
            self.console.emit(&line);
            self.console.reset();
            self.stats.errors.push(line);
            if self.config.exit_on_failure {
                self.summary();
                self.pause_if_configured();
                self.aborted = true;
            }
        }
    }

    /// Compares two values under the cross-kind equality relation, emitting
    /// a tip line rendering both operands when they differ, then records the
    /// outcome via [`Harness::check`].
    pub fn check_eq(&mut self, expected: TestValue, actual: TestValue, site: CheckSite) {
        let eq = expected == actual;
        if !eq {
            self.tip(&format!("Expect: {}, Return Value: {}", expected, actual));
        }
        self.check(eq, site);
    }

    /// Emits an informational line in tip coloring.
    pub fn tip(&mut self, text: &str) {
        self.console.set_mode(Mode::Tip);
        self.console.emit(text);
        self.console.reset();
    }

    /// Prints the run/checked/passed/failed totals and, when report detail
    /// is enabled, every logged failure line in order. Idempotent.
    pub fn summary(&mut self) {
        let failed = self.stats.failed();
        self.console
            .set_mode(if failed == 0 { Mode::Passed } else { Mode::Failed });
        self.console.emit(super::RULE);
        self.console.emit(&format!(
            "Run {}, Test {}, Pass {}, Failed {}",
            self.stats.run, self.stats.checked, self.stats.passed, failed
        ));
        self.console.emit(super::RULE);
        if self.config.report_detail && !self.stats.errors.is_empty() {
            for line in &self.stats.errors {
                self.console.emit(line);
            }
        }
        self.console.reset();
        self.console.emit(super::RULE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_both_separator_styles() {
        assert_eq!(base_name("src/value.rs"), "value.rs");
        assert_eq!(base_name("src\\value.rs"), "value.rs");
        assert_eq!(base_name("value.rs"), "value.rs");
        assert_eq!(base_name("a/b\\c.rs"), "c.rs");
    }

    #[test]
    fn failed_is_checked_minus_passed() {
        let stats = RunStats {
            run: 2,
            checked: 5,
            passed: 3,
            errors: vec![],
        };
        assert_eq!(stats.failed(), 2);
    }
}
