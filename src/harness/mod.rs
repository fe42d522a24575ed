//! The harness context: registration, region filtering, and the run loop.
//!
//! A [`Harness`] owns every piece of session state — the pending entry queue,
//! the region filter, run statistics, configuration, the key-value cache, and
//! the console sink — and is passed `&mut` to each test function. Building
//! one context per session keeps registration order deterministic and lets
//! independent sessions coexist in one process, which is how this crate
//! tests itself.

use crate::cache::KvCache;
use crate::console::{ConsoleSink, StdoutConsole};
use crate::value::TestValue;
use std::io::Read;

mod filter;
mod report;

pub use report::{CheckSite, RunStats};

use filter::RegionFilter;

/// Region label entries carry when no region block is active.
pub const DEFAULT_REGION: &str = "__root__";

pub(crate) const RULE: &str = "--------------------------------------------------";

/// A registered test procedure. Receives the harness so it can assert,
/// use the key-value cache, and register further entries.
pub type TestFn = fn(&mut Harness);

/// One registered, independently dispatchable test.
#[derive(Debug)]
struct TestEntry {
    func: TestFn,
    name: String,
    region: String,
}

/// Run configuration, set before or interleaved with the run loop.
#[derive(Debug, Default)]
pub(crate) struct RunConfig {
    pub(crate) exit_on_failure: bool,
    pub(crate) pause_on_exit: bool,
    pub(crate) report_detail: bool,
}

/// The test session context.
///
/// # Examples
///
/// ```rust
/// use vtest::{expect_eq, Harness};
///
/// fn arithmetic(h: &mut Harness) {
///     expect_eq!(h, 4i32, 2 + 2);
/// }
///
/// let mut h = Harness::new();
/// h.add("arithmetic", arithmetic);
/// assert_eq!(h.run_all(), 0);
/// ```
pub struct Harness {
    console: Box<dyn ConsoleSink>,
    pending: Vec<TestEntry>,
    region: String,
    filter: RegionFilter,
    pub(crate) stats: RunStats,
    pub(crate) config: RunConfig,
    cache: KvCache,
    /// Name of the entry currently being dispatched, for report lines.
    pub(crate) current: String,
    pub(crate) aborted: bool,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// A session that reports to stdout with color auto-detection.
    pub fn new() -> Self {
        Self::with_console(Box::new(StdoutConsole::new()))
    }

    /// A session reporting into an arbitrary sink. The harness's own tests
    /// pass a [`crate::BufferConsole`] handle here.
    pub fn with_console(console: Box<dyn ConsoleSink>) -> Self {
        Self {
            console,
            pending: Vec::new(),
            region: DEFAULT_REGION.to_string(),
            filter: RegionFilter::default(),
            stats: RunStats::default(),
            config: RunConfig {
                report_detail: true,
                ..RunConfig::default()
            },
            cache: KvCache::new(),
            current: String::new(),
            aborted: false,
        }
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Appends an entry to the pending queue under the current region label.
    /// Duplicate names are permitted and reported independently. May be
    /// called from inside a running test; such entries execute in a later
    /// wave of the same `run_all` invocation.
    pub fn add(&mut self, name: impl Into<String>, func: TestFn) {
        self.pending.push(TestEntry {
            func,
            name: name.into(),
            region: self.region.clone(),
        });
    }

    /// Places an entry at the front of the pending queue, ahead of everything
    /// queued so far. Used for a designated setup test.
    pub fn add_first(&mut self, name: impl Into<String>, func: TestFn) {
        self.pending.insert(
            0,
            TestEntry {
                func,
                name: name.into(),
                region: self.region.clone(),
            },
        );
    }

    /// Sets the region label carried by subsequently registered entries.
    pub fn set_region(&mut self, label: impl Into<String>) {
        self.region = label.into();
    }

    /// Resets the registration label to [`DEFAULT_REGION`]. This is a
    /// depth-one discipline: ending a region always lands on the root label,
    /// never on an enclosing one, so nested region blocks do not compose.
    pub fn end_region(&mut self) {
        self.region = DEFAULT_REGION.to_string();
    }

    // ------------------------------------------------------------------
    // Filter and run configuration
    // ------------------------------------------------------------------

    /// Marks a region as explicitly allowed and activates filtering.
    pub fn allow_region(&mut self, label: impl Into<String>) {
        self.filter.allow(label);
    }

    /// Marks a region as explicitly denied and activates filtering.
    pub fn deny_region(&mut self, label: impl Into<String>) {
        self.filter.deny(label);
    }

    /// Suppresses every region that is not explicitly allow-listed.
    pub fn disable_all_regions(&mut self) {
        self.filter.disable_all();
    }

    /// When set, the first failing assertion prints the summary and aborts
    /// the rest of the run.
    pub fn set_exit_on_failure(&mut self, value: bool) {
        self.config.exit_on_failure = value;
    }

    /// When set, the run blocks for one keypress before returning.
    pub fn set_pause_on_exit(&mut self, value: bool) {
        self.config.pause_on_exit = value;
    }

    /// When set (the default), the summary reprints every failure line.
    pub fn set_report_detail(&mut self, value: bool) {
        self.config.report_detail = value;
    }

    // ------------------------------------------------------------------
    // Key-value side cache
    // ------------------------------------------------------------------

    pub fn kv_set(&mut self, key: impl Into<String>, value: TestValue) {
        self.cache.set(key, value);
    }

    /// Returns the cached value, or `Bool(false)` when the key is absent.
    pub fn kv_get(&self, key: &str) -> TestValue {
        self.cache.get(key)
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Executes all pending entries in waves and returns the number of
    /// failed assertions, the intended process exit status.
    ///
    /// Each wave detaches the whole pending queue and dispatches that
    /// snapshot in insertion order, so entries registered during a wave
    /// accumulate into a fresh queue and run in the next one. The loop ends
    /// when a drained wave left nothing behind, or when a failing check
    /// under exit-on-failure raises the abort signal.
    ///
    /// A panic inside a test body is not caught; there is no per-entry
    /// isolation.
    pub fn run_all(&mut self) -> u32 {
        self.console.emit(RULE);
        self.console.emit(&format!(
            "Unit test start with vtest {}...",
            env!("CARGO_PKG_VERSION")
        ));
        self.console.emit(RULE);
        while !self.pending.is_empty() && !self.aborted {
            let wave = std::mem::take(&mut self.pending);
            for entry in wave {
                if self.aborted {
                    break;
                }
                if !self.filter.admits(&entry.region) {
                    continue;
                }
                self.console.emit(&format!("\n[Run] {}", entry.name));
                self.stats.run += 1;
                self.current = entry.name;
                (entry.func)(self);
            }
        }
        if self.aborted {
            // The failing check already printed the summary and paused.
            return self.stats.failed();
        }
        self.console.emit(RULE);
        self.console.emit("Unit test end.");
        self.console.emit(RULE);
        self.summary();
        self.pause_if_configured();
        self.stats.failed()
    }

    /// Session statistics, readable at any point.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// True once a failing check under exit-on-failure has stopped the run.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub(crate) fn pause_if_configured(&mut self) {
        if !self.config.pause_on_exit {
            return;
        }
        self.console.emit("Press any key to exit...");
        let mut byte = [0u8; 1];
        let _ = std::io::stdin().read(&mut byte);
    }
}
