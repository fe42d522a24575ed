//! vtest: a minimal unit-test harness with region filtering, wave-based
//! execution, and mixed-type comparison values.
//!
//! Tests are plain functions registered with a [`Harness`] session; regions
//! group them for selective enable/disable; assertions compare
//! [`TestValue`]s under well-defined cross-kind coercion rules. See the
//! `demo` binary for an end-to-end tour.

pub use crate::cache::KvCache;
pub use crate::cli::Config;
pub use crate::console::{BufferConsole, ConsoleSink, Mode, StdoutConsole};
pub use crate::harness::{CheckSite, Harness, RunStats, TestFn, DEFAULT_REGION};
pub use crate::value::{TestValue, ValueError, ValueTable, FLOAT_EPSILON};

pub mod cache;
pub mod cli;
pub mod console;
pub mod harness;
mod macros;
pub mod value;
