//! Maps process arguments to harness configuration.
//!
//! Recognized flags:
//!
//! - `-e`  — exit on the first failing assertion
//! - `-p`  — pause for a keypress before exiting
//! - `-rx` — disable every region not explicitly allow-listed
//! - `-ra=<l1,l2,...>` — allow-list regions
//! - `-rd=<l1,l2,...>` — deny-list regions
//!
//! Flags match by prefix, lists split on `,` with empty segments dropped,
//! and anything unrecognized is silently ignored — configuration misuse is
//! never an error.

use crate::harness::Harness;

/// Parsed harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub exit_on_failure: bool,
    pub pause_on_exit: bool,
    pub disable_all_regions: bool,
    pub allow_regions: Vec<String>,
    pub deny_regions: Vec<String>,
}

impl Config {
    /// Parses flags from an argument iterator (without the program name).
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Config::default();
        for arg in args {
            let arg = arg.as_ref();
            if arg.starts_with("-rx") {
                config.disable_all_regions = true;
            } else if let Some(list) = arg.strip_prefix("-rd=") {
                config.deny_regions.extend(split_labels(list));
            } else if let Some(list) = arg.strip_prefix("-ra=") {
                config.allow_regions.extend(split_labels(list));
            } else if arg.starts_with("-p") {
                config.pause_on_exit = true;
            } else if arg.starts_with("-e") {
                config.exit_on_failure = true;
            }
        }
        config
    }

    /// Parses the process arguments, skipping the program name.
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Applies the configuration to a harness via its setup calls.
    pub fn apply(&self, harness: &mut Harness) {
        harness.set_exit_on_failure(self.exit_on_failure);
        harness.set_pause_on_exit(self.pause_on_exit);
        if self.disable_all_regions {
            harness.disable_all_regions();
        }
        for label in &self.allow_regions {
            harness.allow_region(label.clone());
        }
        for label in &self.deny_regions {
            harness.deny_region(label.clone());
        }
    }
}

fn split_labels(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
