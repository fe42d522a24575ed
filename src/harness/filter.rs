//! Region filter configuration and the per-entry dispatch decision.

use std::collections::HashMap;

/// Rules controlling which regions run.
///
/// Setting any rule activates filtering. In the stricter global-disable mode
/// nothing runs unless its region carries an explicit allow; otherwise an
/// entry runs unless its region carries an explicit deny.
#[derive(Debug, Default)]
pub(crate) struct RegionFilter {
    rules: HashMap<String, bool>,
    active: bool,
    disable_all: bool,
}

impl RegionFilter {
    pub(crate) fn allow(&mut self, label: impl Into<String>) {
        self.active = true;
        self.rules.insert(label.into(), true);
    }

    pub(crate) fn deny(&mut self, label: impl Into<String>) {
        self.active = true;
        self.rules.insert(label.into(), false);
    }

    pub(crate) fn disable_all(&mut self) {
        self.disable_all = true;
    }

    /// The dispatch-time decision for one entry's region.
    pub(crate) fn admits(&self, region: &str) -> bool {
        if self.disable_all {
            return self.rules.get(region) == Some(&true);
        }
        if !self.active {
            return true;
        }
        self.rules.get(region) != Some(&false)
    }
}
