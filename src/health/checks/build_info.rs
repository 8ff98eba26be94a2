//! Build metadata health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Reports compiler, target and build time")
    }

    fn check(&self) -> CheckResult {
        let notes = build_info::detailed_info()
            .lines()
            .map(|line| format!("  {line}"))
            .collect();

        if build_info::RUSTC_SEMVER.is_empty() || build_info::CARGO_TARGET_TRIPLE.is_empty() {
            return CheckResult::warn("Build metadata incomplete").with_notes(notes);
        }
        CheckResult::pass(build_info::version_string()).with_notes(notes)
    }
}
