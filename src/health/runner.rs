//! Runs a set of checks and tallies the results

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Every check's result, in the order the checks were added
#[derive(Debug)]
pub struct HealthCheckReport {
    pub results: Vec<(String, CheckResult)>,
}

impl HealthCheckReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of results with the given status
    pub fn count(&self, status: CheckStatus) -> usize {
        self.results
            .iter()
            .filter(|(_, result)| result.status == status)
            .count()
    }

    pub fn passed(&self) -> usize {
        self.count(CheckStatus::Pass)
    }

    pub fn warned(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    pub fn failed(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    /// No check failed
    pub fn is_healthy(&self) -> bool {
        self.failed() == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned() > 0
    }

    /// 0 when everything passed, 1 on any failure, 2 on warnings only
    pub fn exit_code(&self) -> i32 {
        match self.results.iter().map(|(_, r)| r.status).max() {
            Some(CheckStatus::Fail) => 1,
            Some(CheckStatus::Warn) => 2,
            _ => 0,
        }
    }
}

#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn run(self) -> HealthCheckReport {
        let results = self
            .checks
            .into_iter()
            .map(|check| {
                let start = Instant::now();
                let result = check.check().with_duration(start.elapsed());

                if result.status.is_fail() {
                    warn!(check = check.name(), message = %result.message, "Health check failed");
                } else {
                    debug!(check = check.name(), status = ?result.status, "Health check finished");
                }
                (check.name().to_string(), result)
            })
            .collect();

        HealthCheckReport { results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn check(&self) -> CheckResult {
            match self.0 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("hmm"),
                CheckStatus::Fail => CheckResult::fail("no"),
            }
        }
    }

    #[test]
    fn test_exit_code_reflects_the_worst_result() {
        let pass = HealthCheckRunner::new().add_check(Fixed(CheckStatus::Pass)).run();
        assert_eq!(pass.exit_code(), 0);

        let warn = HealthCheckRunner::new()
            .add_check(Fixed(CheckStatus::Pass))
            .add_check(Fixed(CheckStatus::Warn))
            .run();
        assert_eq!(warn.exit_code(), 2);
        assert!(warn.is_healthy());

        let fail = HealthCheckRunner::new()
            .add_check(Fixed(CheckStatus::Fail))
            .add_check(Fixed(CheckStatus::Warn))
            .run();
        assert_eq!(fail.exit_code(), 1);
        assert_eq!(fail.failed(), 1);
        assert_eq!(fail.total(), 2);
    }

    #[test]
    fn test_empty_runner_is_healthy() {
        let report = HealthCheckRunner::new().run();
        assert_eq!(report.total(), 0);
        assert_eq!(report.exit_code(), 0);
    }
}
