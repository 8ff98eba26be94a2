//! Startup self checks
//!
//! Validates that the touch overlay can be configured, laid out and driven
//! before a session starts. Used by `touch-demo check` and by CI.
//!
//! # Example
//!
//! ```no_run
//! use touch_gui::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(LayoutCheck::new())
//!     .run();
//!
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, Findings, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs every built-in check
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::LayoutCheck::new())
        .add_check(checks::GestureCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .run()
}
