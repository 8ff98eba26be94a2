//! Check trait and result types

use std::time::Duration;

use colored::Colorize;

/// Outcome of one check, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    Pass,
    /// Usable, but something looks off
    Warn,
    Fail,
}

impl CheckStatus {
    /// Pass or Warn
    pub fn is_ok(&self) -> bool {
        *self != CheckStatus::Fail
    }

    pub fn is_fail(&self) -> bool {
        *self == CheckStatus::Fail
    }

    pub fn label(&self) -> String {
        match self {
            CheckStatus::Pass => "PASS".green().to_string(),
            CheckStatus::Warn => "WARN".yellow().to_string(),
            CheckStatus::Fail => "FAIL".red().bold().to_string(),
        }
    }
}

/// What a check found
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// One line for the report table
    pub message: String,
    /// Per-item findings printed under the table
    pub notes: Vec<String>,
    pub duration: Duration,
}

impl CheckResult {
    fn with_status(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            notes: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Fail, message)
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Accumulates findings while a check runs and picks the overall status
#[derive(Debug, Default)]
pub struct Findings {
    worst: Option<CheckStatus>,
    notes: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&mut self, note: impl Into<String>) {
        self.record(CheckStatus::Pass, "✓", note.into());
    }

    pub fn warn(&mut self, note: impl Into<String>) {
        self.record(CheckStatus::Warn, "⚠", note.into());
    }

    pub fn fail(&mut self, note: impl Into<String>) {
        self.record(CheckStatus::Fail, "✗", note.into());
    }

    fn record(&mut self, status: CheckStatus, mark: &str, note: String) {
        self.worst = self.worst.max(Some(status));
        self.notes.push(format!("  {mark} {note}"));
    }

    pub fn status(&self) -> CheckStatus {
        self.worst.unwrap_or(CheckStatus::Pass)
    }

    /// Picks the message matching the worst finding
    pub fn finish(self, pass: &str, warn: &str, fail: &str) -> CheckResult {
        let result = match self.status() {
            CheckStatus::Pass => CheckResult::pass(pass),
            CheckStatus::Warn => CheckResult::warn(warn),
            CheckStatus::Fail => CheckResult::fail(fail),
        };
        result.with_notes(self.notes)
    }
}

/// A startup self check
pub trait SystemCheck {
    /// Name shown in the report
    fn name(&self) -> &'static str;

    fn check(&self) -> CheckResult;

    fn description(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_findings_keep_the_worst_status() {
        let mut findings = Findings::new();
        assert_eq!(findings.status(), CheckStatus::Pass);

        findings.ok("fine");
        findings.warn("odd");
        findings.ok("fine again");
        assert_eq!(findings.status(), CheckStatus::Warn);

        let result = findings.finish("all good", "look closer", "broken");
        assert_eq!(result.status, CheckStatus::Warn);
        assert_eq!(result.message, "look closer");
        assert_eq!(result.notes.len(), 3);
    }

    #[test]
    fn test_fail_is_not_ok() {
        assert!(CheckStatus::Warn.is_ok());
        assert!(CheckStatus::Fail.is_fail());
        assert!(!CheckStatus::Fail.is_ok());
    }
}
