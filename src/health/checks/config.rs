//! Touch profile health check

use crate::config::TouchConfig;
use crate::health::check::{CheckResult, Findings, SystemCheck};

/// Loads every profile and validates its bindings and tunables
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }

    fn inspect(config: &TouchConfig, findings: &mut Findings) {
        let profile = &config.profile;
        let missing = config.missing_bindings();
        if !missing.is_empty() {
            findings.fail(format!("Profile '{profile}': unbound actions {missing:?}"));
            return;
        }

        let c = &config.controls;
        if c.threshold_px <= 0.0 || c.sensitivity <= 0.0 || c.hud_scaling <= 0.0 {
            findings.fail(format!(
                "Profile '{profile}': threshold, sensitivity and hud scaling must be positive"
            ));
        } else if c.fast_repeat_ms == 0 || c.slow_repeat_ms == 0 {
            findings.warn(format!("Profile '{profile}': a zero repeat interval fires every frame"));
        } else if c.quick_tap_min() >= c.dig_time() {
            findings.warn(format!(
                "Profile '{profile}': quick tap minimum {}ms is not below dig time {}ms",
                c.quick_tap_min_ms, c.dig_time_ms
            ));
        } else {
            findings.ok(format!(
                "Profile '{profile}': threshold {}px, dig {}ms, {} keys bound",
                c.threshold_px,
                c.dig_time_ms,
                config.keymap.len()
            ));
        }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads touch profiles and checks key bindings")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();

        for profile in &self.profiles {
            match TouchConfig::load(profile) {
                Ok(config) => Self::inspect(&config, &mut findings),
                Err(e) => findings.fail(format!("Profile '{profile}': {e}")),
            }
        }

        match TouchConfig::load_from_env() {
            Ok(config) => findings.ok(format!("Environment selects profile '{}'", config.profile)),
            Err(e) => findings.warn(format!("Environment config: {e}")),
        }

        let pass = format!("{} profiles validated", self.profiles.len());
        findings.finish(&pass, "Profiles loaded with warnings", "Profile validation failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckStatus;

    #[test]
    fn test_unbound_action_fails() {
        let mut config = TouchConfig::builtin("broken");
        config.keymap.remove("sneak");

        let mut findings = Findings::new();
        ConfigCheck::inspect(&config, &mut findings);
        assert_eq!(findings.status(), CheckStatus::Fail);
    }

    #[test]
    fn test_tap_window_longer_than_dig_warns() {
        let mut config = TouchConfig::builtin("odd");
        config.controls.quick_tap_min_ms = 900;

        let mut findings = Findings::new();
        ConfigCheck::inspect(&config, &mut findings);
        assert_eq!(findings.status(), CheckStatus::Warn);
    }
}
