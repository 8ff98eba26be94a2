//! Touch control configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::touch::KeyCode;

/// Gesture and repeat tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Distance a move touch must travel before it counts as a drag
    pub threshold_px: f32,
    /// Degrees of camera rotation per pixel of drag
    pub sensitivity: f32,
    /// Hold time after which a stationary touch starts digging
    pub dig_time_ms: u64,
    /// Taps shorter than this are treated as accidental
    pub quick_tap_min_ms: u64,
    /// Repeat interval of the directional pad
    pub fast_repeat_ms: u64,
    /// Repeat interval of the other held buttons
    pub slow_repeat_ms: u64,
    /// While digging, keep the camera still and only retarget the aiming ray
    pub touch_target: bool,
    /// User multiplier for the overlay size
    pub hud_scaling: f32,
}

impl ControlsConfig {
    pub fn dig_time(&self) -> Duration {
        Duration::from_millis(self.dig_time_ms)
    }

    pub fn quick_tap_min(&self) -> Duration {
        Duration::from_millis(self.quick_tap_min_ms)
    }

    pub fn fast_repeat(&self) -> Duration {
        Duration::from_millis(self.fast_repeat_ms)
    }

    pub fn slow_repeat(&self) -> Duration {
        Duration::from_millis(self.slow_repeat_ms)
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            threshold_px: 20.0,
            sensitivity: 0.2,
            dig_time_ms: 500,
            quick_tap_min_ms: 50,
            fast_repeat_ms: 200,
            slow_repeat_ms: 1000,
            touch_target: true,
            hud_scaling: 1.0,
        }
    }
}

/// Keys bound to each action name, as found on a desktop keyboard
pub fn default_keymap() -> BTreeMap<String, KeyCode> {
    [
        ("forward", KeyCode::W),
        ("backward", KeyCode::S),
        ("left", KeyCode::A),
        ("right", KeyCode::D),
        ("inventory", KeyCode::I),
        ("drop", KeyCode::Q),
        ("jump", KeyCode::Space),
        ("sneak", KeyCode::LShift),
        ("minimap", KeyCode::F9),
        ("rangeselect", KeyCode::R),
        ("chat", KeyCode::T),
    ]
    .into_iter()
    .map(|(action, key)| (action.to_string(), key))
    .collect()
}

/// Touch overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Action name to key
    #[serde(default = "default_keymap")]
    pub keymap: BTreeMap<String, KeyCode>,
}

impl TouchConfig {
    /// Compiled-in configuration, independent of any file on disk
    pub fn builtin(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            controls: ControlsConfig::default(),
            keymap: default_keymap(),
        }
    }

    /// Loads configuration based on the specified profile
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. config/{profile}.toml
    /// 2. Environment variables with prefix TOUCH_ (e.g., TOUCH_CONTROLS__THRESHOLD_PX=30)
    ///
    /// The config directory is searched next to the executable first, then in
    /// the current directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = match Self::find_config_dir() {
            Some(dir) => builder.add_source(File::from(dir.join(profile).as_path()).required(false)),
            None => builder.add_source(File::with_name(&format!("config/{profile}")).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("TOUCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        cwd_config.exists().then_some(cwd_config)
    }

    /// Loads the profile named by TOUCH_PROFILE, defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("TOUCH_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Actions required by the overlay that the keymap does not bind
    pub fn missing_bindings(&self) -> Vec<&'static str> {
        crate::touch::VirtualButtonId::required_actions()
            .into_iter()
            .filter(|action| !self.keymap.contains_key(*action))
            .collect()
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::builtin("release"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_binds_every_action() {
        let config = TouchConfig::builtin("test");
        assert!(config.missing_bindings().is_empty());
        assert_eq!(config.controls.dig_time(), Duration::from_millis(500));
        assert_eq!(config.controls.quick_tap_min(), Duration::from_millis(50));
    }

    #[test]
    fn test_missing_bindings_are_reported() {
        let mut config = TouchConfig::builtin("test");
        config.keymap.remove("jump");
        config.keymap.remove("chat");
        assert_eq!(config.missing_bindings(), vec!["jump", "chat"]);
    }

    #[test]
    fn test_profile_override_is_applied() {
        let config = TouchConfig::load("no-such-profile").unwrap();
        assert_eq!(config.profile, "no-such-profile");
        assert!(config.missing_bindings().is_empty());
    }
}
