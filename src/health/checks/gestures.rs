//! Scripted gesture health check
//!
//! Drives a real [`TouchScreen`] through a handful of touch scripts and
//! verifies the virtual key and mouse events that come out.

use std::time::Duration;

use glam::Vec2;

use crate::camera::PinholeCamera;
use crate::config::TouchConfig;
use crate::health::check::{CheckResult, Findings, SystemCheck};
use crate::touch::{
    Control, ControlEvent, LayoutParams, MouseButton, PressLedger, TouchError, TouchEvent,
    TouchScreen, VirtualButtonId,
};

type Screen = TouchScreen<PressLedger, PinholeCamera>;

const FRAME: Duration = Duration::from_millis(16);

pub struct GestureCheck {
    config: TouchConfig,
    params: LayoutParams,
}

impl GestureCheck {
    /// Uses the compiled-in tunables so results do not depend on local files
    pub fn new() -> Self {
        Self::with_config(TouchConfig::builtin("health"))
    }

    pub fn with_config(config: TouchConfig) -> Self {
        Self {
            config,
            params: LayoutParams::new(1280.0, 720.0),
        }
    }

    fn screen(&self) -> Result<Screen, TouchError> {
        let camera = PinholeCamera::new(Vec2::new(self.params.width, self.params.height));
        TouchScreen::new(&self.config, self.params, PressLedger::new(), camera)
    }

    fn frames(screen: &mut Screen, duration: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < duration {
            screen.tick(FRAME);
            elapsed += FRAME;
        }
    }

    fn clicked(screen: &Screen, button: MouseButton) -> bool {
        screen
            .receiver()
            .events()
            .iter()
            .any(|e| matches!(e, ControlEvent::PointerPress { button: b, .. } if *b == button))
    }

    fn tap(&self, screen: &mut Screen) -> Result<(), String> {
        let pos = Vec2::new(700.0, 300.0);
        screen.handle_touch(&TouchEvent::started(1, pos));
        Self::frames(screen, self.config.controls.quick_tap_min() * 2);
        screen.handle_touch(&TouchEvent::ended(1, pos));

        if !Self::clicked(screen, MouseButton::Right) {
            return Err("no right click".into());
        }
        if Self::clicked(screen, MouseButton::Left) {
            return Err("tap also dug".into());
        }
        Ok(())
    }

    fn hold(&self, screen: &mut Screen) -> Result<(), String> {
        let pos = Vec2::new(900.0, 200.0);
        screen.handle_touch(&TouchEvent::started(1, pos));
        Self::frames(screen, self.config.controls.dig_time() + FRAME * 2);

        if screen.receiver().held_count(Control::Pointer(MouseButton::Left)) != 1 {
            return Err("hold did not start a left click".into());
        }
        screen.handle_touch(&TouchEvent::ended(1, pos));
        if Self::clicked(screen, MouseButton::Right) {
            return Err("hold also right clicked".into());
        }
        Ok(())
    }

    fn drag(&self, screen: &mut Screen) -> Result<(), String> {
        let pos = Vec2::new(800.0, 400.0);
        let step = Vec2::new(self.config.controls.threshold_px * 1.5, 0.0);
        screen.handle_touch(&TouchEvent::started(1, pos));
        for i in 1..=5 {
            screen.handle_touch(&TouchEvent::moved(1, pos + step * i as f32));
            Self::frames(screen, self.config.controls.dig_time() / 2);
        }
        screen.handle_touch(&TouchEvent::ended(1, pos + step * 5.0));

        if Self::clicked(screen, MouseButton::Left) || Self::clicked(screen, MouseButton::Right) {
            return Err("drag produced a click".into());
        }
        if screen.take_yaw_change() == 0.0 {
            return Err("drag did not turn the camera".into());
        }
        Ok(())
    }

    fn slide(&self, screen: &mut Screen) -> Result<(), String> {
        let tracker = screen.button_tracker();
        let (Some(left), Some(right)) = (
            tracker.get(VirtualButtonId::Left).map(|b| b.rect.center()),
            tracker.get(VirtualButtonId::Right).map(|b| b.rect.center()),
        ) else {
            return Err("pad buttons missing".into());
        };

        screen.handle_touch(&TouchEvent::started(1, left));
        screen.handle_touch(&TouchEvent::moved(1, right));
        if screen.button_tracker().holding(1) != Some(VirtualButtonId::Right) {
            return Err("finger did not move over to the right button".into());
        }
        screen.handle_touch(&TouchEvent::ended(1, right));
        if !screen.receiver().is_balanced() {
            return Err("slide left a key held".into());
        }
        Ok(())
    }

    fn hide_with_fingers_down(&self, screen: &mut Screen) -> Result<(), String> {
        let jump = screen
            .button_tracker()
            .get(VirtualButtonId::Jump)
            .map(|b| b.rect.center())
            .ok_or("jump button missing")?;

        screen.handle_touch(&TouchEvent::started(1, jump));
        screen.handle_touch(&TouchEvent::started(2, jump));
        screen.handle_touch(&TouchEvent::started(3, Vec2::new(640.0, 360.0)));
        Self::frames(screen, self.config.controls.dig_time() * 2);
        screen.hide();

        if screen.active_pointers() != 0 || !screen.button_tracker().is_idle() {
            return Err("pointers survived hiding".into());
        }
        let ledger = screen.receiver();
        if !ledger.is_balanced() {
            return Err(format!("{} controls still held", ledger.outstanding()));
        }
        Ok(())
    }
}

impl Default for GestureCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for GestureCheck {
    fn name(&self) -> &'static str {
        "Gestures"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Replays touch scripts through the dispatcher and checks the output")
    }

    fn check(&self) -> CheckResult {
        type Script = fn(&GestureCheck, &mut Screen) -> Result<(), String>;
        let scripts: [(&str, Script); 5] = [
            ("quick tap", Self::tap),
            ("press and hold", Self::hold),
            ("drag", Self::drag),
            ("slide between buttons", Self::slide),
            ("hide with fingers down", Self::hide_with_fingers_down),
        ];

        let mut findings = Findings::new();
        for (name, script) in scripts {
            let mut screen = match self.screen() {
                Ok(screen) => screen,
                Err(e) => return CheckResult::fail(format!("Overlay setup failed: {e}")),
            };
            match script(self, &mut screen) {
                Ok(()) => findings.ok(format!(
                    "{name}: {} events",
                    screen.receiver().events().len()
                )),
                Err(why) => findings.fail(format!("{name}: {why}")),
            }
        }

        findings.finish(
            &format!("{} scripts replayed", scripts.len()),
            "Scripts replayed with warnings",
            "Gesture script mismatch",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckStatus;

    #[test]
    fn test_builtin_gestures_pass() {
        let result = GestureCheck::new().check();
        assert_eq!(result.status, CheckStatus::Pass, "{:?}", result.notes);
    }

    #[test]
    fn test_unbound_keymap_fails_setup() {
        let mut config = TouchConfig::builtin("broken");
        config.keymap.remove("jump");
        let result = GestureCheck::with_config(config).check();
        assert!(result.status.is_fail());
        assert!(result.message.contains("jump"));
    }
}
