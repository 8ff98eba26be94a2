//! Overlay layout health check

use crate::health::check::{CheckResult, Findings, SystemCheck};
use crate::touch::{ButtonLayout, LayoutParams, MenuStyle, Rect};

/// Smallest pad cell still comfortable under a thumb
const MIN_BUTTON_PX: f32 = 32.0;

/// Lays the overlay out on a set of landscape surfaces and checks the result
pub struct LayoutCheck {
    surfaces: Vec<(&'static str, LayoutParams)>,
}

impl LayoutCheck {
    pub fn new() -> Self {
        Self {
            surfaces: vec![
                ("phone", LayoutParams::new(1280.0, 720.0)),
                ("phone-hidpi", LayoutParams::new(1080.0, 540.0).with_density(2.75)),
                ("tablet", LayoutParams::new(2048.0, 1536.0).with_density(2.0)),
                (
                    "small",
                    LayoutParams::new(800.0, 480.0)
                        .with_density(1.5)
                        .with_hud_scaling(0.6)
                        .with_menu(MenuStyle::Menu),
                ),
            ],
        }
    }

    pub fn with_surface(mut self, name: &'static str, params: LayoutParams) -> Self {
        self.surfaces.push((name, params));
        self
    }

    fn inspect(name: &str, params: &LayoutParams, findings: &mut Findings) {
        let layout = ButtonLayout::compute(params);
        let screen = Rect::new(0.0, 0.0, params.width, params.height);

        if let Some(slot) = layout.slots.iter().find(|s| !screen.encloses(&s.rect)) {
            findings.fail(format!("{name}: {:?} lies outside the surface", slot.id));
            return;
        }
        if let Some(slot) = layout
            .slots
            .iter()
            .take(9)
            .find(|s| !layout.control_pad.encloses(&s.rect))
        {
            findings.fail(format!("{name}: {:?} sticks out of the control pad", slot.id));
            return;
        }

        for (i, a) in layout.slots.iter().enumerate() {
            if let Some(b) = layout.slots[i + 1..].iter().find(|b| a.rect.overlaps(&b.rect)) {
                findings.fail(format!("{name}: {:?} overlaps {:?}", a.id, b.id));
                return;
            }
        }

        let size = params.button_size();
        if size < MIN_BUTTON_PX {
            findings.warn(format!("{name}: buttons are only {size}px"));
        } else {
            findings.ok(format!(
                "{name}: {} buttons of {size}px on {}x{}",
                layout.slots.len(),
                params.width,
                params.height
            ));
        }
    }
}

impl Default for LayoutCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for LayoutCheck {
    fn name(&self) -> &'static str {
        "Layout"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Checks that buttons fit the surface without overlapping")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();
        for (name, params) in &self.surfaces {
            Self::inspect(name, params, &mut findings);
        }

        let pass = format!("{} surfaces laid out", self.surfaces.len());
        findings.finish(&pass, "Layout usable with warnings", "Layout is broken")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckStatus;

    #[test]
    fn test_default_surfaces_pass() {
        let result = LayoutCheck::new().check();
        assert_eq!(result.status, CheckStatus::Pass, "{:?}", result.notes);
    }

    #[test]
    fn test_square_surface_overlaps() {
        let result = LayoutCheck::new()
            .with_surface("square", LayoutParams::new(720.0, 720.0).with_density(3.0))
            .check();
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn test_tiny_buttons_warn() {
        let result = LayoutCheck::new()
            .with_surface("tiny", LayoutParams::new(640.0, 360.0).with_hud_scaling(0.3))
            .check();
        assert_eq!(result.status, CheckStatus::Warn);
    }
}
