//! Button placement for a given surface
//!
//! The directional pad sits in the bottom-left corner, the action cluster in
//! the bottom-right and the menu row along the top centre. All sizes derive
//! from a single button size so the overlay scales with display density.

use serde::{Deserialize, Serialize};

use super::actions::VirtualButtonId;
use super::geometry::Rect;

/// Pad size in density-independent pixels at `hud_scaling = 1`
const PAD_SIZE_DP: f32 = 260.0;

/// Which button occupies the left slot of the top row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuStyle {
    /// Platform has a hardware back action; show the minimap toggle
    #[default]
    Minimap,
    /// No hardware back action; show an on-screen escape button
    Menu,
}

/// How quickly a held button re-fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatRate {
    Fast,
    Slow,
}

/// Inputs for a layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Surface width in logical pixels
    pub width: f32,
    /// Surface height in logical pixels
    pub height: f32,
    /// Display density (1.0 = 160 dpi)
    pub density: f32,
    /// User HUD scale multiplier
    pub hud_scaling: f32,
    pub menu: MenuStyle,
}

impl LayoutParams {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            density: 1.0,
            hud_scaling: 1.0,
            menu: MenuStyle::default(),
        }
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_hud_scaling(mut self, hud_scaling: f32) -> Self {
        self.hud_scaling = hud_scaling;
        self
    }

    pub fn with_menu(mut self, menu: MenuStyle) -> Self {
        self.menu = menu;
        self
    }

    /// Side length of the square directional pad
    pub fn control_pad_size(&self) -> f32 {
        (self.height / 1.5).min(self.density * self.hud_scaling * PAD_SIZE_DP)
    }

    /// Side length of one pad cell, snapped to whole pixels
    pub fn button_size(&self) -> f32 {
        (self.control_pad_size() / 3.0).floor()
    }
}

/// One placed button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonSlot {
    pub id: VirtualButtonId,
    pub rect: Rect,
    pub repeat: RepeatRate,
    /// Fires once per touch instead of staying held
    pub immediate_release: bool,
}

/// Result of a layout pass, in registration (hit-test priority) order
#[derive(Debug, Clone)]
pub struct ButtonLayout {
    pub control_pad: Rect,
    pub slots: Vec<ButtonSlot>,
}

impl ButtonLayout {
    pub fn compute(params: &LayoutParams) -> Self {
        let w = params.width;
        let h = params.height;
        let pad = params.control_pad_size();
        let b = params.button_size();

        let mut slots = Vec::with_capacity(16);

        // Pad cells by (column, row); row 0 is the top row.
        for col in 0..3 {
            for row in 0..3 {
                let id = match (col, row) {
                    (0, 0) => VirtualButtonId::ForwardOne,
                    (1, 0) => VirtualButtonId::ForwardTwo,
                    (2, 0) => VirtualButtonId::ForwardThree,
                    (0, 1) => VirtualButtonId::Left,
                    (1, 1) => VirtualButtonId::Empty,
                    (2, 1) => VirtualButtonId::Right,
                    (0, _) => VirtualButtonId::BackwardOne,
                    (1, _) => VirtualButtonId::BackwardTwo,
                    _ => VirtualButtonId::BackwardThree,
                };
                let x = b * col as f32;
                let y = h - b * (3 - row) as f32;
                slots.push(ButtonSlot {
                    id,
                    rect: Rect::new(x, y, b, b),
                    repeat: RepeatRate::Fast,
                    immediate_release: false,
                });
            }
        }

        let held = |id, rect| ButtonSlot {
            id,
            rect,
            repeat: RepeatRate::Slow,
            immediate_release: false,
        };
        slots.push(held(
            VirtualButtonId::Inventory,
            Rect::from_corners(w - b, h - b, w, h),
        ));
        slots.push(held(
            VirtualButtonId::Drop,
            Rect::from_corners(w - b * 0.75, h / 2.0 - b * 1.5, w, h / 2.0 - b * 0.75),
        ));
        slots.push(held(
            VirtualButtonId::Crouch,
            Rect::from_corners(w - b * 2.0, h - b * 0.5, w - b, h),
        ));
        slots.push(held(
            VirtualButtonId::Jump,
            Rect::from_corners(w - b * 2.0, h - b * 2.0, w - b, h - b),
        ));

        let one_shot = |id, rect| ButtonSlot {
            id,
            rect,
            repeat: RepeatRate::Slow,
            immediate_release: true,
        };
        let menu_id = match params.menu {
            MenuStyle::Minimap => VirtualButtonId::Minimap,
            MenuStyle::Menu => VirtualButtonId::Menu,
        };
        let top = b * 0.75;
        slots.push(one_shot(
            menu_id,
            Rect::from_corners(w / 2.0 - b * 1.125, 0.0, w / 2.0 - b * 0.375, top),
        ));
        slots.push(one_shot(
            VirtualButtonId::Range,
            Rect::from_corners(w / 2.0 - b * 0.375, 0.0, w / 2.0 + b * 0.375, top),
        ));
        slots.push(one_shot(
            VirtualButtonId::Chat,
            Rect::from_corners(w / 2.0 + b * 0.375, 0.0, w / 2.0 + b * 1.125, top),
        ));

        Self {
            control_pad: Rect::new(0.0, h - pad, pad, pad),
            slots,
        }
    }

    pub fn slot(&self, id: VirtualButtonId) -> Option<&ButtonSlot> {
        self.slots.iter().find(|s| s.id == id)
    }
}
