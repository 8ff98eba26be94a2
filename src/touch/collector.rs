//! Raw touch collection from winit events

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::WindowEvent;

use super::events::{PointerId, TouchEvent, TouchPhase};

/// Translates winit touch events into logical-pixel [`TouchEvent`]s
pub struct TouchCollector {
    scale_factor: f32,
}

impl TouchCollector {
    /// Creates a new touch collector
    pub fn new() -> Self {
        Self { scale_factor: 1.0 }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Handle a winit window event, returning the touch it carried
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<TouchEvent> {
        match event {
            WindowEvent::Touch(touch) => Some(self.translate(touch.phase, touch.location, touch.id)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor as f32;
                None
            }
            _ => None,
        }
    }

    /// Converts one touch sample from physical to logical pixels
    pub fn translate(
        &self,
        phase: winit::event::TouchPhase,
        location: PhysicalPosition<f64>,
        id: PointerId,
    ) -> TouchEvent {
        TouchEvent {
            id,
            phase: phase.into(),
            pos: Vec2::new(
                location.x as f32 / self.scale_factor,
                location.y as f32 / self.scale_factor,
            ),
        }
    }
}

impl Default for TouchCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<winit::event::TouchPhase> for TouchPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        use winit::event::TouchPhase as WP;
        match phase {
            WP::Started => Self::Started,
            WP::Moved => Self::Moved,
            WP::Ended => Self::Ended,
            WP::Cancelled => Self::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::TouchPhase as WP;

    #[test]
    fn test_translate_scales_to_logical_pixels() {
        let mut collector = TouchCollector::new();
        collector.set_scale_factor(2.0);

        let event = collector.translate(WP::Started, PhysicalPosition::new(300.0, 120.0), 4);
        assert_eq!(event, TouchEvent::started(4, Vec2::new(150.0, 60.0)));
    }

    #[test]
    fn test_cancel_maps_to_cancelled() {
        let collector = TouchCollector::default();
        let event = collector.translate(WP::Cancelled, PhysicalPosition::new(1.0, 1.0), 9);
        assert_eq!(event.phase, TouchPhase::Cancelled);
        assert_eq!(event.pos, Vec2::ONE);
    }
}
