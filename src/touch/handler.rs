//! Seams to the collaborators around the touch overlay

use glam::Vec2;

use super::events::ControlEvent;
use super::geometry::Ray;

/// Downstream consumer of synthesized control events
///
/// Events are delivered synchronously, in the order they are produced, from
/// inside `TouchScreen::handle_touch`, `tick`, `hide` and `relayout`.
pub trait InputReceiver {
    /// Handle one control event
    fn on_event(&mut self, event: &ControlEvent);
}

/// Collects every event, mostly useful in tests
impl InputReceiver for Vec<ControlEvent> {
    fn on_event(&mut self, event: &ControlEvent) {
        self.push(*event);
    }
}

impl<R: InputReceiver + ?Sized> InputReceiver for &mut R {
    fn on_event(&mut self, event: &ControlEvent) {
        (**self).on_event(event);
    }
}

/// Computes the aiming ray for a screen point
///
/// The scene, camera and projection live outside the overlay.
pub trait RayPicker {
    fn ray_at(&self, screen: Vec2) -> Ray;
}

impl<P: RayPicker + ?Sized> RayPicker for &P {
    fn ray_at(&self, screen: Vec2) -> Ray {
        (**self).ray_at(screen)
    }
}
