//! Press/release accounting for the control event stream

use super::events::{ControlEvent, KeyCode, MouseButton};
use super::handler::InputReceiver;

/// Anything that can be held down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Key(KeyCode),
    Pointer(MouseButton),
}

/// Receiver that records events and checks press/release symmetry
///
/// Two buttons bound to the same key may hold it down twice; each press
/// needs its own release.
#[derive(Debug, Clone, Default)]
pub struct PressLedger {
    events: Vec<ControlEvent>,
    held: Vec<(Control, u32)>,
    presses: usize,
    releases: usize,
    unmatched_releases: usize,
}

impl PressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ControlEvent] {
        &self.events
    }

    /// Drains the recorded events, keeping the held-down bookkeeping
    pub fn take_events(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn presses(&self) -> usize {
        self.presses
    }

    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Releases that arrived for a control that was not down
    pub fn unmatched_releases(&self) -> usize {
        self.unmatched_releases
    }

    /// How many presses of `control` are still waiting for a release
    pub fn held_count(&self, control: Control) -> u32 {
        self.held
            .iter()
            .find(|(c, _)| *c == control)
            .map_or(0, |(_, n)| *n)
    }

    /// Presses still waiting for a release, over all controls
    pub fn outstanding(&self) -> u32 {
        self.held.iter().map(|(_, n)| n).sum()
    }

    /// Nothing held and no stray releases seen
    pub fn is_balanced(&self) -> bool {
        self.outstanding() == 0 && self.unmatched_releases == 0
    }

    fn press(&mut self, control: Control) {
        self.presses += 1;
        match self.held.iter_mut().find(|(c, _)| *c == control) {
            Some((_, n)) => *n += 1,
            None => self.held.push((control, 1)),
        }
    }

    fn release(&mut self, control: Control) {
        self.releases += 1;
        match self.held.iter_mut().find(|(c, n)| *c == control && *n > 0) {
            Some((_, n)) => *n -= 1,
            None => self.unmatched_releases += 1,
        }
        self.held.retain(|(_, n)| *n > 0);
    }
}

impl InputReceiver for PressLedger {
    fn on_event(&mut self, event: &ControlEvent) {
        self.events.push(*event);
        match *event {
            ControlEvent::KeyPress { key } => self.press(Control::Key(key)),
            ControlEvent::KeyRelease { key } => self.release(Control::Key(key)),
            ControlEvent::PointerPress { button, .. } => self.press(Control::Pointer(button)),
            ControlEvent::PointerRelease { button, .. } => self.release(Control::Pointer(button)),
            ControlEvent::AimChanged { .. } => {}
        }
    }
}
