//! Per-button holder bookkeeping, key emission and repeat timing

use std::collections::BTreeMap;
use std::time::Duration;

use glam::Vec2;
use tracing::{trace, warn};

use super::actions::{VirtualButtonId, resolve_key};
use super::error::TouchError;
use super::events::{ControlEvent, KeyCode, PointerId};
use super::geometry::Rect;
use super::handler::InputReceiver;
use super::layout::{ButtonLayout, RepeatRate};

/// Live state of one virtual button
#[derive(Debug, Clone)]
pub struct ButtonState {
    pub id: VirtualButtonId,
    pub rect: Rect,
    /// Resolved once when the tracker is built
    pub key: Option<KeyCode>,
    /// Pointers currently on the button, in arrival order
    holders: Vec<PointerId>,
    repeat_counter: Duration,
    repeat_delay: Duration,
    pub immediate_release: bool,
    pub visible: bool,
}

impl ButtonState {
    /// True while at least one pointer holds the button down
    pub fn is_pressed(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn holders(&self) -> &[PointerId] {
        &self.holders
    }

    pub fn repeat_delay(&self) -> Duration {
        self.repeat_delay
    }

    fn send(&self, pressed: bool, out: &mut impl InputReceiver) {
        let Some(key) = self.key else {
            return;
        };
        let event = if pressed {
            ControlEvent::KeyPress { key }
        } else {
            ControlEvent::KeyRelease { key }
        };
        out.on_event(&event);
    }
}

/// All buttons of the overlay, in hit-test priority order
#[derive(Debug, Clone)]
pub struct ButtonTracker {
    buttons: Vec<ButtonState>,
}

impl ButtonTracker {
    /// Builds button states for `layout`, resolving every binding up front
    pub fn new(
        layout: &ButtonLayout,
        keymap: &BTreeMap<String, KeyCode>,
        fast_repeat: Duration,
        slow_repeat: Duration,
    ) -> Result<Self, TouchError> {
        let buttons = layout
            .slots
            .iter()
            .map(|slot| {
                Ok(ButtonState {
                    id: slot.id,
                    rect: slot.rect,
                    key: resolve_key(slot.id, keymap)?,
                    holders: Vec::with_capacity(4),
                    repeat_counter: Duration::ZERO,
                    repeat_delay: match slot.repeat {
                        RepeatRate::Fast => fast_repeat,
                        RepeatRate::Slow => slow_repeat,
                    },
                    immediate_release: slot.immediate_release,
                    visible: true,
                })
            })
            .collect::<Result<Vec<_>, TouchError>>()?;

        Ok(Self { buttons })
    }

    /// First visible button containing `pos`
    pub fn hit_test(&self, pos: Vec2) -> Option<VirtualButtonId> {
        self.buttons
            .iter()
            .find(|b| b.visible && b.rect.contains(pos))
            .map(|b| b.id)
    }

    pub fn get(&self, id: VirtualButtonId) -> Option<&ButtonState> {
        self.buttons.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ButtonState> {
        self.buttons.iter()
    }

    /// Button currently held by `pointer`, if any
    pub fn holding(&self, pointer: PointerId) -> Option<VirtualButtonId> {
        self.buttons
            .iter()
            .find(|b| b.holders.contains(&pointer))
            .map(|b| b.id)
    }

    /// True when no button has a holder
    pub fn is_idle(&self) -> bool {
        self.buttons.iter().all(|b| b.holders.is_empty())
    }

    pub fn set_visible(&mut self, visible: bool) {
        for button in &mut self.buttons {
            button.visible = visible;
        }
    }

    /// Puts `pointer` on button `id`
    ///
    /// Only the first holder presses the key. Immediate-release buttons let
    /// go of the pointer again right away. Returns whether the pointer still
    /// holds the button afterwards.
    pub fn activate(
        &mut self,
        id: VirtualButtonId,
        pointer: PointerId,
        out: &mut impl InputReceiver,
    ) -> bool {
        if let Some(held) = self.holding(pointer) {
            debug_assert!(false, "pointer {pointer} already holds {held:?}");
            warn!(pointer, ?held, ?id, "Ignoring activation of a pointer that already holds a button");
            return false;
        }
        let Some(button) = self.buttons.iter_mut().find(|b| b.id == id) else {
            warn!(?id, "Activation of a button that is not laid out");
            return false;
        };

        button.holders.push(pointer);
        if button.holders.len() == 1 {
            trace!(?id, pointer, "Button pressed");
            button.repeat_counter = Duration::ZERO;
            button.send(true, out);
        }

        if button.immediate_release {
            button.holders.retain(|&p| p != pointer);
            if button.holders.is_empty() {
                button.send(false, out);
            }
            return false;
        }
        true
    }

    /// Takes `pointer` off button `id`; the key goes up with the last holder
    pub fn deactivate(
        &mut self,
        id: VirtualButtonId,
        pointer: PointerId,
        out: &mut impl InputReceiver,
    ) {
        let Some(button) = self
            .buttons
            .iter_mut()
            .find(|b| b.id == id && b.holders.contains(&pointer))
        else {
            debug_assert!(false, "pointer {pointer} does not hold {id:?}");
            warn!(pointer, ?id, "Ignoring release of a button the pointer does not hold");
            return;
        };

        button.holders.retain(|&p| p != pointer);
        if button.holders.is_empty() {
            trace!(?id, pointer, "Button released");
            button.repeat_counter = Duration::ZERO;
            button.send(false, out);
        }
    }

    /// Re-fires every held button whose repeat interval elapsed
    pub fn advance(&mut self, dt: Duration, out: &mut impl InputReceiver) {
        for button in &mut self.buttons {
            if button.holders.is_empty() {
                continue;
            }
            button.repeat_counter += dt;
            if button.repeat_counter < button.repeat_delay {
                continue;
            }
            button.repeat_counter = Duration::ZERO;
            button.send(false, out);
            button.send(true, out);
        }
    }
}
