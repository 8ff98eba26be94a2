//! Touch dispatch: routes each finger to a button, a HUD shortcut or the
//! camera, and turns the camera finger into virtual mouse clicks.

use std::collections::BTreeMap;
use std::time::Duration;

use glam::Vec2;
use tracing::{debug, info, trace};

use crate::config::{ControlsConfig, TouchConfig};

use super::actions::VirtualButtonId;
use super::buttons::ButtonTracker;
use super::error::TouchError;
use super::events::{ControlEvent, KeyCode, MouseButton, PointerId, TouchEvent, TouchPhase};
use super::geometry::{Ray, Rect};
use super::gesture::{LookState, MoveTouch};
use super::handler::{InputReceiver, RayPicker};
use super::layout::{ButtonLayout, LayoutParams};

/// What an active pointer is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRole {
    /// Not attached to anything; picks up a button it slides onto
    Unbound,
    /// Holding a button down
    Button(VirtualButtonId),
    /// Fired an immediate-release button; ignored until lifted
    Spent,
    /// Absorbed by the control pad gaps or a HUD slot, with the hotbar key it pressed
    Hud(Option<KeyCode>),
    /// The move touch
    Move,
}

#[derive(Debug, Clone, Copy)]
struct PointerRecord {
    id: PointerId,
    pos: Vec2,
    role: PointerRole,
}

/// Snapshot of one button for the overlay renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonView {
    pub id: VirtualButtonId,
    pub rect: Rect,
    pub caption: &'static str,
    pub image: &'static str,
    pub visible: bool,
    pub pressed: bool,
}

/// On-screen controls for a touch device
///
/// Owns every piece of touch state. Callers feed it raw [`TouchEvent`]s and
/// one [`tick`](Self::tick) per frame; it answers with [`ControlEvent`]s sent
/// to the receiver `R` and asks the picker `P` for aiming rays.
pub struct TouchScreen<R, P> {
    controls: ControlsConfig,
    keymap: BTreeMap<String, KeyCode>,
    params: LayoutParams,
    control_pad: Rect,
    buttons: ButtonTracker,
    hud: BTreeMap<usize, Rect>,
    pointers: Vec<PointerRecord>,
    move_touch: Option<MoveTouch>,
    look: LookState,
    shootline: Ray,
    /// Frame clock, advanced only by `tick`
    now: Duration,
    visible: bool,
    receiver: R,
    picker: P,
}

impl<R: InputReceiver, P: RayPicker> TouchScreen<R, P> {
    /// Lays out the overlay and resolves every button's key
    ///
    /// The HUD scale always comes from `config`, overriding `params`.
    /// Fails if the keymap lacks an action one of the laid-out buttons needs.
    pub fn new(
        config: &TouchConfig,
        params: LayoutParams,
        receiver: R,
        picker: P,
    ) -> Result<Self, TouchError> {
        let params = params.with_hud_scaling(config.controls.hud_scaling);
        let layout = ButtonLayout::compute(&params);
        let buttons = ButtonTracker::new(
            &layout,
            &config.keymap,
            config.controls.fast_repeat(),
            config.controls.slow_repeat(),
        )?;

        info!(
            profile = %config.profile,
            width = params.width,
            height = params.height,
            button_size = params.button_size(),
            menu = ?params.menu,
            "Touch overlay initialized"
        );

        Ok(Self {
            controls: config.controls.clone(),
            keymap: config.keymap.clone(),
            params,
            control_pad: layout.control_pad,
            buttons,
            hud: BTreeMap::new(),
            pointers: Vec::with_capacity(10),
            move_touch: None,
            look: LookState::default(),
            shootline: Ray::default(),
            now: Duration::ZERO,
            visible: true,
            receiver,
            picker,
        })
    }

    /// Handles one raw touch event
    ///
    /// Events arriving while the overlay is hidden are dropped.
    pub fn handle_touch(&mut self, event: &TouchEvent) {
        if !self.visible {
            debug!(id = event.id, phase = ?event.phase, "Touch event while hidden, ignoring");
            return;
        }

        match event.phase {
            TouchPhase::Started => self.press(event.id, event.pos),
            TouchPhase::Moved => self.motion(event.id, event.pos),
            TouchPhase::Ended | TouchPhase::Cancelled => self.release(event.id),
        }
    }

    /// Advances the frame clock: key repeats and press-and-hold digging
    pub fn tick(&mut self, dt: Duration) {
        self.now += dt;
        self.buttons.advance(dt, &mut self.receiver);

        let dig_time = self.controls.dig_time();
        let Some(touch) = self
            .move_touch
            .as_mut()
            .filter(|t| t.wants_promotion(self.now, dig_time))
        else {
            return;
        };
        touch.promoted = true;
        let origin = touch.origin;

        debug!(pointer = touch.pointer, ?origin, "Hold detected, starting left click");
        self.aim(origin);
        self.emit(ControlEvent::PointerPress {
            button: MouseButton::Left,
            pos: origin,
        });
    }

    pub fn show(&mut self) {
        if !self.visible {
            self.toggle(true);
        }
    }

    /// Hides the overlay, releasing everything still held
    pub fn hide(&mut self) {
        if self.visible {
            self.toggle(false);
        }
    }

    fn toggle(&mut self, visible: bool) {
        info!(visible, active_pointers = self.pointers.len(), "Toggling touch overlay");
        self.visible = visible;
        self.buttons.set_visible(visible);

        if !visible {
            self.release_all();
        }
    }

    /// Recomputes the layout for a new surface
    ///
    /// Every active pointer is released first so nothing stays held on a
    /// button that moved. HUD slots are kept until the owner resets them. On
    /// error the previous layout stays in place untouched.
    pub fn relayout(&mut self, params: LayoutParams) -> Result<(), TouchError> {
        let params = params.with_hud_scaling(self.controls.hud_scaling);
        let layout = ButtonLayout::compute(&params);
        let mut buttons = ButtonTracker::new(
            &layout,
            &self.keymap,
            self.controls.fast_repeat(),
            self.controls.slow_repeat(),
        )?;

        self.release_all();
        buttons.set_visible(self.visible);

        info!(width = params.width, height = params.height, "Touch overlay relaid out");
        self.params = params;
        self.control_pad = layout.control_pad;
        self.buttons = buttons;
        Ok(())
    }

    /// Forgets every registered HUD slot
    pub fn reset_hud(&mut self) {
        self.hud.clear();
    }

    /// Registers (or replaces) the screen area of hotbar slot `index`
    pub fn register_hud(&mut self, index: usize, rect: Rect) {
        self.hud.insert(index, rect);
    }

    /// Button under `pos`, if a visible one is there
    pub fn hit_test(&self, pos: Vec2) -> Option<VirtualButtonId> {
        self.buttons.hit_test(pos)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current aiming ray
    pub fn shootline(&self) -> Ray {
        self.shootline
    }

    /// Camera yaw accumulated since the previous call, in degrees
    pub fn take_yaw_change(&mut self) -> f32 {
        self.look.take_yaw_change()
    }

    /// Camera pitch in degrees, clamped to ±180
    pub fn pitch(&self) -> f32 {
        self.look.pitch()
    }

    pub fn layout_params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn control_pad_rect(&self) -> Rect {
        self.control_pad
    }

    /// Buttons to draw, in layout order
    pub fn buttons(&self) -> impl Iterator<Item = ButtonView> + '_ {
        self.buttons.iter().map(|b| ButtonView {
            id: b.id,
            rect: b.rect,
            caption: b.id.caption(),
            image: b.id.image(),
            visible: b.visible,
            pressed: b.is_pressed(),
        })
    }

    pub fn button_tracker(&self) -> &ButtonTracker {
        &self.buttons
    }

    /// Number of fingers currently on the screen
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_role(&self, id: PointerId) -> Option<PointerRole> {
        self.pointers.iter().find(|p| p.id == id).map(|p| p.role)
    }

    pub fn move_touch(&self) -> Option<&MoveTouch> {
        self.move_touch.as_ref()
    }

    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    fn emit(&mut self, event: ControlEvent) {
        self.receiver.on_event(&event);
    }

    fn aim(&mut self, pos: Vec2) {
        self.shootline = self.picker.ray_at(pos);
        let ray = self.shootline;
        self.emit(ControlEvent::AimChanged { ray });
    }

    fn press(&mut self, id: PointerId, pos: Vec2) {
        if self.pointers.iter().any(|p| p.id == id) {
            trace!(id, "Press for an active pointer, treating as move");
            self.motion(id, pos);
            return;
        }

        let role = if let Some(button) = self.buttons.hit_test(pos) {
            self.bind(button, id)
        } else if self.control_pad.contains(pos) {
            PointerRole::Hud(None)
        } else if let Some(slot) = self.hud_slot_at(pos) {
            let key = KeyCode::hotbar(slot);
            if let Some(key) = key {
                self.emit(ControlEvent::KeyPress { key });
            }
            PointerRole::Hud(key)
        } else if self.move_touch.is_none() {
            self.move_touch = Some(MoveTouch::new(id, pos, self.now));
            self.aim(pos);
            self.emit(ControlEvent::PointerPress {
                button: MouseButton::Middle,
                pos,
            });
            PointerRole::Move
        } else {
            debug!(id, "Second move touch while one is active, dropping");
            PointerRole::Unbound
        };

        trace!(id, ?pos, ?role, "Pointer down");
        self.pointers.push(PointerRecord { id, pos, role });
    }

    fn motion(&mut self, id: PointerId, pos: Vec2) {
        let Some(index) = self.pointers.iter().position(|p| p.id == id) else {
            return;
        };
        if self.pointers[index].pos == pos {
            return;
        }
        self.pointers[index].pos = pos;

        match self.pointers[index].role {
            PointerRole::Move => self.steer(pos),
            PointerRole::Button(current) => {
                let hit = self.buttons.hit_test(pos);
                if hit == Some(current) {
                    return;
                }
                self.buttons.deactivate(current, id, &mut self.receiver);
                self.pointers[index].role = match hit {
                    Some(next) => self.bind(next, id),
                    None => PointerRole::Unbound,
                };
            }
            PointerRole::Unbound => {
                if let Some(next) = self.buttons.hit_test(pos) {
                    self.pointers[index].role = self.bind(next, id);
                }
            }
            PointerRole::Hud(_) | PointerRole::Spent => {}
        }
    }

    fn bind(&mut self, button: VirtualButtonId, id: PointerId) -> PointerRole {
        if self.buttons.activate(button, id, &mut self.receiver) {
            PointerRole::Button(button)
        } else {
            PointerRole::Spent
        }
    }

    /// Moves the camera finger: rotate the view, or only retarget while digging
    fn steer(&mut self, pos: Vec2) {
        let retarget_only = self.controls.touch_target;
        let threshold = self.controls.threshold_px;
        let Some(touch) = self.move_touch.as_mut() else {
            return;
        };

        if touch.promoted && retarget_only {
            self.aim(pos);
            return;
        }
        if let Some(delta) = touch.drag_to(pos, threshold) {
            self.look.apply(delta, self.controls.sensitivity);
            self.aim(pos);
        }
    }

    fn release(&mut self, id: PointerId) {
        let Some(index) = self.pointers.iter().position(|p| p.id == id) else {
            trace!(id, "Release for an unknown pointer");
            return;
        };
        let record = self.pointers.remove(index);
        trace!(id, role = ?record.role, "Pointer up");

        match record.role {
            PointerRole::Button(button) => {
                self.buttons.deactivate(button, id, &mut self.receiver);
            }
            PointerRole::Hud(Some(key)) => self.emit(ControlEvent::KeyRelease { key }),
            PointerRole::Move => self.finish_move_touch(),
            PointerRole::Hud(None) | PointerRole::Spent | PointerRole::Unbound => {}
        }
    }

    fn release_all(&mut self) {
        while let Some(record) = self.pointers.first() {
            let id = record.id;
            self.release(id);
        }
        debug_assert!(self.buttons.is_idle());
        debug_assert!(self.move_touch.is_none());
    }

    /// Sends the releases matching what the move touch pressed
    ///
    /// Clicks are always released where the finger went down.
    fn finish_move_touch(&mut self) {
        let Some(touch) = self.move_touch.take() else {
            return;
        };
        let origin = touch.origin;

        if touch.promoted {
            self.emit(ControlEvent::PointerRelease {
                button: MouseButton::Left,
                pos: origin,
            });
        }
        self.emit(ControlEvent::PointerRelease {
            button: MouseButton::Middle,
            pos: origin,
        });

        if touch.is_tap() {
            self.quick_tap(&touch);
            self.aim(origin);
        }
    }

    /// Turns a short stationary touch into a right click at its origin
    ///
    /// Touches shorter than the configured minimum are ignored.
    fn quick_tap(&mut self, touch: &MoveTouch) -> bool {
        let held = self.now.saturating_sub(touch.down_time);
        if held < self.controls.quick_tap_min() {
            debug!(?held, "Touch too short for a tap");
            return false;
        }

        debug!(pointer = touch.pointer, origin = ?touch.origin, "Quick tap");
        self.aim(touch.origin);
        self.emit(ControlEvent::PointerPress {
            button: MouseButton::Right,
            pos: touch.origin,
        });
        self.emit(ControlEvent::PointerRelease {
            button: MouseButton::Right,
            pos: touch.origin,
        });
        true
    }

    fn hud_slot_at(&self, pos: Vec2) -> Option<usize> {
        self.hud
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(&index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use crate::touch::layout::MenuStyle;

    struct FlatPicker;

    impl RayPicker for FlatPicker {
        fn ray_at(&self, screen: Vec2) -> Ray {
            Ray::new(screen.extend(0.0), Vec3::NEG_Z)
        }
    }

    type Screen = TouchScreen<Vec<ControlEvent>, FlatPicker>;

    const OPEN: Vec2 = Vec2::new(640.0, 360.0);

    fn screen_with(config: &TouchConfig) -> Screen {
        TouchScreen::new(config, LayoutParams::new(1280.0, 720.0), Vec::new(), FlatPicker).unwrap()
    }

    fn screen() -> Screen {
        screen_with(&TouchConfig::builtin("test"))
    }

    fn center(screen: &Screen, id: VirtualButtonId) -> Vec2 {
        screen.button_tracker().get(id).unwrap().rect.center()
    }

    fn clicks(events: &[ControlEvent]) -> Vec<ControlEvent> {
        events
            .iter()
            .filter(|e| !matches!(e, ControlEvent::AimChanged { .. }))
            .copied()
            .collect()
    }

    #[test]
    fn test_hud_slot_presses_hotbar_key() {
        let mut screen = screen();
        screen.register_hud(2, Rect::new(500.0, 600.0, 50.0, 50.0));

        screen.handle_touch(&TouchEvent::started(1, Vec2::new(525.0, 625.0)));
        assert_eq!(screen.pointer_role(1), Some(PointerRole::Hud(Some(KeyCode::Num3))));
        assert!(screen.move_touch().is_none());

        screen.handle_touch(&TouchEvent::ended(1, Vec2::new(525.0, 625.0)));
        assert_eq!(
            screen.receiver().as_slice(),
            &[
                ControlEvent::KeyPress { key: KeyCode::Num3 },
                ControlEvent::KeyRelease { key: KeyCode::Num3 },
            ]
        );
    }

    #[test]
    fn test_hud_slot_past_nine_is_absorbed() {
        let mut screen = screen();
        screen.register_hud(9, Rect::new(500.0, 600.0, 50.0, 50.0));

        screen.handle_touch(&TouchEvent::started(1, Vec2::new(510.0, 610.0)));
        screen.handle_touch(&TouchEvent::ended(1, Vec2::new(510.0, 610.0)));
        assert!(screen.receiver().is_empty());
    }

    #[test]
    fn test_lowest_hud_index_wins_and_reset_clears() {
        let mut screen = screen();
        let rect = Rect::new(500.0, 600.0, 50.0, 50.0);
        screen.register_hud(5, rect);
        screen.register_hud(1, rect);

        screen.handle_touch(&TouchEvent::started(1, rect.center()));
        assert_eq!(screen.pointer_role(1), Some(PointerRole::Hud(Some(KeyCode::Num2))));
        screen.handle_touch(&TouchEvent::ended(1, rect.center()));

        screen.reset_hud();
        screen.handle_touch(&TouchEvent::started(2, rect.center()));
        assert_eq!(screen.pointer_role(2), Some(PointerRole::Move));
    }

    #[test]
    fn test_control_pad_gap_is_absorbed() {
        let mut screen = screen();
        let gap = Vec2::new(259.0, 600.0);
        assert_eq!(screen.hit_test(gap), None);
        assert!(screen.control_pad_rect().contains(gap));

        screen.handle_touch(&TouchEvent::started(1, gap));
        assert_eq!(screen.pointer_role(1), Some(PointerRole::Hud(None)));
        assert!(screen.receiver().is_empty());
    }

    #[test]
    fn test_events_ignored_while_hidden() {
        let mut screen = screen();
        screen.hide();
        screen.handle_touch(&TouchEvent::started(1, OPEN));
        assert_eq!(screen.active_pointers(), 0);
        assert!(screen.receiver().is_empty());
        assert!(screen.buttons().all(|b| !b.visible));

        screen.show();
        assert!(screen.is_visible());
        screen.handle_touch(&TouchEvent::started(1, OPEN));
        assert_eq!(screen.active_pointers(), 1);
    }

    #[test]
    fn test_second_free_finger_is_dropped_then_picks_up_button() {
        let mut screen = screen();
        screen.handle_touch(&TouchEvent::started(1, OPEN));
        screen.handle_touch(&TouchEvent::started(2, Vec2::new(700.0, 400.0)));
        assert_eq!(screen.pointer_role(2), Some(PointerRole::Unbound));
        assert_eq!(screen.move_touch().map(|t| t.pointer), Some(1));

        let jump = center(&screen, VirtualButtonId::Jump);
        screen.receiver_mut().clear();
        screen.handle_touch(&TouchEvent::moved(2, jump));
        assert_eq!(screen.pointer_role(2), Some(PointerRole::Button(VirtualButtonId::Jump)));
        assert_eq!(
            screen.receiver().as_slice(),
            &[ControlEvent::KeyPress { key: KeyCode::Space }]
        );
    }

    #[test]
    fn test_repeated_press_is_treated_as_move() {
        let mut screen = screen();
        let left = center(&screen, VirtualButtonId::Left);
        let right = center(&screen, VirtualButtonId::Right);

        screen.handle_touch(&TouchEvent::started(1, left));
        screen.handle_touch(&TouchEvent::started(1, right));
        assert_eq!(screen.active_pointers(), 1);
        assert_eq!(
            screen.receiver().as_slice(),
            &[
                ControlEvent::KeyPress { key: KeyCode::A },
                ControlEvent::KeyRelease { key: KeyCode::A },
                ControlEvent::KeyPress { key: KeyCode::D },
            ]
        );
    }

    #[test]
    fn test_unknown_release_and_duplicate_moves_are_noops() {
        let mut screen = screen();
        screen.handle_touch(&TouchEvent::ended(42, OPEN));
        screen.handle_touch(&TouchEvent::moved(42, OPEN));
        assert!(screen.receiver().is_empty());

        screen.handle_touch(&TouchEvent::started(1, OPEN));
        let before = screen.receiver().len();
        screen.handle_touch(&TouchEvent::moved(1, OPEN));
        screen.handle_touch(&TouchEvent::moved(1, OPEN));
        assert_eq!(screen.receiver().len(), before);
    }

    #[test]
    fn test_immediate_button_fires_once_per_touch() {
        let mut screen = screen();
        let chat = center(&screen, VirtualButtonId::Chat);

        screen.handle_touch(&TouchEvent::started(1, chat));
        assert_eq!(screen.pointer_role(1), Some(PointerRole::Spent));
        screen.handle_touch(&TouchEvent::moved(1, chat + Vec2::new(2.0, 2.0)));
        screen.tick(Duration::from_secs(3));
        screen.handle_touch(&TouchEvent::ended(1, chat));

        assert_eq!(
            screen.receiver().as_slice(),
            &[
                ControlEvent::KeyPress { key: KeyCode::T },
                ControlEvent::KeyRelease { key: KeyCode::T },
            ]
        );
    }

    #[test]
    fn test_promoted_touch_only_retargets() {
        let mut screen = screen();
        screen.handle_touch(&TouchEvent::started(1, OPEN));
        screen.tick(Duration::from_millis(600));
        assert!(screen.move_touch().unwrap().promoted);

        screen.receiver_mut().clear();
        let target = OPEN + Vec2::new(80.0, 40.0);
        screen.handle_touch(&TouchEvent::moved(1, target));
        assert_eq!(screen.pitch(), 0.0);
        assert_eq!(screen.take_yaw_change(), 0.0);
        assert_eq!(screen.shootline().origin, target.extend(0.0));
        assert!(clicks(screen.receiver()).is_empty());
    }

    #[test]
    fn test_promoted_touch_rotates_without_touch_target() {
        let mut config = TouchConfig::builtin("test");
        config.controls.touch_target = false;
        let mut screen = screen_with(&config);

        screen.handle_touch(&TouchEvent::started(1, OPEN));
        screen.tick(Duration::from_millis(600));
        screen.handle_touch(&TouchEvent::moved(1, OPEN + Vec2::new(50.0, 25.0)));

        assert_eq!(screen.take_yaw_change(), -10.0);
        assert_eq!(screen.pitch(), 5.0);
    }

    #[test]
    fn test_relayout_releases_held_buttons() {
        let mut screen = screen();
        let jump = center(&screen, VirtualButtonId::Jump);
        screen.handle_touch(&TouchEvent::started(1, jump));
        screen.handle_touch(&TouchEvent::started(2, OPEN));

        screen
            .relayout(LayoutParams::new(1920.0, 1080.0).with_menu(MenuStyle::Menu))
            .unwrap();

        assert_eq!(screen.active_pointers(), 0);
        assert!(screen.button_tracker().is_idle());
        assert!(screen.buttons().any(|b| b.id == VirtualButtonId::Menu));
        assert_eq!(screen.layout_params().width, 1920.0);

        let released = clicks(screen.receiver());
        assert!(released.contains(&ControlEvent::KeyRelease { key: KeyCode::Space }));
        assert!(released.contains(&ControlEvent::PointerRelease {
            button: MouseButton::Middle,
            pos: OPEN,
        }));
    }

    #[test]
    fn test_failed_relayout_keeps_state() {
        let mut screen = screen();
        let jump = center(&screen, VirtualButtonId::Jump);
        screen.handle_touch(&TouchEvent::started(1, jump));
        screen.keymap.remove("forward");

        assert!(screen.relayout(LayoutParams::new(1920.0, 1080.0)).is_err());
        assert_eq!(screen.active_pointers(), 1);
        assert_eq!(screen.layout_params().width, 1280.0);
    }

    #[test]
    fn test_missing_binding_is_fatal() {
        let mut config = TouchConfig::builtin("test");
        config.keymap.remove("inventory");
        let result = TouchScreen::new(
            &config,
            LayoutParams::new(1280.0, 720.0),
            Vec::<ControlEvent>::new(),
            FlatPicker,
        );
        assert!(matches!(
            result,
            Err(TouchError::MissingBinding { action: "inventory" })
        ));
    }

    #[test]
    fn test_button_view_reports_pressed() {
        let mut screen = screen();
        let inventory = center(&screen, VirtualButtonId::Inventory);
        screen.handle_touch(&TouchEvent::started(3, inventory));

        let view = screen
            .buttons()
            .find(|b| b.id == VirtualButtonId::Inventory)
            .unwrap();
        assert!(view.pressed);
        assert_eq!(view.caption, "inv");
        assert_eq!(view.image, "inventory_btn.png");
    }
}
