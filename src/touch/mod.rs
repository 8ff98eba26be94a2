//! Touchscreen controls
//!
//! Turns raw multi-touch input into the key and mouse events a desktop
//! player would produce:
//! - Fingers on the on-screen buttons hold movement and action keys
//! - Fingers on registered HUD slots press the hotbar number keys
//! - One free finger steers the camera, taps to interact (right click) and
//!   digs when held still (left click)
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → TouchCollector → TouchEvent
//!                                          ↓
//!                                     TouchScreen ── hit test ──→ ButtonTracker
//!                                     (pointer roles,                 ↓
//!                                      move touch,              key press/release
//!                                      frame clock)                   ↓
//!                                          ↓                    InputReceiver
//!                                   pointer clicks, aim ─────────────→
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut screen = TouchScreen::new(&config, LayoutParams::new(w, h), receiver, camera)?;
//!
//! // In window_event()
//! if let Some(touch) = collector.handle_window_event(&event) {
//!     screen.handle_touch(&touch);
//! }
//!
//! // Each frame
//! screen.tick(dt);
//! ```

mod actions;
mod buttons;
mod collector;
mod error;
mod events;
mod geometry;
mod gesture;
mod handler;
mod layout;
mod ledger;
mod screen;

// Re-export public API
pub use actions::{Binding, VirtualButtonId, resolve_key};
pub use buttons::{ButtonState, ButtonTracker};
pub use collector::TouchCollector;
pub use error::TouchError;
pub use events::{ControlEvent, KeyCode, MouseButton, PointerId, TouchEvent, TouchPhase};
pub use geometry::{Ray, Rect};
pub use gesture::{LookState, MoveTouch};
pub use handler::{InputReceiver, RayPicker};
pub use layout::{ButtonLayout, ButtonSlot, LayoutParams, MenuStyle, RepeatRate};
pub use ledger::{Control, PressLedger};
pub use screen::{ButtonView, PointerRole, TouchScreen};
