//! Touch input and the control events synthesized from it

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Ray;

/// Pointer identifier assigned by the platform to one finger
pub type PointerId = u64;

/// Lifecycle phase of a raw touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A finger touched the screen
    Started,
    /// A finger moved on the screen
    Moved,
    /// A finger was lifted from the screen
    Ended,
    /// The platform took the touch away (treated as a release)
    Cancelled,
}

/// Raw touch event in logical screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub id: PointerId,
    pub phase: TouchPhase,
    pub pos: Vec2,
}

impl TouchEvent {
    pub fn started(id: PointerId, pos: Vec2) -> Self {
        Self {
            id,
            phase: TouchPhase::Started,
            pos,
        }
    }

    pub fn moved(id: PointerId, pos: Vec2) -> Self {
        Self {
            id,
            phase: TouchPhase::Moved,
            pos,
        }
    }

    pub fn ended(id: PointerId, pos: Vec2) -> Self {
        Self {
            id,
            phase: TouchPhase::Ended,
            pos,
        }
    }
}

/// Events delivered to the downstream input consumer
///
/// Every press is eventually followed by exactly one matching release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Virtual key went down
    KeyPress { key: KeyCode },

    /// Virtual key went up
    KeyRelease { key: KeyCode },

    /// Virtual mouse button went down at a screen position
    PointerPress { button: MouseButton, pos: Vec2 },

    /// Virtual mouse button went up at a screen position
    PointerRelease { button: MouseButton, pos: Vec2 },

    /// The aiming ray was recomputed
    AimChanged { ray: Ray },
}

/// Virtual mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Sustained dig / attack, sent after press-and-hold
    Left,
    /// Use / interact, sent for a quick tap
    Right,
    /// "Something was touched" marker, sent on every move touch
    Middle,
}

/// Key code a virtual button can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Common keys
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    LShift,
    LControl,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Arrows
    Left,
    Right,
    Up,
    Down,
}

impl KeyCode {
    /// Number key for a hotbar slot; slot 0 is `Num1`
    ///
    /// Only nine slots are addressable.
    pub fn hotbar(slot: usize) -> Option<Self> {
        const SLOTS: [KeyCode; 9] = [
            KeyCode::Num1,
            KeyCode::Num2,
            KeyCode::Num3,
            KeyCode::Num4,
            KeyCode::Num5,
            KeyCode::Num6,
            KeyCode::Num7,
            KeyCode::Num8,
            KeyCode::Num9,
        ];
        SLOTS.get(slot).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotbar_slots() {
        assert_eq!(KeyCode::hotbar(0), Some(KeyCode::Num1));
        assert_eq!(KeyCode::hotbar(8), Some(KeyCode::Num9));
        assert_eq!(KeyCode::hotbar(9), None);
    }
}
