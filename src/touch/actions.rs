//! Virtual button identifiers and the actions bound to them

use std::collections::BTreeMap;

use super::error::TouchError;
use super::events::KeyCode;

/// Every on-screen button the overlay knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VirtualButtonId {
    ForwardOne,
    ForwardTwo,
    ForwardThree,
    BackwardOne,
    BackwardTwo,
    BackwardThree,
    Left,
    Right,
    Inventory,
    Drop,
    Jump,
    Crouch,
    Menu,
    Minimap,
    Range,
    Chat,
    /// Centre of the pad; holds the finger but does nothing
    Empty,
}

/// What a button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Key looked up in the keymap under this action name
    Action(&'static str),
    /// Key that is not user configurable
    Fixed(KeyCode),
    /// No key at all
    Inert,
}

impl VirtualButtonId {
    pub const ALL: [VirtualButtonId; 17] = [
        Self::ForwardOne,
        Self::ForwardTwo,
        Self::ForwardThree,
        Self::BackwardOne,
        Self::BackwardTwo,
        Self::BackwardThree,
        Self::Left,
        Self::Right,
        Self::Inventory,
        Self::Drop,
        Self::Jump,
        Self::Crouch,
        Self::Menu,
        Self::Minimap,
        Self::Range,
        Self::Chat,
        Self::Empty,
    ];

    pub fn binding(self) -> Binding {
        match self {
            Self::ForwardOne | Self::ForwardTwo | Self::ForwardThree => Binding::Action("forward"),
            Self::BackwardOne | Self::BackwardTwo | Self::BackwardThree => {
                Binding::Action("backward")
            }
            Self::Left => Binding::Action("left"),
            Self::Right => Binding::Action("right"),
            Self::Inventory => Binding::Action("inventory"),
            Self::Drop => Binding::Action("drop"),
            Self::Jump => Binding::Action("jump"),
            Self::Crouch => Binding::Action("sneak"),
            Self::Menu => Binding::Fixed(KeyCode::Escape),
            Self::Minimap => Binding::Action("minimap"),
            Self::Range => Binding::Action("rangeselect"),
            Self::Chat => Binding::Action("chat"),
            Self::Empty => Binding::Inert,
        }
    }

    /// Text drawn on the button when its texture is missing
    pub fn caption(self) -> &'static str {
        match self {
            Self::ForwardOne | Self::ForwardTwo | Self::ForwardThree => "^",
            Self::BackwardOne | Self::BackwardTwo | Self::BackwardThree => "v",
            Self::Left => "<",
            Self::Right => ">",
            Self::Inventory => "inv",
            Self::Drop => "drop",
            Self::Jump => "x",
            Self::Crouch => "H",
            Self::Menu => "Exit",
            Self::Minimap => "minimap",
            Self::Range => "far",
            Self::Chat => "Chat",
            Self::Empty => "",
        }
    }

    /// Texture file the renderer loads for this button
    pub fn image(self) -> &'static str {
        match self {
            Self::ForwardOne => "up_one_btn.png",
            Self::ForwardTwo => "up_two_btn.png",
            Self::ForwardThree => "up_three_btn.png",
            Self::BackwardOne => "down_one_btn.png",
            Self::BackwardTwo => "down_two_btn.png",
            Self::BackwardThree => "down_three_btn.png",
            Self::Left => "left_btn.png",
            Self::Right => "right_btn.png",
            Self::Inventory => "inventory_btn.png",
            Self::Drop => "drop_btn.png",
            Self::Jump => "jump_btn.png",
            Self::Crouch => "down_btn.png",
            Self::Menu => "escape_btn.png",
            Self::Minimap => "minimap_btn.png",
            Self::Range => "rangeview_btn.png",
            Self::Chat => "chat_btn.png",
            Self::Empty => "empty_btn.png",
        }
    }

    /// Action names every complete keymap must provide
    pub fn required_actions() -> Vec<&'static str> {
        let mut actions: Vec<&'static str> = Self::ALL
            .iter()
            .filter_map(|id| match id.binding() {
                Binding::Action(name) => Some(name),
                _ => None,
            })
            .collect();
        actions.dedup();
        actions
    }
}

/// Resolves a button to its key in `keymap`
///
/// `Ok(None)` means the button sends no key.
pub fn resolve_key(
    id: VirtualButtonId,
    keymap: &BTreeMap<String, KeyCode>,
) -> Result<Option<KeyCode>, TouchError> {
    match id.binding() {
        Binding::Action(action) => keymap
            .get(action)
            .copied()
            .map(Some)
            .ok_or(TouchError::MissingBinding { action }),
        Binding::Fixed(key) => Ok(Some(key)),
        Binding::Inert => Ok(None),
    }
}
