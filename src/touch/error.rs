//! Errors raised while building the touch overlay

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TouchError {
    /// A laid-out button names an action that has no key in the keymap
    #[error("no key bound for action '{action}' (add `keymap.{action}` to the touch profile)")]
    MissingBinding { action: &'static str },

    #[error("failed to load touch configuration: {0}")]
    Config(#[from] config::ConfigError),
}
