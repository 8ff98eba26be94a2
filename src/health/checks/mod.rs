//! Built-in checks for the touch overlay

pub mod build_info;
pub mod config;
pub mod gestures;
pub mod layout;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use gestures::GestureCheck;
pub use layout::LayoutCheck;
