//! Touch GUI
//!
//! On-screen touch controls for a first-person 3D game.

/// Build-time information (target, compiler, timestamp)
pub mod build_info;

/// Reference camera used to compute aiming rays
pub mod camera;

/// Touch control profiles
pub mod config;

/// Startup self checks
pub mod health;

/// Touch dispatch, gestures and the virtual button overlay
pub mod touch;
