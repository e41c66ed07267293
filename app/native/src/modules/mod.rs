//! Widget feature modules for Jester.
//!
//! - [`animation`] - Deterministic animation programs
//! - [`assets`] - Joke book and image library
//! - [`geometry`] - Edge resolution and docking frames
//! - [`hotkey`] - Global shortcut normalization and dispatch
//! - [`session`] - Trigger gate, gestures, idle monitor and the widget actor
//! - [`surface`] - Host surface abstraction and the headless host

pub mod animation;
pub mod assets;
pub mod geometry;
pub mod hotkey;
pub mod session;
pub mod surface;
