//! Jester - a floating, edge-docked joke widget.
//!
//! The library holds the widget core: edge resolution, the animation
//! programs, the trigger gate that keeps at most one animation session
//! running, and the idle monitor. A desktop shell renders the surfaces
//! through the [`modules::surface::Surfaces`] trait; the CLI drives the same
//! core against a headless host.

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod modules;
pub mod platform;
pub mod schema;
