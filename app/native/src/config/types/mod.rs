//! Configuration types for Jester.
//!
//! This module provides all configuration types organized by domain.
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod animations;
pub mod assets;
pub mod gestures;
pub mod root;
pub mod widget;

pub use animations::{AnimationsConfig, BounceConfig, ShotgunConfig, SpinConfig, UltimateConfig};
pub use assets::{AssetsConfig, images_dir, jokes_file};
pub use gestures::{GestureConfig, IdleConfig};
pub use root::{ConfigError, JesterConfig, config_paths, load_config, load_config_from_path};
pub use widget::WidgetConfig;
