//! Widget geometry and pointer timing configuration.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::modules::geometry::Size;

/// Sizes of the widget surfaces and the pointer timing around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Side of the square ball surface in pixels.
    /// Default: 60
    pub ball_size: f64,

    /// Width of the image preview surface.
    /// Default: 300
    pub preview_width: f64,

    /// Height of the image preview surface.
    /// Default: 200
    pub preview_height: f64,

    /// Width of the joke content surface.
    /// Default: 400
    pub content_width: f64,

    /// Height of the joke content surface.
    /// Default: 300
    pub content_height: f64,

    /// Gap in pixels between the ball and the companion surfaces.
    /// Default: 10
    pub gap: f64,

    /// Distance of the ball's initial position from the bottom of the screen.
    /// Default: 100
    pub bottom_offset: f64,

    /// Delay in milliseconds after the pointer leaves before the ball tucks
    /// itself half off-screen.
    /// Default: 300
    pub settle_delay: u64,

    /// Hover time in milliseconds before the image preview appears.
    /// Default: 200
    pub hover_delay: u64,

    /// Hover time in milliseconds before the joke content opens on its own.
    /// Default: 2000
    pub auto_content_delay: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            ball_size: 60.0,
            preview_width: 300.0,
            preview_height: 200.0,
            content_width: 400.0,
            content_height: 300.0,
            gap: 10.0,
            bottom_offset: 100.0,
            settle_delay: 300,
            hover_delay: 200,
            auto_content_delay: 2000,
        }
    }
}

impl WidgetConfig {
    /// Size of the ball surface.
    #[must_use]
    pub const fn ball(&self) -> Size { Size::square(self.ball_size) }

    /// Size of the preview surface.
    #[must_use]
    pub const fn preview(&self) -> Size { Size::new(self.preview_width, self.preview_height) }

    /// Size of the content surface.
    #[must_use]
    pub const fn content(&self) -> Size { Size::new(self.content_width, self.content_height) }

    /// Delay before the ball tucks back in after the pointer leaves.
    #[must_use]
    pub const fn settle(&self) -> Duration { Duration::from_millis(self.settle_delay) }

    /// Hover time before the image preview appears.
    #[must_use]
    pub const fn hover(&self) -> Duration { Duration::from_millis(self.hover_delay) }

    /// Hover time before the joke content opens on its own.
    #[must_use]
    pub const fn auto_content(&self) -> Duration { Duration::from_millis(self.auto_content_delay) }
}
