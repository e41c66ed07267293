//! Message topics sent to widget surfaces.
//!
//! ## Naming Convention
//!
//! All topics follow the pattern: `jester://<surface>/<event-name>`
//!
//! - `jester://` - Prefix identifying this as a Jester message
//! - `<surface>` - The surface that consumes the message (`overlay`, `content`, `preview`)
//! - `<event-name>` - Descriptive kebab-case name for the event

use serde::Serialize;

use crate::modules::geometry::{Point, Rect};

/// Full-screen overlay messages.
pub mod overlay {
    /// Starts the barrage effect.
    ///
    /// Payload: [`super::OverlayLaunch`] with the ball centre and screen size.
    pub const START_SHOTGUN: &str = "jester://overlay/start-shotgun";

    /// Starts the destruction effect once the ball reaches the screen centre.
    ///
    /// Payload: [`super::OverlayLaunch`] with the ball centre and screen size.
    pub const START_DESTRUCTION: &str = "jester://overlay/start-destruction";
}

/// Joke content surface messages.
pub mod content {
    /// Replaces the displayed joke.
    ///
    /// Payload: `{ text: String }`
    pub const JOKE: &str = "jester://content/joke";
}

/// Image preview surface messages.
pub mod preview {
    /// Replaces the displayed image.
    ///
    /// Payload: `{ path: String | null }`, `null` shows the empty state.
    pub const IMAGE: &str = "jester://preview/image";
}

// ============================================================================
// Payloads
// ============================================================================

/// Payload of the overlay start messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLaunch {
    pub ball_x: f64,
    pub ball_y: f64,
    pub screen_width: f64,
    pub screen_height: f64,
}

impl OverlayLaunch {
    /// Builds the payload from the ball centre and the work area.
    #[must_use]
    pub const fn new(ball_center: Point, screen: &Rect) -> Self {
        Self {
            ball_x: ball_center.x,
            ball_y: ball_center.y,
            screen_width: screen.width,
            screen_height: screen.height,
        }
    }

    /// JSON form of the payload.
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Payload of [`content::JOKE`].
#[must_use]
pub fn joke_payload(text: &str) -> serde_json::Value { serde_json::json!({ "text": text }) }

/// Payload of [`preview::IMAGE`].
#[must_use]
pub fn image_payload(path: Option<&std::path::Path>) -> serde_json::Value {
    serde_json::json!({ "path": path.map(|p| p.to_string_lossy().into_owned()) })
}
