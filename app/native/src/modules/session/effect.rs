//! Exclusive effect kinds.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A full-screen effect that takes the trigger gate for its whole duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    /// Ball and preview ricochet around the screen.
    Bounce,
    /// The overlay fires a barrage at the ball's position.
    Shotgun,
    /// The ball charges to the screen centre and launches the overlay.
    Ultimate,
}

impl EffectKind {
    /// Returns the effect name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Shotgun => "shotgun",
            Self::Ultimate => "ultimate",
        }
    }

    /// Whether the effect draws on a full-screen overlay surface.
    #[must_use]
    pub const fn uses_overlay(self) -> bool { matches!(self, Self::Shotgun | Self::Ultimate) }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}
