//! Shared types for CLI commands.

use std::str::FromStr;

use crate::modules::geometry::Rect;
use crate::modules::session::{EffectKind, Signal};

/// Work area of the simulated display, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    /// The work area as a rectangle at the origin.
    #[must_use]
    pub const fn rect(self) -> Rect { Rect::new(0.0, 0.0, self.width, self.height) }
}

impl Default for ScreenSize {
    fn default() -> Self { Self { width: 1920.0, height: 1080.0 } }
}

impl FromStr for ScreenSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid screen size '{s}'. Expected WIDTHxHEIGHT, e.g. 1920x1080.");

        let lower = s.trim().to_lowercase();
        let (width, height) = lower.split_once('x').ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self { width: f64::from(width), height: f64::from(height) })
    }
}

impl std::fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Animations the simulator can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SimulatedEffect {
    /// Ball and preview ricochet around the screen.
    Bounce,
    /// Overlay barrage at the ball.
    Shotgun,
    /// Ball charges to the centre and launches the overlay.
    Ultimate,
    /// Content surface slams into the screen edges.
    Spin,
}

impl SimulatedEffect {
    /// The exclusive effect, or `None` for the content spin.
    #[must_use]
    pub const fn effect(self) -> Option<EffectKind> {
        match self {
            Self::Bounce => Some(EffectKind::Bounce),
            Self::Shotgun => Some(EffectKind::Shotgun),
            Self::Ultimate => Some(EffectKind::Ultimate),
            Self::Spin => None,
        }
    }
}

/// One step of a scripted gesture replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScriptStep {
    /// Pointer enters the ball.
    Enter,
    /// Pointer leaves the ball.
    Leave,
    /// Single press on the ball.
    Press,
    /// Native double-click on the ball.
    DoublePress,
    /// Open the joke content.
    Show,
    /// Close the joke content.
    Close,
    /// Spin the content to the next joke.
    Next,
    /// Shotgun effect.
    Shotgun,
    /// Ultimate effect.
    Ultimate,
}

impl ScriptStep {
    /// The signal this step sends to the widget.
    #[must_use]
    pub const fn signal(self) -> Signal {
        match self {
            Self::Enter => Signal::PointerEnter,
            Self::Leave => Signal::PointerLeave,
            Self::Press => Signal::Press,
            Self::DoublePress => Signal::DoublePress,
            Self::Show => Signal::ShowContent,
            Self::Close => Signal::CloseContent,
            Self::Next => Signal::NextContent,
            Self::Shotgun => Signal::Effect(EffectKind::Shotgun),
            Self::Ultimate => Signal::Effect(EffectKind::Ultimate),
        }
    }
}
