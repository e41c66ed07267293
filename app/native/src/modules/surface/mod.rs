//! Windowing collaborator boundary.
//!
//! The widget core never talks to a windowing toolkit directly. Everything it
//! needs from the host (creating borderless surfaces, moving them, showing and
//! hiding them, posting messages to their content, global shortcuts) goes
//! through the [`Surfaces`] trait. [`HeadlessSurfaces`] is an in-memory host
//! used by the command line and by tests.

mod headless;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use headless::{HeadlessSurfaces, SurfaceEvent};

use crate::modules::geometry::{Point, Rect};

// ============================================================================
// Identity
// ============================================================================

/// Host-assigned surface handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

/// The four surfaces the widget manages.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The docked ball.
    Ball,
    /// Image preview shown while hovering.
    Preview,
    /// Joke content window.
    Content,
    /// Full-screen, click-through effect overlay.
    Overlay,
}

impl Role {
    /// All roles, in slot order.
    pub const ALL: [Self; 4] = [Self::Ball, Self::Preview, Self::Content, Self::Overlay];

    /// Slot index of the role.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Ball => 0,
            Self::Preview => 1,
            Self::Content => 2,
            Self::Overlay => 3,
        }
    }

    /// Returns the role name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ball => "ball",
            Self::Preview => "preview",
            Self::Content => "content",
            Self::Overlay => "overlay",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

// ============================================================================
// Creation
// ============================================================================

/// Window chrome and behavior hints for a new surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct SurfaceStyle {
    pub borderless: bool,
    pub transparent: bool,
    pub always_on_top: bool,
    pub skip_taskbar: bool,
    pub focusable: bool,
    pub click_through: bool,
    pub resizable: bool,
}

impl SurfaceStyle {
    /// Floating widget chrome: borderless, transparent, on top, not in the taskbar.
    #[must_use]
    pub const fn floating() -> Self {
        Self {
            borderless: true,
            transparent: true,
            always_on_top: true,
            skip_taskbar: true,
            focusable: true,
            click_through: false,
            resizable: false,
        }
    }

    /// Companion chrome: floating but never takes focus from the ball.
    #[must_use]
    pub const fn passive() -> Self { Self { focusable: false, ..Self::floating() } }

    /// Effect overlay chrome: floating, never focused, passes all input through.
    #[must_use]
    pub const fn overlay() -> Self {
        Self {
            focusable: false,
            click_through: true,
            ..Self::floating()
        }
    }
}

/// Everything the host needs to create a surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SurfaceSpec {
    pub role: Role,
    pub frame: Rect,
    pub style: SurfaceStyle,
}

impl SurfaceSpec {
    /// A floating surface for `role` at `frame`.
    #[must_use]
    pub const fn floating(role: Role, frame: Rect) -> Self {
        Self { role, frame, style: SurfaceStyle::floating() }
    }

    /// The creation spec the widget uses for `role` at `frame`.
    #[must_use]
    pub const fn for_role(role: Role, frame: Rect) -> Self {
        match role {
            Role::Overlay => Self::overlay(frame),
            Role::Preview => Self { role, frame, style: SurfaceStyle::passive() },
            Role::Ball | Role::Content => Self::floating(role, frame),
        }
    }

    /// A full-screen overlay covering `screen`.
    #[must_use]
    pub const fn overlay(screen: Rect) -> Self {
        Self {
            role: Role::Overlay,
            frame: screen,
            style: SurfaceStyle::overlay(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors reported by a [`Surfaces`] host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The surface was destroyed by the host or the user.
    #[error("surface {0} has been destroyed")]
    Destroyed(SurfaceId),

    /// The host does not know the surface.
    #[error("surface {0} is unknown to the host")]
    Unknown(SurfaceId),

    /// Any other host failure.
    #[error("host error: {0}")]
    Host(String),
}

// ============================================================================
// Trait
// ============================================================================

/// The windowing collaborator.
///
/// Implementations are driven from a single task and need no interior
/// synchronization. Every call may fail; callers recover locally.
pub trait Surfaces {
    /// Creates a hidden surface. It becomes usable once the host reports it loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Host`] when the host cannot create the surface.
    fn create(&mut self, spec: &SurfaceSpec) -> Result<SurfaceId, SurfaceError>;

    /// Moves a surface's top-left corner.
    ///
    /// # Errors
    ///
    /// Fails when the surface is destroyed or unknown.
    fn set_position(&mut self, id: SurfaceId, position: Point) -> Result<(), SurfaceError>;

    /// Current frame of a surface.
    ///
    /// # Errors
    ///
    /// Fails when the surface is destroyed or unknown.
    fn bounds(&self, id: SurfaceId) -> Result<Rect, SurfaceError>;

    /// Shows and focuses a surface.
    ///
    /// # Errors
    ///
    /// Fails when the surface is destroyed or unknown.
    fn show(&mut self, id: SurfaceId) -> Result<(), SurfaceError>;

    /// Shows a surface without taking focus.
    ///
    /// # Errors
    ///
    /// Fails when the surface is destroyed or unknown.
    fn show_without_focus(&mut self, id: SurfaceId) -> Result<(), SurfaceError>;

    /// Hides a surface, keeping it alive.
    ///
    /// # Errors
    ///
    /// Fails when the surface is destroyed or unknown.
    fn hide(&mut self, id: SurfaceId) -> Result<(), SurfaceError>;

    /// Closes and destroys a surface.
    ///
    /// # Errors
    ///
    /// Fails when the surface is already destroyed or unknown.
    fn close(&mut self, id: SurfaceId) -> Result<(), SurfaceError>;

    /// Whether the surface no longer exists. Unknown surfaces count as destroyed.
    fn is_destroyed(&self, id: SurfaceId) -> bool;

    /// Whether the surface finished loading its content.
    fn is_loaded(&self, id: SurfaceId) -> bool;

    /// Usable screen area (primary display minus menu bars and docks).
    fn work_area(&self) -> Rect;

    /// Posts a message to the surface's content.
    ///
    /// # Errors
    ///
    /// Fails when the surface is destroyed, unknown, or not yet loaded.
    fn send_message(
        &mut self,
        id: SurfaceId,
        topic: &str,
        payload: &serde_json::Value,
    ) -> Result<(), SurfaceError>;

    /// Registers a global shortcut. Activations come back as hotkey signals.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Host`] when the combo is taken or invalid.
    fn register_hotkey(&mut self, combo: &str) -> Result<(), SurfaceError>;

    /// Removes every shortcut this process registered.
    fn unregister_all_hotkeys(&mut self);
}
