//! In-memory [`Surfaces`] host.
//!
//! Keeps a frame and visibility per surface and records every operation as a
//! [`SurfaceEvent`], so a run can be replayed or asserted on afterwards.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::{Role, SurfaceError, SurfaceId, SurfaceSpec, SurfaceStyle, Surfaces};
use crate::modules::geometry::{Point, Rect};

/// One recorded host operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SurfaceEvent {
    Created { id: SurfaceId, role: Role, frame: Rect, style: SurfaceStyle },
    Loaded { id: SurfaceId, role: Role },
    Moved { id: SurfaceId, role: Role, position: Point },
    Shown { id: SurfaceId, role: Role, focused: bool },
    Hidden { id: SurfaceId, role: Role },
    Closed { id: SurfaceId, role: Role },
    Message { id: SurfaceId, role: Role, topic: String, payload: serde_json::Value },
    HotkeyRegistered { combo: String },
    HotkeysCleared,
}

impl SurfaceEvent {
    /// Role of the surface the event concerns, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Created { role, .. }
            | Self::Loaded { role, .. }
            | Self::Moved { role, .. }
            | Self::Shown { role, .. }
            | Self::Hidden { role, .. }
            | Self::Closed { role, .. }
            | Self::Message { role, .. } => Some(*role),
            Self::HotkeyRegistered { .. } | Self::HotkeysCleared => None,
        }
    }
}

#[derive(Debug, Clone)]
struct HeadlessWindow {
    role: Role,
    frame: Rect,
    visible: bool,
    loaded: bool,
    destroyed: bool,
}

/// Recording host with no display.
#[derive(Debug)]
pub struct HeadlessSurfaces {
    work_area: Rect,
    next_id: u64,
    windows: BTreeMap<SurfaceId, HeadlessWindow>,
    events: Vec<SurfaceEvent>,
    load_immediately: bool,
    hotkeys: Vec<String>,
    rejected_hotkeys: HashSet<String>,
}

impl HeadlessSurfaces {
    /// Creates a host whose surfaces are ready as soon as they are created.
    #[must_use]
    pub fn new(work_area: Rect) -> Self {
        Self {
            work_area,
            next_id: 1,
            windows: BTreeMap::new(),
            events: Vec::new(),
            load_immediately: true,
            hotkeys: Vec::new(),
            rejected_hotkeys: HashSet::new(),
        }
    }

    /// Creates a host whose surfaces stay unloaded until [`Self::finish_loading`].
    #[must_use]
    pub fn with_deferred_loading(work_area: Rect) -> Self {
        Self { load_immediately: false, ..Self::new(work_area) }
    }

    /// Marks a surface as loaded, like a page finishing its first render.
    ///
    /// Returns `false` if the surface does not exist.
    pub fn finish_loading(&mut self, id: SurfaceId) -> bool {
        let Some(window) = self.windows.get_mut(&id).filter(|w| !w.destroyed) else {
            return false;
        };
        window.loaded = true;
        let role = window.role;
        self.events.push(SurfaceEvent::Loaded { id, role });
        true
    }

    /// Destroys a surface behind the caller's back (user closed it, host crashed).
    pub fn destroy(&mut self, id: SurfaceId) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.destroyed = true;
            window.visible = false;
        }
    }

    /// Makes [`Surfaces::register_hotkey`] fail for `combo`.
    pub fn reject_hotkey(&mut self, combo: impl Into<String>) {
        self.rejected_hotkeys.insert(combo.into());
    }

    /// All recorded events.
    #[must_use]
    pub fn events(&self) -> &[SurfaceEvent] { &self.events }

    /// Drains the recorded events.
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> { std::mem::take(&mut self.events) }

    /// Currently registered shortcuts.
    #[must_use]
    pub fn hotkeys(&self) -> &[String] { &self.hotkeys }

    /// The live surface with `role`, if any.
    #[must_use]
    pub fn live(&self, role: Role) -> Option<SurfaceId> {
        self.windows.iter().find(|(_, w)| w.role == role && !w.destroyed).map(|(id, _)| *id)
    }

    /// Whether a live surface is currently visible.
    #[must_use]
    pub fn is_visible(&self, id: SurfaceId) -> bool {
        self.windows.get(&id).is_some_and(|w| w.visible && !w.destroyed)
    }

    fn window_mut(&mut self, id: SurfaceId) -> Result<&mut HeadlessWindow, SurfaceError> {
        match self.windows.get_mut(&id) {
            Some(window) if window.destroyed => Err(SurfaceError::Destroyed(id)),
            Some(window) => Ok(window),
            None => Err(SurfaceError::Unknown(id)),
        }
    }

    fn set_visible(&mut self, id: SurfaceId, visible: bool, focused: bool) -> Result<(), SurfaceError> {
        let window = self.window_mut(id)?;
        window.visible = visible;
        let role = window.role;
        self.events.push(if visible {
            SurfaceEvent::Shown { id, role, focused }
        } else {
            SurfaceEvent::Hidden { id, role }
        });
        Ok(())
    }
}

impl Surfaces for HeadlessSurfaces {
    fn create(&mut self, spec: &SurfaceSpec) -> Result<SurfaceId, SurfaceError> {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;

        self.windows.insert(id, HeadlessWindow {
            role: spec.role,
            frame: spec.frame,
            visible: false,
            loaded: self.load_immediately,
            destroyed: false,
        });
        self.events.push(SurfaceEvent::Created { id, role: spec.role, frame: spec.frame, style: spec.style });
        Ok(id)
    }

    fn set_position(&mut self, id: SurfaceId, position: Point) -> Result<(), SurfaceError> {
        let window = self.window_mut(id)?;
        window.frame = window.frame.with_origin(position);
        let role = window.role;
        self.events.push(SurfaceEvent::Moved { id, role, position });
        Ok(())
    }

    fn bounds(&self, id: SurfaceId) -> Result<Rect, SurfaceError> {
        match self.windows.get(&id) {
            Some(window) if window.destroyed => Err(SurfaceError::Destroyed(id)),
            Some(window) => Ok(window.frame),
            None => Err(SurfaceError::Unknown(id)),
        }
    }

    fn show(&mut self, id: SurfaceId) -> Result<(), SurfaceError> { self.set_visible(id, true, true) }

    fn show_without_focus(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        self.set_visible(id, true, false)
    }

    fn hide(&mut self, id: SurfaceId) -> Result<(), SurfaceError> { self.set_visible(id, false, false) }

    fn close(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        let window = self.window_mut(id)?;
        window.destroyed = true;
        window.visible = false;
        let role = window.role;
        self.events.push(SurfaceEvent::Closed { id, role });
        Ok(())
    }

    fn is_destroyed(&self, id: SurfaceId) -> bool {
        self.windows.get(&id).is_none_or(|w| w.destroyed)
    }

    fn is_loaded(&self, id: SurfaceId) -> bool {
        self.windows.get(&id).is_some_and(|w| w.loaded && !w.destroyed)
    }

    fn work_area(&self) -> Rect { self.work_area }

    fn send_message(
        &mut self,
        id: SurfaceId,
        topic: &str,
        payload: &serde_json::Value,
    ) -> Result<(), SurfaceError> {
        let window = self.window_mut(id)?;
        if !window.loaded {
            return Err(SurfaceError::Host(format!("surface {id} has not finished loading")));
        }
        let role = window.role;
        self.events.push(SurfaceEvent::Message {
            id,
            role,
            topic: topic.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }

    fn register_hotkey(&mut self, combo: &str) -> Result<(), SurfaceError> {
        if self.rejected_hotkeys.contains(combo) {
            return Err(SurfaceError::Host(format!("shortcut {combo} is already taken")));
        }
        self.hotkeys.push(combo.to_string());
        self.events.push(SurfaceEvent::HotkeyRegistered { combo: combo.to_string() });
        Ok(())
    }

    fn unregister_all_hotkeys(&mut self) {
        self.hotkeys.clear();
        self.events.push(SurfaceEvent::HotkeysCleared);
    }
}
