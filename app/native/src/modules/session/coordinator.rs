//! Trigger gate and session coordinator.
//!
//! The coordinator owns everything the widget knows: the dock state, one slot
//! per surface role, the running effect session (which doubles as the busy
//! flag), the content spin, pending pointer timers, the gesture counter and
//! the idle monitor. It never sleeps; callers feed it signals and poll it at
//! [`SessionCoordinator::next_deadline`], always passing the current instant.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::effect::EffectKind;
use super::gesture::{ClickCounter, Gesture};
use super::idle::IdleMonitor;
use crate::config::{AnimationsConfig, JesterConfig, WidgetConfig};
use crate::events;
use crate::modules::animation::{
    Action, Actions, Barrage, ChaoticBounce, ChargeAndLaunch, Program, SpinCollision,
};
use crate::modules::assets::{ImageLibrary, JokeBook};
use crate::modules::geometry::{
    Edge, Point, Rect, docked_position, nearest_edge, place_relative_to,
};
use crate::modules::hotkey::HotkeyBindings;
use crate::modules::surface::{Role, SurfaceError, SurfaceId, SurfaceSpec, Surfaces};

// ============================================================================
// Signals
// ============================================================================

/// An input the coordinator reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The pointer entered the ball.
    PointerEnter,
    /// The pointer left the ball.
    PointerLeave,
    /// The ball is being dragged by the given delta.
    DragMove { dx: f64, dy: f64 },
    /// The drag ended with the ball's top-left corner at `(x, y)`.
    DragEnd { x: f64, y: f64 },
    /// A single press on the ball.
    Press,
    /// A native double-click on the ball.
    DoublePress,
    /// Open the joke content next to the ball.
    ShowContent,
    /// Close the joke content.
    CloseContent,
    /// Spin the content and show another joke.
    NextContent,
    /// User activity elsewhere in the widget.
    Activity,
    /// Request an exclusive effect directly.
    Effect(EffectKind),
    /// A registered global shortcut fired.
    Hotkey(String),
    /// The host finished loading a surface.
    SurfaceReady(SurfaceId),
}

impl Signal {
    /// Signal name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PointerEnter => "PointerEnter",
            Self::PointerLeave => "PointerLeave",
            Self::DragMove { .. } => "DragMove",
            Self::DragEnd { .. } => "DragEnd",
            Self::Press => "Press",
            Self::DoublePress => "DoublePress",
            Self::ShowContent => "ShowContent",
            Self::CloseContent => "CloseContent",
            Self::NextContent => "NextContent",
            Self::Activity => "Activity",
            Self::Effect(_) => "Effect",
            Self::Hotkey(_) => "Hotkey",
            Self::SurfaceReady(_) => "SurfaceReady",
        }
    }
}

/// Dock edge and tuck state of the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockState {
    pub edge: Edge,
    pub half_hidden: bool,
}

impl Default for DockState {
    fn default() -> Self { Self { edge: Edge::Right, half_hidden: true } }
}

/// Point-in-time view of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub edge: Edge,
    pub half_hidden: bool,
    pub active: Option<EffectKind>,
    pub spinning: bool,
}

// ============================================================================
// Internal state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShowMode {
    Focused,
    Unfocused,
}

/// What the coordinator holds for one surface role.
#[derive(Debug, Default)]
struct Slot {
    id: Option<SurfaceId>,
    ready: bool,
    pending_show: Option<ShowMode>,
    pending_position: Option<Point>,
    pending_messages: Vec<(&'static str, serde_json::Value)>,
}

/// A program with its own clock.
#[derive(Debug)]
struct Running {
    program: Program,
    started: Instant,
    next_tick: Instant,
}

impl Running {
    const fn new(program: Program, now: Instant) -> Self { Self { program, started: now, next_tick: now } }

    /// Advances the program if its tick is due. Returns the actions and
    /// whether the program finished.
    fn step(&mut self, now: Instant) -> Option<(Actions, bool)> {
        if now < self.next_tick {
            return None;
        }

        let tick = self.program.advance(now.saturating_duration_since(self.started));
        let finished = match tick.next {
            Some(delay) => {
                self.next_tick = now + delay;
                false
            }
            None => true,
        };
        Some((tick.actions, finished))
    }
}

/// An exclusive effect in progress.
#[derive(Debug)]
struct Session {
    kind: EffectKind,
    ball_start: Rect,
    run: Running,
}

#[derive(Debug, Default)]
struct Timers {
    half_hide: Option<Instant>,
    hover_preview: Option<Instant>,
    auto_content: Option<Instant>,
}

impl Timers {
    fn earliest(&self) -> Option<Instant> {
        [self.half_hide, self.hover_preview, self.auto_content].into_iter().flatten().min()
    }

    fn due(slot: &mut Option<Instant>, now: Instant) -> bool {
        if slot.is_some_and(|deadline| now >= deadline) {
            *slot = None;
            return true;
        }
        false
    }
}

// ============================================================================
// Coordinator
// ============================================================================

/// The widget's single owner of state.
#[derive(Debug)]
pub struct SessionCoordinator<S: Surfaces> {
    surfaces: S,
    widget: WidgetConfig,
    animations: AnimationsConfig,
    hotkeys: HotkeyBindings,
    slots: [Slot; 4],
    dock: DockState,
    ball_frame: Rect,
    session: Option<Session>,
    spin: Option<Running>,
    timers: Timers,
    clicks: ClickCounter,
    idle: IdleMonitor,
    dragging: bool,
    hovered: bool,
    jokes: JokeBook,
    images: ImageLibrary,
    rng: StdRng,
}

impl<S: Surfaces> SessionCoordinator<S> {
    /// Creates a coordinator. Nothing touches the host until [`start`](Self::start).
    pub fn new(surfaces: S, config: &JesterConfig, jokes: JokeBook, images: ImageLibrary, rng: StdRng) -> Self {
        let screen = surfaces.work_area();
        let ball = config.widget.ball();
        let resting = Rect::new(
            0.0,
            screen.y + screen.height - ball.height - config.widget.bottom_offset,
            ball.width,
            ball.height,
        );
        let dock = DockState::default();
        let ball_frame = resting.with_origin(docked_position(dock.edge, dock.half_hidden, &screen, &resting));

        Self {
            surfaces,
            widget: config.widget.clone(),
            animations: config.animations.clone(),
            hotkeys: HotkeyBindings::new(&config.keybindings),
            slots: Default::default(),
            dock,
            ball_frame,
            session: None,
            spin: None,
            timers: Timers::default(),
            clicks: ClickCounter::new(config.gestures.window()),
            idle: IdleMonitor::new(config.idle.timeout(), config.idle.is_enabled()),
            dragging: false,
            hovered: false,
            jokes,
            images,
            rng,
        }
    }

    /// Registers the shortcuts, creates the docked ball and arms the idle monitor.
    pub fn start(&mut self, now: Instant) {
        for combo in self.hotkeys.combos() {
            match self.surfaces.register_hotkey(combo) {
                Ok(()) => tracing::debug!(combo, "registered shortcut"),
                Err(err) => tracing::warn!(combo, error = %err, "failed to register shortcut"),
            }
        }

        self.move_surface(Role::Ball, self.ball_frame.origin());
        self.show(Role::Ball, ShowMode::Unfocused);
        self.idle.reset(now);
        tracing::info!(edge = %self.dock.edge, "widget started");
    }

    /// Clears timers, unregisters the shortcuts and closes every surface.
    pub fn shutdown(&mut self) {
        self.session = None;
        self.spin = None;
        self.timers = Timers::default();
        self.clicks.reset();
        self.idle.cancel();
        self.surfaces.unregister_all_hotkeys();
        for role in Role::ALL {
            self.close(role);
        }
        tracing::info!("widget shut down");
    }

    /// Reacts to one input signal.
    pub fn handle(&mut self, signal: Signal, now: Instant) {
        tracing::trace!(?signal, "signal");
        self.refresh_readiness();
        self.poll_gestures(now);

        match signal {
            Signal::PointerEnter => self.pointer_enter(now),
            Signal::PointerLeave => self.pointer_leave(now),
            Signal::DragMove { dx, dy } => self.drag_move(dx, dy, now),
            Signal::DragEnd { x, y } => self.drag_end(Point::new(x, y).sanitized(), now),
            Signal::Press => {
                if self.dragging {
                    tracing::debug!("press ignored while dragging");
                    return;
                }
                self.idle.reset(now);
                if let Some(gesture) = self.clicks.press(now) {
                    self.on_gesture(gesture, now);
                }
            }
            Signal::DoublePress => {
                self.idle.reset(now);
                self.request(EffectKind::Bounce, now);
            }
            Signal::ShowContent => self.show_content(now),
            Signal::CloseContent => self.close(Role::Content),
            Signal::NextContent => self.start_spin(now),
            Signal::Activity => self.idle.reset(now),
            Signal::Effect(kind) => {
                self.request(kind, now);
            }
            Signal::Hotkey(combo) => match self.hotkeys.resolve(&combo) {
                Some(kind) => {
                    self.request(kind, now);
                }
                None => tracing::debug!(combo = %combo, "unbound shortcut"),
            },
            Signal::SurfaceReady(id) => self.mark_ready(id),
        }
    }

    /// Runs everything that is due at `now`.
    pub fn poll(&mut self, now: Instant) {
        self.refresh_readiness();
        self.poll_gestures(now);

        if Timers::due(&mut self.timers.half_hide, now) {
            self.dock.half_hidden = true;
            if self.session.is_none() {
                self.dock_ball();
            }
        }

        if Timers::due(&mut self.timers.hover_preview, now) && self.session.is_none() {
            self.show_preview();
        }

        if Timers::due(&mut self.timers.auto_content, now) && self.session.is_none() {
            self.show_content(now);
        }

        self.poll_session(now);
        self.poll_spin(now);

        if self.idle.poll(now) {
            if self.session.is_none() {
                tracing::debug!("idle timeout");
                self.request(EffectKind::Bounce, now);
            } else {
                tracing::debug!("idle timeout suppressed by running session");
            }
        }
    }

    /// Processes every deadline up to and including `target`, in order.
    pub fn advance_to(&mut self, target: Instant) {
        while let Some(deadline) = self.next_deadline()
            && deadline <= target
        {
            self.poll(deadline);
        }
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.clicks.deadline(),
            self.timers.earliest(),
            self.session.as_ref().map(|session| session.run.next_tick),
            self.spin.as_ref().map(|spin| spin.next_tick),
            self.idle.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Current dock and session state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            edge: self.dock.edge,
            half_hidden: self.dock.half_hidden,
            active: self.active(),
            spinning: self.spin.is_some(),
        }
    }

    /// The running exclusive effect, if any.
    #[must_use]
    pub fn active(&self) -> Option<EffectKind> { self.session.as_ref().map(|session| session.kind) }

    /// Last known frame of the ball.
    #[must_use]
    pub const fn ball_frame(&self) -> Rect { self.ball_frame }

    /// The windowing host.
    pub const fn surfaces(&self) -> &S { &self.surfaces }

    /// The windowing host, mutably.
    pub const fn surfaces_mut(&mut self) -> &mut S { &mut self.surfaces }

    // ------------------------------------------------------------------------
    // Trigger gate
    // ------------------------------------------------------------------------

    /// Starts an exclusive effect unless one is already running.
    ///
    /// Returns `false` when the request was dropped.
    pub fn request(&mut self, kind: EffectKind, now: Instant) -> bool {
        if let Some(session) = &self.session {
            tracing::debug!(requested = %kind, active = %session.kind, "effect dropped, session active");
            return false;
        }

        if let Some(spin) = self.spin.take() {
            tracing::debug!(program = spin.program.name(), "spin cancelled");
        }
        self.timers.hover_preview = None;
        self.timers.auto_content = None;

        let screen = self.surfaces.work_area();
        let ball_start = self.ball_frame;
        self.close(Role::Content);
        if kind.uses_overlay() {
            self.open_overlay(&screen);
        }

        let program: Program = match kind {
            EffectKind::Bounce => {
                let size = self.widget.preview();
                let preview_start = screen.centered(size);
                self.ensure(Role::Preview, Rect::from_parts(preview_start, size));
                self.move_surface(Role::Preview, preview_start);
                self.show(Role::Preview, ShowMode::Unfocused);
                let payload = events::image_payload(self.images.random(&mut self.rng));
                self.send(Role::Preview, events::preview::IMAGE, payload);
                self.idle.reset(now);
                let rng = StdRng::from_rng(&mut self.rng);
                ChaoticBounce::new(&ball_start, preview_start, size, &screen, &self.animations.bounce, rng)
                    .into()
            }
            EffectKind::Shotgun => Barrage::new(&ball_start, &screen, &self.animations.shotgun).into(),
            EffectKind::Ultimate => {
                ChargeAndLaunch::new(&ball_start, &screen, &self.animations.ultimate).into()
            }
        };

        tracing::info!(effect = %kind, program = program.name(), "session started");
        self.session = Some(Session { kind, ball_start, run: Running::new(program, now) });
        self.poll_session(now);
        true
    }

    fn open_overlay(&mut self, screen: &Rect) {
        self.close(Role::Preview);
        self.close(Role::Overlay);
        self.ensure(Role::Overlay, *screen);
        self.show(Role::Overlay, ShowMode::Unfocused);
    }

    fn poll_session(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some((actions, finished)) = session.run.step(now) else {
            return;
        };

        self.apply(actions);
        if finished {
            self.finish_session(now);
        }
    }

    fn finish_session(&mut self, now: Instant) {
        let Some(session) = self.session.take() else {
            return;
        };

        self.close(Role::Overlay);
        self.hide(Role::Preview);

        let screen = self.surfaces.work_area();
        self.dock.half_hidden = true;
        let home = docked_position(self.dock.edge, true, &screen, &session.ball_start);
        self.move_surface(Role::Ball, home);
        self.show(Role::Ball, ShowMode::Unfocused);
        self.idle.reset(now);

        tracing::info!(effect = %session.kind, "session finished");
    }

    fn on_gesture(&mut self, gesture: Gesture, now: Instant) {
        tracing::debug!(?gesture, "gesture");
        match gesture {
            Gesture::Single => self.show_content(now),
            Gesture::Double => {
                self.request(EffectKind::Shotgun, now);
            }
            Gesture::Triple => {
                self.timers.auto_content = None;
                self.request(EffectKind::Ultimate, now);
            }
        }
    }

    fn poll_gestures(&mut self, now: Instant) {
        if let Some(gesture) = self.clicks.poll(now) {
            self.on_gesture(gesture, now);
        }
    }

    // ------------------------------------------------------------------------
    // Pointer and drag
    // ------------------------------------------------------------------------

    fn pointer_enter(&mut self, now: Instant) {
        self.hovered = true;
        self.idle.reset(now);
        self.timers.half_hide = None;

        if self.session.is_none() {
            self.dock.half_hidden = false;
            self.dock_ball();
        }

        self.timers.hover_preview = Some(now + self.widget.hover());
        self.timers.auto_content = Some(now + self.widget.auto_content());
    }

    fn pointer_leave(&mut self, now: Instant) {
        self.hovered = false;
        self.timers.hover_preview = None;
        self.timers.auto_content = None;

        if self.session.is_none() {
            self.hide(Role::Preview);
        }
        // A leave during a drag is picked up by drag_end.
        if !self.dragging {
            self.timers.half_hide = Some(now + self.widget.settle());
        }
    }

    fn drag_move(&mut self, dx: f64, dy: f64, now: Instant) {
        if self.session.is_some() {
            tracing::debug!("drag ignored during session");
            return;
        }

        self.dragging = true;
        self.timers.half_hide = None;
        self.idle.reset(now);

        let origin = self.ball_frame.origin().offset(dx, dy).sanitized();
        self.move_surface(Role::Ball, origin);

        let screen = self.surfaces.work_area();
        self.follow_ball(nearest_edge(&self.ball_frame, &screen));
    }

    fn drag_end(&mut self, position: Point, now: Instant) {
        self.dragging = false;
        if self.session.is_some() {
            return;
        }
        if !self.hovered {
            self.timers.half_hide = Some(now + self.widget.settle());
        }

        let screen = self.surfaces.work_area();
        let dropped = self.ball_frame.with_origin(position);
        self.dock.edge = nearest_edge(&dropped, &screen);
        self.ball_frame = dropped;
        self.dock_ball();
        self.follow_ball(self.dock.edge);

        tracing::debug!(edge = %self.dock.edge, "snapped to edge");
    }

    /// Moves the ball to its docked position for the current dock state.
    fn dock_ball(&mut self) {
        let screen = self.surfaces.work_area();
        let position = docked_position(self.dock.edge, self.dock.half_hidden, &screen, &self.ball_frame);
        self.move_surface(Role::Ball, position);
    }

    /// Keeps an open content surface next to the ball.
    fn follow_ball(&mut self, edge: Edge) {
        if self.live(Role::Content).is_none() {
            return;
        }
        let screen = self.surfaces.work_area();
        let position =
            place_relative_to(&self.ball_frame, edge, self.widget.content(), &screen, self.widget.gap);
        self.move_surface(Role::Content, position);
    }

    // ------------------------------------------------------------------------
    // Content and preview
    // ------------------------------------------------------------------------

    fn show_content(&mut self, now: Instant) {
        self.idle.reset(now);
        self.timers.auto_content = None;

        if self.session.is_some() {
            tracing::debug!("content suppressed during session");
            return;
        }

        let screen = self.surfaces.work_area();
        let size = self.widget.content();
        let position = place_relative_to(&self.ball_frame, self.dock.edge, size, &screen, self.widget.gap);

        self.ensure(Role::Content, Rect::from_parts(position, size));
        self.move_surface(Role::Content, position);
        self.show(Role::Content, ShowMode::Focused);

        let payload = events::joke_payload(self.jokes.next(&mut self.rng));
        self.send(Role::Content, events::content::JOKE, payload);
    }

    fn show_preview(&mut self) {
        let screen = self.surfaces.work_area();
        let size = self.widget.preview();
        let position = place_relative_to(&self.ball_frame, self.dock.edge, size, &screen, self.widget.gap);

        self.ensure(Role::Preview, Rect::from_parts(position, size));
        self.move_surface(Role::Preview, position);
        self.show(Role::Preview, ShowMode::Unfocused);

        let payload = events::image_payload(self.images.random(&mut self.rng));
        self.send(Role::Preview, events::preview::IMAGE, payload);
    }

    fn start_spin(&mut self, now: Instant) {
        if self.session.is_some() || self.spin.is_some() {
            tracing::debug!("spin ignored, already animating");
            return;
        }
        let Some(id) = self.live(Role::Content) else {
            tracing::debug!("spin ignored, content is closed");
            return;
        };
        let frame = match self.surfaces.bounds(id) {
            Ok(frame) => frame,
            Err(err) => {
                self.fail(Role::Content, &err);
                return;
            }
        };

        let screen = self.surfaces.work_area();
        let program = SpinCollision::new(self.dock.edge, &frame, &screen, &self.animations.spin);
        self.spin = Some(Running::new(program.into(), now));
        self.poll_spin(now);
    }

    fn poll_spin(&mut self, now: Instant) {
        let Some(spin) = self.spin.as_mut() else {
            return;
        };
        let Some((actions, finished)) = spin.step(now) else {
            return;
        };

        self.apply(actions);
        if finished {
            self.spin = None;
            let payload = events::joke_payload(self.jokes.next(&mut self.rng));
            self.send(Role::Content, events::content::JOKE, payload);
        }
    }

    // ------------------------------------------------------------------------
    // Surface slots
    // ------------------------------------------------------------------------

    fn apply(&mut self, actions: Actions) {
        for action in actions {
            match action {
                Action::Move(role, position) => self.move_surface(role, position),
                Action::Show(role) => self.show(role, ShowMode::Unfocused),
                Action::Hide(role) => self.hide(role),
                Action::Notify(role, topic, payload) => self.send(role, topic, payload),
            }
        }
    }

    /// The live surface for `role`, clearing the slot if the host destroyed it.
    fn live(&mut self, role: Role) -> Option<SurfaceId> {
        let slot = &mut self.slots[role.index()];
        let id = slot.id?;
        if self.surfaces.is_destroyed(id) {
            tracing::debug!(%role, %id, "surface was destroyed");
            *slot = Slot::default();
            return None;
        }
        Some(id)
    }

    /// The live surface for `role`, creating it at `frame` if missing.
    fn ensure(&mut self, role: Role, frame: Rect) -> Option<SurfaceId> {
        if let Some(id) = self.live(role) {
            return Some(id);
        }

        match self.surfaces.create(&SurfaceSpec::for_role(role, frame)) {
            Ok(id) => {
                let ready = self.surfaces.is_loaded(id);
                self.slots[role.index()] = Slot { id: Some(id), ready, ..Slot::default() };
                tracing::debug!(%role, %id, ready, "created surface");
                Some(id)
            }
            Err(err) => {
                tracing::warn!(%role, error = %err, "failed to create surface");
                None
            }
        }
    }

    /// The slot for `role`, recreating the ball when it went missing.
    fn target(&mut self, role: Role) -> Option<SurfaceId> {
        match role {
            Role::Ball => self.ensure(Role::Ball, self.ball_frame),
            _ => self.live(role),
        }
    }

    fn move_surface(&mut self, role: Role, position: Point) {
        let position = position.rounded();
        if role == Role::Ball {
            self.ball_frame = self.ball_frame.with_origin(position);
        }

        let Some(id) = self.target(role) else {
            return;
        };
        if !self.slots[role.index()].ready {
            self.slots[role.index()].pending_position = Some(position);
            return;
        }
        let result = self.surfaces.set_position(id, position);
        self.check(role, result);
    }

    fn show(&mut self, role: Role, mode: ShowMode) {
        let Some(id) = self.target(role) else {
            return;
        };
        if !self.slots[role.index()].ready {
            self.slots[role.index()].pending_show = Some(mode);
            return;
        }
        let result = match mode {
            ShowMode::Focused => self.surfaces.show(id),
            ShowMode::Unfocused => self.surfaces.show_without_focus(id),
        };
        self.check(role, result);
    }

    fn hide(&mut self, role: Role) {
        let Some(id) = self.live(role) else {
            return;
        };
        if !self.slots[role.index()].ready {
            self.slots[role.index()].pending_show = None;
            return;
        }
        let result = self.surfaces.hide(id);
        self.check(role, result);
    }

    fn close(&mut self, role: Role) {
        let slot = std::mem::take(&mut self.slots[role.index()]);
        let Some(id) = slot.id else {
            return;
        };
        if self.surfaces.is_destroyed(id) {
            return;
        }
        if let Err(err) = self.surfaces.close(id) {
            tracing::debug!(%role, %id, error = %err, "failed to close surface");
        }
    }

    fn send(&mut self, role: Role, topic: &'static str, payload: serde_json::Value) {
        let Some(id) = self.live(role) else {
            tracing::debug!(%role, topic, "message dropped, no surface");
            return;
        };
        if !self.slots[role.index()].ready {
            self.slots[role.index()].pending_messages.push((topic, payload));
            return;
        }
        let result = self.surfaces.send_message(id, topic, &payload);
        self.check(role, result);
    }

    fn check(&mut self, role: Role, result: Result<(), SurfaceError>) {
        if let Err(err) = result {
            self.fail(role, &err);
        }
    }

    /// Recovers from a failed host call. Lost surfaces free their slot.
    fn fail(&mut self, role: Role, err: &SurfaceError) {
        tracing::debug!(%role, error = %err, "surface call failed");
        if matches!(err, SurfaceError::Destroyed(_) | SurfaceError::Unknown(_)) {
            self.slots[role.index()] = Slot::default();
        }
    }

    // ------------------------------------------------------------------------
    // Readiness
    // ------------------------------------------------------------------------

    fn mark_ready(&mut self, id: SurfaceId) {
        let Some(role) = Role::ALL.into_iter().find(|role| self.slots[role.index()].id == Some(id)) else {
            tracing::debug!(%id, "ready signal for unknown surface");
            return;
        };
        self.flush(role);
    }

    /// Picks up surfaces the host reports as loaded without a ready signal.
    fn refresh_readiness(&mut self) {
        for role in Role::ALL {
            let slot = &self.slots[role.index()];
            if let Some(id) = slot.id
                && !slot.ready
                && self.surfaces.is_loaded(id)
            {
                self.flush(role);
            }
        }
    }

    /// Marks a slot ready and replays what was queued: position, show, messages.
    fn flush(&mut self, role: Role) {
        let slot = &mut self.slots[role.index()];
        if slot.ready {
            return;
        }
        slot.ready = true;
        let position = slot.pending_position.take();
        let show = slot.pending_show.take();
        let messages = std::mem::take(&mut slot.pending_messages);

        tracing::debug!(%role, queued = messages.len(), "surface ready");

        if let Some(position) = position {
            self.move_surface(role, position);
        }
        if let Some(mode) = show {
            self.show(role, mode);
        }
        for (topic, payload) in messages {
            self.send(role, topic, payload);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::modules::surface::{HeadlessSurfaces, SurfaceEvent};

    fn screen() -> Rect { Rect::new(0.0, 0.0, 1920.0, 1080.0) }

    fn ms(value: u64) -> Duration { Duration::from_millis(value) }

    fn coordinator_with(surfaces: HeadlessSurfaces) -> (SessionCoordinator<HeadlessSurfaces>, Instant) {
        let jokes = JokeBook::new(vec!["first".into(), "second".into(), "third".into()]);
        let mut coordinator = SessionCoordinator::new(
            surfaces,
            &JesterConfig::default(),
            jokes,
            ImageLibrary::default(),
            StdRng::seed_from_u64(5),
        );
        let now = Instant::now();
        coordinator.start(now);
        (coordinator, now)
    }

    fn coordinator() -> (SessionCoordinator<HeadlessSurfaces>, Instant) {
        coordinator_with(HeadlessSurfaces::new(screen()))
    }

    fn created(coordinator: &SessionCoordinator<HeadlessSurfaces>, role: Role) -> usize {
        coordinator
            .surfaces()
            .events()
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Created { role: r, .. } if *r == role))
            .count()
    }

    fn messages(coordinator: &SessionCoordinator<HeadlessSurfaces>, topic: &str) -> usize {
        coordinator
            .surfaces()
            .events()
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Message { topic: t, .. } if t == topic))
            .count()
    }

    #[test]
    fn test_start_docks_ball_half_hidden_on_the_right() {
        let (coordinator, _) = coordinator();
        assert_eq!(coordinator.ball_frame().origin(), Point::new(1890.0, 920.0));
        assert_eq!(coordinator.snapshot(), Snapshot {
            edge: Edge::Right,
            half_hidden: true,
            active: None,
            spinning: false,
        });

        let ball = coordinator.surfaces().live(Role::Ball).unwrap();
        assert!(coordinator.surfaces().is_visible(ball));
        assert_eq!(coordinator.surfaces().hotkeys().len(), 2);
    }

    #[test]
    fn test_second_request_while_active_is_noop() {
        let (mut coordinator, now) = coordinator();
        assert!(coordinator.request(EffectKind::Shotgun, now));
        let events_before = coordinator.surfaces().events().len();

        assert!(!coordinator.request(EffectKind::Ultimate, now + ms(10)));
        assert!(!coordinator.request(EffectKind::Bounce, now + ms(20)));

        assert_eq!(coordinator.active(), Some(EffectKind::Shotgun));
        assert_eq!(coordinator.surfaces().events().len(), events_before);
    }

    #[test]
    fn test_triple_press_requests_ultimate_once() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::Press, now);
        coordinator.handle(Signal::Press, now + ms(100));
        coordinator.handle(Signal::Press, now + ms(200));

        assert_eq!(coordinator.active(), Some(EffectKind::Ultimate));
        coordinator.advance_to(now + ms(1000));

        assert_eq!(created(&coordinator, Role::Overlay), 1);
        assert_eq!(created(&coordinator, Role::Content), 0);
        assert_eq!(messages(&coordinator, events::overlay::START_SHOTGUN), 0);
        assert_eq!(messages(&coordinator, events::overlay::START_DESTRUCTION), 1);
    }

    #[test]
    fn test_single_and_double_press_resolve_after_window() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::Press, now);
        coordinator.advance_to(now + ms(349));
        assert_eq!(created(&coordinator, Role::Content), 0);

        coordinator.advance_to(now + ms(350));
        assert_eq!(created(&coordinator, Role::Content), 1);
        assert_eq!(messages(&coordinator, events::content::JOKE), 1);

        let later = now + ms(1000);
        coordinator.handle(Signal::Press, later);
        coordinator.handle(Signal::Press, later + ms(300));
        coordinator.advance_to(later + ms(350));
        assert_eq!(coordinator.active(), Some(EffectKind::Shotgun));
    }

    #[test]
    fn test_press_ignored_while_dragging() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::DragMove { dx: -100.0, dy: 0.0 }, now);
        coordinator.handle(Signal::Press, now);
        coordinator.advance_to(now + ms(400));
        assert_eq!(created(&coordinator, Role::Content), 0);
    }

    #[test]
    fn test_shotgun_lifecycle_restores_ball() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::PointerEnter, now);
        assert!(!coordinator.snapshot().half_hidden);

        coordinator.handle(Signal::Effect(EffectKind::Shotgun), now);
        let ball = coordinator.surfaces().live(Role::Ball).unwrap();
        assert!(!coordinator.surfaces().is_visible(ball));
        assert_eq!(messages(&coordinator, events::overlay::START_SHOTGUN), 1);

        coordinator.advance_to(now + ms(28_000));
        assert_eq!(coordinator.active(), None);
        assert!(coordinator.surfaces().live(Role::Overlay).is_none());
        assert!(coordinator.surfaces().is_visible(ball));
        assert!(coordinator.snapshot().half_hidden);
        assert_eq!(coordinator.ball_frame().origin(), Point::new(1890.0, 920.0));
    }

    #[test]
    fn test_preview_never_takes_focus() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::PointerEnter, now);
        coordinator.advance_to(now + ms(200));

        let style = coordinator
            .surfaces()
            .events()
            .iter()
            .find_map(|e| match e {
                SurfaceEvent::Created { role: Role::Preview, style, .. } => Some(*style),
                _ => None,
            })
            .unwrap();
        assert!(!style.focusable);
        assert!(coordinator.surfaces().events().iter().all(|e| !matches!(
            e,
            SurfaceEvent::Shown { role: Role::Preview, focused: true, .. }
        )));
    }

    #[test]
    fn test_bounce_returns_ball_and_hides_preview() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::DoublePress, now);
        assert_eq!(coordinator.active(), Some(EffectKind::Bounce));
        assert_eq!(created(&coordinator, Role::Overlay), 0);
        let preview = coordinator.surfaces().live(Role::Preview).unwrap();
        assert!(coordinator.surfaces().is_visible(preview));

        coordinator.advance_to(now + ms(10_000));
        assert_eq!(coordinator.active(), None);
        assert!(!coordinator.surfaces().is_visible(preview));
        assert_eq!(coordinator.ball_frame().origin(), Point::new(1890.0, 920.0));
    }

    #[test]
    fn test_idle_suppressed_by_manual_effect() {
        let (mut coordinator, now) = coordinator();
        let timeout = ms(300_000);

        coordinator.handle(Signal::Effect(EffectKind::Shotgun), now + timeout - ms(1));
        coordinator.advance_to(now + timeout + ms(1));

        assert_eq!(coordinator.active(), Some(EffectKind::Shotgun));
        assert_eq!(created(&coordinator, Role::Preview), 0);
    }

    #[test]
    fn test_idle_starts_bounce() {
        let (mut coordinator, now) = coordinator();
        coordinator.advance_to(now + ms(300_000));
        assert_eq!(coordinator.active(), Some(EffectKind::Bounce));
    }

    #[test]
    fn test_pointer_leave_tucks_ball_after_settle_delay() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::PointerEnter, now);
        assert_eq!(coordinator.ball_frame().origin().x, 1860.0);

        coordinator.handle(Signal::PointerLeave, now + ms(50));
        coordinator.advance_to(now + ms(349));
        assert!(!coordinator.snapshot().half_hidden);

        coordinator.advance_to(now + ms(350));
        assert!(coordinator.snapshot().half_hidden);
        assert_eq!(coordinator.ball_frame().origin().x, 1890.0);
    }

    #[test]
    fn test_pointer_enter_cancels_pending_tuck() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::PointerEnter, now);
        coordinator.handle(Signal::PointerLeave, now + ms(10));
        coordinator.handle(Signal::PointerEnter, now + ms(100));
        coordinator.advance_to(now + ms(400));
        assert!(!coordinator.snapshot().half_hidden);
    }

    #[test]
    fn test_hover_shows_preview_then_content() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::PointerEnter, now);

        coordinator.advance_to(now + ms(200));
        let preview = coordinator.surfaces().live(Role::Preview).unwrap();
        assert!(coordinator.surfaces().is_visible(preview));
        assert_eq!(messages(&coordinator, events::preview::IMAGE), 1);

        coordinator.advance_to(now + ms(2000));
        assert!(coordinator.surfaces().live(Role::Content).is_some());
    }

    #[test]
    fn test_pointer_leave_cancels_hover_timers() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::PointerEnter, now);
        coordinator.handle(Signal::PointerLeave, now + ms(100));
        coordinator.advance_to(now + ms(3000));
        assert_eq!(created(&coordinator, Role::Preview), 0);
        assert_eq!(created(&coordinator, Role::Content), 0);
    }

    #[test]
    fn test_drag_end_snaps_to_nearest_edge() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::DragMove { dx: -1500.0, dy: -800.0 }, now);
        coordinator.handle(Signal::DragEnd { x: 40.0, y: 500.0 }, now + ms(10));

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.edge, Edge::Left);
        assert_eq!(coordinator.ball_frame().origin(), Point::new(-30.0, 500.0));
    }

    #[test]
    fn test_leave_during_drag_tucks_after_drop() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::PointerEnter, now);
        coordinator.handle(Signal::DragMove { dx: -60.0, dy: -400.0 }, now + ms(10));
        coordinator.handle(Signal::PointerLeave, now + ms(20));
        coordinator.handle(Signal::DragEnd { x: 1800.0, y: 500.0 }, now + ms(30));
        assert_eq!(coordinator.ball_frame().origin(), Point::new(1860.0, 500.0));

        coordinator.advance_to(now + ms(5000));
        assert!(coordinator.snapshot().half_hidden);
        assert_eq!(coordinator.ball_frame().origin(), Point::new(1890.0, 500.0));
    }

    #[test]
    fn test_drop_under_pointer_stays_peeking() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::PointerEnter, now);
        coordinator.handle(Signal::DragMove { dx: -60.0, dy: -400.0 }, now + ms(10));
        coordinator.handle(Signal::DragEnd { x: 1800.0, y: 500.0 }, now + ms(30));

        coordinator.advance_to(now + ms(1000));
        assert!(!coordinator.snapshot().half_hidden);
        assert_eq!(coordinator.ball_frame().origin(), Point::new(1860.0, 500.0));
    }

    #[test]
    fn test_content_follows_drag() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::ShowContent, now);
        let content = coordinator.surfaces().live(Role::Content).unwrap();
        let before = coordinator.surfaces().bounds(content).unwrap();

        coordinator.handle(Signal::DragMove { dx: 0.0, dy: -300.0 }, now + ms(10));
        let after = coordinator.surfaces().bounds(content).unwrap();
        assert!(after.y < before.y);
    }

    #[test]
    fn test_next_content_spins_and_sends_joke() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::ShowContent, now);
        let content = coordinator.surfaces().live(Role::Content).unwrap();
        let start = coordinator.surfaces().bounds(content).unwrap().origin();

        coordinator.handle(Signal::NextContent, now + ms(10));
        assert!(coordinator.snapshot().spinning);

        coordinator.advance_to(now + ms(900));
        assert!(!coordinator.snapshot().spinning);
        assert_eq!(coordinator.surfaces().bounds(content).unwrap().origin(), start);
        assert_eq!(messages(&coordinator, events::content::JOKE), 2);
    }

    #[test]
    fn test_effect_cancels_spin() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::ShowContent, now);
        coordinator.handle(Signal::NextContent, now);
        coordinator.handle(Signal::Effect(EffectKind::Ultimate), now + ms(100));

        let snapshot = coordinator.snapshot();
        assert!(!snapshot.spinning);
        assert_eq!(snapshot.active, Some(EffectKind::Ultimate));
        assert!(coordinator.surfaces().live(Role::Content).is_none());
    }

    #[test]
    fn test_hotkey_resolves_any_spelling() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::Hotkey("CmdOrCtrl+Option+2".into()), now);
        assert_eq!(coordinator.active(), Some(EffectKind::Ultimate));
    }

    #[test]
    fn test_unbound_hotkey_is_ignored() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::Hotkey("Control+Z".into()), now);
        assert_eq!(coordinator.active(), None);
    }

    #[test]
    fn test_rejected_hotkey_is_skipped() {
        let mut surfaces = HeadlessSurfaces::new(screen());
        surfaces.reject_hotkey("CommandOrControl+Option+1");
        let (coordinator, _) = coordinator_with(surfaces);
        assert_eq!(coordinator.surfaces().hotkeys(), ["CommandOrControl+Option+2"]);
    }

    #[test]
    fn test_destroyed_ball_is_recreated() {
        let (mut coordinator, now) = coordinator();
        let ball = coordinator.surfaces().live(Role::Ball).unwrap();
        coordinator.surfaces_mut().destroy(ball);

        coordinator.handle(Signal::PointerEnter, now);
        let recreated = coordinator.surfaces().live(Role::Ball).unwrap();
        assert_ne!(recreated, ball);
        let frame = coordinator.surfaces().bounds(recreated).unwrap();
        assert_eq!(frame.origin(), Point::new(1860.0, 920.0));
    }

    #[test]
    fn test_destroyed_content_is_recreated_on_next_show() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::ShowContent, now);
        let content = coordinator.surfaces().live(Role::Content).unwrap();
        coordinator.surfaces_mut().destroy(content);

        coordinator.handle(Signal::NextContent, now + ms(10));
        assert!(!coordinator.snapshot().spinning);

        coordinator.handle(Signal::ShowContent, now + ms(20));
        assert_eq!(created(&coordinator, Role::Content), 2);
    }

    #[test]
    fn test_pending_operations_flush_in_order_when_ready() {
        let (mut coordinator, now) = coordinator_with(HeadlessSurfaces::with_deferred_loading(screen()));
        coordinator.handle(Signal::ShowContent, now);
        let content = coordinator.surfaces().live(Role::Content).unwrap();
        assert!(!coordinator.surfaces().is_visible(content));
        assert_eq!(messages(&coordinator, events::content::JOKE), 0);

        coordinator.surfaces_mut().take_events();
        assert!(coordinator.surfaces_mut().finish_loading(content));
        coordinator.handle(Signal::SurfaceReady(content), now + ms(50));

        let replay: Vec<_> = coordinator
            .surfaces()
            .events()
            .iter()
            .filter(|e| e.role() == Some(Role::Content))
            .cloned()
            .collect();
        assert!(matches!(replay[0], SurfaceEvent::Loaded { .. }));
        assert!(matches!(replay[1], SurfaceEvent::Moved { .. }));
        assert!(matches!(replay[2], SurfaceEvent::Shown { focused: true, .. }));
        assert!(matches!(replay[3], SurfaceEvent::Message { .. }));
    }

    #[test]
    fn test_shutdown_closes_everything() {
        let (mut coordinator, now) = coordinator();
        coordinator.handle(Signal::ShowContent, now);
        coordinator.handle(Signal::Effect(EffectKind::Ultimate), now);
        coordinator.shutdown();

        for role in Role::ALL {
            assert!(coordinator.surfaces().live(role).is_none());
        }
        assert!(coordinator.surfaces().hotkeys().is_empty());
        assert_eq!(coordinator.next_deadline(), None);
    }
}
