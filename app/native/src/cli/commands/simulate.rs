//! Synthetic-time animation simulator.
//!
//! Runs one animation against the headless host without sleeping: the
//! coordinator is polled at each of its own deadlines, and every host
//! operation is printed as a JSON line stamped with the simulated time.

use std::io::{self, Write};
use std::time::Instant;

use clap::Args;
use serde::Serialize;

use super::types::{ScreenSize, SimulatedEffect};
use crate::config::JesterConfig;
use crate::error::JesterError;
use crate::modules::session::{SessionCoordinator, Signal};
use crate::modules::surface::{HeadlessSurfaces, SurfaceEvent};

/// Arguments for `jester simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// The animation to run.
    #[arg(long, short, value_enum)]
    pub effect: SimulatedEffect,

    /// Seed for the random source. Random when omitted.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Work area of the simulated display.
    #[arg(long, default_value = "1920x1080", value_name = "WIDTHxHEIGHT")]
    pub screen: ScreenSize,

    /// Print every host operation instead of only surface moves.
    #[arg(long)]
    pub all: bool,
}

/// One printed line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceLine {
    /// Milliseconds since the animation was requested.
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: SurfaceEvent,
}

/// Execute `jester simulate`.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn execute(args: &SimulateArgs, config: &JesterConfig) -> Result<(), JesterError> {
    let mut config = config.clone();
    config.idle.enabled = false;

    let surfaces = HeadlessSurfaces::new(args.screen.rect());
    let mut coordinator = super::headless_coordinator(&config, surfaces, args.seed);
    let lines = trace(&mut coordinator, args.effect, Instant::now());

    let mut out = io::stdout().lock();
    for line in lines.iter().filter(|line| args.all || matches!(line.event, SurfaceEvent::Moved { .. })) {
        writeln!(out, "{}", serde_json::to_string(line)?)?;
    }
    Ok(())
}

/// Runs `effect` to completion starting at `start` and returns every host operation.
pub fn trace(
    coordinator: &mut SessionCoordinator<HeadlessSurfaces>,
    effect: SimulatedEffect,
    start: Instant,
) -> Vec<TraceLine> {
    let mut lines = Vec::new();

    coordinator.start(start);
    match effect.effect() {
        Some(kind) => {
            coordinator.request(kind, start);
        }
        None => {
            coordinator.handle(Signal::ShowContent, start);
            coordinator.handle(Signal::NextContent, start);
        }
    }
    record(coordinator, start, start, &mut lines);

    while coordinator.active().is_some() || coordinator.snapshot().spinning {
        let Some(deadline) = coordinator.next_deadline() else {
            break;
        };
        coordinator.poll(deadline);
        record(coordinator, start, deadline, &mut lines);
    }

    lines
}

fn record(
    coordinator: &mut SessionCoordinator<HeadlessSurfaces>,
    start: Instant,
    now: Instant,
    lines: &mut Vec<TraceLine>,
) {
    let at_ms = u64::try_from(now.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX);
    lines.extend(
        coordinator.surfaces_mut().take_events().into_iter().map(|event| TraceLine { at_ms, event }),
    );
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::modules::assets::{ImageLibrary, JokeBook};
    use crate::modules::surface::Role;

    fn coordinator(seed: u64) -> SessionCoordinator<HeadlessSurfaces> {
        let mut config = JesterConfig::default();
        config.idle.enabled = false;
        SessionCoordinator::new(
            HeadlessSurfaces::new(ScreenSize::default().rect()),
            &config,
            JokeBook::default(),
            ImageLibrary::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_bounce_trace_is_reproducible() {
        let start = Instant::now();
        let first = trace(&mut coordinator(3), SimulatedEffect::Bounce, start);
        let second = trace(&mut coordinator(3), SimulatedEffect::Bounce, start);
        assert_eq!(first, second);
        assert!(first.last().unwrap().at_ms >= 5700);
    }

    #[test]
    fn test_spin_trace_moves_content() {
        let lines = trace(&mut coordinator(1), SimulatedEffect::Spin, Instant::now());
        let content_moves = lines
            .iter()
            .filter(|line| matches!(line.event, SurfaceEvent::Moved { role: Role::Content, .. }))
            .count();
        assert!(content_moves > 50);
        assert!(lines.last().unwrap().at_ms >= 800);
    }

    #[test]
    fn test_ultimate_trace_launches_overlay() {
        let lines = trace(&mut coordinator(1), SimulatedEffect::Ultimate, Instant::now());
        assert!(lines.iter().any(|line| matches!(
            &line.event,
            SurfaceEvent::Message { role: Role::Overlay, topic, .. } if topic == crate::events::overlay::START_DESTRUCTION
        )));
        assert!(matches!(lines.last().unwrap().event, SurfaceEvent::Shown { role: Role::Ball, .. }));
    }

    #[test]
    fn test_trace_line_serializes_flat() {
        let line = TraceLine {
            at_ms: 12,
            event: SurfaceEvent::Hidden { id: crate::modules::surface::SurfaceId(1), role: Role::Ball },
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["atMs"], 12);
        assert_eq!(json["event"], "hidden");
        assert_eq!(json["role"], "ball");
    }
}
