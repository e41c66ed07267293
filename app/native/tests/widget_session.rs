//! End-to-end widget scenarios against the headless host.
//!
//! Each test wires a coordinator from real configuration and asset files and
//! drives it the way a desktop shell would: pointer and drag input, presses,
//! and the clock.
//!
//! ## Running
//!
//! ```bash
//! cargo test -p jester --test widget_session
//! ```

use std::fs;
use std::io::Write;
use std::time::{Duration, Instant};

use jester_lib::config::{self, JesterConfig, load_config_from_path};
use jester_lib::events;
use jester_lib::modules::assets::{ImageLibrary, JokeBook};
use jester_lib::modules::geometry::{Edge, Point, Rect};
use jester_lib::modules::session::{EffectKind, SessionCoordinator, Signal, WidgetActor};
use jester_lib::modules::surface::{HeadlessSurfaces, Role, SurfaceEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// Helpers
// ============================================================================

fn screen() -> Rect { Rect::new(0.0, 0.0, 1920.0, 1080.0) }

fn ms(value: u64) -> Duration { Duration::from_millis(value) }

fn build(config: &JesterConfig, jokes: JokeBook, images: ImageLibrary) -> SessionCoordinator<HeadlessSurfaces> {
    SessionCoordinator::new(
        HeadlessSurfaces::new(screen()),
        config,
        jokes,
        images,
        StdRng::seed_from_u64(11),
    )
}

fn started(config: &JesterConfig) -> (SessionCoordinator<HeadlessSurfaces>, Instant) {
    let mut coordinator = build(config, JokeBook::new(vec!["knock knock".into()]), ImageLibrary::default());
    let now = Instant::now();
    coordinator.start(now);
    (coordinator, now)
}

fn messages<'a>(
    coordinator: &'a SessionCoordinator<HeadlessSurfaces>,
    topic: &'a str,
) -> impl Iterator<Item = &'a serde_json::Value> + 'a {
    coordinator.surfaces().events().iter().filter_map(move |event| match event {
        SurfaceEvent::Message { topic: t, payload, .. } if t == topic => Some(payload),
        _ => None,
    })
}

// ============================================================================
// Configuration and assets
// ============================================================================

#[test]
fn test_config_file_drives_ball_size_and_idle_timeout() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{
            // a smaller ball that gets bored quickly
            "widget": {{ "ballSize": 48 }},
            "idle": {{ "timeout": 5000 }}
        }}"#
    )
    .unwrap();
    let (config, _) = load_config_from_path(file.path()).unwrap();

    let (mut coordinator, now) = started(&config);
    assert_eq!(coordinator.ball_frame(), Rect::new(1896.0, 932.0, 48.0, 48.0));

    coordinator.advance_to(now + ms(4999));
    assert_eq!(coordinator.active(), None);

    coordinator.advance_to(now + ms(5000));
    assert_eq!(coordinator.active(), Some(EffectKind::Bounce));
}

#[test]
fn test_assets_from_directory_reach_the_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(config::jokes_file(dir.path()), r#"{"jokes": ["why did the ball roll?"]}"#).unwrap();
    fs::create_dir(config::images_dir(dir.path())).unwrap();
    fs::write(config::images_dir(dir.path()).join("cat.png"), b"").unwrap();

    let jokes = JokeBook::load(&config::jokes_file(dir.path()));
    let images = ImageLibrary::load(&config::images_dir(dir.path()));
    let mut coordinator = build(&JesterConfig::default(), jokes, images);
    let now = Instant::now();
    coordinator.start(now);

    coordinator.handle(Signal::PointerEnter, now);
    coordinator.advance_to(now + ms(2000));

    let image = messages(&coordinator, events::preview::IMAGE).next().unwrap();
    assert!(image["path"].as_str().unwrap().ends_with("cat.png"));

    let joke = messages(&coordinator, events::content::JOKE).next().unwrap();
    assert_eq!(joke["text"], "why did the ball roll?");
}

#[test]
fn test_empty_asset_directory_uses_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let jokes = JokeBook::load(&config::jokes_file(dir.path()));
    let images = ImageLibrary::load(&config::images_dir(dir.path()));
    let mut coordinator = build(&JesterConfig::default(), jokes, images);
    let now = Instant::now();
    coordinator.start(now);

    coordinator.handle(Signal::DoublePress, now);
    let image = messages(&coordinator, events::preview::IMAGE).next().unwrap();
    assert!(image["path"].is_null());

    coordinator.advance_to(now + ms(10_000));
    coordinator.handle(Signal::ShowContent, now + ms(10_001));
    let joke = messages(&coordinator, events::content::JOKE).next().unwrap();
    assert_eq!(joke["text"], jester_lib::modules::assets::FALLBACK_JOKE);
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_ultimate_round_trip_restores_the_dock() {
    let (mut coordinator, now) = started(&JesterConfig::default());
    let ball = coordinator.surfaces().live(Role::Ball).unwrap();

    for offset in [0, 80, 160] {
        coordinator.handle(Signal::Press, now + ms(offset));
    }
    assert_eq!(coordinator.active(), Some(EffectKind::Ultimate));

    coordinator.advance_to(now + ms(1000));
    assert!(!coordinator.surfaces().is_visible(ball));
    assert_eq!(messages(&coordinator, events::overlay::START_DESTRUCTION).count(), 1);

    coordinator.advance_to(now + ms(62_000));
    assert_eq!(coordinator.active(), None);
    assert!(coordinator.surfaces().live(Role::Overlay).is_none());
    assert!(coordinator.surfaces().is_visible(ball));
    assert_eq!(coordinator.ball_frame().origin(), Point::new(1890.0, 920.0));
    assert!(coordinator.snapshot().half_hidden);
}

#[test]
fn test_bounce_returns_to_dragged_dock() {
    let (mut coordinator, now) = started(&JesterConfig::default());

    coordinator.handle(Signal::DragMove { dx: -990.0, dy: -900.0 }, now);
    coordinator.handle(Signal::DragEnd { x: 900.0, y: 20.0 }, now + ms(10));
    assert_eq!(coordinator.snapshot().edge, Edge::Top);
    assert_eq!(coordinator.ball_frame().origin(), Point::new(900.0, -30.0));

    coordinator.handle(Signal::DoublePress, now + ms(500));
    assert_eq!(coordinator.active(), Some(EffectKind::Bounce));

    coordinator.advance_to(now + ms(10_000));
    assert_eq!(coordinator.active(), None);
    assert_eq!(coordinator.snapshot().edge, Edge::Top);
    assert_eq!(coordinator.ball_frame().origin(), Point::new(900.0, -30.0));
}

#[test]
fn test_only_one_session_at_a_time() {
    let (mut coordinator, now) = started(&JesterConfig::default());

    coordinator.handle(Signal::Effect(EffectKind::Shotgun), now);
    coordinator.handle(Signal::DoublePress, now + ms(10));
    coordinator.handle(Signal::Hotkey("CommandOrControl+Alt+2".into()), now + ms(20));
    assert_eq!(coordinator.active(), Some(EffectKind::Shotgun));

    coordinator.advance_to(now + ms(30_000));
    assert_eq!(coordinator.active(), None);
    assert_eq!(messages(&coordinator, events::overlay::START_SHOTGUN).count(), 1);
    assert_eq!(messages(&coordinator, events::overlay::START_DESTRUCTION).count(), 0);
    assert!(coordinator.surfaces().live(Role::Preview).is_none());
}

// ============================================================================
// Actor
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_actor_hover_and_leave() {
    let coordinator = build(&JesterConfig::default(), JokeBook::default(), ImageLibrary::default());
    let (handle, task) = WidgetActor::spawn(coordinator);

    handle.send_async(Signal::PointerEnter).await.unwrap();
    tokio::time::sleep(ms(250)).await;
    assert!(!handle.query().await.unwrap().half_hidden);

    handle.send_async(Signal::PointerLeave).await.unwrap();
    tokio::time::sleep(ms(400)).await;
    assert!(handle.query().await.unwrap().half_hidden);

    handle.shutdown().await.unwrap();
    let coordinator = task.await.unwrap();
    let previews = coordinator
        .surfaces()
        .events()
        .iter()
        .filter(|event| matches!(event, SurfaceEvent::Created { role: Role::Preview, .. }))
        .count();
    assert_eq!(previews, 1);
}
