//! Real-time widget session against the headless host.

use std::io::{self, Write};
use std::time::Duration;

use clap::Args;

use super::types::{ScreenSize, ScriptStep};
use crate::config::JesterConfig;
use crate::error::JesterError;
use crate::modules::session::WidgetActor;
use crate::modules::surface::HeadlessSurfaces;

/// How long to wait for the final state query.
const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Arguments for `jester run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Gesture script, comma separated (e.g. `enter,press,press`).
    #[arg(long, short, value_enum, value_delimiter = ',')]
    pub gesture: Vec<ScriptStep>,

    /// Delay between script steps, in milliseconds.
    #[arg(long, default_value_t = 100, value_name = "MS")]
    pub interval: u64,

    /// How long to keep the widget running after the script, in milliseconds.
    #[arg(long, default_value_t = 1000, value_name = "MS")]
    pub linger: u64,

    /// Seed for the random source. Random when omitted.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Work area of the simulated display.
    #[arg(long, default_value = "1920x1080", value_name = "WIDTHxHEIGHT")]
    pub screen: ScreenSize,
}

/// Execute `jester run`.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built, the widget actor stops
/// early, or writing to stdout fails.
pub fn execute(args: &RunArgs, config: &JesterConfig) -> Result<(), JesterError> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;

    let surfaces = HeadlessSurfaces::new(args.screen.rect());
    let coordinator = super::headless_coordinator(config, surfaces, args.seed);

    let (snapshot, mut coordinator) = runtime.block_on(async {
        let (handle, task) = WidgetActor::spawn(coordinator);

        for step in &args.gesture {
            tracing::debug!(step = ?step, "script step");
            handle.send_async(step.signal()).await?;
            tokio::time::sleep(Duration::from_millis(args.interval)).await;
        }
        tokio::time::sleep(Duration::from_millis(args.linger)).await;

        let snapshot = handle.query_timeout(QUERY_TIMEOUT).await?;
        handle.shutdown().await?;
        let coordinator = task.await?;
        Ok::<_, JesterError>((snapshot, coordinator))
    })?;

    let mut out = io::stdout().lock();
    for event in coordinator.surfaces_mut().take_events() {
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }
    writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
    Ok(())
}
