//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments, organized into
//! submodules:
//!
//! - `assets` - Joke book and image library inspection
//! - `run` - Live widget session against the headless host
//! - `simulate` - Synthetic-time animation traces
//! - `types` - Shared types used across commands

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{self, JesterConfig};
use crate::error::JesterError;
use crate::modules::assets::{ImageLibrary, JokeBook};
use crate::modules::session::SessionCoordinator;
use crate::modules::surface::HeadlessSurfaces;
use crate::schema;

pub mod assets;
pub mod run;
pub mod simulate;
pub mod types;

pub use run::RunArgs;
pub use simulate::SimulateArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Jester CLI - drive the floating joke widget without a desktop host.
#[derive(Parser, Debug)]
#[command(name = "jester")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Run one animation in simulated time and print the surface moves.
    ///
    /// Output is one JSON object per line, stamped with the milliseconds
    /// elapsed since the animation was requested. The idle bounce is
    /// disabled so only the requested animation runs.
    Simulate(SimulateArgs),

    /// Run the widget for real time against the headless host.
    ///
    /// Feeds a gesture script to the widget, waits, then prints every host
    /// operation followed by the final dock state.
    Run(RunArgs),

    /// Print a random joke from the joke book.
    Joke,

    /// List the images available to the preview.
    Images,

    /// Output Jester configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// Jester configuration file. Can be redirected to a file for use with
    /// editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(jester completions --shell zsh)"
    ///   jester completions --shell fish > ~/.config/fish/completions/jester.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<std::path::PathBuf> {
        self.config.as_ref().map(std::path::PathBuf::from)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), JesterError> {
        if let Some(path_buf) = self.config_path() {
            if !path_buf.exists() {
                return Err(JesterError::InvalidArguments(format!(
                    "Configuration file not found: {}",
                    path_buf.display()
                )));
            }
            config::set_custom_config_path(path_buf);
        }

        match &self.command {
            Commands::Simulate(args) => simulate::execute(args, config::init()),
            Commands::Run(args) => run::execute(args, config::init()),
            Commands::Joke => assets::joke(config::init()),
            Commands::Images => assets::images(config::init()),

            Commands::Schema => {
                let schema_output = schema::print_schema();
                println!("{schema_output}");
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "jester", &mut io::stdout());
    }
}

/// Loads the assets of `config` and builds a coordinator over `surfaces`.
///
/// A missing seed draws one from the thread generator.
fn headless_coordinator(
    config: &JesterConfig,
    surfaces: HeadlessSurfaces,
    seed: Option<u64>,
) -> SessionCoordinator<HeadlessSurfaces> {
    let root = config::asset_root(config);
    let jokes = JokeBook::load(&config::jokes_file(&root));
    let images = ImageLibrary::load(&config::images_dir(&root));
    let rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);

    SessionCoordinator::new(surfaces, config, jokes, images, rng)
}

#[cfg(test)]
mod tests {
    use super::types::{ScreenSize, ScriptStep, SimulatedEffect};
    use super::*;

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["jester", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_joke_and_images() {
        let cli = Cli::try_parse_from(["jester", "joke"]).unwrap();
        assert!(matches!(cli.command, Commands::Joke));
        let cli = Cli::try_parse_from(["jester", "images"]).unwrap();
        assert!(matches!(cli.command, Commands::Images));
    }

    #[test]
    fn test_cli_parses_completions() {
        let cli = Cli::try_parse_from(["jester", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_simulate_defaults() {
        let cli = Cli::try_parse_from(["jester", "simulate", "--effect", "bounce"]).unwrap();
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.effect, SimulatedEffect::Bounce);
                assert_eq!(args.seed, None);
                assert_eq!(args.screen, ScreenSize::default());
                assert!(!args.all);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_cli_parses_simulate_options() {
        let cli = Cli::try_parse_from([
            "jester", "simulate", "-e", "spin", "--seed", "42", "--screen", "2560x1440", "--all",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.effect, SimulatedEffect::Spin);
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.screen, ScreenSize { width: 2560.0, height: 1440.0 });
                assert!(args.all);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_screen() {
        assert!(
            Cli::try_parse_from(["jester", "simulate", "-e", "bounce", "--screen", "big"]).is_err()
        );
    }

    #[test]
    fn test_cli_requires_effect() {
        assert!(Cli::try_parse_from(["jester", "simulate"]).is_err());
    }

    #[test]
    fn test_cli_parses_run_script() {
        let cli =
            Cli::try_parse_from(["jester", "run", "--gesture", "press,press,press", "--linger", "0"])
                .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.gesture, [ScriptStep::Press, ScriptStep::Press, ScriptStep::Press]);
                assert_eq!(args.linger, 0);
                assert_eq!(args.interval, 100);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parses_config_flag() {
        let cli =
            Cli::try_parse_from(["jester", "--config", "/path/to/config.json", "schema"]).unwrap();
        assert_eq!(cli.config, Some("/path/to/config.json".to_string()));
        assert_eq!(cli.config_path(), Some(std::path::PathBuf::from("/path/to/config.json")));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli =
            Cli::try_parse_from(["jester", "--config", "/nonexistent/jester.jsonc", "schema"])
                .unwrap();
        assert!(matches!(cli.execute(), Err(JesterError::InvalidArguments(_))));
    }

    #[test]
    fn test_app_version_is_not_empty() {
        assert!(!APP_VERSION.is_empty());
    }
}
