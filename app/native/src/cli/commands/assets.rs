//! Joke book and image library inspection commands.

use std::io::{self, Write};

use crate::config::{self, JesterConfig};
use crate::error::JesterError;
use crate::modules::assets::{ImageLibrary, JokeBook};

/// Execute `jester joke`.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn joke(config: &JesterConfig) -> Result<(), JesterError> {
    let root = config::asset_root(config);
    let mut book = JokeBook::load(&config::jokes_file(&root));
    writeln!(io::stdout().lock(), "{}", book.next(&mut rand::rng()))?;
    Ok(())
}

/// Execute `jester images`.
///
/// Prints the naturally sorted image paths as a JSON array. An empty array
/// means the preview will show its empty state.
///
/// # Errors
///
/// Returns an error if serialization or writing to stdout fails.
pub fn images(config: &JesterConfig) -> Result<(), JesterError> {
    let root = config::asset_root(config);
    let library = ImageLibrary::load(&config::images_dir(&root));
    let json = serde_json::to_string_pretty(library.images())?;
    writeln!(io::stdout().lock(), "{json}")?;
    Ok(())
}
