//! Joke book and image library.
//!
//! Both are loaded once from the asset directory and never fail the widget:
//! a missing or malformed joke book yields placeholder text and a missing
//! image directory yields the empty-state marker.

use std::fs;
use std::path::{Path, PathBuf};

use natord::compare;
use rand::Rng;
use serde::Deserialize;

/// Text shown when the joke book is empty or could not be read.
pub const FALLBACK_JOKE: &str = "No jokes yet. Add some to assets/jokes.json!";

/// Supported image extensions (lowercase).
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Errors that can occur while loading assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The asset file or directory could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The joke book is not valid JSON of the expected shape.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// Joke Book
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct JokeFile {
    #[serde(default)]
    jokes: Vec<String>,
}

/// Jokes with a no-immediate-repeat random picker.
#[derive(Debug, Clone, Default)]
pub struct JokeBook {
    jokes: Vec<String>,
    last: Option<usize>,
}

impl JokeBook {
    /// Creates a book from a list of jokes.
    #[must_use]
    pub const fn new(jokes: Vec<String>) -> Self { Self { jokes, last: None } }

    /// Reads a `{"jokes": [...]}` file.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Io`] if the file cannot be read and
    /// [`AssetError::Parse`] if it is not a joke book.
    pub fn try_load(path: &Path) -> Result<Self, AssetError> {
        let data = fs::read_to_string(path)
            .map_err(|source| AssetError::Io { path: path.to_path_buf(), source })?;
        let file: JokeFile = serde_json::from_str(&data)
            .map_err(|source| AssetError::Parse { path: path.to_path_buf(), source })?;
        Ok(Self::new(file.jokes))
    }

    /// Reads a joke book, logging and returning an empty book on failure.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(book) => {
                tracing::debug!(count = book.len(), path = %path.display(), "loaded jokes");
                book
            }
            Err(err) => {
                tracing::warn!(error = %err, "joke book unavailable, using placeholder");
                Self::default()
            }
        }
    }

    /// Picks a random joke, never the same one twice in a row when the book
    /// holds more than one. An empty book returns [`FALLBACK_JOKE`].
    pub fn next(&mut self, rng: &mut impl Rng) -> &str {
        let index = match self.jokes.len() {
            0 => return FALLBACK_JOKE,
            1 => 0,
            len => match self.last {
                None => rng.random_range(0..len),
                Some(last) => {
                    // Draw from the other len - 1 slots and skip over the last pick.
                    let index = rng.random_range(0..len - 1);
                    if index >= last { (index + 1).min(len - 1) } else { index }
                }
            },
        };

        self.last = Some(index);
        &self.jokes[index]
    }

    /// Number of jokes.
    #[must_use]
    pub fn len(&self) -> usize { self.jokes.len() }

    /// Whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.jokes.is_empty() }
}

// ============================================================================
// Image Library
// ============================================================================

/// Checks if a file has a supported image extension (case-insensitive).
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Images available to the preview surface.
#[derive(Debug, Clone, Default)]
pub struct ImageLibrary {
    images: Vec<PathBuf>,
}

impl ImageLibrary {
    /// Creates a library from a list of paths.
    #[must_use]
    pub const fn new(images: Vec<PathBuf>) -> Self { Self { images } }

    /// Lists supported images in `dir`, naturally sorted.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Io`] if the directory cannot be read.
    pub fn try_load(dir: &Path) -> Result<Self, AssetError> {
        let entries =
            fs::read_dir(dir).map_err(|source| AssetError::Io { path: dir.to_path_buf(), source })?;

        let mut images: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_supported_image(path))
            .collect();

        images.sort_by(|a, b| compare(a.to_string_lossy().as_ref(), b.to_string_lossy().as_ref()));
        Ok(Self::new(images))
    }

    /// Lists images in `dir`, logging and returning an empty library on failure.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        match Self::try_load(dir) {
            Ok(library) => {
                tracing::debug!(count = library.len(), dir = %dir.display(), "loaded images");
                library
            }
            Err(err) => {
                tracing::warn!(error = %err, "image library unavailable");
                Self::default()
            }
        }
    }

    /// A random image, or `None` when the library is empty.
    pub fn random(&self, rng: &mut impl Rng) -> Option<&Path> {
        if self.images.is_empty() {
            return None;
        }
        self.images.get(rng.random_range(0..self.images.len())).map(PathBuf::as_path)
    }

    /// All images in display order.
    #[must_use]
    pub fn images(&self) -> &[PathBuf] { &self.images }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize { self.images.len() }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.images.is_empty() }
}
