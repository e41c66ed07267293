//! Bundled asset locations.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::platform::path::{expand, expand_and_resolve};

/// Where the joke book and the image library live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetsConfig {
    /// Asset directory. Supports `~` and environment variables.
    /// Contains `jokes.json` and an `images/` directory.
    /// Default: "assets"
    pub path: String,
}

impl Default for AssetsConfig {
    fn default() -> Self { Self { path: "assets".to_string() } }
}

impl AssetsConfig {
    /// Expanded asset directory.
    #[must_use]
    pub fn root(&self) -> PathBuf { expand(&self.path) }

    /// Expanded asset directory, resolved against `base` when relative.
    #[must_use]
    pub fn root_relative_to(&self, base: &Path) -> PathBuf { expand_and_resolve(&self.path, base) }
}

/// Path of the joke book inside an asset directory.
#[must_use]
pub fn jokes_file(root: &Path) -> PathBuf { root.join("jokes.json") }

/// Path of the image library inside an asset directory.
#[must_use]
pub fn images_dir(root: &Path) -> PathBuf { root.join("images") }
