//! Platform helpers shared by the configuration and asset loaders.

pub mod path;
