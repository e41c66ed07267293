//! JSON schema for the configuration file.

use schemars::schema_for;

use crate::config::JesterConfig;

/// Renders the configuration JSON schema, pretty-printed.
#[must_use]
pub fn print_schema() -> String {
    let schema = schema_for!(JesterConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
