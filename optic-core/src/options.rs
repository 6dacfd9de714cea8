//! Parser configuration.

use serde_json::Value;

/// Configuration applied to every tokenize and parse call.
///
/// Fixed for the lifetime of the parser it is attached to.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Prefix that marks a token as an option (`-`, `--`, `/`, ...).
    ///
    /// Also stripped, repeatedly, from the front of unregistered tokens
    /// when building formatted output. An empty delimiter makes every
    /// token an option and strips nothing.
    pub delimiter: String,

    /// Value assigned to an option token with no following value.
    pub default_value: Value,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: "-".to_string(),
            default_value: Value::Bool(true),
        }
    }
}
