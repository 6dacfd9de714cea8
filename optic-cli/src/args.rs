//! Command line surface for the optic inspector.

use anyhow::{bail, Result};
use clap::Parser;
use serde_json::Value;

/// Command line arguments for the optic inspector
#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect how raw tokens parse into structured options")]
pub struct Cli {
    /// Prefix that marks a token as an option
    #[arg(long, default_value = "-")]
    pub delimiter: String,

    /// Value assigned to a bare option, parsed as JSON with a plain
    /// string fallback
    #[arg(long, default_value = "true", value_name = "JSON")]
    pub default_value: String,

    /// Option mapping in TOKEN[=KEY][:CONVERTER] form, repeatable.
    /// Converters: integer, float, boolean, string
    #[arg(long = "map", value_name = "SPEC", allow_hyphen_values = true)]
    pub maps: Vec<String>,

    /// Output raw JSON
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Tokens to parse; put them after `--` when the first one starts
    /// with the delimiter
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TOKENS")]
    pub tokens: Vec<String>,
}

/// A parsed `--map` specification.
#[derive(Debug, PartialEq)]
pub struct MapSpec {
    pub token: String,
    pub key: Option<String>,
    pub converter: Option<String>,
}

/// Parse a TOKEN[=KEY][:CONVERTER] mapping specification.
///
/// The converter is split off the last `:` and the key off the first `=`;
/// either part may be omitted. Empty parts count as omitted.
pub fn parse_map_spec(spec: &str) -> Result<MapSpec> {
    let (token_and_key, converter) = match spec.rsplit_once(':') {
        Some((head, conv)) if !conv.is_empty() => (head, Some(conv.to_string())),
        Some((head, _)) => (head, None),
        None => (spec, None),
    };

    let (token, key) = match token_and_key.split_once('=') {
        Some((token, key)) if !key.is_empty() => (token, Some(key.to_string())),
        Some((token, _)) => (token, None),
        None => (token_and_key, None),
    };

    if token.trim().is_empty() {
        bail!("empty option token in --map spec '{}'", spec);
    }

    Ok(MapSpec {
        token: token.to_string(),
        key,
        converter,
    })
}

/// Interpret the bare-option default: JSON when it parses, plain string
/// otherwise.
pub fn parse_default_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
