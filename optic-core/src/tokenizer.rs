//! Tokenizer for raw argument sequences.
//!
//! This module turns a flat list of argument tokens into a mapping from
//! delimiter-prefixed token to value, with no knowledge of any registered
//! schema. Classification looks at most one token ahead.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::options::ParseOptions;

/// Mapping produced by the tokenizer: raw option token (delimiter prefix
/// included) to its string value or the configured default.
pub type RawArgs = Map<String, Value>;

/// Tokenize a list of command line arguments.
///
/// Tokens are consumed left to right, one or two at a time, and trimmed
/// before classification. Four shapes are recognized for a token starting
/// with the delimiter:
/// - `--key=value`: inline assignment; only the first `=` splits
/// - `--key --other`: bare option followed by another option
/// - `--key value`: option with a value; the value token is consumed
/// - `--key` at the end of the sequence: trailing bare option
///
/// Bare options receive a clone of the configured default value. Values
/// have one pair of matching surrounding quotes removed. Tokens that do
/// not start with the delimiter never become keys and are dropped. A
/// repeated token overwrites the earlier entry.
///
/// # Arguments
/// * `args` - List of argument tokens to scan
/// * `options` - Delimiter and bare-option default to apply
///
/// # Returns
/// * `RawArgs` - Mapping of raw tokens to values
pub fn tokenize(args: &[String], options: &ParseOptions) -> RawArgs {
    let delimiter = options.delimiter.as_str();
    let mut result = RawArgs::new();
    let mut i = 0;

    while i < args.len() {
        let current = args[i].trim();
        // A lookahead that trims to nothing counts as no lookahead at all.
        let next = args.get(i + 1).map_or("", |arg| arg.trim());
        i += 1;

        if !current.starts_with(delimiter) {
            trace!("dropping token '{}' without delimiter '{}'", current, delimiter);
            continue;
        }

        if let Some((token, value)) = split_assignment(current) {
            store(
                &mut result,
                token.trim(),
                Value::String(strip_quotes(value.trim()).to_string()),
            );
        } else if !next.is_empty() && next.starts_with(delimiter) {
            store(&mut result, current, options.default_value.clone());
        } else if !next.is_empty() {
            store(&mut result, current, Value::String(strip_quotes(next).to_string()));
            i += 1; // the lookahead was consumed as this option's value
        } else {
            store(&mut result, current, options.default_value.clone());
        }
    }

    result
}

/// Split an inline `token=value` assignment on its first `=`.
///
/// `None` when the token carries no `=` past its first character, leaving
/// classification to the caller.
fn split_assignment(token: &str) -> Option<(&str, &str)> {
    match token.split_once('=') {
        Some((key, value)) if !key.is_empty() => Some((key, value)),
        _ => None,
    }
}

/// Remove one pair of matching surrounding quotes and trim the interior.
///
/// Applies only when the value is at least two characters long and starts
/// and ends with the same quote character. Anything else, including a lone
/// or mismatched quote, passes through verbatim.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        value[1..value.len() - 1].trim()
    } else {
        value
    }
}

fn store(result: &mut RawArgs, token: &str, value: Value) {
    if result.contains_key(token) {
        debug!("token '{}' repeats, last value wins", token);
    }
    result.insert(token.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn inline_assignment_splits_on_first_equals() {
        let raw = tokenize(&argv(&["--test=1", "--conn=a=b"]), &opts());
        assert_eq!(raw["--test"], json!("1"));
        assert_eq!(raw["--conn"], json!("a=b"));
    }

    #[test]
    fn option_followed_by_value_consumes_it() {
        let raw = tokenize(&argv(&["-p", "2"]), &opts());
        assert_eq!(raw["-p"], json!("2"));
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn option_followed_by_option_gets_default() {
        let raw = tokenize(&argv(&["--isTest", "--title", "4"]), &opts());
        assert_eq!(raw["--isTest"], json!(true));
        assert_eq!(raw["--title"], json!("4"));
    }

    #[test]
    fn trailing_option_gets_default() {
        let raw = tokenize(&argv(&["--title", "4", "--watch"]), &opts());
        assert_eq!(raw["--watch"], json!(true));
    }

    #[test]
    fn configured_default_replaces_true() {
        let options = ParseOptions {
            default_value: json!("on"),
            ..ParseOptions::default()
        };
        let raw = tokenize(&argv(&["--watch"]), &options);
        assert_eq!(raw["--watch"], json!("on"));
    }

    #[test]
    fn surrounding_quotes_are_stripped() {
        let raw = tokenize(
            &argv(&["--desc=\"5\"", "--text", "\"6\"", "--name", "'kit'"]),
            &opts(),
        );
        assert_eq!(raw["--desc"], json!("5"));
        assert_eq!(raw["--text"], json!("6"));
        assert_eq!(raw["--name"], json!("kit"));
    }

    #[test]
    fn quoted_interior_is_trimmed_and_mismatched_quotes_pass_through() {
        let raw = tokenize(&argv(&["--pad", "\" x \"", "--odd", "\"y'", "--lone", "\""]), &opts());
        assert_eq!(raw["--pad"], json!("x"));
        assert_eq!(raw["--odd"], json!("\"y'"));
        assert_eq!(raw["--lone"], json!("\""));
    }

    #[test]
    fn tokens_without_delimiter_are_dropped() {
        let raw = tokenize(&argv(&["stray", "-p", "1", "extra"]), &opts());
        assert_eq!(raw.len(), 1);
        assert_eq!(raw["-p"], json!("1"));
    }

    #[test]
    fn whitespace_tokens_count_as_absent() {
        let raw = tokenize(&argv(&["-a", "   ", "-b"]), &opts());
        assert_eq!(raw["-a"], json!(true));
        assert_eq!(raw["-b"], json!(true));
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn repeated_token_keeps_last_value() {
        let raw = tokenize(&argv(&["--m=1", "--m", "2"]), &opts());
        assert_eq!(raw["--m"], json!("2"));
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn tokens_and_values_are_trimmed() {
        let raw = tokenize(&argv(&["  --key = spaced  ", "  -p  ", "  7  "]), &opts());
        assert_eq!(raw["--key"], json!("spaced"));
        assert_eq!(raw["-p"], json!("7"));
    }

    #[test]
    fn custom_delimiter_is_honored() {
        let options = ParseOptions {
            delimiter: "/".to_string(),
            ..ParseOptions::default()
        };
        let raw = tokenize(&argv(&["/port", "80", "-x"]), &options);
        assert_eq!(raw["/port"], json!("80"));
        assert!(!raw.contains_key("-x"));
    }

    #[test]
    fn empty_delimiter_makes_every_token_an_option() {
        let options = ParseOptions {
            delimiter: String::new(),
            ..ParseOptions::default()
        };
        let raw = tokenize(&argv(&["port", "80", "k=v"]), &options);
        assert_eq!(raw["port"], json!(true));
        assert_eq!(raw["80"], json!(true));
        assert_eq!(raw["k"], json!("v"));
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(tokenize(&[], &opts()).is_empty());
    }
}
