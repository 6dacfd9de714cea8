//! Ambient argument sources.
//!
//! A parse with no explicit arguments needs two sequences: the process's
//! own argument list and, when running under a task runner, the runner's
//! echo of the original invocation. Both reads live behind the
//! [`ArgSource`] trait so production code injects the real process state
//! and tests inject fixed sequences.

use serde::Deserialize;
use tracing::debug;

/// Environment variable consulted for the task-runner echo by default.
///
/// npm-compatible runners place a JSON object shaped like
/// `{"original": ["run", "<task>", ...]}` here.
pub const TASK_ECHO_VAR: &str = "npm_config_argv";

/// Supplier of the ambient argument sequences consumed by a parse with no
/// explicit arguments.
pub trait ArgSource {
    /// Primary argument sequence of the running process.
    fn primary(&self) -> Vec<String>;

    /// Argument sequence echoed by a task runner, when one is present.
    ///
    /// `None` both when no runner is involved and when the echo cannot be
    /// recovered; callers never see the difference.
    fn echoed(&self) -> Option<Vec<String>> {
        None
    }
}

/// Production source reading the real process arguments and task-runner
/// echo.
pub struct ProcessSource {
    echo_var: String,
}

impl ProcessSource {
    pub fn new() -> Self {
        Self {
            echo_var: TASK_ECHO_VAR.to_string(),
        }
    }

    /// Read the task-runner echo from a different environment variable.
    pub fn with_echo_var(name: impl Into<String>) -> Self {
        Self {
            echo_var: name.into(),
        }
    }
}

impl Default for ProcessSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgSource for ProcessSource {
    fn primary(&self) -> Vec<String> {
        // Drop the program path; everything after it belongs to the parse.
        std::env::args().skip(1).collect()
    }

    fn echoed(&self) -> Option<Vec<String>> {
        read_task_echo(&self.echo_var)
    }
}

/// Shape of the task-runner echo payload.
#[derive(Debug, Deserialize)]
struct EchoPayload {
    original: Vec<String>,
}

/// Recover the echoed invocation from the environment.
///
/// Any failure (unset variable, malformed JSON, missing or ill-typed
/// `original` field) degrades to `None` rather than an error.
fn read_task_echo(var: &str) -> Option<Vec<String>> {
    let payload = std::env::var(var).ok()?;
    let echo: EchoPayload = match serde_json::from_str(&payload) {
        Ok(echo) => echo,
        Err(err) => {
            debug!("ignoring malformed task echo in {}: {}", var, err);
            return None;
        }
    };
    // The echo opens with the runner verb and task name ("run", "<task>").
    Some(echo.original.into_iter().skip(2).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_drops_the_runner_verb_and_task_name() {
        std::env::set_var(
            "OPTIC_TEST_ECHO_FULL",
            r#"{"original": ["run", "build", "--port", "80"]}"#,
        );
        let source = ProcessSource::with_echo_var("OPTIC_TEST_ECHO_FULL");

        assert_eq!(
            source.echoed(),
            Some(vec!["--port".to_string(), "80".to_string()])
        );
        std::env::remove_var("OPTIC_TEST_ECHO_FULL");
    }

    #[test]
    fn unset_variable_yields_none() {
        let source = ProcessSource::with_echo_var("OPTIC_TEST_ECHO_UNSET");
        assert_eq!(source.echoed(), None);
    }

    #[test]
    fn malformed_json_yields_none() {
        std::env::set_var("OPTIC_TEST_ECHO_BROKEN", "{not json");
        let source = ProcessSource::with_echo_var("OPTIC_TEST_ECHO_BROKEN");

        assert_eq!(source.echoed(), None);
        std::env::remove_var("OPTIC_TEST_ECHO_BROKEN");
    }

    #[test]
    fn missing_original_field_yields_none() {
        std::env::set_var("OPTIC_TEST_ECHO_SHAPE", r#"{"args": ["run", "build"]}"#);
        let source = ProcessSource::with_echo_var("OPTIC_TEST_ECHO_SHAPE");

        assert_eq!(source.echoed(), None);
        std::env::remove_var("OPTIC_TEST_ECHO_SHAPE");
    }

    #[test]
    fn short_echo_yields_an_empty_sequence() {
        std::env::set_var("OPTIC_TEST_ECHO_SHORT", r#"{"original": ["run"]}"#);
        let source = ProcessSource::with_echo_var("OPTIC_TEST_ECHO_SHORT");

        assert_eq!(source.echoed(), Some(Vec::new()));
        std::env::remove_var("OPTIC_TEST_ECHO_SHORT");
    }

    #[test]
    fn default_source_reads_the_npm_variable() {
        assert_eq!(TASK_ECHO_VAR, "npm_config_argv");
    }
}
