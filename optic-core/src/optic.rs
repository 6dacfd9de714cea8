//! The parser itself: configuration, option registration and the parse
//! entry points.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::convert::ConvertFn;
use crate::error::{Error, Result};
use crate::options::ParseOptions;
use crate::registry::{strip_delimiter, FormattedArgs, OptionDef, Registry};
use crate::source::{ArgSource, ProcessSource};
use crate::tokenizer::{tokenize, RawArgs};

/// Result of a full parse.
///
/// `inner` holds the formatted primary sequence and `outer` the formatted
/// task-runner echo; `outer` is empty when no echo is available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseEnvelope {
    pub inner: FormattedArgs,
    pub outer: FormattedArgs,
}

/// Command line argument parser with a registrable option schema.
///
/// Tokenizing is schema-free; the registered options only shape the
/// formatted output, renaming tokens to their target keys and converting
/// their values.
pub struct Optic {
    options: ParseOptions,
    registry: Registry,
}

impl Optic {
    /// Create a parser with the default options: `-` delimiter, `true`
    /// for bare options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with explicit options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            registry: Registry::new(),
        }
    }

    /// Configuration this parser was built with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Registered option definitions.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a token under its delimiter-stripped name.
    pub fn register(&mut self, token: &str) -> Result<&mut Self> {
        self.define(token, None, None)
    }

    /// Register a token under an explicit target key.
    pub fn register_as(&mut self, token: &str, key: &str) -> Result<&mut Self> {
        self.define(token, Some(key), None)
    }

    /// Register a token under its delimiter-stripped name with a value
    /// conversion.
    pub fn register_with<F>(&mut self, token: &str, convert: F) -> Result<&mut Self>
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.define(token, None, Some(Box::new(convert)))
    }

    /// Register a token under an explicit target key with a value
    /// conversion.
    pub fn register_as_with<F>(&mut self, token: &str, key: &str, convert: F) -> Result<&mut Self>
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.define(token, Some(key), Some(Box::new(convert)))
    }

    fn define(
        &mut self,
        token: &str,
        key: Option<&str>,
        convert: Option<ConvertFn>,
    ) -> Result<&mut Self> {
        if token.trim().is_empty() {
            return Err(Error::InvalidToken(format!(
                "'{}' must not be empty or blank",
                token
            )));
        }

        let key = match key {
            Some(key) => key.to_string(),
            None => strip_delimiter(token, &self.options.delimiter).to_string(),
        };

        // Tokens are stored verbatim; lookups during formatting match the
        // exact registered spelling.
        self.registry.insert(token, OptionDef { key, convert });
        Ok(self)
    }

    /// Tokenize an argument list with this parser's options, ignoring the
    /// registered schema.
    pub fn tokenize(&self, args: &[String]) -> RawArgs {
        tokenize(args, &self.options)
    }

    /// Parse an explicit argument list.
    ///
    /// The result lands in `inner`; `outer` stays empty because no
    /// ambient source is consulted.
    pub fn parse_args(&self, args: &[String]) -> Result<ParseEnvelope> {
        let raw = self.tokenize(args);

        Ok(ParseEnvelope {
            inner: self.registry.format(&raw, &self.options.delimiter)?,
            outer: FormattedArgs::new(),
        })
    }

    /// Parse the ambient sequences supplied by a source.
    ///
    /// `inner` is built from the primary sequence. When the source
    /// reports a task-runner echo, `outer` is built from it; an
    /// unavailable echo leaves `outer` empty and is never an error.
    /// Converter failures on either sequence propagate unchanged.
    pub fn parse_from(&self, source: &dyn ArgSource) -> Result<ParseEnvelope> {
        let raw = self.tokenize(&source.primary());
        let mut envelope = ParseEnvelope {
            inner: self.registry.format(&raw, &self.options.delimiter)?,
            outer: FormattedArgs::new(),
        };

        if let Some(echoed) = source.echoed() {
            let raw = self.tokenize(&echoed);
            envelope.outer = self.registry.format(&raw, &self.options.delimiter)?;
        }

        Ok(envelope)
    }

    /// Parse the real process arguments and task-runner echo.
    pub fn parse(&self) -> Result<ParseEnvelope> {
        self.parse_from(&ProcessSource::new())
    }
}

impl Default for Optic {
    fn default() -> Self {
        Self::new()
    }
}
