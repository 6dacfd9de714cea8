//! Option registry and schema-driven formatting.
//!
//! The registry holds declared options keyed by their exact raw token,
//! delimiter prefix included, and rewrites tokenizer output against them:
//! registered tokens are renamed and converted, unregistered tokens keep
//! their value and lose their delimiter prefix.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::convert::ConvertFn;
use crate::error::Result;
use crate::tokenizer::RawArgs;

/// Mapping produced by formatting: resolved option name to final value.
pub type FormattedArgs = Map<String, Value>;

/// A registered option: target key plus optional value conversion.
pub struct OptionDef {
    /// Key the raw token is renamed to in formatted output.
    pub key: String,

    /// Conversion applied to the raw value. The value passes through
    /// unchanged when absent.
    pub convert: Option<ConvertFn>,
}

/// Declared options, looked up by exact raw token.
#[derive(Default)]
pub struct Registry {
    defs: HashMap<String, OptionDef>,
}

impl Registry {
    /// Create a new empty Registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the definition for a raw token.
    pub fn insert(&mut self, token: impl Into<String>, def: OptionDef) {
        self.defs.insert(token.into(), def);
    }

    /// Look up the definition registered for the exact token.
    pub fn get(&self, token: &str) -> Option<&OptionDef> {
        self.defs.get(token)
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Rewrite tokenizer output against the registered definitions.
    ///
    /// Reads its inputs only, so the same raw mapping and registry state
    /// always produce the same output. Converter failures propagate
    /// unchanged.
    pub fn format(&self, raw: &RawArgs, delimiter: &str) -> Result<FormattedArgs> {
        let mut result = FormattedArgs::new();

        for (token, value) in raw {
            match self.defs.get(token) {
                Some(def) => {
                    let converted = match &def.convert {
                        Some(convert) => convert(value)?,
                        None => value.clone(),
                    };
                    result.insert(def.key.clone(), converted);
                }
                None => {
                    result.insert(strip_delimiter(token, delimiter).to_string(), value.clone());
                }
            }
        }

        Ok(result)
    }
}

/// Strip leading repetitions of the delimiter from a raw token.
pub(crate) fn strip_delimiter<'a>(token: &'a str, delimiter: &str) -> &'a str {
    if delimiter.is_empty() {
        return token;
    }
    token.trim_start_matches(delimiter)
}
