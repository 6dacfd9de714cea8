//! Core types and functionality for the optic argument parser.
//!
//! This crate turns flat invocation token sequences into structured option
//! mappings: a schema-free tokenizer recognizes delimiter-prefixed tokens,
//! and a registrable option schema renames and converts the result. The
//! ambient argument sequences (the process argument list and a task
//! runner's echoed invocation) sit behind an injectable source trait.

pub mod convert;
mod error;
mod optic;
mod options;
mod registry;
mod source;
mod tokenizer;

// Re-export core types
pub use convert::ConvertFn;
pub use error::{Error, Result};
pub use optic::{Optic, ParseEnvelope};
pub use options::ParseOptions;
pub use registry::{FormattedArgs, OptionDef, Registry};
pub use source::{ArgSource, ProcessSource, TASK_ECHO_VAR};
pub use tokenizer::{tokenize, RawArgs};

// The dynamic value type used throughout
pub use serde_json::Value;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
