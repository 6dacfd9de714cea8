use anyhow::{bail, Result};
use clap::Parser;
use tracing::debug;

use optic_core::{convert, ArgSource, Optic, ParseOptions, ProcessSource};

mod args;

use args::{parse_default_value, parse_map_spec, Cli};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut parser = Optic::with_options(ParseOptions {
        delimiter: cli.delimiter.clone(),
        default_value: parse_default_value(&cli.default_value),
    });

    for spec in &cli.maps {
        apply_map_spec(&mut parser, spec)?;
    }
    debug!(
        "parser ready: delimiter '{}', {} mapped options",
        cli.delimiter,
        parser.registry().len()
    );

    let source = TokenSource {
        tokens: cli.tokens.clone(),
    };
    let envelope = parser.parse_from(&source)?;

    // Print raw or formatted JSON
    if cli.raw {
        println!("{}", serde_json::to_string(&envelope)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }

    Ok(())
}

/// Source whose primary sequence is the inspector's trailing tokens and
/// whose echo comes from the real environment.
struct TokenSource {
    tokens: Vec<String>,
}

impl ArgSource for TokenSource {
    fn primary(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn echoed(&self) -> Option<Vec<String>> {
        ProcessSource::new().echoed()
    }
}

/// Register one `--map` specification on the parser.
fn apply_map_spec(parser: &mut Optic, spec: &str) -> Result<()> {
    let map = parse_map_spec(spec)?;

    let converter = match map.converter.as_deref() {
        Some(name) => match convert::by_name(name) {
            Some(f) => Some(f),
            None => bail!("unknown converter '{}' in --map spec '{}'", name, spec),
        },
        None => None,
    };

    match (map.key.as_deref(), converter) {
        (Some(key), Some(f)) => parser.register_as_with(&map.token, key, f)?,
        (Some(key), None) => parser.register_as(&map.token, key)?,
        (None, Some(f)) => parser.register_with(&map.token, f)?,
        (None, None) => parser.register(&map.token)?,
    };

    Ok(())
}

fn init_tracing(debug: bool) {
    // Filter level follows the debug flag
    let filter = if debug {
        "optic=debug,optic_core=debug"
    } else {
        "optic=info,optic_core=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
