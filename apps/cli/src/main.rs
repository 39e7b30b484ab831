//! errs CLI Entry Point
//!
//! Normalizes an error input given on the command line and prints the
//! resulting error as JSON. Uses `anyhow` for startup errors; normalization
//! itself never fails.

use std::env;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use errs::{ErrorInput, ErrorKind, ErrorObject, Errs, ErrsConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "errs-cli", version, about = "Build and dispatch normalized errors")]
struct Cli {
    /// Register an error kind first, as `key=DeclaredName` or `DeclaredName`
    #[arg(long = "register", value_name = "KIND", global = true)]
    kinds: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize INPUT into an error and print it
    Create {
        /// Registered kind to create
        #[arg(long)]
        kind: Option<String>,

        /// Message words, or a single JSON object / array
        input: Vec<String>,
    },
    /// Normalize INPUT and print it once the deferred notification fires
    Handle {
        /// Message words, or a single JSON object / array
        input: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stdout is reserved for the JSON output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "errs=info,errs_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let errs = Errs::with_config(config_from_env());

    for spec in &cli.kinds {
        let key = register_kind(&errs, spec)?;
        tracing::debug!(kind = %key, "Registered kind from command line");
    }

    let error: Arc<ErrorObject> = match cli.command {
        Command::Create { kind: Some(kind), input } => errs.create_kind(&kind, parse_input(input)?),
        Command::Create { kind: None, input } => errs.create(parse_input(input)?),
        Command::Handle { input } => errs.handle(parse_input(input)?).await,
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&*error)?
    } else {
        serde_json::to_string(&*error)?
    };
    println!("{json}");

    Ok(())
}

/// Normalizer configuration from `ERRS_*` environment variables
fn config_from_env() -> ErrsConfig {
    let mut config = ErrsConfig::default();
    if let Ok(message) = env::var("ERRS_FALLBACK_MESSAGE") {
        config = config.with_fallback_message(message);
    }
    if let Ok(separator) = env::var("ERRS_WORD_SEPARATOR") {
        config = config.with_word_separator(separator);
    }
    config
}

/// Register `key=DeclaredName`, or `DeclaredName` under its lower-cased name
fn register_kind(errs: &Errs, spec: &str) -> anyhow::Result<String> {
    match spec.split_once('=') {
        Some((key, name)) => {
            let key = key.trim();
            anyhow::ensure!(!key.is_empty(), "empty kind key in `{spec}`");
            errs.register_as(key, ErrorKind::new(name.trim().to_owned()));
            Ok(key.to_owned())
        }
        None => Ok(errs.register(ErrorKind::new(spec.trim().to_owned()))?),
    }
}

/// Turn positional arguments into an error input
///
/// No arguments is an empty input, several are message words, and a single
/// argument is JSON when it starts with `{` or `[`, plain text otherwise.
fn parse_input(mut args: Vec<String>) -> anyhow::Result<ErrorInput> {
    match args.len() {
        0 => Ok(ErrorInput::Empty),
        1 => {
            let arg = args.remove(0);
            let trimmed = arg.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                let value: serde_json::Value = serde_json::from_str(&arg)?;
                Ok(value.into())
            } else {
                Ok(arg.into())
            }
        }
        _ => Ok(args.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_parse_input_shapes() {
        assert!(matches!(parse_input(vec![]).unwrap(), ErrorInput::Empty));
        assert!(matches!(parse_input(args(&["boom"])).unwrap(), ErrorInput::Message(_)));
        assert!(matches!(parse_input(args(&["disk", "full"])).unwrap(), ErrorInput::Words(_)));
        assert!(matches!(parse_input(args(&[r#"{"status":404}"#])).unwrap(), ErrorInput::Record(_)));
        assert!(matches!(parse_input(args(&[r#"["a","b"]"#])).unwrap(), ErrorInput::Words(_)));
    }

    #[test]
    fn test_parse_input_rejects_broken_json() {
        assert!(parse_input(args(&["{not json"])).is_err());
    }

    #[test]
    fn test_register_kind_specs() {
        let errs = Errs::new();
        assert_eq!(register_kind(&errs, "named=NamedError").unwrap(), "named");
        assert_eq!(register_kind(&errs, "AnError").unwrap(), "anerror");
        assert!(register_kind(&errs, "=NamedError").is_err());
        assert!(register_kind(&errs, "").is_err());

        assert_eq!(errs.create_kind("named", "boom").name(), "NamedError");
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from([
            "errs-cli", "--register", "named=NamedError", "--pretty", "create", "--kind", "named", "boom",
        ])
        .unwrap();
        assert_eq!(cli.kinds, ["named=NamedError"]);
        assert!(cli.pretty);
        assert!(matches!(cli.command, Command::Create { kind: Some(_), .. }));
    }
}
