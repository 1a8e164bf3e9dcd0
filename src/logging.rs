use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level '{0}' (expected off, error, warn, info, debug or trace)")]
pub struct UnknownLogLevel(pub String);

/// Parses a level name, ignoring case and surrounding whitespace.
pub fn parse_log_level(value: &str) -> Result<LevelFilter, UnknownLogLevel> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::OFF),
        "error" => Ok(LevelFilter::ERROR),
        "warn" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "debug" => Ok(LevelFilter::DEBUG),
        "trace" => Ok(LevelFilter::TRACE),
        _ => Err(UnknownLogLevel(value.to_string())),
    }
}

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` overrides `level` when set. An unparsable `RUST_LOG` is
/// reported and ignored. Calling this more than once keeps the first
/// subscriber.
pub fn init_tracing(level: LevelFilter, json: bool) {
    let filter = match std::env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
    {
        Some(value) => EnvFilter::try_new(&value).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid RUST_LOG '{value}': {e}");
            default_filter(level)
        }),
        None => default_filter(level),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

fn default_filter(level: LevelFilter) -> EnvFilter {
    let directive = format!("supplyflow={level}")
        .parse()
        .unwrap_or_else(|_| Directive::from(level));
    EnvFilter::default().add_directive(directive)
}
