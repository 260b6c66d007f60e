//! Process-wide tracing subscriber

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level; `-v` flags raise the configured level.
///
/// Log lines go to stderr so that stdout carries only command output.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Raise every bare level in `configured` to at least the level selected by
/// `-v` flags, adding one when the directive only names targets. Per-target
/// directives are kept as configured.
fn filter_directive(configured: &str, verbose: u8) -> String {
    let flag = match verbose {
        0 => return configured.to_owned(),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let mut saw_default = false;
    let mut parts: Vec<String> = configured
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<LevelFilter>() {
            Ok(level) => {
                saw_default = true;
                level.max(flag).to_string().to_ascii_lowercase()
            }
            Err(_) => part.to_owned(),
        })
        .collect();
    if !saw_default {
        parts.insert(0, flag.to_string().to_ascii_lowercase());
    }
    parts.join(",")
}
