//! Log setup for the `dunikey` binary.
//!
//! Events go to stderr; stdout carries only the keys and strings a command
//! prints, so `dunikey derive ... > keys.txt` never captures log lines.
//! Nothing logged anywhere includes a seed, secret key or password.
//!
//! Targets worth filtering on:
//!
//! - `dunikey::crypto::stretch` (debug, warn): scrypt parameters and elapsed
//!   time; rejected parameter sets.
//! - `dunikey::identity` (debug, warn): derived and parsed public keys;
//!   deprecated checksum formats.
//! - `dunikey_cli` (info): chosen parameter version, key files written.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `--log-format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Anything but "json" (any case) falls back to `Pretty`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG`, when set, replaces
/// `--log-level`/`DUNIKEY_LOG`; the default `warn` keeps a normal run silent.
///
/// ```text
/// RUST_LOG=dunikey::crypto::stretch=debug dunikey derive --id-sec ... --password ...
/// ```
///
/// Panics if a global subscriber is already set, so `main` calls it once.
pub fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .init();
        }
    }

    tracing::debug!(?format, "log subscriber installed");
}
