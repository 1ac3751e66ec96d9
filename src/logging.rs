//! Diagnostic logging using `tracing` and `tracing-subscriber`.
//!
//! The run log a user reads goes through the `ProgressReporter` port. This
//! module only sets up the diagnostic stream that adapters and use cases
//! emit with `tracing` (skipped archive entries, installer output, ...).
//!
//! # Log Levels
//!
//! - `warn`: Non-fatal problems (default)
//! - `info`: Files written, installer invocations (`-v`)
//! - `debug`: Staging and repackaging details (`-vv`)
//! - `trace`: Every removed class file (`-vvv`)
//!
//! `RUST_LOG` overrides the level derived from `-v`.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for diagnostic logging.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter for this crate.
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Whether to include the target (module path) in output.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from the CLI verbosity count.
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+ (`-vvv`): trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            with_target: verbosity >= 2,
            ..Default::default()
        }
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber, writing compact lines to stderr.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> crate::shared::Result<()> {
    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target);

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()?;
    Ok(())
}

/// `RUST_LOG` when set, otherwise `level` for this crate and warn for everything else.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,jartrim={}",
            level.as_str().to_lowercase()
        ))
    })
}
