use std::fmt::Display;

use tracing_subscriber::EnvFilter;

/// Environment variable overriding `--log-level`, using the `EnvFilter`
/// directive syntax, e.g. `FOROF_LOG=forof_core=trace`.
pub const LOG_ENV_VAR: &str = "FOROF_LOG";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install a global subscriber writing to stderr, so that structured
/// output on stdout (e.g. `--output-format json`) stays parsable.
///
/// ANSI colors are disabled by `no_color` (`--no-color`) or `NO_COLOR`.
pub fn init_logging(log_level: LogLevel, no_color: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));

    let use_colors = !no_color && std::env::var("NO_COLOR").is_err();

    // Ignore the error: a subscriber may already be installed, e.g. when
    // `run()` is called several times in the same process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_colors)
        .with_target(false)
        .try_init();
}
