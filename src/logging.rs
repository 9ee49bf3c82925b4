use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

/// Initialise structured logging for the exporter.
///
/// `verbosity` comes from the CLI `-v/--verbose` flag:
///   * `0` → INFO
///   * `1` → DEBUG
///   * `2+` → TRACE
///
/// `RUST_LOG` overrides the computed level. `use_color` only applies to the
/// text format.
pub fn init(verbosity: u8, format: LogFormat, use_color: bool) {
  let level = match verbosity {
    0 => tracing::Level::INFO,
    1 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_level(true);

  match format {
    LogFormat::Text => builder.with_ansi(use_color).compact().init(),
    LogFormat::Json => builder.with_ansi(false).json().init(),
  }
}
