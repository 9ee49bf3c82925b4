use clap::{ArgAction, Parser, ValueEnum};

use crate::transport::DEFAULT_TIMEOUT;

/// Output format of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
  Text,
  Json,
}

/// Command-line arguments for the exporter.
#[derive(Parser, Debug, Clone)]
#[command(
  author,
  version,
  about = "Poll a Quake III engine server and report its telemetry"
)]
pub struct Cli {
  /// Hostname or IP address of the game server.
  #[arg(long, env = "Q3_HOST", default_value = "localhost")]
  pub host: String,

  /// UDP port of the game server.
  #[arg(long, env = "Q3_PORT", default_value_t = 29070)]
  pub port: u16,

  /// Rcon password, needed for the RPMod metrics.
  #[arg(long, env = "RCON_PASSWORD", hide_env_values = true)]
  pub rcon_password: Option<String>,

  /// Gather extra metrics with the RPMod `rpmetrics` rcon command.
  #[arg(long)]
  pub enable_rpmetrics: bool,

  /// Per-query timeout in milliseconds.
  #[arg(
    long,
    default_value_t = DEFAULT_TIMEOUT.as_millis() as u64,
    value_name = "MILLISECONDS"
  )]
  pub timeout_ms: u64,

  /// Delay between scrapes in milliseconds.
  #[arg(long, default_value_t = 15_000, value_name = "MILLISECONDS")]
  pub interval_ms: u64,

  /// Take a single scrape, print it and exit.
  #[arg(long)]
  pub once: bool,

  /// Log output format.
  #[arg(long, value_enum, default_value_t = LogFormat::Text)]
  pub log_format: LogFormat,

  /// Increase logging verbosity (repeat for TRACE).
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,

  /// Disable ANSI color output.
  #[arg(long)]
  pub plain: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_reference_server() {
    let cli = Cli::try_parse_from(["q3-exporter"]).expect("parse");
    assert_eq!(cli.port, 29070);
    assert_eq!(cli.timeout_ms, 3_000);
    assert_eq!(
      std::time::Duration::from_millis(cli.timeout_ms),
      DEFAULT_TIMEOUT
    );
    assert_eq!(cli.log_format, LogFormat::Text);
    assert!(!cli.enable_rpmetrics);
  }

  #[test]
  fn accepts_json_logs_and_rpmetrics() {
    let cli = Cli::try_parse_from([
      "q3-exporter",
      "--host",
      "jka.example.net",
      "--enable-rpmetrics",
      "--rcon-password",
      "pw",
      "--log-format",
      "json",
      "-vv",
    ])
    .expect("parse");
    assert_eq!(cli.host, "jka.example.net");
    assert_eq!(cli.log_format, LogFormat::Json);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.rcon_password.as_deref(), Some("pw"));
  }
}
