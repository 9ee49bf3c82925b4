use std::time::Duration;

use anyhow::{Result, bail};

use crate::cli::{Cli, LogFormat};
use crate::connector::Connector;
use crate::poller::Instruments;

/// Settings resolved once at startup and never changed afterwards.
#[derive(Debug, Clone)]
pub struct Config {
  pub host: String,
  pub port: u16,
  pub timeout: Duration,
  pub interval: Duration,
  pub instruments: Instruments,
  pub once: bool,
  pub log_format: LogFormat,
  pub verbosity: u8,
  pub plain: bool,
}

impl Config {
  pub fn from_cli(cli: Cli) -> Result<Self> {
    if cli.timeout_ms == 0 {
      bail!("--timeout-ms must be greater than zero");
    }
    if cli.interval_ms == 0 {
      bail!("--interval-ms must be greater than zero");
    }

    let instruments = match (cli.enable_rpmetrics, cli.rcon_password) {
      (true, Some(password)) if !password.is_empty() => {
        Instruments::with_rpmetrics(password)
      }
      (true, _) => {
        bail!(
          "--rcon-password (or RCON_PASSWORD) is required with \
           --enable-rpmetrics"
        )
      }
      (false, _) => Instruments::base(),
    };

    Ok(Self {
      host: cli.host,
      port: cli.port,
      timeout: Duration::from_millis(cli.timeout_ms),
      interval: Duration::from_millis(cli.interval_ms),
      instruments,
      once: cli.once,
      log_format: cli.log_format,
      verbosity: cli.verbose,
      plain: cli.plain,
    })
  }

  /// An unconnected connector for the configured server.
  pub fn connector(&self) -> Connector {
    Connector::new(self.host.clone(), self.port, self.timeout)
  }
}
