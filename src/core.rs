use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use tokio::time::{MissedTickBehavior, interval};

use crate::{
  cli::Cli,
  config::Config,
  logging,
  poller::{Observation, Poller, Scrape},
  ui,
};

/// Orchestrate the exporter lifecycle for a single invocation.
pub async fn run(cli: Cli) -> Result<i32> {
  let config = Config::from_cli(cli).context("invalid configuration")?;

  let use_color_stdout = !config.plain && io::stdout().is_terminal();
  let use_color_logs = !config.plain && io::stderr().is_terminal();
  logging::init(config.verbosity, config.log_format, use_color_logs);

  let mut connector = config.connector();
  connector.connect().await.with_context(|| {
    format!("failed to connect to {}:{}", connector.host(), connector.port())
  })?;

  let mut poller = Poller::new(connector, config.instruments.clone());

  let exit_code = if config.once {
    run_once(&mut poller, use_color_stdout).await
  } else {
    run_loop(&mut poller, &config).await
  };

  poller.connector_mut().close();
  Ok(exit_code)
}

async fn run_once(poller: &mut Poller, use_color: bool) -> i32 {
  let scrape = poller.scrape().await;
  ui::render_scrape(&scrape, use_color);
  if scrape.is_complete() { 0 } else { 2 }
}

async fn run_loop(poller: &mut Poller, config: &Config) -> i32 {
  tracing::info!(
    host = %config.host,
    port = config.port,
    interval_ms = config.interval.as_millis() as u64,
    rpmetrics = config.instruments.rpmetrics_password.is_some(),
    "starting scrape loop"
  );

  let mut ticker = interval(config.interval);
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

  loop {
    tokio::select! {
      _ = ticker.tick() => {
        let scrape = poller.scrape().await;
        report(&scrape);
      }
      signal = tokio::signal::ctrl_c() => {
        if let Err(err) = signal {
          tracing::warn!(error = %err, "failed to listen for ctrl-c");
        }
        tracing::info!("shutdown requested; stopping scrape loop");
        break;
      }
    }
  }

  0
}

/// Log one scrape. A failed group is reported and skipped for this cycle.
fn report(scrape: &Scrape) {
  match &scrape.base {
    Ok(observations) => log_observations("base", observations),
    Err(err) => tracing::warn!(
      group = "base",
      kind = ?err.kind(),
      error = %err,
      "skipping group for this scrape"
    ),
  }

  match &scrape.extended {
    Some(Ok(observations)) => log_observations("rpmetrics", observations),
    Some(Err(err)) => tracing::warn!(
      group = "rpmetrics",
      kind = ?err.kind(),
      error = %err,
      "skipping group for this scrape"
    ),
    None => {}
  }
}

fn log_observations(group: &str, observations: &[Observation]) {
  for observation in observations {
    match observation.attributes.as_slice() {
      [] => tracing::info!(
        group,
        name = observation.name,
        value = observation.value,
        "observation"
      ),
      attributes => {
        let labels = attributes
          .iter()
          .map(|(key, value)| format!("{key}={value}"))
          .collect::<Vec<_>>()
          .join(",");
        tracing::info!(
          group,
          name = observation.name,
          value = observation.value,
          labels = %labels,
          "observation"
        );
      }
    }
  }
}
