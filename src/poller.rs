use std::collections::HashMap;

use crate::connector::Connector;
use crate::error::QueryError;
use crate::infostring;
use crate::response::ServerStatus;

pub const CLIENTS_CONNECTED: &str = "jka.clients.connected";
pub const CLIENTS_LIMIT: &str = "jka.clients.limit";
pub const CLIENTS_PING: &str = "jka.clients.ping";

/// Console command of the RPMod server mod that reports engine limits.
pub const RPMETRICS_COMMAND: &str = "rpmetrics";

/// `rpmetrics` keys and the instrument each one feeds.
pub const RPMETRICS: [(&str, &str); 7] = [
  ("up", "jka.server.uptime"),
  ("ent", "jka.server.entities.usage"),
  ("entm", "jka.server.entities.limit"),
  ("cs", "jka.server.cs.usage"),
  ("csm", "jka.server.cs.limit"),
  ("rpcs", "jka.server.rpcs.usage"),
  ("rpcsm", "jka.server.rpcs.limit"),
];

/// A single named reading taken during a scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
  pub name: &'static str,
  pub value: i64,
  pub attributes: Vec<(&'static str, String)>,
}

impl Observation {
  fn new(name: &'static str, value: i64) -> Self {
    Self {
      name,
      value,
      attributes: Vec::new(),
    }
  }

  fn with_attribute(mut self, key: &'static str, value: String) -> Self {
    self.attributes.push((key, value));
    self
  }
}

/// Which instrument groups a [`Poller`] observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruments {
  /// Password for the extended `rpmetrics` group, which is polled only when
  /// this is set.
  pub rpmetrics_password: Option<String>,
}

impl Instruments {
  pub fn base() -> Self {
    Self {
      rpmetrics_password: None,
    }
  }

  pub fn with_rpmetrics(password: impl Into<String>) -> Self {
    Self {
      rpmetrics_password: Some(password.into()),
    }
  }
}

/// Observations gathered in one scrape, per group.
#[derive(Debug)]
pub struct Scrape {
  pub base: Result<Vec<Observation>, QueryError>,
  /// `None` when the extended group is disabled.
  pub extended: Option<Result<Vec<Observation>, QueryError>>,
}

impl Scrape {
  pub fn is_complete(&self) -> bool {
    self.base.is_ok() && self.extended.as_ref().is_none_or(Result::is_ok)
  }
}

/// Binds a connector to an instrument set and takes one reading per call.
#[derive(Debug)]
pub struct Poller {
  connector: Connector,
  instruments: Instruments,
}

impl Poller {
  #[must_use]
  pub fn new(connector: Connector, instruments: Instruments) -> Self {
    Self {
      connector,
      instruments,
    }
  }

  pub fn connector_mut(&mut self) -> &mut Connector {
    &mut self.connector
  }

  /// Poll every enabled group. Each group is its own round trip, so a
  /// failure in one does not hide the other.
  pub async fn scrape(&mut self) -> Scrape {
    let base = self
      .connector
      .get_status()
      .await
      .map(|status| status_observations(&status));

    let extended = match self.instruments.rpmetrics_password.as_deref() {
      Some(password) => Some(
        self
          .connector
          .rcon(password, RPMETRICS_COMMAND)
          .await
          .map(|reply| rpmetrics_observations(&infostring::decode(&reply))),
      ),
      None => None,
    };

    Scrape { base, extended }
  }
}

/// Map a status reply onto the base instruments.
pub fn status_observations(status: &ServerStatus) -> Vec<Observation> {
  let mut observations = Vec::with_capacity(status.players.len() + 2);
  observations.push(Observation::new(
    CLIENTS_CONNECTED,
    status.players.len() as i64,
  ));

  if let Some(limit) = parse_value(&status.values, "sv_maxclients") {
    observations.push(Observation::new(CLIENTS_LIMIT, limit));
  }

  observations.extend(status.players.iter().map(|player| {
    Observation::new(CLIENTS_PING, player.ping)
      .with_attribute("player", player.display_name.clone())
  }));
  observations
}

/// Map decoded `rpmetrics` values onto the extended instruments. Missing or
/// non-numeric keys are left out.
pub fn rpmetrics_observations(
  values: &HashMap<String, String>,
) -> Vec<Observation> {
  RPMETRICS
    .iter()
    .filter_map(|&(key, name)| {
      parse_value(values, key).map(|value| Observation::new(name, value))
    })
    .collect()
}

fn parse_value(values: &HashMap<String, String>, key: &str) -> Option<i64> {
  values.get(key).and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;
  use crate::response::PlayerRecord;
  use crate::transport::tests::{fake_server, oob};

  fn status(maxclients: &str, pings: &[i64]) -> ServerStatus {
    ServerStatus {
      values: HashMap::from([(
        "sv_maxclients".to_string(),
        maxclients.to_string(),
      )]),
      players: pings
        .iter()
        .enumerate()
        .map(|(i, ping)| PlayerRecord {
          ping: *ping,
          display_name: format!("p{i}"),
          ..PlayerRecord::default()
        })
        .collect(),
    }
  }

  #[test]
  fn status_maps_to_base_instruments() {
    let observations = status_observations(&status("16", &[50, 75]));

    assert_eq!(observations[0], Observation::new(CLIENTS_CONNECTED, 2));
    assert_eq!(observations[1], Observation::new(CLIENTS_LIMIT, 16));
    assert_eq!(
      observations[3],
      Observation::new(CLIENTS_PING, 75)
        .with_attribute("player", "p1".to_string())
    );
    assert_eq!(observations.len(), 4);
  }

  #[test]
  fn unparsable_limit_is_omitted() {
    let observations = status_observations(&status("lots", &[]));
    assert_eq!(observations, vec![Observation::new(CLIENTS_CONNECTED, 0)]);
  }

  #[test]
  fn rpmetrics_skips_missing_and_bad_values() {
    let values = infostring::decode("\\up\\1000\\ent\\many\\csm\\2048");
    let observations = rpmetrics_observations(&values);
    assert_eq!(
      observations,
      vec![
        Observation::new("jka.server.uptime", 1000),
        Observation::new("jka.server.cs.limit", 2048),
      ]
    );
  }

  #[test]
  fn padded_limit_is_omitted() {
    let observations = status_observations(&status(" 16", &[]));
    assert_eq!(observations, vec![Observation::new(CLIENTS_CONNECTED, 0)]);
  }

  #[tokio::test]
  async fn groups_are_polled_independently() {
    let (port, server) = fake_server(vec![
      Some(oob("print\nunexpected\n")),
      Some(oob("\\up\\42\\entm\\1024")),
    ])
    .await;
    let mut connector =
      Connector::new("127.0.0.1", port, Duration::from_secs(3));
    connector.connect().await.expect("connect");
    let mut poller =
      Poller::new(connector, Instruments::with_rpmetrics("pw"));

    let scrape = poller.scrape().await;
    assert!(scrape.base.is_err());
    let extended = scrape
      .extended
      .as_ref()
      .expect("extended enabled")
      .as_ref()
      .expect("extended ok");
    assert_eq!(extended.len(), 2);
    assert!(!scrape.is_complete());

    let requests = server.await.expect("server task");
    assert_eq!(requests[1], oob("rcon pw rpmetrics\n"));
  }

  #[tokio::test]
  async fn base_only_scrape_skips_rcon() {
    let (port, _server) =
      fake_server(vec![Some(oob("statusResponse\n\\sv_maxclients\\4\n"))])
        .await;
    let mut connector =
      Connector::new("127.0.0.1", port, Duration::from_secs(3));
    connector.connect().await.expect("connect");
    let mut poller = Poller::new(connector, Instruments::base());

    let scrape = poller.scrape().await;
    assert!(scrape.extended.is_none());
    assert!(scrape.is_complete());
    assert_eq!(scrape.base.expect("base ok").len(), 2);
  }
}
