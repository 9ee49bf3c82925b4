use std::time::Duration;

use crate::error::QueryError;
use crate::protocol::Command;
use crate::response::{ServerInfo, ServerStatus};
use crate::transport::Transport;

#[derive(Debug)]
enum State {
  Unconnected,
  Connected(Transport),
  Closed,
}

/// Query client for one Quake III engine server.
///
/// A connector moves from unconnected to connected once, and from there to
/// closed once. It never reconnects on its own: queries issued outside the
/// connected state fail straight away.
#[derive(Debug)]
pub struct Connector {
  host: String,
  port: u16,
  timeout: Duration,
  state: State,
}

impl Connector {
  #[must_use]
  pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
    Self {
      host: host.into(),
      port,
      timeout,
      state: State::Unconnected,
    }
  }

  pub fn host(&self) -> &str {
    &self.host
  }

  pub fn port(&self) -> u16 {
    self.port
  }

  pub fn is_connected(&self) -> bool {
    matches!(self.state, State::Connected(_))
  }

  pub async fn connect(&mut self) -> Result<(), QueryError> {
    match self.state {
      State::Unconnected => {}
      State::Connected(_) => return Err(QueryError::AlreadyConnected),
      State::Closed => return Err(QueryError::Closed),
    }

    let transport =
      Transport::connect(&self.host, self.port, self.timeout).await?;
    tracing::info!(
      host = %self.host,
      port = self.port,
      peer = %transport.peer(),
      "connected to game server"
    );
    self.state = State::Connected(transport);
    Ok(())
  }

  /// Release the socket. Safe to call repeatedly, and before `connect`.
  pub fn close(&mut self) {
    if let State::Connected(transport) = &mut self.state {
      transport.close();
    }
    if !matches!(self.state, State::Unconnected) {
      self.state = State::Closed;
    }
  }

  pub async fn get_info(&mut self) -> Result<ServerInfo, QueryError> {
    let payload = self.round_trip(&Command::GetInfo).await?;
    ServerInfo::parse(&payload)
  }

  pub async fn get_status(&mut self) -> Result<ServerStatus, QueryError> {
    let payload = self.round_trip(&Command::GetStatus).await?;
    ServerStatus::parse(&payload)
  }

  /// Run a console command and return the reply text as-is.
  ///
  /// Replies have no fixed tag; pass the text through
  /// [`infostring::decode`](crate::infostring::decode) when the command
  /// answers with an info string.
  pub async fn rcon(
    &mut self,
    password: &str,
    command: &str,
  ) -> Result<String, QueryError> {
    self.round_trip(&Command::Rcon { password, command }).await
  }

  async fn round_trip(
    &mut self,
    command: &Command<'_>,
  ) -> Result<String, QueryError> {
    match &mut self.state {
      State::Connected(transport) => transport.send_command(command).await,
      State::Unconnected => Err(QueryError::NotConnected),
      State::Closed => Err(QueryError::Closed),
    }
  }
}
