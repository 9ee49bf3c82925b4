use std::io;
use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The socket could not be set up or a datagram could not be exchanged.
  Transport,
  /// A datagram arrived but its content did not follow the protocol.
  Protocol,
  /// The operation is not allowed in the connector's current state.
  State,
}

/// Errors raised by the query client.
#[derive(Debug, Error)]
pub enum QueryError {
  #[error("failed to resolve {host}:{port}")]
  Resolve {
    host: String,
    port: u16,
    #[source]
    source: io::Error,
  },
  #[error("{host}:{port} did not resolve to any address")]
  NoAddress { host: String, port: u16 },
  #[error("failed to bind a local UDP socket")]
  Bind(#[source] io::Error),
  #[error("failed to associate socket with the server")]
  Associate(#[source] io::Error),
  #[error("failed to send command")]
  Write(#[source] io::Error),
  #[error("failed to read response")]
  Read(#[source] io::Error),
  #[error("no response within {} ms", .0.as_millis())]
  Timeout(Duration),
  #[error("response is not an out-of-band packet")]
  MarkerMismatch,
  #[error("unexpected response tag `{found}`, expected `{expected}`")]
  UnexpectedTag {
    expected: &'static str,
    found: String,
  },
  #[error("empty {0} response")]
  EmptyResponse(&'static str),
  #[error("not connected to server")]
  NotConnected,
  #[error("connector already closed")]
  Closed,
  #[error("connector already connected")]
  AlreadyConnected,
}

impl QueryError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Resolve { .. }
      | Self::NoAddress { .. }
      | Self::Bind(_)
      | Self::Associate(_)
      | Self::Write(_)
      | Self::Read(_)
      | Self::Timeout(_) => ErrorKind::Transport,
      Self::MarkerMismatch
      | Self::UnexpectedTag { .. }
      | Self::EmptyResponse(_) => ErrorKind::Protocol,
      Self::NotConnected | Self::Closed | Self::AlreadyConnected => {
        ErrorKind::State
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kinds_follow_taxonomy() {
    assert_eq!(
      QueryError::Timeout(Duration::from_secs(3)).kind(),
      ErrorKind::Transport
    );
    assert_eq!(QueryError::MarkerMismatch.kind(), ErrorKind::Protocol);
    assert_eq!(
      QueryError::EmptyResponse("getinfo").kind(),
      ErrorKind::Protocol
    );
    assert_eq!(QueryError::Closed.kind(), ErrorKind::State);
  }

  #[test]
  fn timeout_message_reports_millis() {
    let err = QueryError::Timeout(Duration::from_millis(3_000));
    assert_eq!(err.to_string(), "no response within 3000 ms");
  }
}
