use std::future::Future;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::{UdpSocket, lookup_host};
use tokio::time::{Instant, timeout_at};

use crate::error::QueryError;
use crate::protocol::{Command, OOB_MARKER};

/// Replies are expected to fit into a single datagram of this size.
pub const RECV_BUFFER_SIZE: usize = 8 * 1024;

/// Deadline applied to every round trip unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// UDP association with a single game server.
#[derive(Debug)]
pub struct Transport {
  socket: Option<UdpSocket>,
  peer: SocketAddr,
  timeout: Duration,
}

impl Transport {
  /// Resolve `host:port` and associate a fresh local socket with it.
  pub async fn connect(
    host: &str,
    port: u16,
    timeout: Duration,
  ) -> Result<Self, QueryError> {
    let deadline = Instant::now() + timeout;
    let peer = with_deadline(deadline, timeout, lookup_host((host, port)))
      .await?
      .map_err(|source| QueryError::Resolve {
        host: host.to_owned(),
        port,
        source,
      })?
      .next()
      .ok_or_else(|| QueryError::NoAddress {
        host: host.to_owned(),
        port,
      })?;

    let local = match peer.ip() {
      IpAddr::V4(_) => SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 0),
      IpAddr::V6(_) => SocketAddr::new(Ipv6Addr::UNSPECIFIED.into(), 0),
    };
    let socket = UdpSocket::bind(local).await.map_err(QueryError::Bind)?;
    socket.connect(peer).await.map_err(QueryError::Associate)?;

    tracing::debug!(%peer, "associated UDP socket");
    Ok(Self {
      socket: Some(socket),
      peer,
      timeout,
    })
  }

  pub fn peer(&self) -> SocketAddr {
    self.peer
  }

  pub fn is_closed(&self) -> bool {
    self.socket.is_none()
  }

  /// Send one out-of-band command and return the reply without its marker.
  ///
  /// The write and the read share a single deadline that starts when this
  /// call starts; nothing carries over from earlier calls.
  pub async fn send_command(
    &mut self,
    command: &Command<'_>,
  ) -> Result<String, QueryError> {
    let socket = self.socket.as_ref().ok_or(QueryError::Closed)?;
    let deadline = Instant::now() + self.timeout;

    discard_stale(socket);

    let datagram = frame(&command.wire_text());
    tracing::debug!(peer = %self.peer, "--> {}", command.log_repr());
    with_deadline(deadline, self.timeout, socket.send(&datagram))
      .await?
      .map_err(QueryError::Write)?;

    let mut buffer = vec![0u8; RECV_BUFFER_SIZE];
    let len = with_deadline(deadline, self.timeout, socket.recv(&mut buffer))
      .await?
      .map_err(QueryError::Read)?;

    let payload = unframe(&buffer[..len])?;
    tracing::debug!(
      peer = %self.peer,
      bytes = len,
      "<-- {}",
      payload.lines().next().unwrap_or_default()
    );
    Ok(payload)
  }

  /// Release the socket. Calling this more than once is harmless.
  pub fn close(&mut self) {
    if self.socket.take().is_some() {
      tracing::debug!(peer = %self.peer, "closed UDP socket");
    }
  }
}

fn frame(text: &str) -> Vec<u8> {
  let mut datagram = Vec::with_capacity(OOB_MARKER.len() + text.len());
  datagram.extend_from_slice(&OOB_MARKER);
  datagram.extend_from_slice(text.as_bytes());
  datagram
}

fn unframe(datagram: &[u8]) -> Result<String, QueryError> {
  let payload = datagram
    .strip_prefix(&OOB_MARKER)
    .ok_or(QueryError::MarkerMismatch)?;
  Ok(String::from_utf8_lossy(payload).into_owned())
}

/// Drop datagrams already queued on the socket, such as a late reply to a
/// call that timed out, so they are not taken as the next reply.
fn discard_stale(socket: &UdpSocket) {
  let mut scratch = [0u8; RECV_BUFFER_SIZE];
  while let Ok(len) = socket.try_recv(&mut scratch) {
    tracing::debug!(bytes = len, "discarded stale datagram");
  }
}

async fn with_deadline<F, T>(
  deadline: Instant,
  budget: Duration,
  future: F,
) -> Result<io::Result<T>, QueryError>
where
  F: Future<Output = io::Result<T>>,
{
  timeout_at(deadline, future)
    .await
    .map_err(|_| QueryError::Timeout(budget))
}
