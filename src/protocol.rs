use std::fmt;

/// Prefix of every connectionless (out-of-band) datagram.
pub const OOB_MARKER: [u8; 4] = [0xFF; 4];

/// Requests understood by a Quake III engine server.
#[derive(Clone, PartialEq, Eq)]
pub enum Command<'a> {
  /// Short server summary, answered with `infoResponse`.
  GetInfo,
  /// Server cvars plus the player list, answered with `statusResponse`.
  GetStatus,
  /// Password-authenticated console command.
  Rcon { password: &'a str, command: &'a str },
}

impl Command<'_> {
  /// Text carried by the datagram, after the marker.
  pub fn wire_text(&self) -> String {
    match self {
      Self::GetInfo => "getinfo\n".to_owned(),
      Self::GetStatus => "getstatus\n".to_owned(),
      Self::Rcon { password, command } => {
        format!("rcon {password} {command}\n")
      }
    }
  }

  /// Wire text with any password redacted, for logs.
  pub fn log_repr(&self) -> String {
    match self {
      Self::Rcon { command, .. } => format!("rcon <redacted> {command}"),
      other => other.wire_text().trim_end().to_owned(),
    }
  }
}

impl fmt::Debug for Command<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.log_repr())
  }
}

/// Literal first line of a tagged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTag {
  Info,
  Status,
}

impl ResponseTag {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Info => "infoResponse",
      Self::Status => "statusResponse",
    }
  }

  pub const fn request_name(self) -> &'static str {
    match self {
      Self::Info => "getinfo",
      Self::Status => "getstatus",
    }
  }
}

impl fmt::Display for ResponseTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
