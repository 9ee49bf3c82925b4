use std::collections::HashMap;

use crate::error::QueryError;
use crate::infostring;
use crate::protocol::ResponseTag;
use crate::util::name;

/// Server attributes returned by `getinfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
  pub values: HashMap<String, String>,
}

/// Server attributes and connected players returned by `getstatus`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerStatus {
  pub values: HashMap<String, String>,
  /// Players in the order the server listed them.
  pub players: Vec<PlayerRecord>,
}

/// One line of the `getstatus` player list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRecord {
  pub score: i64,
  /// Milliseconds.
  pub ping: i64,
  /// Name as sent, colour escapes included.
  pub raw_name: String,
  /// Name with colour escapes removed.
  pub display_name: String,
}

impl ServerInfo {
  /// Parse an `infoResponse` payload (marker already removed).
  pub fn parse(payload: &str) -> Result<Self, QueryError> {
    let mut lines = tagged_lines(payload, ResponseTag::Info)?;
    let values = lines
      .next()
      .map(infostring::decode)
      .ok_or(QueryError::EmptyResponse(ResponseTag::Info.request_name()))?;

    Ok(Self { values })
  }
}

impl ServerStatus {
  /// Parse a `statusResponse` payload (marker already removed).
  pub fn parse(payload: &str) -> Result<Self, QueryError> {
    let mut lines = tagged_lines(payload, ResponseTag::Status)?;
    let values = lines
      .next()
      .map(infostring::decode)
      .ok_or(QueryError::EmptyResponse(ResponseTag::Status.request_name()))?;

    let players = lines
      .filter(|line| !line.is_empty())
      .map(PlayerRecord::parse)
      .collect();

    Ok(Self { values, players })
  }
}

impl PlayerRecord {
  /// Parse a `<score> <ping> "<name>"` line.
  ///
  /// Never fails: numeric tokens that do not scan become zero, and a line
  /// with fewer than two tokens yields an empty record.
  pub fn parse(line: &str) -> Self {
    let mut fields = line.splitn(3, char::is_whitespace);
    let (Some(score), Some(ping)) = (fields.next(), fields.next()) else {
      return Self::default();
    };

    let raw_name = fields.next().map(strip_quotes).unwrap_or_default();
    let display_name = name::sanitize(raw_name);

    Self {
      score: scan_int(score),
      ping: scan_int(ping),
      raw_name: raw_name.to_owned(),
      display_name,
    }
  }
}

/// Check the tag on the first line and hand back the lines after it.
fn tagged_lines(
  payload: &str,
  tag: ResponseTag,
) -> Result<std::str::Split<'_, char>, QueryError> {
  let mut lines = payload.split('\n');
  let first = lines.next().unwrap_or_default();
  if first != tag.as_str() {
    return Err(QueryError::UnexpectedTag {
      expected: tag.as_str(),
      found: first.to_owned(),
    });
  }
  Ok(lines)
}

fn strip_quotes(raw: &str) -> &str {
  let raw = raw.strip_prefix('"').unwrap_or(raw);
  raw.strip_suffix('"').unwrap_or(raw)
}

/// Read a leading decimal integer, ignoring anything after it. Yields zero
/// when no digits lead the token or the value does not fit.
fn scan_int(token: &str) -> i64 {
  let token = token.trim_start();
  let sign_len = usize::from(token.starts_with(['+', '-']));
  let digits = token[sign_len..]
    .bytes()
    .take_while(u8::is_ascii_digit)
    .count();
  if digits == 0 {
    return 0;
  }
  token[..sign_len + digits].parse().unwrap_or(0)
}
