use std::collections::HashMap;

/// Separator of the `\key\value` info-string format. It has no escape form.
pub const SEPARATOR: char = '\\';

/// Decode an info string into its key/value pairs.
///
/// Input without a leading separator yields an empty map. Tokens are paired
/// in order of appearance; an unpaired trailing token is dropped.
///
/// ```
/// use q3_exporter::infostring::decode;
///
/// let values = decode("\\sv_maxclients\\16\\g_gametype\\0");
/// assert_eq!(values["sv_maxclients"], "16");
/// assert_eq!(values.len(), 2);
/// ```
#[must_use]
pub fn decode(text: &str) -> HashMap<String, String> {
  let Some(body) = text.strip_prefix(SEPARATOR) else {
    return HashMap::new();
  };

  let mut tokens = body.split(SEPARATOR);
  let mut values = HashMap::new();
  while let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
    values.insert(key.to_owned(), value.to_owned());
  }
  values
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_pairs() {
    let values = decode("\\k\\v\\k2\\v2");
    assert_eq!(values.len(), 2);
    assert_eq!(values["k"], "v");
    assert_eq!(values["k2"], "v2");
  }

  #[test]
  fn drops_dangling_token() {
    let values = decode("\\a\\b\\c");
    assert_eq!(values.len(), 1);
    assert_eq!(values["a"], "b");
    assert!(!values.contains_key("c"));
  }

  #[test]
  fn requires_leading_separator() {
    assert!(decode("no-leading-separator").is_empty());
    assert!(decode("").is_empty());
  }

  #[test]
  fn keeps_empty_values() {
    let values = decode("\\sv_hostname\\\\g_needpass\\1");
    assert_eq!(values["sv_hostname"], "");
    assert_eq!(values["g_needpass"], "1");
  }

  #[test]
  fn later_duplicate_wins() {
    let values = decode("\\k\\first\\k\\second");
    assert_eq!(values["k"], "second");
  }
}
