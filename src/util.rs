/// Text helpers shared across the exporter.
pub mod name {
  /// Marker that introduces a two-byte colour escape such as `^1`.
  pub const COLOR_ESCAPE: u8 = b'^';

  /// Strip colour escapes from a player name.
  ///
  /// A caret and the byte following it are both removed. A caret at the very
  /// end of the name has nothing to escape and is kept as-is.
  ///
  /// # Examples
  ///
  /// ```
  /// use q3_exporter::util::name::sanitize;
  ///
  /// assert_eq!(sanitize("^1Foo^7Bar"), "FooBar");
  /// assert_eq!(sanitize("trailing^"), "trailing^");
  /// ```
  #[must_use]
  pub fn sanitize(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
      if bytes[i] == COLOR_ESCAPE && i + 1 < bytes.len() {
        i += 2;
        continue;
      }
      out.push(bytes[i]);
      i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::name::sanitize;

  #[test]
  fn sanitize_strips_color_codes() {
    assert_eq!(sanitize("^1Foo^7Bar"), "FooBar");
    assert_eq!(sanitize("^^2x"), "2x");
  }

  #[test]
  fn sanitize_keeps_trailing_caret() {
    assert_eq!(sanitize("trailing^"), "trailing^");
    assert_eq!(sanitize("^"), "^");
  }

  #[test]
  fn sanitize_passes_plain_names_through() {
    assert_eq!(sanitize("Padawan"), "Padawan");
    assert_eq!(sanitize(""), "");
  }
}
