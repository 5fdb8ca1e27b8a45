//! Error types for the one-shot helpers.

use core::fmt;

use traits::DigestError;

/// A value could not be turned into canonical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NormalizeError {
  /// The value has no canonical encoding (a NaN float, or a map with a
  /// repeated key).
  UnsupportedInputShape {
    /// What was rejected.
    shape: &'static str,
  },
  /// Containers nested deeper than the encoder allows.
  NestingTooDeep {
    /// The maximum nesting depth.
    limit: usize,
  },
}

impl fmt::Display for NormalizeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedInputShape { shape } => write!(f, "unsupported input shape: {shape}"),
      Self::NestingTooDeep { limit } => write!(f, "input nested deeper than {limit} levels"),
    }
  }
}

impl core::error::Error for NormalizeError {}

/// Any failure of a one-shot hash call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
  /// Invalid output length or key.
  Digest(DigestError),
  /// The input could not be normalized.
  Normalize(NormalizeError),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Digest(e) => fmt::Display::fmt(e, f),
      Self::Normalize(e) => fmt::Display::fmt(e, f),
    }
  }
}

impl core::error::Error for Error {
  fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
    match self {
      Self::Digest(e) => Some(e),
      Self::Normalize(e) => Some(e),
    }
  }
}

impl From<DigestError> for Error {
  #[inline]
  fn from(e: DigestError) -> Self {
    Self::Digest(e)
  }
}

impl From<NormalizeError> for Error {
  #[inline]
  fn from(e: NormalizeError) -> Self {
    Self::Normalize(e)
  }
}

/// A name given to [`FromStr`](core::str::FromStr) matched none of the
/// accepted spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseNameError {
  expected: &'static str,
}

impl ParseNameError {
  #[inline]
  pub(crate) const fn new(expected: &'static str) -> Self {
    Self { expected }
  }
}

impl fmt::Display for ParseNameError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "expected one of: {}", self.expected)
  }
}

impl core::error::Error for ParseNameError {}

#[cfg(test)]
mod tests {
  use alloc::string::ToString;

  use super::*;

  #[test]
  fn display_messages() {
    assert_eq!(
      NormalizeError::UnsupportedInputShape { shape: "NaN float" }.to_string(),
      "unsupported input shape: NaN float"
    );
    assert_eq!(
      NormalizeError::NestingTooDeep { limit: 128 }.to_string(),
      "input nested deeper than 128 levels"
    );
    assert_eq!(
      Error::from(DigestError::Finalized).to_string(),
      DigestError::Finalized.to_string()
    );
    assert_eq!(ParseNameError::new("hex, base64").to_string(), "expected one of: hex, base64");
  }

  #[test]
  fn source_chain() {
    use core::error::Error as _;

    let e = Error::from(NormalizeError::NestingTooDeep { limit: 1 });
    assert!(e.source().is_some());
  }
}
