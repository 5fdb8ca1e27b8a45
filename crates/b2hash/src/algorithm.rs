use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use hashes::crypto::{Blake2b, Blake2s, blake2b, blake2s};

use crate::{Error, error::ParseNameError, hash, normalize::HashInput};

/// The BLAKE2 variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
  /// 64-bit words, digests up to 64 bytes.
  Blake2b,
  /// 32-bit words, digests up to 32 bytes.
  Blake2s,
}

impl Algorithm {
  /// Pick a variant from an executable name: anything containing `2b`
  /// (`b2sum`-style `blake2b`, `b2bhash`, ...) is BLAKE2b, the rest BLAKE2s.
  #[must_use]
  pub fn from_program_name(name: &str) -> Self {
    if name.contains("2b") { Self::Blake2b } else { Self::Blake2s }
  }

  #[must_use]
  pub const fn max_output_len(self) -> usize {
    match self {
      Self::Blake2b => blake2b::MAX_OUTPUT_LEN,
      Self::Blake2s => blake2s::MAX_OUTPUT_LEN,
    }
  }

  #[must_use]
  pub const fn max_key_len(self) -> usize {
    match self {
      Self::Blake2b => blake2b::MAX_KEY_LEN,
      Self::Blake2s => blake2s::MAX_KEY_LEN,
    }
  }

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Blake2b => "blake2b",
      Self::Blake2s => "blake2s",
    }
  }

  /// One-shot hash with this variant, returning the digest bytes.
  ///
  /// # Errors
  ///
  /// See [`crate::hash`].
  pub fn hash<I: HashInput + ?Sized>(
    self,
    input: &I,
    key: Option<&[u8]>,
    out_len: Option<usize>,
  ) -> Result<Vec<u8>, Error> {
    Ok(match self {
      Self::Blake2b => hash::<Blake2b, I>(input, key, out_len)?.to_vec(),
      Self::Blake2s => hash::<Blake2s, I>(input, key, out_len)?.to_vec(),
    })
  }
}

impl fmt::Display for Algorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Algorithm {
  type Err = ParseNameError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "blake2b" | "b" => Ok(Self::Blake2b),
      "blake2s" | "s" => Ok(Self::Blake2s),
      _ => Err(ParseNameError::new("blake2b, blake2s")),
    }
  }
}
