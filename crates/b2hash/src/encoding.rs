//! Text renderings of digest bytes.

#![allow(clippy::indexing_slicing)] // Base64 table lookups use values masked to 6 bits

use alloc::string::String;
use core::{fmt, str::FromStr};

use crate::error::ParseNameError;

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Lowercase hex, two characters per byte, no separators.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
  hex::encode(bytes)
}

/// Standard-alphabet base64 (RFC 4648 §4) with `=` padding.
#[must_use]
pub fn to_base64(bytes: &[u8]) -> String {
  let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
  let (groups, rest) = bytes.as_chunks::<3>();
  for &[a, b, c] in groups {
    let n = (u32::from(a) << 16) | (u32::from(b) << 8) | u32::from(c);
    for shift in [18, 12, 6, 0] {
      out.push(BASE64[((n >> shift) & 0x3f) as usize] as char);
    }
  }
  match *rest {
    [a] => {
      let n = u32::from(a) << 16;
      out.push(BASE64[((n >> 18) & 0x3f) as usize] as char);
      out.push(BASE64[((n >> 12) & 0x3f) as usize] as char);
      out.push_str("==");
    }
    [a, b] => {
      let n = (u32::from(a) << 16) | (u32::from(b) << 8);
      out.push(BASE64[((n >> 18) & 0x3f) as usize] as char);
      out.push(BASE64[((n >> 12) & 0x3f) as usize] as char);
      out.push(BASE64[((n >> 6) & 0x3f) as usize] as char);
      out.push('=');
    }
    _ => {}
  }
  out
}

/// How digest bytes are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
  /// Lowercase hex.
  #[default]
  Hex,
  /// Padded standard base64.
  Base64,
  /// The digest bytes unchanged.
  Raw,
}

impl Encoding {
  /// Render `bytes`. [`Encoding::Raw`] yields `None`: raw bytes are not text.
  #[must_use]
  pub fn render(self, bytes: &[u8]) -> Option<String> {
    match self {
      Self::Hex => Some(to_hex(bytes)),
      Self::Base64 => Some(to_base64(bytes)),
      Self::Raw => None,
    }
  }

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Hex => "hex",
      Self::Base64 => "base64",
      Self::Raw => "raw",
    }
  }
}

impl fmt::Display for Encoding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Encoding {
  type Err = ParseNameError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "hex" => Ok(Self::Hex),
      "base64" => Ok(Self::Base64),
      "raw" | "binary" => Ok(Self::Raw),
      _ => Err(ParseNameError::new("hex, base64, raw")),
    }
  }
}
