//! Pieces shared by the BLAKE2b and BLAKE2s contexts.
//!
//! Both variants use the same parameter-block encoding, the same validation
//! rules, and the same output value type.

#![allow(clippy::indexing_slicing)] // `len <= MAX` is a construction invariant of `Output`

use core::{fmt, ops::Deref};

use traits::{DigestError, VerificationError};

/// Parameter block word 0 for sequential mode: fanout = 1, depth = 1, plus the
/// key length (byte 1) and digest length (byte 0).
#[inline(always)]
pub(crate) const fn param_word(key_len: usize, out_len: usize) -> u32 {
  0x0101_0000 ^ ((key_len as u32) << 8) ^ (out_len as u32)
}

/// Reject digest lengths outside `1..=max_out` and keys longer than `max_key`.
///
/// Out-of-range lengths are never clamped.
#[inline]
pub(crate) const fn check_params(
  key_len: usize,
  out_len: usize,
  max_key: usize,
  max_out: usize,
) -> Result<(), DigestError> {
  if out_len == 0 || out_len > max_out {
    return Err(DigestError::InvalidOutputLength {
      requested: out_len,
      max: max_out,
    });
  }
  if key_len > max_key {
    return Err(DigestError::KeyTooLong {
      len: key_len,
      max: max_key,
    });
  }
  Ok(())
}

/// Compare without an early exit on the first differing byte.
#[inline]
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
  if a.len() != b.len() {
    return false;
  }
  let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
  core::hint::black_box(diff) == 0
}

/// A BLAKE2 digest of between 1 and `MAX` bytes.
///
/// Dereferences to exactly the configured number of bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Output<const MAX: usize> {
  bytes: [u8; MAX],
  len: usize,
}

impl<const MAX: usize> Output<MAX> {
  /// Keep the first `len` bytes of `bytes`; the tail is zeroed so that
  /// equality only depends on the visible digest.
  #[inline]
  pub(crate) fn new(mut bytes: [u8; MAX], len: usize) -> Self {
    debug_assert!(len <= MAX);
    bytes[len..].fill(0);
    Self { bytes, len }
  }

  /// The digest bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..self.len]
  }

  /// Digest length in bytes.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// Always `false`; a digest has at least one byte.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Check this digest against `expected` in constant time.
  ///
  /// # Errors
  ///
  /// [`VerificationError`] if the lengths or any byte differ.
  #[inline]
  pub fn verify(&self, expected: &[u8]) -> Result<(), VerificationError> {
    if ct_eq(self.as_bytes(), expected) {
      Ok(())
    } else {
      Err(VerificationError::new())
    }
  }
}

impl<const MAX: usize> Deref for Output<MAX> {
  type Target = [u8];

  #[inline]
  fn deref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl<const MAX: usize> AsRef<[u8]> for Output<MAX> {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl<const MAX: usize> fmt::Debug for Output<MAX> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Output(")?;
    fmt::LowerHex::fmt(self, f)?;
    f.write_str(")")
  }
}

impl<const MAX: usize> fmt::LowerHex for Output<MAX> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in self.as_bytes() {
      write!(f, "{b:02x}")?;
    }
    Ok(())
  }
}
