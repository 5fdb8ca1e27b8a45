//! RFC 7693 Appendix E self-test.
//!
//! Hashes deterministic pseudo-random inputs of several lengths, unkeyed and
//! keyed, at several digest lengths, feeds every digest into one running
//! 32-byte hash, and compares that grand hash with the published value.

#![allow(clippy::indexing_slicing)] // Lengths come from the fixed tables below

use core::fmt;

use traits::{DigestError, VarDigest};

use super::{Blake2b, Blake2s};

const BLAKE2B_RES: [u8; 32] = [
  0xC2, 0x3A, 0x78, 0x00, 0xD9, 0x81, 0x23, 0xBD, 0x10, 0xF5, 0x06, 0xC6, 0x1E, 0x29, 0xDA, 0x56, 0x03, 0xD7, 0x63,
  0xB8, 0xBB, 0xAD, 0x2E, 0x73, 0x7F, 0x5E, 0x76, 0x5A, 0x7B, 0xCC, 0xD4, 0x75,
];
const BLAKE2B_MD_LEN: [usize; 4] = [20, 32, 48, 64];
const BLAKE2B_IN_LEN: [usize; 6] = [0, 3, 128, 129, 255, 1024];

const BLAKE2S_RES: [u8; 32] = [
  0x6A, 0x41, 0x1F, 0x08, 0xCE, 0x25, 0xAD, 0xCD, 0xFB, 0x02, 0xAB, 0xA6, 0x41, 0x45, 0x1C, 0xEC, 0x53, 0xC5, 0x98,
  0xB2, 0x4F, 0x4F, 0xC7, 0x87, 0xFB, 0xDC, 0x88, 0x79, 0x7F, 0x4C, 0x1D, 0xFE,
];
const BLAKE2S_MD_LEN: [usize; 4] = [16, 20, 28, 32];
const BLAKE2S_IN_LEN: [usize; 6] = [0, 3, 64, 65, 255, 1024];

const MAX_IN_LEN: usize = 1024;

/// The self-test produced a different grand hash, or could not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelfTestError {
  /// The grand hash did not match the published value.
  Mismatch {
    /// `"blake2b"` or `"blake2s"`.
    algorithm: &'static str,
  },
  /// A context rejected one of the test parameters.
  Digest(DigestError),
}

impl fmt::Display for SelfTestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Mismatch { algorithm } => write!(f, "{algorithm} self-test failed: grand hash mismatch"),
      Self::Digest(e) => write!(f, "self-test could not run: {e}"),
    }
  }
}

impl core::error::Error for SelfTestError {
  fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
    match self {
      Self::Digest(e) => Some(e),
      Self::Mismatch { .. } => None,
    }
  }
}

impl From<DigestError> for SelfTestError {
  #[inline]
  fn from(e: DigestError) -> Self {
    Self::Digest(e)
  }
}

/// Fill `out` with the Fibonacci-style sequence seeded by `seed`.
pub fn selftest_seq(out: &mut [u8], seed: u32) {
  let mut a = 0xDEAD_4BAD_u32.wrapping_mul(seed);
  let mut b = 1u32;
  for byte in out {
    let t = a.wrapping_add(b);
    a = b;
    b = t;
    *byte = (t >> 24) as u8;
  }
}

fn grand_hash<D: VarDigest>(md_lens: &[usize], in_lens: &[usize]) -> Result<D::Output, DigestError> {
  let mut input = [0u8; MAX_IN_LEN];
  let mut key = [0u8; 64];
  let mut ctx = D::new(32)?;

  for &outlen in md_lens {
    for &inlen in in_lens {
      let msg = &mut input[..inlen];
      selftest_seq(msg, inlen as u32);
      let md = D::digest_keyed(&[], outlen, msg)?;
      ctx.update(md.as_ref())?;

      let k = &mut key[..outlen];
      selftest_seq(k, outlen as u32);
      let md = D::digest_keyed(k, outlen, msg)?;
      ctx.update(md.as_ref())?;
    }
  }

  ctx.finalize()
}

fn check<D: VarDigest>(
  algorithm: &'static str,
  md_lens: &[usize],
  in_lens: &[usize],
  expected: &[u8; 32],
) -> Result<(), SelfTestError> {
  let got = grand_hash::<D>(md_lens, in_lens)?;
  if got.as_ref() == expected {
    Ok(())
  } else {
    Err(SelfTestError::Mismatch { algorithm })
  }
}

/// Run the BLAKE2b self-test.
///
/// # Errors
///
/// [`SelfTestError::Mismatch`] if the implementation is broken.
pub fn blake2b() -> Result<(), SelfTestError> {
  check::<Blake2b>("blake2b", &BLAKE2B_MD_LEN, &BLAKE2B_IN_LEN, &BLAKE2B_RES)
}

/// Run the BLAKE2s self-test.
///
/// # Errors
///
/// [`SelfTestError::Mismatch`] if the implementation is broken.
pub fn blake2s() -> Result<(), SelfTestError> {
  check::<Blake2s>("blake2s", &BLAKE2S_MD_LEN, &BLAKE2S_IN_LEN, &BLAKE2S_RES)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blake2b_grand_hash() {
    assert_eq!(blake2b(), Ok(()));
  }

  #[test]
  fn blake2s_grand_hash() {
    assert_eq!(blake2s(), Ok(()));
  }

  #[test]
  fn wrong_expectation_is_reported() {
    let err = check::<Blake2s>("blake2s", &BLAKE2S_MD_LEN, &BLAKE2S_IN_LEN, &BLAKE2B_RES).unwrap_err();
    assert_eq!(err, SelfTestError::Mismatch { algorithm: "blake2s" });
  }

  #[test]
  fn sequence_is_deterministic() {
    let mut a = [0u8; 16];
    let mut b = [0u8; 16];
    selftest_seq(&mut a, 3);
    selftest_seq(&mut b, 3);
    assert_eq!(a, b);
    selftest_seq(&mut b, 4);
    assert_ne!(a, b);
  }
}
