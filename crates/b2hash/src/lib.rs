//! One-shot BLAKE2b and BLAKE2s hashing.
//!
//! Wraps the streaming contexts from [`hashes`] with helpers that take text,
//! bytes, or a structured [`Value`], an optional key, and an optional digest
//! length, and return the digest as bytes, hex, base64, or an integer.
//!
//! ```
//! assert_eq!(
//!   b2hash::blake2s_hex("abc", None, None)?,
//!   "508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982"
//! );
//! assert_eq!(b2hash::blake2b("abc", Some(b"key".as_slice()), Some(16))?.len(), 16);
//! # Ok::<(), b2hash::Error>(())
//! ```
//!
//! # Lengths and keys
//!
//! `out_len: None` selects the variant maximum (64 bytes for BLAKE2b, 32 for
//! BLAKE2s). An explicit length outside `1..=max` is an error; it is never
//! clamped. `key: None` and an empty key are the same unkeyed hash.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | `std::io` adapters in [`hashes`] |
//! | `bigint` | Yes | `*_bigint` helpers returning [`alloy_primitives::U512`] |
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::string::String;

pub use hashes::crypto::{Blake2b, Blake2bOutput, Blake2s, Blake2sOutput};
use traits::VarDigest;
pub use traits::{DigestError, VerificationError};

mod algorithm;
#[cfg(feature = "bigint")]
pub mod bigint;
pub mod encoding;
pub mod error;
pub mod normalize;

pub use algorithm::Algorithm;
pub use encoding::{Encoding, to_base64, to_hex};
pub use error::{Error, NormalizeError};
pub use normalize::{HashInput, Value};

/// Hash `input` with any [`VarDigest`] in one call.
///
/// Parameters are validated before the input is normalized, so a bad length
/// or key fails without touching the input.
///
/// # Errors
///
/// [`Error::Digest`] for a bad length or key, [`Error::Normalize`] if `input`
/// has no canonical encoding.
pub fn hash<D: VarDigest, I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<D::Output, Error> {
  let mut ctx = D::new_keyed(key.unwrap_or_default(), out_len.unwrap_or(D::MAX_OUTPUT_SIZE))?;
  let bytes = input.canonical_bytes()?;
  ctx.update(&bytes)?;
  Ok(ctx.finalize()?)
}

/// BLAKE2b of `input`.
///
/// # Errors
///
/// See [`hash`].
pub fn blake2b<I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<Blake2bOutput, Error> {
  hash::<Blake2b, I>(input, key, out_len)
}

/// BLAKE2s of `input`.
///
/// # Errors
///
/// See [`hash`].
pub fn blake2s<I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<Blake2sOutput, Error> {
  hash::<Blake2s, I>(input, key, out_len)
}

/// [`blake2b`] rendered as lowercase hex.
///
/// # Errors
///
/// See [`hash`].
pub fn blake2b_hex<I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<String, Error> {
  blake2b(input, key, out_len).map(|d| to_hex(&d))
}

/// [`blake2s`] rendered as lowercase hex.
///
/// # Errors
///
/// See [`hash`].
pub fn blake2s_hex<I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<String, Error> {
  blake2s(input, key, out_len).map(|d| to_hex(&d))
}

/// [`blake2b`] rendered as padded base64.
///
/// # Errors
///
/// See [`hash`].
pub fn blake2b_base64<I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<String, Error> {
  blake2b(input, key, out_len).map(|d| to_base64(&d))
}

/// [`blake2s`] rendered as padded base64.
///
/// # Errors
///
/// See [`hash`].
pub fn blake2s_base64<I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<String, Error> {
  blake2s(input, key, out_len).map(|d| to_base64(&d))
}

/// [`blake2b`] folded into an integer by [`bigint::fold_words`].
///
/// # Errors
///
/// See [`hash`].
#[cfg(feature = "bigint")]
pub fn blake2b_bigint<I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<alloy_primitives::U512, Error> {
  blake2b(input, key, out_len).map(|d| bigint::fold_words(&d))
}

/// [`blake2s`] folded into an integer by [`bigint::fold_words`].
///
/// # Errors
///
/// See [`hash`].
#[cfg(feature = "bigint")]
pub fn blake2s_bigint<I: HashInput + ?Sized>(
  input: &I,
  key: Option<&[u8]>,
  out_len: Option<usize>,
) -> Result<alloy_primitives::U512, Error> {
  blake2s(input, key, out_len).map(|d| bigint::fold_words(&d))
}
