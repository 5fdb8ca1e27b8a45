//! Keyed, variable-output digest trait.

use core::fmt::Debug;

use crate::DigestError;

/// Lifecycle stage of a [`VarDigest`] context.
///
/// Contexts move strictly forward: `Created -> Accumulating -> Finalized`.
/// `Finalized` is terminal until the context is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
  /// Freshly initialized; no caller data has been absorbed yet.
  Created,
  /// At least one non-empty update has been absorbed.
  Accumulating,
  /// The digest has been produced; further use is an error.
  Finalized,
}

/// Cryptographic hash with a runtime-selected output length and optional key.
///
/// All parameter validation happens in the constructors. After construction,
/// `update` and `finalize` fail only with [`DigestError::Finalized`].
pub trait VarDigest: Clone {
  /// Bytes consumed per compression call.
  const BLOCK_LEN: usize;

  /// Largest digest the algorithm produces, in bytes.
  const MAX_OUTPUT_SIZE: usize;

  /// Largest accepted key, in bytes.
  const MAX_KEY_SIZE: usize;

  /// The digest output type; dereferences to exactly `output_len()` bytes.
  type Output: AsRef<[u8]> + Copy + Eq + Debug;

  /// Create an unkeyed context producing `out_len` bytes.
  ///
  /// # Errors
  ///
  /// [`DigestError::InvalidOutputLength`] when `out_len` is outside
  /// `1..=MAX_OUTPUT_SIZE`.
  fn new(out_len: usize) -> Result<Self, DigestError>;

  /// Create a keyed context producing `out_len` bytes.
  ///
  /// An empty key is equivalent to [`VarDigest::new`].
  ///
  /// # Errors
  ///
  /// [`DigestError::InvalidOutputLength`] or [`DigestError::KeyTooLong`].
  fn new_keyed(key: &[u8], out_len: usize) -> Result<Self, DigestError>;

  /// Digest length fixed at construction.
  fn output_len(&self) -> usize;

  /// Current lifecycle stage.
  fn stage(&self) -> Stage;

  /// Absorb `data`.
  ///
  /// # Errors
  ///
  /// [`DigestError::Finalized`] if the context was already finalized.
  fn update(&mut self, data: &[u8]) -> Result<(), DigestError>;

  /// Produce the digest and move to [`Stage::Finalized`].
  ///
  /// # Errors
  ///
  /// [`DigestError::Finalized`] on the second and later calls.
  fn finalize(&mut self) -> Result<Self::Output, DigestError>;

  /// Return to [`Stage::Created`], keeping output length and key.
  fn reset(&mut self);

  /// Whether [`VarDigest::finalize`] has already run.
  #[inline]
  fn is_finalized(&self) -> bool {
    self.stage() == Stage::Finalized
  }

  /// Keyed or unkeyed one-shot digest.
  ///
  /// # Errors
  ///
  /// Any constructor error.
  #[inline]
  fn digest_keyed(key: &[u8], out_len: usize, data: &[u8]) -> Result<Self::Output, DigestError> {
    let mut h = Self::new_keyed(key, out_len)?;
    h.update(data)?;
    h.finalize()
  }
}
