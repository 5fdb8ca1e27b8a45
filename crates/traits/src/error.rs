//! Error types for hashing operations.
//!
//! All validation happens when a context is created; after that the only
//! failure a context can report is lifecycle misuse. Individual crates may
//! define additional errors as needed.

use core::fmt;

/// Parameter validation or lifecycle error from a digest context.
///
/// # Examples
///
/// ```
/// use traits::DigestError;
///
/// fn check_len(requested: usize) -> Result<usize, DigestError> {
///   if (1..=32).contains(&requested) {
///     Ok(requested)
///   } else {
///     Err(DigestError::InvalidOutputLength { requested, max: 32 })
///   }
/// }
///
/// assert!(check_len(0).is_err());
/// assert_eq!(check_len(20), Ok(20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DigestError {
  /// Requested digest length is outside `1..=max`.
  InvalidOutputLength {
    /// Length the caller asked for, in bytes.
    requested: usize,
    /// Largest digest the algorithm can produce, in bytes.
    max: usize,
  },
  /// Key is longer than the algorithm accepts.
  KeyTooLong {
    /// Length of the supplied key, in bytes.
    len: usize,
    /// Largest accepted key, in bytes.
    max: usize,
  },
  /// `update` or `finalize` was called on a context that was already finalized.
  Finalized,
}

impl fmt::Display for DigestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::InvalidOutputLength { requested, max } => {
        write!(f, "invalid output length {requested} (expected 1..={max} bytes)")
      }
      Self::KeyTooLong { len, max } => write!(f, "key of {len} bytes exceeds the {max}-byte maximum"),
      Self::Finalized => f.write_str("digest context already finalized"),
    }
  }
}

impl core::error::Error for DigestError {}

/// Verification failed.
///
/// Returned when a computed digest does not match the expected value.
/// Intentionally opaque so callers cannot learn where the mismatch was.
///
/// # Examples
///
/// ```
/// use traits::VerificationError;
///
/// fn verify(computed: &[u8; 32], expected: &[u8; 32]) -> Result<(), VerificationError> {
///   // Real code: use constant-time comparison
///   if computed == expected {
///     Ok(())
///   } else {
///     Err(VerificationError::new())
///   }
/// }
///
/// let a = [0u8; 32];
/// let b = [1u8; 32];
/// assert!(verify(&a, &b).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("verification failed")
  }
}

impl core::error::Error for VerificationError {}
