//! Digest-to-integer folding.

use alloy_primitives::U512;

/// Fold a digest into an integer, eight bytes at a time.
///
/// Each 8-byte group is read as a little-endian `u64` and shifted in from the
/// right: `acc = (acc << 64) + word`, so the first group ends up most
/// significant.
///
/// A digest length that is not a multiple of 8 leaves a partial last group.
/// Its missing high-order bytes are taken as zero and it is still shifted in
/// as a full 64-bit word, so a 20-byte digest yields a 192-bit value whose
/// last word holds only 4 bytes.
///
/// BLAKE2 digests are at most 64 bytes, which always fits.
#[must_use]
pub fn fold_words(digest: &[u8]) -> U512 {
  debug_assert!(digest.len() <= 64);
  let (words, tail) = digest.as_chunks::<8>();
  let mut acc = U512::ZERO;
  for word in words {
    acc = (acc << 64usize) + U512::from(u64::from_le_bytes(*word));
  }
  if !tail.is_empty() {
    let mut word = [0u8; 8];
    if let Some(dst) = word.get_mut(..tail.len()) {
      dst.copy_from_slice(tail);
    }
    acc = (acc << 64usize) + U512::from(u64::from_le_bytes(word));
  }
  acc
}
