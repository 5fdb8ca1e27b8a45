//! BLAKE2b (RFC 7693).
//!
//! Portable, `no_std`, pure Rust implementation: 64-bit words, 128-byte blocks,
//! twelve rounds. Supports keying (up to 64 bytes) and any digest length from
//! 1 to 64 bytes.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use core::fmt;

use traits::{Digest, DigestError, Stage, VarDigest};

use super::blake2::{self, Output};
use crate::util::rotr64;

/// Block size in bytes.
pub const BLOCK_LEN: usize = 128;
/// Largest digest, in bytes.
pub const MAX_OUTPUT_LEN: usize = 64;
/// Largest key, in bytes.
pub const MAX_KEY_LEN: usize = 64;

/// A BLAKE2b digest of 1 to 64 bytes.
pub type Blake2bOutput = Output<MAX_OUTPUT_LEN>;

const IV: [u64; 8] = [
  0x6a09_e667_f3bc_c908,
  0xbb67_ae85_84ca_a73b,
  0x3c6e_f372_fe94_f82b,
  0xa54f_f53a_5f1d_36f1,
  0x510e_527f_ade6_82d1,
  0x9b05_688c_2b3e_6c1f,
  0x1f83_d9ab_fb41_bd6b,
  0x5be0_cd19_137e_2179,
];

const SIGMA: [[usize; 16]; 12] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
  [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
  [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
  [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
  [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
  [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
  [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
  [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
  [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = rotr64(v[d] ^ v[a], 32);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = rotr64(v[b] ^ v[c], 24);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = rotr64(v[d] ^ v[a], 16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = rotr64(v[b] ^ v[c], 63);
}

/// Compression function F.
///
/// `observe` sees the working vector before round 0 and after every round
/// (round index `0..=12`); the production path passes a no-op.
#[inline(always)]
fn compress_observed(
  h: &mut [u64; 8],
  block: &[u8; BLOCK_LEN],
  t: u128,
  is_last: bool,
  mut observe: impl FnMut(usize, &[u64; 16]),
) {
  let (chunks, _) = block.as_chunks::<8>();
  let mut m = [0u64; 16];
  for (i, c) in chunks.iter().enumerate() {
    m[i] = u64::from_le_bytes(*c);
  }

  let mut v = [0u64; 16];
  v[..8].copy_from_slice(h);
  v[8..].copy_from_slice(&IV);
  v[12] ^= t as u64;
  v[13] ^= (t >> 64) as u64;
  if is_last {
    v[14] = !v[14];
  }

  observe(0, &v);
  for (r, s) in SIGMA.iter().enumerate() {
    g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
    g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
    g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
    g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);

    g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
    g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
    g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
    g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
    observe(r + 1, &v);
  }

  for (i, word) in h.iter_mut().enumerate() {
    *word ^= v[i] ^ v[i + 8];
  }
}

#[inline(always)]
fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u128, is_last: bool) {
  compress_observed(h, block, t, is_last, |_, _| {});
}

/// Streaming BLAKE2b context with a runtime digest length and optional key.
///
/// A keyed context keeps a copy of its key until it is dropped, since
/// [`reset`](VarDigest::reset) re-keys from it. Clones carry the key too.
///
/// ```
/// use hashes::crypto::Blake2b;
/// use traits::VarDigest as _;
///
/// let mut h = Blake2b::new_keyed(b"secret", 32)?;
/// h.update(b"hello ")?;
/// h.update(b"world")?;
/// let tag = h.finalize()?;
/// assert_eq!(tag.len(), 32);
/// assert!(h.update(b"more").is_err());
/// # Ok::<(), traits::DigestError>(())
/// ```
#[derive(Clone)]
pub struct Blake2b {
  h: [u64; 8],
  buf: [u8; BLOCK_LEN],
  buf_len: usize,
  bytes_hashed: u128,
  out_len: usize,
  key: [u8; MAX_KEY_LEN],
  key_len: usize,
  stage: Stage,
}

impl Blake2b {
  /// Build a context from parameters that have already been validated.
  fn init(key: &[u8], out_len: usize) -> Self {
    let mut h = IV;
    h[0] ^= u64::from(blake2::param_word(key.len(), out_len));

    let mut stored = [0u8; MAX_KEY_LEN];
    stored[..key.len()].copy_from_slice(key);

    let mut buf = [0u8; BLOCK_LEN];
    let mut buf_len = 0;
    if !key.is_empty() {
      // The zero-padded key occupies the first block; it is compressed once
      // the first message byte arrives, or as the last block if none does.
      buf[..key.len()].copy_from_slice(key);
      buf_len = BLOCK_LEN;
    }

    Self {
      h,
      buf,
      buf_len,
      bytes_hashed: 0,
      out_len,
      key: stored,
      key_len: key.len(),
      stage: Stage::Created,
    }
  }

  fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }
    self.stage = Stage::Accumulating;

    if self.buf_len != 0 {
      let take = core::cmp::min(BLOCK_LEN - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      // Keep a full block buffered until we know there is more input, so the
      // final block can be marked with the `is_last` flag.
      if self.buf_len == BLOCK_LEN && !data.is_empty() {
        self.bytes_hashed = self.bytes_hashed.wrapping_add(BLOCK_LEN as u128);
        compress(&mut self.h, &self.buf, self.bytes_hashed, false);
        self.buf_len = 0;
      }
    }

    let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
    if !blocks.is_empty() {
      // If `rest` is empty, hold back the last full block for finalization.
      let (to_compress, last_full) = if rest.is_empty() {
        (&blocks[..blocks.len() - 1], Some(blocks[blocks.len() - 1]))
      } else {
        (blocks, None)
      };

      for block in to_compress {
        self.bytes_hashed = self.bytes_hashed.wrapping_add(BLOCK_LEN as u128);
        compress(&mut self.h, block, self.bytes_hashed, false);
      }

      if let Some(last) = last_full {
        self.buf.copy_from_slice(&last);
        self.buf_len = BLOCK_LEN;
      }
    }
    data = rest;

    if !data.is_empty() {
      self.buf[..data.len()].copy_from_slice(data);
      self.buf_len = data.len();
    }
  }

  /// Pad, compress the last block, and serialize all eight state words.
  fn finalize_words(&self) -> [u8; MAX_OUTPUT_LEN] {
    let mut h = self.h;
    let mut buf = self.buf;
    let len = self.buf_len;

    buf[len..].fill(0);
    let t = self.bytes_hashed.wrapping_add(len as u128);
    compress(&mut h, &buf, t, true);

    let mut out = [0u8; MAX_OUTPUT_LEN];
    for (i, word) in h.iter().copied().enumerate() {
      out[i * 8..i * 8 + 8].copy_from_slice(&word.to_le_bytes());
    }
    out
  }
}

impl VarDigest for Blake2b {
  const BLOCK_LEN: usize = BLOCK_LEN;
  const MAX_OUTPUT_SIZE: usize = MAX_OUTPUT_LEN;
  const MAX_KEY_SIZE: usize = MAX_KEY_LEN;
  type Output = Blake2bOutput;

  #[inline]
  fn new(out_len: usize) -> Result<Self, DigestError> {
    Self::new_keyed(&[], out_len)
  }

  fn new_keyed(key: &[u8], out_len: usize) -> Result<Self, DigestError> {
    blake2::check_params(key.len(), out_len, MAX_KEY_LEN, MAX_OUTPUT_LEN)?;
    Ok(Self::init(key, out_len))
  }

  #[inline]
  fn output_len(&self) -> usize {
    self.out_len
  }

  #[inline]
  fn stage(&self) -> Stage {
    self.stage
  }

  fn update(&mut self, data: &[u8]) -> Result<(), DigestError> {
    if self.stage == Stage::Finalized {
      return Err(DigestError::Finalized);
    }
    self.absorb(data);
    Ok(())
  }

  fn finalize(&mut self) -> Result<Self::Output, DigestError> {
    if self.stage == Stage::Finalized {
      return Err(DigestError::Finalized);
    }
    let out = Output::new(self.finalize_words(), self.out_len);
    self.stage = Stage::Finalized;
    Ok(out)
  }

  fn reset(&mut self) {
    let key = self.key;
    *self = Self::init(&key[..self.key_len], self.out_len);
  }
}

impl fmt::Debug for Blake2b {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Blake2b")
      .field("out_len", &self.out_len)
      .field("keyed", &(self.key_len != 0))
      .field("stage", &self.stage)
      .finish_non_exhaustive()
  }
}

/// BLAKE2b with a fixed 64-byte digest and no key.
#[derive(Clone, Debug)]
pub struct Blake2b512(Blake2b);

impl Default for Blake2b512 {
  #[inline]
  fn default() -> Self {
    // Parameter block: outlen=64, keylen=0, fanout=1, depth=1.
    Self(Blake2b::init(&[], MAX_OUTPUT_LEN))
  }
}

impl Digest for Blake2b512 {
  const OUTPUT_SIZE: usize = 64;
  type Output = [u8; 64];

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.0.absorb(data);
  }

  #[inline]
  fn finalize(&self) -> Self::Output {
    self.0.finalize_words()
  }

  #[inline]
  fn reset(&mut self) {
    *self = Self::default();
  }
}
