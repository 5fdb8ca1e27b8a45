//! I/O adapters for [`VarDigest`] contexts.
//!
//! [`DigestReader`] and [`DigestWriter`] wrap [`std::io::Read`] and
//! [`std::io::Write`] implementations and feed every byte actually transferred
//! into a digest context (short reads and writes are handled).
//!
//! A context error (the wrapped context was already finalized) surfaces as an
//! [`std::io::Error`] of kind [`std::io::ErrorKind::Other`].

use crate::{DigestError, VarDigest};

#[inline]
fn absorb<D: VarDigest>(hasher: &mut D, data: &[u8]) -> std::io::Result<()> {
  hasher.update(data).map_err(std::io::Error::other)
}

#[inline]
fn read_and_update<R, D>(inner: &mut R, buf: &mut [u8], hasher: &mut D) -> std::io::Result<usize>
where
  R: std::io::Read,
  D: VarDigest,
{
  let n = inner.read(buf)?;
  if let Some(data) = buf.get(..n) {
    absorb(hasher, data)?;
  }
  Ok(n)
}

#[inline]
fn read_vectored_and_update<R, D>(
  inner: &mut R,
  bufs: &mut [std::io::IoSliceMut<'_>],
  hasher: &mut D,
) -> std::io::Result<usize>
where
  R: std::io::Read,
  D: VarDigest,
{
  let n = inner.read_vectored(bufs)?;
  let mut remaining = n;
  for buf in bufs {
    let to_hash = remaining.min(buf.len());
    if to_hash == 0 {
      break;
    }
    if let Some(data) = buf.get(..to_hash) {
      absorb(hasher, data)?;
    }
    remaining -= to_hash;
  }
  Ok(n)
}

/// Wraps a [`Read`](std::io::Read) and digests every byte read through it.
///
/// # Example
///
/// ```rust,ignore
/// use std::io::Cursor;
///
/// use hashes::crypto::Blake2s;
/// use traits::{VarDigest, io::DigestReader};
///
/// let mut reader = DigestReader::new(Cursor::new(b"abc".to_vec()), Blake2s::new(32)?);
/// std::io::copy(&mut reader, &mut std::io::sink())?;
/// let digest = reader.finalize()?;
/// ```
pub struct DigestReader<R, D> {
  inner: R,
  hasher: D,
}

impl<R, D: VarDigest> DigestReader<R, D> {
  /// Wrap `inner`, feeding `hasher`.
  #[inline]
  pub fn new(inner: R, hasher: D) -> Self {
    Self { inner, hasher }
  }

  /// Finalize the wrapped context.
  ///
  /// # Errors
  ///
  /// [`DigestError::Finalized`] if called twice.
  #[inline]
  pub fn finalize(&mut self) -> Result<D::Output, DigestError> {
    self.hasher.finalize()
  }

  /// The wrapped context.
  #[inline]
  pub fn hasher(&self) -> &D {
    &self.hasher
  }

  /// Mutable access to the wrapped context.
  #[inline]
  pub fn hasher_mut(&mut self) -> &mut D {
    &mut self.hasher
  }

  /// Consume the adapter, returning the reader and the context.
  #[inline]
  pub fn into_parts(self) -> (R, D) {
    (self.inner, self.hasher)
  }

  /// Consume the adapter, returning the reader.
  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &R {
    &self.inner
  }

  #[inline]
  pub fn inner_mut(&mut self) -> &mut R {
    &mut self.inner
  }
}

impl<R: std::io::Read, D: VarDigest> std::io::Read for DigestReader<R, D> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    read_and_update(&mut self.inner, buf, &mut self.hasher)
  }

  #[inline]
  fn read_vectored(&mut self, bufs: &mut [std::io::IoSliceMut<'_>]) -> std::io::Result<usize> {
    read_vectored_and_update(&mut self.inner, bufs, &mut self.hasher)
  }
}

/// Wraps a [`Write`](std::io::Write) and digests every byte accepted by it.
///
/// Only the bytes the inner writer reports as written are digested.
pub struct DigestWriter<W, D> {
  inner: W,
  hasher: D,
}

impl<W, D: VarDigest> DigestWriter<W, D> {
  /// Wrap `inner`, feeding `hasher`.
  #[inline]
  pub fn new(inner: W, hasher: D) -> Self {
    Self { inner, hasher }
  }

  /// Finalize the wrapped context.
  ///
  /// # Errors
  ///
  /// [`DigestError::Finalized`] if called twice.
  #[inline]
  pub fn finalize(&mut self) -> Result<D::Output, DigestError> {
    self.hasher.finalize()
  }

  #[inline]
  pub fn hasher(&self) -> &D {
    &self.hasher
  }

  /// Consume the adapter, returning the writer and the context.
  #[inline]
  pub fn into_parts(self) -> (W, D) {
    (self.inner, self.hasher)
  }

  #[inline]
  pub fn into_inner(self) -> W {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &W {
    &self.inner
  }
}

impl<W: std::io::Write, D: VarDigest> std::io::Write for DigestWriter<W, D> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      absorb(&mut self.hasher, data)?;
    }
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    self.inner.flush()
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{vec, vec::Vec};
  use std::io::{Cursor, Read, Write};

  use super::*;
  use crate::Stage;

  /// Byte-summing stand-in with the real lifecycle rules.
  #[derive(Clone)]
  struct SumDigest {
    sum: u8,
    stage: Stage,
  }

  impl VarDigest for SumDigest {
    const BLOCK_LEN: usize = 1;
    const MAX_OUTPUT_SIZE: usize = 1;
    const MAX_KEY_SIZE: usize = 0;
    type Output = [u8; 1];

    fn new(out_len: usize) -> Result<Self, DigestError> {
      if out_len != 1 {
        return Err(DigestError::InvalidOutputLength { requested: out_len, max: 1 });
      }
      Ok(Self { sum: 0, stage: Stage::Created })
    }

    fn new_keyed(key: &[u8], out_len: usize) -> Result<Self, DigestError> {
      if !key.is_empty() {
        return Err(DigestError::KeyTooLong { len: key.len(), max: 0 });
      }
      Self::new(out_len)
    }

    fn output_len(&self) -> usize {
      1
    }

    fn stage(&self) -> Stage {
      self.stage
    }

    fn update(&mut self, data: &[u8]) -> Result<(), DigestError> {
      if self.stage == Stage::Finalized {
        return Err(DigestError::Finalized);
      }
      self.sum = data.iter().fold(self.sum, |acc, &b| acc.wrapping_add(b));
      self.stage = Stage::Accumulating;
      Ok(())
    }

    fn finalize(&mut self) -> Result<Self::Output, DigestError> {
      if self.stage == Stage::Finalized {
        return Err(DigestError::Finalized);
      }
      self.stage = Stage::Finalized;
      Ok([self.sum])
    }

    fn reset(&mut self) {
      self.sum = 0;
      self.stage = Stage::Created;
    }
  }

  fn expected(data: &[u8]) -> [u8; 1] {
    [data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))]
  }

  #[test]
  fn reader_digests_everything_read() {
    let data = b"hello world";
    let mut reader = DigestReader::new(Cursor::new(data.to_vec()), SumDigest::new(1).unwrap());
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
    assert_eq!(reader.finalize().unwrap(), expected(data));
    assert_eq!(reader.finalize(), Err(DigestError::Finalized));
  }

  #[test]
  fn vectored_read_digests_only_filled_bytes() {
    let mut reader = DigestReader::new(Cursor::new(b"hello".to_vec()), SumDigest::new(1).unwrap());
    let (mut a, mut b) = ([0u8; 3], [0u8; 4]);
    let n = reader
      .read_vectored(&mut [std::io::IoSliceMut::new(&mut a), std::io::IoSliceMut::new(&mut b)])
      .unwrap();
    assert_eq!(n, 5);
    assert_eq!(&a, b"hel");
    assert_eq!(&b[..2], b"lo");
    assert_eq!(b[2..], [0, 0]);
    assert_eq!(reader.finalize().unwrap(), expected(b"hello"));

    // Short read that stops inside the first buffer.
    let mut reader = DigestReader::new(Cursor::new(vec![7u8, 9]), SumDigest::new(1).unwrap());
    let (mut a, mut b) = ([0xffu8; 3], [0xffu8; 4]);
    let n = reader
      .read_vectored(&mut [std::io::IoSliceMut::new(&mut a), std::io::IoSliceMut::new(&mut b)])
      .unwrap();
    assert_eq!(n, 2);
    assert_eq!(reader.finalize().unwrap(), [16]);
  }

  #[test]
  fn writer_digests_everything_written() {
    let mut writer = DigestWriter::new(Vec::new(), SumDigest::new(1).unwrap());
    writer.write_all(b"hello ").unwrap();
    writer.write_all(b"world").unwrap();
    writer.flush().unwrap();
    assert_eq!(writer.finalize().unwrap(), expected(b"hello world"));
    let (out, hasher) = writer.into_parts();
    assert_eq!(out, b"hello world");
    assert!(hasher.is_finalized());
  }

  #[test]
  fn finalized_context_surfaces_as_io_error() {
    let mut hasher = SumDigest::new(1).unwrap();
    hasher.finalize().unwrap();
    let mut reader = DigestReader::new(Cursor::new(b"x".to_vec()), hasher);
    let err = reader.read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::Other);
  }
}
