//! Canonical byte encoding of caller values.
//!
//! Plain text and byte strings hash as their raw bytes, so `hash("abc")`
//! reproduces the published RFC 7693 vectors. Everything else goes through a
//! tagged, length-prefixed encoding:
//!
//! | Value | Encoding |
//! |-------|----------|
//! | `Null` | `00` |
//! | `Bool` | `01`, then `00` or `01` |
//! | `Int` | `02`, then the `i128` big-endian |
//! | `Float` | `03`, then the `f64` bit pattern big-endian (`-0.0` is written as `0.0`) |
//! | `Text` | `04`, byte length as `u64` big-endian, UTF-8 bytes |
//! | `Bytes` | `05`, byte length, bytes |
//! | `List` | `06`, element count, elements in order |
//! | `Set` | `07`, element count, elements sorted by encoding with duplicates dropped |
//! | `Map` | `08`, entry count, `key value` pairs sorted by key encoding |
//!
//! A length prefix on every variable-size item keeps concatenations
//! unambiguous. NaN floats and maps with a repeated key are rejected, as is
//! nesting deeper than [`MAX_DEPTH`].

use alloc::{borrow::Cow, string::String, vec::Vec};

use crate::error::NormalizeError;

/// Deepest container nesting [`Value::encode`] accepts.
pub const MAX_DEPTH: usize = 128;

const TAG_NULL: u8 = 0x00;
const TAG_BOOL: u8 = 0x01;
const TAG_INT: u8 = 0x02;
const TAG_FLOAT: u8 = 0x03;
const TAG_TEXT: u8 = 0x04;
const TAG_BYTES: u8 = 0x05;
const TAG_LIST: u8 = 0x06;
const TAG_SET: u8 = 0x07;
const TAG_MAP: u8 = 0x08;

/// A structured value that can be hashed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i128),
  Float(f64),
  Text(String),
  Bytes(Vec<u8>),
  /// Ordered sequence.
  List(Vec<Value>),
  /// Unordered collection; order and repeats do not affect the encoding.
  Set(Vec<Value>),
  /// Unordered key/value entries; keys must be distinct.
  Map(Vec<(Value, Value)>),
}

impl Value {
  /// Append the tagged encoding of `self` to `out`.
  ///
  /// # Errors
  ///
  /// [`NormalizeError`] for NaN floats, repeated map keys, or nesting deeper
  /// than [`MAX_DEPTH`].
  pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), NormalizeError> {
    self.encode_at(out, 0)
  }

  fn encode_at(&self, out: &mut Vec<u8>, depth: usize) -> Result<(), NormalizeError> {
    match self {
      Self::Null => out.push(TAG_NULL),
      Self::Bool(b) => out.extend_from_slice(&[TAG_BOOL, u8::from(*b)]),
      Self::Int(i) => {
        out.push(TAG_INT);
        out.extend_from_slice(&i.to_be_bytes());
      }
      Self::Float(f) => {
        if f.is_nan() {
          return Err(NormalizeError::UnsupportedInputShape { shape: "NaN float" });
        }
        // -0.0 == 0.0, so both map to the positive zero pattern.
        let f = if *f == 0.0 { 0.0f64 } else { *f };
        out.push(TAG_FLOAT);
        out.extend_from_slice(&f.to_bits().to_be_bytes());
      }
      Self::Text(s) => put_bytes(out, TAG_TEXT, s.as_bytes()),
      Self::Bytes(b) => put_bytes(out, TAG_BYTES, b),
      Self::List(items) => {
        let depth = descend(depth)?;
        put_header(out, TAG_LIST, items.len());
        for item in items {
          item.encode_at(out, depth)?;
        }
      }
      Self::Set(items) => {
        let depth = descend(depth)?;
        let mut encoded = items
          .iter()
          .map(|item| {
            let mut buf = Vec::new();
            item.encode_at(&mut buf, depth).map(|()| buf)
          })
          .collect::<Result<Vec<_>, _>>()?;
        encoded.sort_unstable();
        encoded.dedup();
        put_header(out, TAG_SET, encoded.len());
        for item in &encoded {
          out.extend_from_slice(item);
        }
      }
      Self::Map(entries) => {
        let depth = descend(depth)?;
        let mut encoded = Vec::with_capacity(entries.len());
        for (key, value) in entries {
          let mut k = Vec::new();
          key.encode_at(&mut k, depth)?;
          let mut v = Vec::new();
          value.encode_at(&mut v, depth)?;
          encoded.push((k, v));
        }
        encoded.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        if encoded.windows(2).any(|w| matches!(w, [a, b] if a.0 == b.0)) {
          return Err(NormalizeError::UnsupportedInputShape {
            shape: "map with repeated key",
          });
        }
        put_header(out, TAG_MAP, encoded.len());
        for (k, v) in &encoded {
          out.extend_from_slice(k);
          out.extend_from_slice(v);
        }
      }
    }
    Ok(())
  }
}

#[inline]
fn descend(depth: usize) -> Result<usize, NormalizeError> {
  if depth >= MAX_DEPTH {
    return Err(NormalizeError::NestingTooDeep { limit: MAX_DEPTH });
  }
  Ok(depth + 1)
}

#[inline]
fn put_header(out: &mut Vec<u8>, tag: u8, len: usize) {
  out.push(tag);
  out.extend_from_slice(&(len as u64).to_be_bytes());
}

#[inline]
fn put_bytes(out: &mut Vec<u8>, tag: u8, bytes: &[u8]) {
  put_header(out, tag, bytes.len());
  out.extend_from_slice(bytes);
}

/// Anything the one-shot helpers accept as input.
pub trait HashInput {
  /// The bytes fed to the digest context.
  ///
  /// # Errors
  ///
  /// [`NormalizeError`] if the value has no canonical encoding.
  fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, NormalizeError>;
}

impl HashInput for [u8] {
  #[inline]
  fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, NormalizeError> {
    Ok(Cow::Borrowed(self))
  }
}

impl<const N: usize> HashInput for [u8; N] {
  #[inline]
  fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, NormalizeError> {
    Ok(Cow::Borrowed(self))
  }
}

impl HashInput for Vec<u8> {
  #[inline]
  fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, NormalizeError> {
    Ok(Cow::Borrowed(self))
  }
}

impl HashInput for str {
  #[inline]
  fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, NormalizeError> {
    Ok(Cow::Borrowed(self.as_bytes()))
  }
}

impl HashInput for String {
  #[inline]
  fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, NormalizeError> {
    Ok(Cow::Borrowed(self.as_bytes()))
  }
}

impl HashInput for Value {
  fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, NormalizeError> {
    match self {
      Self::Text(s) => Ok(Cow::Borrowed(s.as_bytes())),
      Self::Bytes(b) => Ok(Cow::Borrowed(b)),
      other => {
        let mut out = Vec::new();
        other.encode(&mut out)?;
        Ok(Cow::Owned(out))
      }
    }
  }
}

impl<T: HashInput + ?Sized> HashInput for &T {
  #[inline]
  fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, NormalizeError> {
    (**self).canonical_bytes()
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Self::Text(s.into())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Self::Text(s)
  }
}

impl From<&[u8]> for Value {
  fn from(b: &[u8]) -> Self {
    Self::Bytes(b.to_vec())
  }
}

impl From<Vec<u8>> for Value {
  fn from(b: Vec<u8>) -> Self {
    Self::Bytes(b)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Self::Bool(b)
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Self::Int(i.into())
  }
}

impl From<u64> for Value {
  fn from(i: u64) -> Self {
    Self::Int(i.into())
  }
}

impl From<f64> for Value {
  fn from(f: f64) -> Self {
    Self::Float(f)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(v: Option<T>) -> Self {
    v.map_or(Self::Null, Into::into)
  }
}

#[cfg(test)]
mod tests {
  use alloc::{vec, vec::Vec};

  use super::*;

  fn enc(v: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    v.encode(&mut out).unwrap();
    out
  }

  fn nested_list(depth: usize) -> Value {
    (0..depth).fold(Value::Null, |inner, _| Value::List(vec![inner]))
  }

  #[test]
  fn scalar_layouts() {
    assert_eq!(enc(&Value::Null), [0x00]);
    assert_eq!(enc(&Value::Bool(true)), [0x01, 0x01]);
    let mut int = vec![0x02];
    int.extend_from_slice(&(-1i128).to_be_bytes());
    assert_eq!(enc(&Value::Int(-1)), int);
    assert_eq!(enc(&"ab".into()), [0x04, 0, 0, 0, 0, 0, 0, 0, 2, b'a', b'b']);
  }

  #[test]
  fn top_level_text_and_bytes_are_raw() {
    assert_eq!(Value::from("abc").canonical_bytes().unwrap(), &b"abc"[..]);
    assert_eq!(Value::from(&b"\x00\x01"[..]).canonical_bytes().unwrap(), &[0u8, 1][..]);
    assert_eq!("abc".canonical_bytes().unwrap(), &b"abc"[..]);
    assert_eq!(b"abc".canonical_bytes().unwrap(), &b"abc"[..]);
  }

  #[test]
  fn text_and_bytes_are_distinguished_when_nested() {
    let a = Value::List(vec!["ab".into()]);
    let b = Value::List(vec![Value::Bytes(b"ab".to_vec())]);
    assert_ne!(enc(&a), enc(&b));
  }

  #[test]
  fn list_boundaries_are_unambiguous() {
    let a = Value::List(vec!["ab".into(), "c".into()]);
    let b = Value::List(vec!["a".into(), "bc".into()]);
    assert_ne!(enc(&a), enc(&b));
  }

  #[test]
  fn list_order_matters() {
    let a = Value::List(vec![1i64.into(), 2i64.into()]);
    let b = Value::List(vec![2i64.into(), 1i64.into()]);
    assert_ne!(enc(&a), enc(&b));
  }

  #[test]
  fn set_ignores_order_and_repeats() {
    let a = Value::Set(vec![1i64.into(), "x".into(), 2i64.into()]);
    let b = Value::Set(vec![2i64.into(), 1i64.into(), "x".into(), 1i64.into()]);
    assert_eq!(enc(&a), enc(&b));
  }

  #[test]
  fn map_ignores_entry_order() {
    let a = Value::Map(vec![("a".into(), 1i64.into()), ("b".into(), Value::Null)]);
    let b = Value::Map(vec![("b".into(), Value::Null), ("a".into(), 1i64.into())]);
    assert_eq!(enc(&a), enc(&b));
  }

  #[test]
  fn map_with_repeated_key_is_rejected() {
    let m = Value::Map(vec![("a".into(), 1i64.into()), ("a".into(), 2i64.into())]);
    assert_eq!(
      m.canonical_bytes(),
      Err(NormalizeError::UnsupportedInputShape {
        shape: "map with repeated key"
      })
    );
  }

  #[test]
  fn floats() {
    assert_eq!(enc(&Value::Float(-0.0)), enc(&Value::Float(0.0)));
    assert_ne!(enc(&Value::Float(1.0)), enc(&Value::Int(1)));
    assert!(matches!(
      Value::List(vec![Value::Float(f64::NAN)]).canonical_bytes(),
      Err(NormalizeError::UnsupportedInputShape { .. })
    ));
  }

  #[test]
  fn option_maps_to_null() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(true)), Value::Bool(true));
  }

  #[test]
  fn nesting_limit() {
    assert!(nested_list(MAX_DEPTH).canonical_bytes().is_ok());
    assert_eq!(
      nested_list(MAX_DEPTH + 1).canonical_bytes(),
      Err(NormalizeError::NestingTooDeep { limit: MAX_DEPTH })
    );
  }
}
