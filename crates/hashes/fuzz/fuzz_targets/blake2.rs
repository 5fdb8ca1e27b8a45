#![no_main]

use blake2::digest::{Mac, Update as _, VariableOutput as _};
use hashes::crypto::{Blake2b, Blake2b512, Blake2s, Blake2s256};
use libfuzzer_sys::fuzz_target;
use traits::{Digest as _, VarDigest};

/// Carve `(split, out_len, key, message)` out of the raw fuzz input.
fn parse(input: &[u8], max_out: usize, max_key: usize) -> Option<(usize, usize, &[u8], &[u8])> {
  let (&[split, out, key_len], rest) = input.split_first_chunk::<3>()?;
  let key_len = (key_len as usize) % (max_key + 1);
  let (key, msg) = rest.split_at_checked(key_len)?;
  let out_len = (out as usize) % max_out + 1;
  let split = (split as usize) % (msg.len() + 1);
  Some((split, out_len, key, msg))
}

fn streamed<D: VarDigest>(key: &[u8], out_len: usize, a: &[u8], b: &[u8]) -> D::Output {
  let mut h = D::new_keyed(key, out_len).unwrap();
  h.update(a).unwrap();
  h.update(b).unwrap();
  let out = h.finalize().unwrap();
  assert!(h.update(b"x").is_err());
  out
}

fn check_blake2b(input: &[u8]) {
  let Some((split, out_len, key, msg)) = parse(input, 64, 64) else {
    return;
  };
  let (a, b) = msg.split_at(split);
  let ours = streamed::<Blake2b>(key, out_len, a, b);
  assert_eq!(ours, Blake2b::digest_keyed(key, out_len, msg).unwrap());

  // The reference MAC only produces full-length tags.
  if key.is_empty() {
    let mut expected = vec![0u8; out_len];
    let mut r = blake2::Blake2bVar::new(out_len).unwrap();
    r.update(msg);
    r.finalize_variable(&mut expected).unwrap();
    assert_eq!(ours.as_ref(), &expected[..]);
  } else if out_len == 64 {
    let mut r = blake2::Blake2bMac512::new_with_salt_and_personal(key, &[], &[]).unwrap();
    Mac::update(&mut r, msg);
    assert_eq!(ours.as_ref(), &r.finalize().into_bytes()[..]);
  }

  let mut fixed = Blake2b512::new();
  fixed.update(a);
  fixed.update(b);
  assert_eq!(fixed.finalize(), Blake2b512::digest(msg));
}

fn check_blake2s(input: &[u8]) {
  let Some((split, out_len, key, msg)) = parse(input, 32, 32) else {
    return;
  };
  let (a, b) = msg.split_at(split);
  let ours = streamed::<Blake2s>(key, out_len, a, b);
  assert_eq!(ours, Blake2s::digest_keyed(key, out_len, msg).unwrap());

  // The reference MAC only produces full-length tags.
  if key.is_empty() {
    let mut expected = vec![0u8; out_len];
    let mut r = blake2::Blake2sVar::new(out_len).unwrap();
    r.update(msg);
    r.finalize_variable(&mut expected).unwrap();
    assert_eq!(ours.as_ref(), &expected[..]);
  } else if out_len == 32 {
    let mut r = blake2::Blake2sMac256::new_with_salt_and_personal(key, &[], &[]).unwrap();
    Mac::update(&mut r, msg);
    assert_eq!(ours.as_ref(), &r.finalize().into_bytes()[..]);
  }

  let mut fixed = Blake2s256::new();
  fixed.update(a);
  fixed.update(b);
  assert_eq!(fixed.finalize(), Blake2s256::digest(msg));
}

fuzz_target!(|input: &[u8]| {
  check_blake2b(input);
  check_blake2s(input);
});
