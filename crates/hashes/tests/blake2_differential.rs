use blake2::digest::{Mac, Update as _, VariableOutput as _};
use hashes::crypto::{Blake2b, Blake2b512, Blake2s, Blake2s256};
use proptest::prelude::*;
use traits::{Digest as _, VarDigest};

fn blake2b_var_ref(data: &[u8], out_len: usize) -> Vec<u8> {
  let mut h = blake2::Blake2bVar::new(out_len).unwrap();
  h.update(data);
  let mut out = vec![0u8; out_len];
  h.finalize_variable(&mut out).unwrap();
  out
}

fn blake2s_var_ref(data: &[u8], out_len: usize) -> Vec<u8> {
  let mut h = blake2::Blake2sVar::new(out_len).unwrap();
  h.update(data);
  let mut out = vec![0u8; out_len];
  h.finalize_variable(&mut out).unwrap();
  out
}

fn blake2b_mac_ref(key: &[u8], data: &[u8]) -> Vec<u8> {
  let mut m = blake2::Blake2bMac512::new_with_salt_and_personal(key, &[], &[]).unwrap();
  Mac::update(&mut m, data);
  m.finalize().into_bytes().to_vec()
}

fn blake2s_mac_ref(key: &[u8], data: &[u8]) -> Vec<u8> {
  let mut m = blake2::Blake2sMac256::new_with_salt_and_personal(key, &[], &[]).unwrap();
  Mac::update(&mut m, data);
  m.finalize().into_bytes().to_vec()
}

/// Feed `data` in pieces whose sizes are driven by the data itself.
fn streamed<D: VarDigest>(mut h: D, data: &[u8]) -> D::Output {
  let mut i = 0usize;
  while i < data.len() {
    let step = (data[i] as usize % 97) + 1;
    let end = core::cmp::min(data.len(), i + step);
    h.update(&data[i..end]).unwrap();
    i = end;
  }
  h.finalize().unwrap()
}

proptest! {
  #[test]
  fn blake2s256_one_shot_matches_blake2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    use blake2::Digest as _;
    let expected = blake2::Blake2s256::digest(&data);
    prop_assert_eq!(&Blake2s256::digest(&data)[..], &expected[..]);
  }

  #[test]
  fn blake2b512_one_shot_matches_blake2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    use blake2::Digest as _;
    let expected = blake2::Blake2b512::digest(&data);
    prop_assert_eq!(&Blake2b512::digest(&data)[..], &expected[..]);
  }

  #[test]
  fn blake2b_variable_length_streaming_matches_blake2(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    out_len in 1usize..=64,
  ) {
    let ours = streamed(Blake2b::new(out_len).unwrap(), &data);
    prop_assert_eq!(&ours[..], &blake2b_var_ref(&data, out_len)[..]);
  }

  #[test]
  fn blake2s_variable_length_streaming_matches_blake2(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    out_len in 1usize..=32,
  ) {
    let ours = streamed(Blake2s::new(out_len).unwrap(), &data);
    prop_assert_eq!(&ours[..], &blake2s_var_ref(&data, out_len)[..]);
  }

  #[test]
  fn blake2b_keyed_matches_blake2_mac(
    key in proptest::collection::vec(any::<u8>(), 1..=64),
    data in proptest::collection::vec(any::<u8>(), 1..2048),
  ) {
    let ours = streamed(Blake2b::new_keyed(&key, 64).unwrap(), &data);
    prop_assert_eq!(&ours[..], &blake2b_mac_ref(&key, &data)[..]);
  }

  #[test]
  fn blake2s_keyed_matches_blake2_mac(
    key in proptest::collection::vec(any::<u8>(), 1..=32),
    data in proptest::collection::vec(any::<u8>(), 1..2048),
  ) {
    let ours = streamed(Blake2s::new_keyed(&key, 32).unwrap(), &data);
    prop_assert_eq!(&ours[..], &blake2s_mac_ref(&key, &data)[..]);
  }

  #[test]
  fn any_partition_gives_the_same_digest(
    data in proptest::collection::vec(any::<u8>(), 0..1024),
    cuts in proptest::collection::vec(any::<usize>(), 0..8),
  ) {
    let whole = Blake2s::digest_keyed(b"k", 32, &data).unwrap();

    let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
    points.sort_unstable();
    let mut h = Blake2s::new_keyed(b"k", 32).unwrap();
    let mut start = 0;
    for p in points {
      h.update(&data[start..p]).unwrap();
      start = p;
    }
    h.update(&data[start..]).unwrap();
    prop_assert_eq!(h.finalize().unwrap(), whole);
  }
}
