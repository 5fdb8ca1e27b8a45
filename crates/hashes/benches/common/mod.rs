use core::hint::black_box;

use criterion::{BenchmarkGroup, Throughput, measurement::WallTime};

/// xorshift64*; only used to keep benchmark inputs from being all zeroes.
#[inline]
fn next(state: &mut u64) -> u64 {
  let mut x = *state;
  x ^= x >> 12;
  x ^= x << 25;
  x ^= x >> 27;
  *state = x;
  x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

pub fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut state = seed ^ (len as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
  let out: Vec<u8> = (0..len).map(|_| (next(&mut state) >> 56) as u8).collect();
  black_box(&out);
  out
}

/// Inputs straddling both block sizes (64 and 128 bytes) plus bulk payloads.
pub fn sized_inputs() -> Vec<(usize, Vec<u8>)> {
  [0usize, 3, 63, 64, 65, 127, 128, 129, 1024, 16 * 1024, 1024 * 1024]
    .into_iter()
    .map(|len| (len, pseudo_random_bytes(len, 0xB1A4_E2B5_0000_7693)))
    .collect()
}

pub fn set_throughput(group: &mut BenchmarkGroup<'_, WallTime>, len: usize) {
  if len == 0 {
    group.throughput(Throughput::Elements(1));
  } else {
    group.throughput(Throughput::Bytes(len as u64));
  }
}
