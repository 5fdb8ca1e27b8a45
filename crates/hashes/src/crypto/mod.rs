//! BLAKE2 hash functions (RFC 7693).
//!
//! - [`blake2b`] - 64-bit words, 128-byte blocks, digests up to 64 bytes.
//! - [`blake2s`] - 32-bit words, 64-byte blocks, digests up to 32 bytes.
//! - [`selftest`] - the RFC 7693 Appendix E grand-hash check for both.

mod blake2;
pub mod blake2b;
pub mod blake2s;
pub mod selftest;

pub use blake2::Output;
pub use blake2b::{Blake2b, Blake2b512, Blake2bOutput};
pub use blake2s::{Blake2s, Blake2s256, Blake2sOutput};
