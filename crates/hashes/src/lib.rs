//! BLAKE2b and BLAKE2s (RFC 7693) digests.
//!
//! This crate is `no_std` compatible and has zero library dependencies outside
//! the workspace. Dev-only dependencies are used for oracle testing and
//! benchmarking.
//!
//! # Modules
//!
//! - [`crypto`] - Compression engines, streaming contexts, and self-tests.
//! - [`io`] - `std::io` adapters (requires the `std` feature).
//!
//! # Example
//!
//! ```
//! use hashes::crypto::{Blake2s, Blake2s256};
//! use traits::{Digest as _, VarDigest as _};
//!
//! let fixed = Blake2s256::digest(b"abc");
//! let var = Blake2s::digest_keyed(&[], 32, b"abc")?;
//! assert_eq!(&fixed[..], &var[..]);
//! # Ok::<(), traits::DigestError>(())
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod crypto;
#[cfg(feature = "std")]
pub mod io;

mod util;

pub use traits::{Digest, DigestError, Stage, VarDigest};
