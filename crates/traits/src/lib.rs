//! Core hashing traits for the b2hash workspace.
//!
//! This crate provides the seams every BLAKE2 implementation plugs into. It is
//! `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Digest`] | Fixed-size, infallible streaming digests | `Blake2b512`, `Blake2s256` |
//! | [`VarDigest`] | Keyed, variable-length digests with a staged lifecycle | `Blake2b`, `Blake2s` |
//!
//! # Error Types
//!
//! - [`DigestError`] - Parameter validation and lifecycle misuse
//! - [`VerificationError`] - Opaque error for digest/MAC comparison
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
#[cfg(feature = "std")]
pub mod io;
mod var_digest;

pub use digest::Digest;
pub use error::{DigestError, VerificationError};
pub use var_digest::{Stage, VarDigest};
