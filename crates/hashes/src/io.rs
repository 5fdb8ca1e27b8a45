//! I/O adapters for BLAKE2 contexts.
//!
//! [`DigestReader`] and [`DigestWriter`] wrap [`std::io::Read`] and
//! [`std::io::Write`] implementations and digest every byte actually
//! transferred.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use hashes::{VarDigest as _, crypto::Blake2b, io::DigestReader};
//!
//! let mut reader = DigestReader::new(Cursor::new(b"abc".to_vec()), Blake2b::new(64)?);
//! std::io::copy(&mut reader, &mut std::io::sink())?;
//! let digest = reader.finalize()?;
//! assert_eq!(digest[..4], [0xba, 0x80, 0xa5, 0x3f]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use traits::io::{DigestReader, DigestWriter};
