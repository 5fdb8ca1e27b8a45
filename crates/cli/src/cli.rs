use std::{ffi::OsStr, path::PathBuf};

use anyhow::{Context, Result};
use b2hash::{Algorithm, Encoding};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
  name = "b2hash",
  version,
  about = "Hash a file or standard input with BLAKE2b or BLAKE2s (RFC 7693)",
  after_help = AFTER_HELP
)]
pub struct Cli {
  /// Input file; standard input when omitted
  #[arg(short = 'f', long = "file", short_alias = 'i', alias = "input", value_name = "PATH")]
  pub file: Option<PathBuf>,

  /// Digest length in bytes; the variant maximum when omitted
  #[arg(short = 'l', long = "length", value_name = "BYTES")]
  pub length: Option<usize>,

  /// blake2b or blake2s; guessed from the program name when omitted
  #[arg(short = 'a', long = "algorithm", value_name = "NAME")]
  pub algorithm: Option<Algorithm>,

  /// Hex-encoded key for keyed hashing
  #[arg(short = 'k', long = "key", value_name = "HEX")]
  pub key: Option<String>,

  /// hex, base64 or raw; hex on a terminal, raw otherwise
  #[arg(short = 'e', long = "encoding", short_alias = 'o', alias = "output", value_name = "ENCODING")]
  pub encoding: Option<Encoding>,

  /// Print a line break after the digest
  #[arg(short = 'n', long = "newline")]
  pub newline: bool,

  /// Run the RFC 7693 Appendix E self-tests and exit
  #[arg(long = "self-test")]
  pub self_test: bool,

  /// Log at debug level
  #[arg(short = 'v', long = "verbose")]
  pub verbose: bool,
}

const AFTER_HELP: &str = "\
Installed under a name containing \"2b\" (for example b2bhash), the default
algorithm is BLAKE2b; otherwise it is BLAKE2s.

Logging goes to stderr and honours RUST_LOG.";

impl Cli {
  /// `--algorithm`, else a guess from `argv[0]`.
  pub fn algorithm(&self, program: Option<&OsStr>) -> Algorithm {
    self.algorithm.unwrap_or_else(|| {
      let name = program
        .map(std::path::Path::new)
        .and_then(std::path::Path::file_name)
        .map(OsStr::to_string_lossy)
        .unwrap_or_default();
      Algorithm::from_program_name(&name)
    })
  }

  /// `--encoding`, else hex for a terminal and raw bytes for a pipe.
  pub fn encoding(&self, stdout_is_terminal: bool) -> Encoding {
    self.encoding.unwrap_or(if stdout_is_terminal { Encoding::Hex } else { Encoding::Raw })
  }

  /// The decoded `--key`, empty when absent.
  pub fn key_bytes(&self) -> Result<Vec<u8>> {
    self.key.as_deref().map_or_else(|| Ok(Vec::new()), parse_hex)
  }
}

fn parse_hex(s: &str) -> Result<Vec<u8>> {
  hex::decode(s.trim()).context("decoding --key")
}
