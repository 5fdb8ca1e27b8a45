//! `b2hash`: BLAKE2 digests of files and standard input.
//!
//! The input is streamed through the digest context, so memory use does not
//! depend on the input size.

use std::{
  env, fs,
  io::{self, IsTerminal, Read, Write},
};

use anyhow::{Context, Result};
use b2hash::{Algorithm, Encoding};
use clap::Parser;
use hashes::{
  crypto::{Blake2b, Blake2s, selftest},
  io::DigestReader,
};
use tracing::{debug, info};
use traits::VarDigest;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if cli.self_test {
    return self_test(&mut io::stdout().lock());
  }

  let algorithm = cli.algorithm(env::args_os().next().as_deref());
  let key = cli.key_bytes()?;
  let stdout = io::stdout();
  let encoding = cli.encoding(stdout.is_terminal());
  debug!(%algorithm, length = ?cli.length, keyed = !key.is_empty(), %encoding, "starting");

  let digest = match &cli.file {
    Some(path) => {
      info!(path = %path.display(), "hashing file");
      let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
      digest_stream(algorithm, file, &key, cli.length)?
    }
    None => {
      info!("hashing standard input");
      digest_stream(algorithm, io::stdin().lock(), &key, cli.length)?
    }
  };

  let mut out = stdout.lock();
  write_digest(&mut out, &digest, encoding, cli.newline)?;
  out.flush().context("flushing stdout")
}

fn init_tracing(verbose: bool) {
  use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .try_init();
}

fn digest_stream(algorithm: Algorithm, input: impl Read, key: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
  match algorithm {
    Algorithm::Blake2b => digest_with::<Blake2b>(input, key, length),
    Algorithm::Blake2s => digest_with::<Blake2s>(input, key, length),
  }
}

fn digest_with<D: VarDigest>(input: impl Read, key: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
  // Validate before reading anything.
  let ctx = D::new_keyed(key, length.unwrap_or(D::MAX_OUTPUT_SIZE))?;
  let mut reader = DigestReader::new(input, ctx);
  let total = io::copy(&mut reader, &mut io::sink()).context("reading input")?;
  debug!(bytes = total, "input consumed");
  Ok(reader.finalize()?.as_ref().to_vec())
}

fn write_digest(out: &mut impl Write, digest: &[u8], encoding: Encoding, newline: bool) -> Result<()> {
  match encoding.render(digest) {
    Some(text) => out.write_all(text.as_bytes()),
    None => out.write_all(digest),
  }
  .context("writing digest")?;
  if newline {
    out.write_all(b"\n").context("writing digest")?;
  }
  Ok(())
}

fn self_test(out: &mut impl Write) -> Result<()> {
  selftest::blake2b()?;
  writeln!(out, "blake2b: ok").context("writing self-test result")?;
  selftest::blake2s()?;
  writeln!(out, "blake2s: ok").context("writing self-test result")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn hex_digest(algorithm: Algorithm, data: &[u8], key: &[u8], length: Option<usize>) -> String {
    b2hash::to_hex(&digest_stream(algorithm, data, key, length).unwrap())
  }

  #[test]
  fn streams_match_one_shot() {
    assert_eq!(
      hex_digest(Algorithm::Blake2s, b"abc", &[], None),
      "508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982"
    );
    let data = vec![0x5a; 10_000];
    for algorithm in [Algorithm::Blake2b, Algorithm::Blake2s] {
      assert_eq!(
        digest_stream(algorithm, &data[..], b"k", Some(24)).unwrap(),
        algorithm.hash(&data, Some(b"k".as_slice()), Some(24)).unwrap()
      );
    }
  }

  #[test]
  fn bad_parameters_fail_before_reading() {
    struct Unreadable;
    impl Read for Unreadable {
      fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        panic!("input must not be read");
      }
    }
    assert!(digest_stream(Algorithm::Blake2s, Unreadable, &[], Some(33)).is_err());
    assert!(digest_stream(Algorithm::Blake2b, Unreadable, &[0; 65], None).is_err());
  }

  #[test]
  fn output_encodings() {
    let digest = [0xfb, 0xff];
    let mut out = Vec::new();
    write_digest(&mut out, &digest, Encoding::Hex, true).unwrap();
    assert_eq!(out, b"fbff\n");

    out.clear();
    write_digest(&mut out, &digest, Encoding::Base64, false).unwrap();
    assert_eq!(out, b"+/8=");

    out.clear();
    write_digest(&mut out, &digest, Encoding::Raw, false).unwrap();
    assert_eq!(out, digest);
  }

  #[test]
  fn self_test_reports_both_variants() {
    let mut out = Vec::new();
    self_test(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "blake2b: ok\nblake2s: ok\n");
  }
}
