//! Streams produced by flate2 at every compression level must inflate back to
//! their input.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use quickcheck_macros::quickcheck;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rawinflate::deflate::{inflate, inflate_bytes, inflate_with_options, BlockKind, InflateOptions};

fn compress(data: &[u8], level: u32) -> Vec<u8> {
  let mut c = DeflateEncoder::new(Vec::new(), Compression::new(level));
  c.write_all(data).unwrap();
  c.finish().unwrap()
}

/// Text-like data with plenty of repeats, drawn from a small vocabulary
fn random_words(rng: &mut StdRng, nwords: usize) -> Vec<u8> {
  let vocab = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta"];
  let mut out = Vec::new();
  for _ in 0..nwords {
    out.extend_from_slice(vocab[rng.gen_range(0..vocab.len())].as_bytes());
    out.push(b' ');
  }
  out
}

#[test]
fn every_level_roundtrips() {
  let mut rng = StdRng::seed_from_u64(1951);
  let data = random_words(&mut rng, 5000);
  for level in 0..=9 {
    let compressed = compress(&data, level);
    assert_eq!(inflate_bytes(&compressed).unwrap(), data, "level {}", level);
  }
}

#[test]
fn stored_blocks_at_level_zero() {
  let mut rng = StdRng::seed_from_u64(7);
  let data: Vec<u8> = (0..100_000).map(|_| rng.gen()).collect();
  let compressed = compress(&data, 0);
  let stream = inflate_with_options(&compressed[..], InflateOptions::default()).unwrap();
  let stored: Vec<_> = stream
    .blocks
    .iter()
    .filter(|b| b.kind == BlockKind::Uncompressed)
    .collect();
  // A stored block holds at most 65535 bytes
  assert!(stored.len() >= 2);
  assert!(stored.iter().all(|b| b.decoded_len <= 65535));
  assert!(stream.blocks.last().unwrap().bfinal);
  assert_eq!(stream.data(), &data[..]);
}

#[test]
fn long_input_uses_whole_window() {
  let mut rng = StdRng::seed_from_u64(42);
  let chunk: Vec<u8> = (0..20_000).map(|_| rng.gen()).collect();
  let mut data = chunk.clone();
  data.extend_from_slice(&random_words(&mut rng, 2000));
  data.extend_from_slice(&chunk);
  let compressed = compress(&data, 9);
  assert_eq!(inflate(&compressed[..]).unwrap(), data);
}

#[test]
fn non_power_of_two_window() {
  let mut rng = StdRng::seed_from_u64(3);
  let data = random_words(&mut rng, 3000);
  let compressed = compress(&data, 6);
  let opts = InflateOptions {
    window_size: 32768 + 1000,
    ..Default::default()
  };
  let stream = inflate_with_options(&compressed[..], opts).unwrap();
  assert_eq!(stream.into_byte_stream(), data);
}

#[test]
fn flate2_streams_pass_strict_checks() {
  let mut rng = StdRng::seed_from_u64(11);
  let data = random_words(&mut rng, 1000);
  let compressed = compress(&data, 6);
  let opts = InflateOptions {
    strict_distances: true,
    reject_trailing_data: true,
    ..Default::default()
  };
  assert_eq!(
    inflate_with_options(&compressed[..], opts).unwrap().data(),
    &data[..]
  );
}

#[quickcheck]
fn arbitrary_bytes_roundtrip(data: Vec<u8>, level: u8) -> bool {
  let compressed = compress(&data, u32::from(level % 10));
  inflate_bytes(&compressed).unwrap() == data
}

#[quickcheck]
fn truncated_streams_report_end_of_stream(data: Vec<u8>, cut: usize) -> bool {
  let compressed = compress(&data, 6);
  let cut = cut % compressed.len();
  // The final block always ends in the last byte, so any cut loses part of it
  match inflate_bytes(&compressed[..cut]) {
    Err(e) => e.is_end_of_stream(),
    Ok(_) => false,
  }
}
