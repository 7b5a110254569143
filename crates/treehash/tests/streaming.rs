//! Streaming-equivalence and chunk-boundary tests.

use traits::Digest as _;
use treehash::{Blake3, CHUNK_LEN};

// Paint the input with the repeating 0..251 byte pattern so that swapping
// adjacent blocks or chunks cannot produce the same digest.
fn pattern(len: usize) -> Vec<u8> {
  (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn per_byte_updates_match_one_shot_at_chunk_boundaries() {
  for len in [CHUNK_LEN, 2 * CHUNK_LEN, 3 * CHUNK_LEN] {
    let data = pattern(len);
    let expected = *blake3::hash(&data).as_bytes();
    assert_eq!(Blake3::hash(&data), expected, "one-shot, len {len}");

    let mut h = Blake3::new();
    for &byte in &data {
      h.update(&[byte]).unwrap();
    }
    let mut out = [0u8; 32];
    h.digest_into(&mut out).unwrap();
    assert_eq!(out, expected, "per-byte, len {len}");
  }
}

#[test]
fn every_split_point_around_edges_matches() {
  let data = pattern(2 * CHUNK_LEN + 17);
  let expected = Blake3::hash(&data);

  for split in [0, 1, 63, 64, 65, 1023, 1024, 1025, 2047, 2048, 2049, data.len()] {
    let mut h = Blake3::new();
    h.update(&data[..split]).unwrap();
    h.update(&data[split..]).unwrap();
    let mut out = [0u8; 32];
    h.digest_into(&mut out).unwrap();
    assert_eq!(out, expected, "split at {split}");
  }
}

#[test]
fn empty_updates_are_no_ops() {
  let data = pattern(1500);
  let expected = Blake3::hash(&data);

  let mut h = Blake3::new();
  h.update(&[]).unwrap();
  h.update(&data[..700]).unwrap();
  h.update(&[]).unwrap();
  h.update(&data[700..]).unwrap();
  h.update(&[]).unwrap();
  let mut out = [0u8; 32];
  h.digest_into(&mut out).unwrap();
  assert_eq!(out, expected);
}

#[test]
fn update_vectored_matches_concatenation() {
  let data = pattern(2100);
  let expected = Blake3::hash(&data);

  let mut h = Blake3::new();
  h.update_vectored(&[&data[..1000], &data[1000..2000], &data[2000..]])
    .unwrap();
  let mut out = [0u8; 32];
  h.digest_into(&mut out).unwrap();
  assert_eq!(out, expected);
}

#[test]
fn boundary_aligned_inputs_differ_from_padded_neighbors() {
  // A chunk-aligned input and the same input plus one byte must land on
  // different tree shapes and different digests.
  let aligned = pattern(CHUNK_LEN);
  let padded = pattern(CHUNK_LEN + 1);
  assert_ne!(Blake3::hash(&aligned), Blake3::hash(&padded));
}
