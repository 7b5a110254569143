#![no_main]

use libfuzzer_sys::fuzz_target;
use traits::Xof as _;
use treehash::Blake3;

fn parse_u16_le(input: &[u8]) -> u16 {
  match input.len() {
    0 => 0,
    1 => input[0] as u16,
    _ => u16::from_le_bytes([input[0], input[1]]),
  }
}

fuzz_target!(|data: &[u8]| {
  let ours = Blake3::hash(data);
  let expected = *blake3::hash(data).as_bytes();
  assert_eq!(ours, expected);

  // Keyed hash mode
  {
    let key_bytes = data.get(..32).unwrap_or(data);
    let mut key = [0u8; 32];
    key[..key_bytes.len()].copy_from_slice(key_bytes);

    let ours = Blake3::keyed_hash(&key, data);
    let expected = *blake3::keyed_hash(&key, data).as_bytes();
    assert_eq!(ours, expected);
  }

  // Derive-key mode (ASCII context so the official crate's `&str` API
  // accepts it too).
  {
    let ctx_len = (data.first().copied().unwrap_or(0) as usize) % 65;
    let ctx_src = data.get(32..).unwrap_or(&[]);
    let ctx_len = core::cmp::min(ctx_len, ctx_src.len());
    let mut context = String::with_capacity(ctx_len);
    for &b in &ctx_src[..ctx_len] {
      context.push((b'a' + (b % 26)) as char);
    }

    let ours = Blake3::derive_key(context.as_bytes(), data);
    let expected = blake3::derive_key(&context, data);
    assert_eq!(ours, expected);
  }

  // Streaming at fuzz-chosen split points, then XOF with multi-squeeze.
  let out_len = (parse_u16_le(data) as usize) % 2049;
  let split = if out_len == 0 {
    0usize
  } else {
    data.get(2).copied().unwrap_or(0) as usize % (out_len + 1)
  };

  let mut ours_xof = vec![0u8; out_len];
  {
    let mut h = Blake3::new();
    let mid = data.len() / 2;
    h.update(&data[..mid]).unwrap();
    h.update(&data[mid..]).unwrap();
    h.squeeze_into(&mut ours_xof[..split]).unwrap();
    h.squeeze_into(&mut ours_xof[split..]).unwrap();
  }

  let mut expected_xof = vec![0u8; out_len];
  {
    let mut hasher = blake3::Hasher::new();
    hasher.update(data);
    let mut out = hasher.finalize_xof();
    out.fill(&mut expected_xof[..split]);
    out.fill(&mut expected_xof[split..]);
  }
  assert_eq!(ours_xof, expected_xof);
});
