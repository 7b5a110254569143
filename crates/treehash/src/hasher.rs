//! The streaming tree-hash engine.

#![allow(clippy::indexing_slicing)] // Length-checked output and input windows

use traits::{Digest, HashError, Xof};
use zeroize::Zeroize;

use crate::chunk::ChunkState;
use crate::compress::{
  DERIVE_KEY_CONTEXT, DERIVE_KEY_MATERIAL, IV, KEYED_HASH, words8_from_le_bytes, words8_to_le_bytes,
};
use crate::lifecycle::Lifecycle;
use crate::output::{Output, OutputReader};
use crate::tree::CvStack;
use crate::{CHUNK_LEN, KEY_LEN, OUT_LEN};

/// Construction options.
///
/// `key` and `context` are mutually exclusive. `output_len` sizes the
/// one-shot digest only; it does not bound XOF use.
#[derive(Clone, Copy, Default)]
pub struct Options<'a> {
  /// Digest length in bytes; defaults to 32.
  pub output_len: Option<usize>,
  /// 32-byte key selecting the keyed-hash mode.
  pub key: Option<&'a [u8]>,
  /// Context bytes selecting the derive-key mode.
  pub context: Option<&'a [u8]>,
}

/// Incremental tree hash with a one-shot digest and extendable output.
///
/// Input is absorbed in arbitrary-sized increments and folded into a binary
/// Merkle tree of 1024-byte chunks as it arrives. Output is served either
/// once, as a fixed-length digest that destroys the instance, or as an
/// extendable stream whose position persists across reads.
#[derive(Clone, Debug)]
pub struct Blake3 {
  chunk: ChunkState,
  key_words: [u32; 8],
  flags: u32,
  stack: CvStack,
  output_len: usize,
  reader: Option<OutputReader>,
  lifecycle: Lifecycle,
}

/// Hash `context` in a nested derive-key instance to obtain the context key.
///
/// The nested hash always produces exactly 32 bytes, independent of any
/// outer output-length configuration.
fn derive_context_key(context: &[u8]) -> [u32; 8] {
  let mut inner = Blake3::new_internal(IV, DERIVE_KEY_CONTEXT);
  inner.absorb(context);
  inner.root_output().root_words()
}

impl Blake3 {
  /// Construct a plain hasher with the default 32-byte output length.
  #[must_use]
  #[inline]
  pub fn new() -> Self {
    Self::new_internal(IV, 0)
  }

  /// Construct a hasher for the keyed hash function.
  ///
  /// Fails with [`HashError::BadKeyLength`] unless `key` is exactly 32
  /// bytes.
  #[inline]
  pub fn new_keyed(key: &[u8]) -> Result<Self, HashError> {
    let key: &[u8; KEY_LEN] = key
      .try_into()
      .map_err(|_| HashError::BadKeyLength { got: key.len() })?;
    Ok(Self::new_internal(words8_from_le_bytes(key), KEYED_HASH))
  }

  /// Construct a hasher for the key derivation function.
  #[must_use]
  #[inline]
  pub fn new_derive_key(context: &[u8]) -> Self {
    Self::new_internal(derive_context_key(context), DERIVE_KEY_MATERIAL)
  }

  /// Construct a hasher from [`Options`].
  ///
  /// Fails with [`HashError::KeyWithContext`] if both a key and a context
  /// are supplied, or with [`HashError::BadKeyLength`] for a key that is
  /// not exactly 32 bytes. No instance is produced on failure.
  pub fn with_options(opts: Options<'_>) -> Result<Self, HashError> {
    let mut hasher = match (opts.key, opts.context) {
      (Some(_), Some(_)) => return Err(HashError::KeyWithContext),
      (Some(key), None) => Self::new_keyed(key)?,
      (None, Some(context)) => Self::new_derive_key(context),
      (None, None) => Self::new(),
    };
    hasher.output_len = opts.output_len.unwrap_or(OUT_LEN);
    Ok(hasher)
  }

  /// Compute the hash of `input` in one shot.
  #[must_use]
  pub fn hash(input: &[u8]) -> [u8; OUT_LEN] {
    let mut hasher = Self::new();
    hasher.absorb(input);
    words8_to_le_bytes(&hasher.root_output().root_words())
  }

  /// Compute the keyed hash of `input` in one shot.
  #[must_use]
  pub fn keyed_hash(key: &[u8; KEY_LEN], input: &[u8]) -> [u8; OUT_LEN] {
    let mut hasher = Self::new_internal(words8_from_le_bytes(key), KEYED_HASH);
    hasher.absorb(input);
    words8_to_le_bytes(&hasher.root_output().root_words())
  }

  /// Derive a key for `key_material` under `context`, in one shot.
  #[must_use]
  pub fn derive_key(context: &[u8], key_material: &[u8]) -> [u8; OUT_LEN] {
    let mut hasher = Self::new_internal(derive_context_key(context), DERIVE_KEY_MATERIAL);
    hasher.absorb(key_material);
    words8_to_le_bytes(&hasher.root_output().root_words())
  }

  /// Digest length served by [`digest_into`](Self::digest_into).
  #[must_use]
  #[inline]
  pub fn output_len(&self) -> usize {
    self.output_len
  }

  #[inline]
  fn new_internal(key_words: [u32; 8], flags: u32) -> Self {
    Self {
      chunk: ChunkState::new(key_words, 0, flags),
      key_words,
      flags,
      stack: CvStack::new(),
      output_len: OUT_LEN,
      reader: None,
      lifecycle: Lifecycle::new(),
    }
  }

  /// Absorb `input`, closing chunks into the tree at 1024-byte boundaries.
  ///
  /// A full chunk is closed only when more input arrives behind it, so an
  /// input ending exactly on a chunk boundary leaves that chunk open for
  /// finalize to mark as the root path.
  fn absorb(&mut self, mut input: &[u8]) {
    while !input.is_empty() {
      if self.chunk.len() == CHUNK_LEN {
        let chunk_cv = self.chunk.output().chaining_value();
        let total_chunks = self.chunk.chunk_counter() + 1;
        self.stack.add_chunk(chunk_cv, total_chunks, &self.key_words, self.flags);
        self.chunk = ChunkState::new(self.key_words, total_chunks, self.flags);
      }

      let want = CHUNK_LEN - self.chunk.len();
      let take = core::cmp::min(want, input.len());
      self.chunk.update(&input[..take]);
      input = &input[take..];
    }
  }

  /// Close the tree: merge the final chunk up through the pending subtrees,
  /// most recently completed first. The resulting node is the root.
  fn root_output(&self) -> Output {
    let mut output = self.chunk.output();
    let mut remaining = self.stack.len();
    while remaining > 0 {
      remaining -= 1;
      output = Output::parent(
        self.stack.get(remaining),
        output.chaining_value(),
        &self.key_words,
        self.flags,
      );
    }
    output
  }

  /// Overwrite every secret-bearing field with zeros.
  fn wipe(&mut self) {
    self.chunk.zeroize();
    self.key_words.zeroize();
    self.stack.zeroize();
    self.reader.zeroize();
    self.flags = 0;
  }

  /// Absorb more input.
  ///
  /// Fails with [`HashError::Finalized`] once any output has been
  /// requested, or [`HashError::Destroyed`] after destruction.
  pub fn update(&mut self, input: &[u8]) -> Result<(), HashError> {
    self.lifecycle.ensure_usable()?;
    if self.reader.is_some() {
      return Err(HashError::Finalized);
    }
    self.absorb(input);
    Ok(())
  }

  /// Serve the one-shot digest into the front of `out`, then destroy the
  /// instance.
  ///
  /// Exactly [`output_len`](Self::output_len) bytes are written. Fails with
  /// [`HashError::OutputBufferTooSmall`], before any state mutation, if
  /// `out` is shorter than that.
  pub fn digest_into(&mut self, out: &mut [u8]) -> Result<(), HashError> {
    self.lifecycle.ensure_usable()?;
    if self.reader.is_some() {
      return Err(HashError::Finalized);
    }
    if out.len() < self.output_len {
      return Err(HashError::OutputBufferTooSmall {
        needed: self.output_len,
        got: out.len(),
      });
    }

    let mut reader = OutputReader::new(self.root_output());
    reader.squeeze(&mut out[..self.output_len]);
    reader.zeroize();

    self.wipe();
    self.lifecycle.finish();
    Ok(())
  }

  /// Serve the one-shot digest as a vector, then destroy the instance.
  #[cfg(feature = "alloc")]
  pub fn digest(&mut self) -> Result<alloc::vec::Vec<u8>, HashError> {
    let mut out = alloc::vec![0u8; self.output_len];
    self.digest_into(&mut out)?;
    Ok(out)
  }

  /// Squeeze `out.len()` bytes of extendable output into `out`.
  ///
  /// The first call finalizes the hash; the stream position persists, so
  /// later calls continue where the previous one stopped. Fails with
  /// [`HashError::Finalized`] once a one-shot digest has been produced.
  pub fn xof_into(&mut self, out: &mut [u8]) -> Result<(), HashError> {
    self.lifecycle.ensure_usable()?;
    if self.reader.is_none() {
      self.reader = Some(OutputReader::new(self.root_output()));
    }
    if let Some(reader) = self.reader.as_mut() {
      reader.squeeze(out);
    }
    Ok(())
  }

  /// Squeeze `len` bytes of extendable output as a vector.
  #[cfg(feature = "alloc")]
  pub fn xof(&mut self, len: usize) -> Result<alloc::vec::Vec<u8>, HashError> {
    let mut out = alloc::vec![0u8; len];
    self.xof_into(&mut out)?;
    Ok(out)
  }

  /// Overwrite all secret-bearing state with zeros and permanently disable
  /// the instance. Idempotent.
  pub fn destroy(&mut self) {
    self.wipe();
    self.lifecycle.destroy();
  }
}

impl Default for Blake3 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Drop for Blake3 {
  fn drop(&mut self) {
    self.destroy();
  }
}

impl Digest for Blake3 {
  #[inline]
  fn output_len(&self) -> usize {
    Blake3::output_len(self)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
    Blake3::update(self, data)
  }

  #[inline]
  fn digest_into(&mut self, out: &mut [u8]) -> Result<(), HashError> {
    Blake3::digest_into(self, out)
  }

  #[inline]
  fn destroy(&mut self) {
    Blake3::destroy(self)
  }
}

impl Xof for Blake3 {
  #[inline]
  fn squeeze_into(&mut self, out: &mut [u8]) -> Result<(), HashError> {
    self.xof_into(out)
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use super::*;

  const KEY: &[u8; KEY_LEN] = b"whats the Elvish word for friend";
  const CONTEXT: &[u8] = b"BLAKE3 2019-12-27 16:29:52 test vectors context";

  fn hex_to_bytes(hex: &str, out: &mut [u8]) {
    assert_eq!(hex.len(), out.len() * 2);
    for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
      let hi = (chunk[0] as char).to_digit(16).unwrap();
      let lo = (chunk[1] as char).to_digit(16).unwrap();
      out[i] = ((hi << 4) | lo) as u8;
    }
  }

  #[test]
  fn empty_input_anchor() {
    let expected_hex = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";
    let mut expected = [0u8; OUT_LEN];
    hex_to_bytes(expected_hex, &mut expected);

    assert_eq!(Blake3::hash(&[]), expected);

    let mut hasher = Blake3::new();
    let mut out = [0u8; OUT_LEN];
    hasher.digest_into(&mut out).unwrap();
    assert_eq!(out, expected);
  }

  #[test]
  fn empty_input_xof_prefix_anchor() {
    let expected_hex = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262e00f03e7b69af26b7faaf09fcd333050338ddfe085b8cc869ca98b206c08243a26f5487789e8f660afe6c99ef9e0c52b92e7393024a80459cf91f476f9ffdbda7001c22e159b402631f277ca96f2defdf1078282314e763699a31c5363165421cce14d";
    let mut expected = [0u8; 131];
    hex_to_bytes(expected_hex, &mut expected);

    let mut hasher = Blake3::new();
    let mut out = [0u8; 131];
    hasher.xof_into(&mut out).unwrap();
    assert_eq!(out[..], expected[..]);
  }

  #[test]
  fn single_byte_anchors() {
    // Official vector inputs: the repeating 0..251 pattern starts with 0x00.
    let cases: [(&[u8], &str); 3] = [
      (&[0x00], "2d3adedff11b61f14c886e35afa036736dcd87a74d27b5c1510225d0f592e213"),
      (&[0x01], "48fc721fbbc172e0925fa27af1671de225ba927134802998b10a1568a188652b"),
      (&[0xFF], "99d44d377bc5936d8cb7f5df90713d84c7587739b4724d3d2f9af1ee0e4c8efd"),
    ];
    for (input, hex) in cases {
      let mut expected = [0u8; OUT_LEN];
      hex_to_bytes(hex, &mut expected);
      assert_eq!(Blake3::hash(input), expected);
    }
  }

  #[test]
  fn keyed_and_derive_empty_anchors() {
    let mut expected_keyed = [0u8; OUT_LEN];
    hex_to_bytes(
      "92b2b75604ed3c761f9d6f62392c8a9227ad0ea3f09573e783f1498a4ed60d26",
      &mut expected_keyed,
    );
    assert_eq!(Blake3::keyed_hash(KEY, &[]), expected_keyed);

    let mut expected_derive = [0u8; OUT_LEN];
    hex_to_bytes(
      "2cc39783c223154fea8dfb7c1b1660f2ac2dcbd1c1de8277b0b0dd39b7e50d7d",
      &mut expected_derive,
    );
    let mut hasher = Blake3::new_derive_key(CONTEXT);
    let mut out = [0u8; OUT_LEN];
    hasher.digest_into(&mut out).unwrap();
    assert_eq!(out, expected_derive);
  }

  #[test]
  fn one_shot_matches_streaming() {
    let data: alloc::vec::Vec<u8> = (0..3000usize).map(|i| (i % 251) as u8).collect();
    let expected = Blake3::hash(&data);

    let mut hasher = Blake3::new();
    for piece in data.chunks(113) {
      hasher.update(piece).unwrap();
    }
    let mut out = [0u8; OUT_LEN];
    hasher.digest_into(&mut out).unwrap();
    assert_eq!(out, expected);
  }

  #[test]
  fn digest_is_the_xof_prefix() {
    let mut by_digest = Blake3::new();
    by_digest.update(b"prefix relation").unwrap();
    let mut digest = [0u8; OUT_LEN];
    by_digest.digest_into(&mut digest).unwrap();

    let mut by_xof = Blake3::new();
    by_xof.update(b"prefix relation").unwrap();
    let mut stream = [0u8; 96];
    by_xof.xof_into(&mut stream).unwrap();

    assert_eq!(stream[..OUT_LEN], digest[..]);
  }
}
