//! Finalized nodes and the extendable output stream.

#![allow(clippy::indexing_slicing)] // Fixed-size output buffer parsing

use zeroize::Zeroize;

use crate::BLOCK_LEN;
use crate::compress::{PARENT, ROOT, compress, first_8_words, words16_to_le_bytes};

/// A finalized node: everything needed to re-run its last compression.
///
/// Interior nodes fold the compression to an 8-word chaining value. The
/// root node re-invokes the same compression with ROOT set and an
/// output-block counter in place of the chunk counter, exposing the full
/// 16-word state as one 64-byte output block per counter value.
#[derive(Clone, Debug, Zeroize)]
pub(crate) struct Output {
  input_chaining_value: [u32; 8],
  block_words: [u32; 16],
  counter: u64,
  block_len: u32,
  flags: u32,
}

impl Output {
  #[inline]
  pub fn new(
    input_chaining_value: [u32; 8],
    block_words: [u32; 16],
    counter: u64,
    block_len: u32,
    flags: u32,
  ) -> Self {
    Self {
      input_chaining_value,
      block_words,
      counter,
      block_len,
      flags,
    }
  }

  /// A parent node over two child chaining values.
  ///
  /// Parent compressions always use the instance IV as their chaining
  /// value, a full 64-byte block, and counter 0.
  #[inline]
  pub fn parent(left: [u32; 8], right: [u32; 8], key_words: &[u32; 8], flags: u32) -> Self {
    let mut block_words = [0u32; 16];
    block_words[..8].copy_from_slice(&left);
    block_words[8..].copy_from_slice(&right);
    Self {
      input_chaining_value: *key_words,
      block_words,
      counter: 0,
      block_len: BLOCK_LEN as u32,
      flags: flags | PARENT,
    }
  }

  /// The folded chaining value of an interior (non-root) node.
  #[inline]
  pub fn chaining_value(&self) -> [u32; 8] {
    first_8_words(compress(
      &self.input_chaining_value,
      &self.block_words,
      self.counter,
      self.block_len,
      self.flags,
    ))
  }

  /// The first 8 words of the root stream (the fixed-length digest).
  #[inline]
  pub fn root_words(&self) -> [u32; 8] {
    first_8_words(compress(
      &self.input_chaining_value,
      &self.block_words,
      0,
      self.block_len,
      self.flags | ROOT,
    ))
  }

  /// Output block `block_counter` of the root stream.
  #[inline]
  fn root_block(&self, block_counter: u64) -> [u8; BLOCK_LEN] {
    words16_to_le_bytes(&compress(
      &self.input_chaining_value,
      &self.block_words,
      block_counter,
      self.block_len,
      self.flags | ROOT,
    ))
  }
}

/// Counter-mode stream over a root node.
///
/// Stream position is preserved across squeezes, so repeated reads continue
/// the output rather than restarting it.
#[derive(Clone, Debug, Zeroize)]
pub(crate) struct OutputReader {
  output: Output,
  block_counter: u64,
  buf: [u8; BLOCK_LEN],
  buf_pos: usize,
}

impl OutputReader {
  #[inline]
  pub fn new(output: Output) -> Self {
    Self {
      output,
      block_counter: 0,
      buf: [0u8; BLOCK_LEN],
      buf_pos: BLOCK_LEN,
    }
  }

  #[inline]
  fn refill(&mut self) {
    self.buf = self.output.root_block(self.block_counter);
    self.block_counter = self.block_counter.wrapping_add(1);
    self.buf_pos = 0;
  }

  pub fn squeeze(&mut self, mut out: &mut [u8]) {
    // Drain any buffered bytes first.
    if self.buf_pos != BLOCK_LEN && !out.is_empty() {
      let take = core::cmp::min(BLOCK_LEN - self.buf_pos, out.len());
      out[..take].copy_from_slice(&self.buf[self.buf_pos..self.buf_pos + take]);
      self.buf_pos += take;
      out = &mut out[take..];
    }

    while !out.is_empty() {
      self.refill();
      let take = core::cmp::min(BLOCK_LEN, out.len());
      out[..take].copy_from_slice(&self.buf[..take]);
      self.buf_pos = take;
      out = &mut out[take..];
    }
  }
}
