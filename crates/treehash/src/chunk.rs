//! Streaming state for the chunk currently being absorbed.

#![allow(clippy::indexing_slicing)] // Fixed-size block buffer parsing

use zeroize::Zeroize;

use crate::compress::{CHUNK_END, CHUNK_START, compress, first_8_words, words16_from_le_bytes};
use crate::output::Output;
use crate::{BLOCK_LEN, CHUNK_LEN};

/// Per-chunk compression state: the running chaining value plus one buffered
/// block.
///
/// A buffered full block is compressed only once further input arrives.
/// This keeps the final block of the stream buffered at finalize time, so
/// its closing flags (CHUNK_END, and ROOT on the root path) can still be
/// applied, and it keeps a chunk ending exactly on the 1024-byte boundary
/// open until the caller either appends more data or finalizes.
#[derive(Clone, Debug, Zeroize)]
pub(crate) struct ChunkState {
  chaining_value: [u32; 8],
  chunk_counter: u64,
  block: [u8; BLOCK_LEN],
  block_len: u8,
  blocks_compressed: u8,
  flags: u32,
}

impl ChunkState {
  #[inline]
  pub fn new(key_words: [u32; 8], chunk_counter: u64, flags: u32) -> Self {
    Self {
      chaining_value: key_words,
      chunk_counter,
      block: [0u8; BLOCK_LEN],
      block_len: 0,
      blocks_compressed: 0,
      flags,
    }
  }

  /// Bytes absorbed into this chunk so far.
  #[inline]
  pub fn len(&self) -> usize {
    BLOCK_LEN * self.blocks_compressed as usize + self.block_len as usize
  }

  #[inline]
  pub fn chunk_counter(&self) -> u64 {
    self.chunk_counter
  }

  #[inline]
  fn start_flag(&self) -> u32 {
    if self.blocks_compressed == 0 { CHUNK_START } else { 0 }
  }

  /// Absorb up to one chunk's worth of bytes. The caller never feeds past
  /// the chunk boundary.
  pub fn update(&mut self, mut input: &[u8]) {
    debug_assert!(self.len() + input.len() <= CHUNK_LEN);

    while !input.is_empty() {
      // More input is arriving, so the buffered block is interior to the
      // chunk and can be compressed now.
      if self.block_len as usize == BLOCK_LEN {
        let block_words = words16_from_le_bytes(&self.block);
        self.chaining_value = first_8_words(compress(
          &self.chaining_value,
          &block_words,
          self.chunk_counter,
          BLOCK_LEN as u32,
          self.flags | self.start_flag(),
        ));
        self.blocks_compressed += 1;
        self.block = [0u8; BLOCK_LEN];
        self.block_len = 0;
      }

      let want = BLOCK_LEN - self.block_len as usize;
      let take = core::cmp::min(want, input.len());
      self.block[self.block_len as usize..self.block_len as usize + take].copy_from_slice(&input[..take]);
      self.block_len += take as u8;
      input = &input[take..];
    }
  }

  /// Close the chunk into its final-block node.
  ///
  /// The buffered block is already zero-padded (the buffer starts zeroed
  /// and is re-zeroed after each compression), and it always carries
  /// CHUNK_END. Whether the node is interior or the root is decided by the
  /// caller.
  #[inline]
  pub fn output(&self) -> Output {
    Output::new(
      self.chaining_value,
      words16_from_le_bytes(&self.block),
      self.chunk_counter,
      self.block_len as u32,
      self.flags | self.start_flag() | CHUNK_END,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn len_counts_compressed_and_buffered_bytes() {
    let mut chunk = ChunkState::new([0u32; 8], 0, 0);
    assert_eq!(chunk.len(), 0);

    chunk.update(&[0xAB; 100]);
    assert_eq!(chunk.len(), 100);

    chunk.update(&[0xCD; 924]);
    assert_eq!(chunk.len(), CHUNK_LEN);
  }

  #[test]
  fn split_updates_match_one_call() {
    let data = [0x5Au8; 300];

    let mut whole = ChunkState::new([1, 2, 3, 4, 5, 6, 7, 8], 9, 0);
    whole.update(&data);

    let mut pieces = ChunkState::new([1, 2, 3, 4, 5, 6, 7, 8], 9, 0);
    for piece in data.chunks(7) {
      pieces.update(piece);
    }

    assert_eq!(whole.output().chaining_value(), pieces.output().chaining_value());
  }

  #[test]
  fn full_chunk_keeps_last_block_buffered() {
    let mut chunk = ChunkState::new([0u32; 8], 0, 0);
    chunk.update(&[0u8; CHUNK_LEN]);
    // 15 compressed blocks plus one buffered: the chunk is full but still
    // open for its closing flags.
    assert_eq!(chunk.len(), CHUNK_LEN);
    assert_eq!(chunk.blocks_compressed, 15);
    assert_eq!(chunk.block_len as usize, BLOCK_LEN);
  }
}
