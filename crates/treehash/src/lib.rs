//! Incremental, tree-structured hashing with extendable output.
//!
//! This crate implements the BLAKE3 construction as a strictly sequential
//! streaming engine: input is absorbed in arbitrary-sized increments, folded
//! into a binary Merkle tree of 1024-byte chunks as it arrives, and served
//! back either as a fixed-length digest or as an arbitrarily long extendable
//! output stream (XOF). Keyed hashing and context-string key derivation are
//! supported through construction [`Options`].
//!
//! Instances have a one-shot output lifecycle: producing the digest zeroes
//! and permanently disables the engine, and abandoned instances can be
//! cleared with [`Blake3::destroy`] (dropping an instance also zeroes it).
//!
//! # Example
//!
//! ```
//! use treehash::Blake3;
//!
//! let mut hasher = Blake3::new();
//! hasher.update(b"hello ")?;
//! hasher.update(b"world")?;
//!
//! let mut out = [0u8; 32];
//! hasher.digest_into(&mut out)?;
//! assert_eq!(out, Blake3::hash(b"hello world"));
//! # Ok::<(), treehash::HashError>(())
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod chunk;
mod compress;
mod hasher;
mod lifecycle;
mod output;
mod tree;

pub use hasher::{Blake3, Options};
pub use traits::{Digest, HashError, Xof};

/// Default digest length and key length, in bytes.
pub const OUT_LEN: usize = 32;
/// Keyed-mode key length, in bytes.
pub const KEY_LEN: usize = 32;
/// Compression block length, in bytes.
pub const BLOCK_LEN: usize = 64;
/// Chunk length, in bytes (16 blocks).
pub const CHUNK_LEN: usize = 1024;
