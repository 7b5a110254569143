//! Core traits for the treehash workspace.
//!
//! This crate provides the capability interface the hash engines in this
//! workspace conform to. It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Digest`] | Streaming hash with a fixed, configured output length |
//! | [`Xof`] | Extendable output drawn from a finalized hash state |
//!
//! # Error Types
//!
//! - [`HashError`] - configuration, usage-sequence, and buffer contract
//!   failures shared by every engine.
//!
//! # Fallibility Discipline
//!
//! Engines in this workspace have a one-shot output lifecycle and an explicit
//! destroy operation, so every streaming call can be rejected. This crate
//! denies `unwrap`, `expect`, and indexing in non-test code to ensure all
//! error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
mod xof;

pub use digest::Digest;
pub use error::HashError;
pub use xof::Xof;
