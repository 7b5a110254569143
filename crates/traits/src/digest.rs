//! Streaming digest trait.
//!
//! Unlike a conventional re-runnable hasher, engines behind this trait have a
//! one-shot output lifecycle: producing the digest consumes and securely
//! destroys the state, so every operation is fallible.

use crate::error::HashError;

/// Streaming hash function producing a fixed, configured number of output
/// bytes.
///
/// The output length is an instance property (configured at construction),
/// not an associated constant, so a single engine type can serve differently
/// sized digests.
///
/// # Lifecycle
///
/// An instance is created, updated zero or more times, and then asked for
/// output exactly once; [`digest_into`](Self::digest_into) zeroes and
/// permanently disables the instance after serving the digest. Instances
/// holding key material that are abandoned before producing output must be
/// released via [`destroy`](Self::destroy).
pub trait Digest: Clone {
  /// Number of bytes [`digest_into`](Self::digest_into) will produce.
  #[must_use]
  fn output_len(&self) -> usize;

  /// Update the hasher with additional data.
  ///
  /// Fails with [`HashError::Finalized`] once output has been requested and
  /// with [`HashError::Destroyed`] after destruction.
  fn update(&mut self, data: &[u8]) -> Result<(), HashError>;

  /// Update the hasher with multiple non-contiguous buffers.
  ///
  /// Semantics are identical to calling [`update`](Self::update) on each
  /// buffer in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) -> Result<(), HashError> {
    for buf in bufs {
      self.update(buf)?;
    }
    Ok(())
  }

  /// Finalize, write exactly [`output_len`](Self::output_len) bytes into the
  /// front of `out`, and destroy the instance.
  ///
  /// Fails with [`HashError::OutputBufferTooSmall`] (before any state
  /// mutation) if `out` is shorter than the configured output length.
  fn digest_into(&mut self, out: &mut [u8]) -> Result<(), HashError>;

  /// Finalize and return the digest, destroying the instance.
  #[cfg(feature = "alloc")]
  #[inline]
  fn digest(&mut self) -> Result<alloc::vec::Vec<u8>, HashError> {
    let mut out = alloc::vec![0u8; self.output_len()];
    self.digest_into(&mut out)?;
    Ok(out)
  }

  /// Overwrite all secret-bearing state with zeros and permanently disable
  /// the instance. Idempotent.
  fn destroy(&mut self);
}
