//! Extendable-output function (XOF) trait.

use crate::digest::Digest;
use crate::error::HashError;

/// Extendable-output function producing an arbitrary number of bytes.
///
/// Repeated squeezes continue the output stream: the first `n` bytes of a
/// longer squeeze equal a shorter one over the same input (strict prefix
/// relation). The stream becomes unavailable once a one-shot digest has been
/// produced, since the digest path destroys the state the stream reads from.
///
/// This trait intentionally has no `std::io::Read` dependency; it is usable
/// in `no_std` environments.
pub trait Xof: Digest {
  /// Squeeze `out.len()` output bytes into `out`, advancing the stream.
  ///
  /// The first call finalizes the hash; later updates fail. Fails with
  /// [`HashError::Finalized`] if a one-shot digest was already produced.
  fn squeeze_into(&mut self, out: &mut [u8]) -> Result<(), HashError>;

  /// Squeeze `len` output bytes, advancing the stream.
  #[cfg(feature = "alloc")]
  #[inline]
  fn squeeze(&mut self, len: usize) -> Result<alloc::vec::Vec<u8>, HashError> {
    let mut out = alloc::vec![0u8; len];
    self.squeeze_into(&mut out)?;
    Ok(out)
  }
}
