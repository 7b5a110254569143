//! Error types for streaming hash engines.
//!
//! One shared taxonomy covers every engine in the workspace: configuration
//! errors raised at construction, usage-sequence errors raised when the
//! one-shot output lifecycle is violated, and buffer contract errors raised
//! before any state mutation.

use core::fmt;

/// A streaming hash operation failed.
///
/// All failures are synchronous and local to the rejected call: the engine's
/// state is unchanged (construction failures never produce an instance, and
/// operations on a destroyed instance have nothing left to corrupt).
///
/// # Examples
///
/// ```
/// use traits::HashError;
///
/// fn check_key(key: &[u8]) -> Result<(), HashError> {
///   if key.len() == 32 {
///     Ok(())
///   } else {
///     Err(HashError::BadKeyLength { got: key.len() })
///   }
/// }
///
/// assert!(check_key(&[0u8; 16]).is_err());
/// assert!(check_key(&[0u8; 32]).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HashError {
  /// A key and a derive-key context were both supplied at construction.
  ///
  /// The keyed-hash and derive-key modes are mutually exclusive.
  KeyWithContext,

  /// The supplied key is not exactly 32 bytes.
  BadKeyLength {
    /// Length of the rejected key, in bytes.
    got: usize,
  },

  /// The instance has already produced its one-shot digest (or the XOF
  /// stream has begun) and cannot accept this call.
  Finalized,

  /// The instance was destroyed; its buffers are zeroed and it is
  /// permanently unusable.
  Destroyed,

  /// The caller-supplied output buffer is shorter than the configured
  /// output length.
  OutputBufferTooSmall {
    /// Configured output length, in bytes.
    needed: usize,
    /// Length of the rejected buffer, in bytes.
    got: usize,
  },
}

impl fmt::Display for HashError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::KeyWithContext => f.write_str("key and context are mutually exclusive"),
      Self::BadKeyLength { got } => write!(f, "key must be exactly 32 bytes, got {got}"),
      Self::Finalized => f.write_str("hash instance already finalized"),
      Self::Destroyed => f.write_str("hash instance destroyed"),
      Self::OutputBufferTooSmall { needed, got } => {
        write!(f, "output buffer too small: need {needed} bytes, got {got}")
      }
    }
  }
}

impl core::error::Error for HashError {}
