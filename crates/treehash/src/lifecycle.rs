//! Shared lifecycle bookkeeping for streaming engines.

use traits::HashError;

/// Tracks the one-shot output lifecycle of an engine instance.
///
/// `finished` is set when the one-shot digest has been served; `destroyed`
/// when the instance has been explicitly zeroed. Both are terminal.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Lifecycle {
  finished: bool,
  destroyed: bool,
}

impl Lifecycle {
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Reject calls on an instance whose lifecycle has ended.
  #[inline]
  pub fn ensure_usable(&self) -> Result<(), HashError> {
    if self.destroyed {
      return Err(HashError::Destroyed);
    }
    if self.finished {
      return Err(HashError::Finalized);
    }
    Ok(())
  }

  #[inline]
  pub fn finish(&mut self) {
    self.finished = true;
  }

  #[inline]
  pub fn destroy(&mut self) {
    self.destroyed = true;
  }
}
