// stepwise/src/core/shared_context.rs
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lockable state for one workflow run.
///
/// Cloning is cheap and every clone points at the same data. The locks are
/// blocking `parking_lot` locks: guards MUST be dropped before any `.await`.
#[derive(Debug)]
pub struct SharedContext<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> SharedContext<T> {
  pub fn new(data: T) -> Self {
    SharedContext(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
    self.0.try_read()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, T>> {
    self.0.try_write()
  }

  /// Reads one value out of the context under a short-lived read guard.
  pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
    f(&self.0.read())
  }

  /// Takes the data back out once no other clone is alive.
  /// Returns the context unchanged if it is still shared.
  pub fn try_into_inner(self) -> Result<T, Self> {
    Arc::try_unwrap(self.0)
      .map(|lock| lock.into_inner())
      .map_err(SharedContext)
  }
}

impl<T: Clone + Send + Sync + 'static> SharedContext<T> {
  /// Clones the current state.
  pub fn snapshot(&self) -> T {
    self.0.read().clone()
  }
}

impl<T: Send + Sync + 'static> Clone for SharedContext<T> {
  fn clone(&self) -> Self {
    SharedContext(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for SharedContext<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
