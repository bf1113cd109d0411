//! Atomically published immutable snapshot.
//!
//! One writer replaces the whole value; readers clone an `Arc` to whatever
//! was published last and never see a value being built.
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct SnapshotCell<T> {
    inner: RwLock<Arc<T>>,
}

impl<T> SnapshotCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(Arc::new(value)),
        }
    }

    pub fn publish(&self, value: T) {
        let next = Arc::new(value);
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = next;
    }

    pub fn load(&self) -> Arc<T> {
        let slot = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&slot)
    }
}
